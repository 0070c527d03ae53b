//! Sentence normalization: tokenization plus stopword and punctuation removal.
//!
//! Tokens keep their surface case. Stopwords are matched case-insensitively,
//! and sense lookup folds case on its own, so "The" is dropped and "Car"
//! still finds the senses of "car".

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ScorerError;

/// The NLTK English stopword list.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

// Abbreviations, numbers, words with inner hyphens/apostrophes, then any
// other single non-space character.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        (?:[A-Za-z]\.){2,}
        | \d+(?:[.,:]\d+)*
        | \w+(?:[-'’]\w+)*
        | [^\w\s]
        ",
    )
    .expect("token pattern compiles")
});

const CLITICS: &[&str] = &["'s", "'re", "'ve", "'ll", "'d", "'m"];

/// Split text into word, number and punctuation tokens.
///
/// Negations and clitics are split the way Treebank tokenizers do:
/// `"don't"` becomes `["do", "n't"]`, `"bus's"` becomes `["bus", "'s"]`.
///
/// ```
/// use topic_scorer::tokenize;
///
/// assert_eq!(
///     tokenize("The bus wasn't late."),
///     vec!["The", "bus", "was", "n't", "late", "."]
/// );
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for m in TOKEN_RE.find_iter(text) {
        let token = m.as_str().replace('’', "'");
        split_clitic(token, &mut tokens);
    }
    tokens
}

fn split_clitic(token: String, out: &mut Vec<String>) {
    let lower = token.to_ascii_lowercase();
    if lower.len() > 3 && lower.ends_with("n't") {
        let cut = token.len() - 3;
        out.push(token[..cut].to_string());
        out.push(token[cut..].to_string());
        return;
    }
    for clitic in CLITICS {
        if lower.len() > clitic.len() && lower.ends_with(clitic) {
            let cut = token.len() - clitic.len();
            out.push(token[..cut].to_string());
            out.push(token[cut..].to_string());
            return;
        }
    }
    out.push(token);
}

/// True when a token has no letters or digits.
pub fn is_punctuation(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_alphanumeric)
}

/// Case-insensitive stopword set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    pub fn english() -> Self {
        Self::from_words(ENGLISH_STOPWORDS)
    }

    /// An empty set; only punctuation filtering applies.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Read one stopword per line; blank lines and `#` comments are skipped.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScorerError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScorerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_words(
            text.lines().filter(|line| !line.trim_start().starts_with('#')),
        ))
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(&token.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Tokenizer plus filters. Holds no state between calls.
#[derive(Clone, Debug)]
pub struct Normalizer {
    stopwords: Stopwords,
    keep_punctuation: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Stopwords::english())
    }
}

impl Normalizer {
    pub fn new(stopwords: Stopwords) -> Self {
        Self {
            stopwords,
            keep_punctuation: false,
        }
    }

    /// Keep punctuation tokens; they then score as misses because they have
    /// no senses.
    pub fn keep_punctuation(mut self, keep: bool) -> Self {
        self.keep_punctuation = keep;
        self
    }

    pub fn stopwords(&self) -> &Stopwords {
        &self.stopwords
    }

    /// Content tokens of `phrase`, in order.
    pub fn normalize(&self, phrase: &str) -> Vec<String> {
        tokenize(phrase)
            .into_iter()
            .filter(|token| !self.stopwords.contains(token))
            .filter(|token| self.keep_punctuation || !is_punctuation(token))
            .collect()
    }
}

static DEFAULT_NORMALIZER: LazyLock<Normalizer> = LazyLock::new(Normalizer::default);

/// Normalize with the English stopword list, dropping punctuation.
///
/// ```
/// use topic_scorer::normalize;
///
/// assert_eq!(normalize("The bus was late again."), vec!["bus", "late"]);
/// ```
pub fn normalize(phrase: &str) -> Vec<String> {
    DEFAULT_NORMALIZER.normalize(phrase)
}
