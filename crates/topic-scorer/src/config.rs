//! Environment-driven configuration.
//!
//! | variable | meaning | default |
//! |---|---|---|
//! | `WORDNET_DIR` | dictionary directory with `data.*`/`index.*` | required |
//! | `WORDNET_LOAD_MODE` | `mmap` or `owned` | `mmap` |
//! | `TOPIC_THRESHOLD` | hit threshold | `0.6` |
//! | `TOPIC_RETURN_HITS` | `1`/`true` to report hit tokens | off |
//! | `TOPIC_STOPWORDS` | newline-delimited stopword file | built-in English list |
//! | `TOPIC_KEEP_PUNCTUATION` | `1`/`true` to keep punctuation tokens | off |

use std::env;
use std::path::PathBuf;

use tracing::info;
use wordnet_db::LoadMode;

use crate::error::ScorerError;
use crate::lexicon::WordNetLexicon;
use crate::normalize::{Normalizer, Stopwords};
use crate::scorer::{DEFAULT_THRESHOLD, ScoreOptions};
use crate::service::TopicScorer;

#[derive(Clone, Debug, PartialEq)]
pub struct ScorerConfig {
    pub wordnet_dir: PathBuf,
    pub load_mode: LoadMode,
    pub threshold: f64,
    pub return_hits: bool,
    pub stopwords_path: Option<PathBuf>,
    pub keep_punctuation: bool,
}

impl ScorerConfig {
    /// Defaults for everything except the dictionary location.
    pub fn new(wordnet_dir: impl Into<PathBuf>) -> Self {
        Self {
            wordnet_dir: wordnet_dir.into(),
            load_mode: LoadMode::Mmap,
            threshold: DEFAULT_THRESHOLD,
            return_hits: false,
            stopwords_path: None,
            keep_punctuation: false,
        }
    }

    pub fn from_env() -> Result<Self, ScorerError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source. Unset variables take their defaults;
    /// set but unparsable ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScorerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let wordnet_dir = var("WORDNET_DIR")
            .map(PathBuf::from)
            .ok_or_else(|| ScorerError::config("WORDNET_DIR is not set"))?;
        let mut config = Self::new(wordnet_dir);

        if let Some(raw) = var("WORDNET_LOAD_MODE") {
            config.load_mode = LoadMode::parse(&raw).ok_or_else(|| {
                ScorerError::config(format!("WORDNET_LOAD_MODE must be mmap or owned, got {raw:?}"))
            })?;
        }
        if let Some(raw) = var("TOPIC_THRESHOLD") {
            config.threshold = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|t| t.is_finite())
                .ok_or_else(|| {
                    ScorerError::config(format!("TOPIC_THRESHOLD must be a number, got {raw:?}"))
                })?;
        }
        if let Some(raw) = var("TOPIC_RETURN_HITS") {
            config.return_hits = parse_flag("TOPIC_RETURN_HITS", &raw)?;
        }
        if let Some(raw) = var("TOPIC_KEEP_PUNCTUATION") {
            config.keep_punctuation = parse_flag("TOPIC_KEEP_PUNCTUATION", &raw)?;
        }
        config.stopwords_path = var("TOPIC_STOPWORDS").map(PathBuf::from);
        Ok(config)
    }

    pub fn options(&self) -> ScoreOptions {
        ScoreOptions::default()
            .with_threshold(self.threshold)
            .with_hits(self.return_hits)
    }

    /// The configured normalizer; reads the stopword file if one is set.
    pub fn normalizer(&self) -> Result<Normalizer, ScorerError> {
        let stopwords = match &self.stopwords_path {
            Some(path) => Stopwords::from_file(path)?,
            None => Stopwords::english(),
        };
        Ok(Normalizer::new(stopwords).keep_punctuation(self.keep_punctuation))
    }

    /// Load the dictionary and assemble a scorer.
    pub fn build(&self) -> Result<TopicScorer<WordNetLexicon>, ScorerError> {
        let normalizer = self.normalizer()?;
        info!(
            threshold = self.threshold,
            return_hits = self.return_hits,
            stopwords = normalizer.stopwords().len(),
            "building topic scorer"
        );
        let lexicon = WordNetLexicon::load(&self.wordnet_dir, self.load_mode)?;
        Ok(TopicScorer::new(lexicon)
            .with_normalizer(normalizer)
            .with_options(self.options()))
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool, ScorerError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ScorerError::config(format!("{name} must be a boolean, got {raw:?}"))),
    }
}
