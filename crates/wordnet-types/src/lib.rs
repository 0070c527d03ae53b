//! Shared types for WordNet lookups and sense naming.
//!
//! Text fields borrow from a backing buffer (`&str`) so a loaded database can
//! hand out views without copying; numeric fields keep their raw
//! representation (`offset`, `lex_id`, pointer source/target indices).
//!
//! Use [`Pos`] and [`SynsetId`] to key into a database, [`Synset`] and
//! [`IndexEntry`] to inspect parsed records, and [`SenseKey`] to name a synset
//! the way topic dictionaries do (`car.n.01`).
//!
//! ```rust
//! use wordnet_types::{SenseKey, SynsetType};
//!
//! let key: SenseKey = "car.n.01".parse().unwrap();
//! assert_eq!(key.lemma, "car");
//! assert_eq!(key.synset_type, SynsetType::Noun);
//! assert_eq!(key.sense, 1);
//! assert_eq!(key.to_string(), "car.n.01");
//! ```

use std::fmt;
use std::str::FromStr;

/// Part-of-speech marker as used by WordNet files (`n`, `v`, `a`/`s`, `r`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Pos {
    Noun,
    Verb,
    Adj,
    Adv,
}

impl Pos {
    /// Lookup order used when a word is searched across every part of speech.
    pub const ALL: [Pos; 4] = [Pos::Noun, Pos::Verb, Pos::Adj, Pos::Adv];

    /// Parse a WordNet POS character into an enum.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(Pos::Noun),
            'v' => Some(Pos::Verb),
            'a' | 's' => Some(Pos::Adj),
            'r' => Some(Pos::Adv),
            _ => None,
        }
    }

    /// Emit the POS character used in `index.*`/`data.*`.
    pub fn to_char(self) -> char {
        match self {
            Pos::Noun => 'n',
            Pos::Verb => 'v',
            Pos::Adj => 'a',
            Pos::Adv => 'r',
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pos::Noun => "noun",
            Pos::Verb => "verb",
            Pos::Adj => "adj",
            Pos::Adv => "adv",
        })
    }
}

/// `(pos, offset)` pair uniquely identifying a synset within the WordNet files.
///
/// Ordering is by POS, then offset; it is used to break ties deterministically.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SynsetId {
    pub pos: Pos,
    pub offset: u32,
}

/// Raw `ss_type` marker from `data.*`, including adjective satellites.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SynsetType {
    Noun,
    Verb,
    Adj,
    Adv,
    AdjSatellite,
}

impl SynsetType {
    /// Parse the `ss_type` character from a data line.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(SynsetType::Noun),
            'v' => Some(SynsetType::Verb),
            'a' => Some(SynsetType::Adj),
            's' => Some(SynsetType::AdjSatellite),
            'r' => Some(SynsetType::Adv),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            SynsetType::Noun => 'n',
            SynsetType::Verb => 'v',
            SynsetType::Adj => 'a',
            SynsetType::AdjSatellite => 's',
            SynsetType::Adv => 'r',
        }
    }

    /// The file family a synset of this type lives in; satellites share `adj`.
    pub fn pos(self) -> Pos {
        match self {
            SynsetType::Noun => Pos::Noun,
            SynsetType::Verb => Pos::Verb,
            SynsetType::Adj | SynsetType::AdjSatellite => Pos::Adj,
            SynsetType::Adv => Pos::Adv,
        }
    }
}

/// A lemma string and its per-synset `lex_id`.
#[derive(Clone, Debug)]
pub struct Lemma<'a> {
    pub text: &'a str,
    pub lex_id: u8,
}

impl<'a> Lemma<'a> {
    /// Lemma text without a trailing adjective marker such as `(a)` or `(ip)`.
    pub fn base(&self) -> &'a str {
        strip_adj_marker(self.text)
    }
}

/// Pointer metadata from `p_cnt` section.
#[derive(Clone, Debug)]
pub struct Pointer<'a> {
    pub symbol: &'a str,
    pub target: SynsetId,
    pub src_word: Option<u16>,
    pub dst_word: Option<u16>,
}

impl Pointer<'_> {
    /// `@` and `@i` edges, the ones similarity measures walk.
    pub fn is_hypernym(&self) -> bool {
        is_hypernym_symbol(self.symbol)
    }
}

/// Parsed gloss with convenience helpers while keeping the raw text intact.
#[derive(Clone, Debug)]
pub struct Gloss<'a> {
    pub raw: &'a str,
    pub definition: &'a str,
    pub examples: Vec<&'a str>,
}

/// Synset record as exposed by a loaded database.
#[derive(Clone, Debug)]
pub struct Synset<'a> {
    pub id: SynsetId,
    pub lex_filenum: u8,
    pub synset_type: SynsetType,
    pub words: Vec<Lemma<'a>>,
    pub pointers: Vec<Pointer<'a>>,
    pub gloss: Gloss<'a>,
}

/// Index record from `index.*`, including sense and tagsense counts.
#[derive(Clone, Debug)]
pub struct IndexEntry<'a> {
    pub lemma: &'a str,
    pub pos: Pos,
    pub synset_cnt: u32,
    pub p_cnt: u32,
    pub ptr_symbols: Vec<&'a str>,
    pub sense_cnt: u32,
    pub tagsense_cnt: u32,
    /// Synsets in sense order.
    pub synsets: &'a [SynsetId],
}

/// Human-readable synset name of the form `lemma.pos.NN`.
///
/// `sense` is the 1-based position of the synset in the lemma's index entry.
/// Lemmas may themselves contain dots (`st._louis`), so parsing splits from
/// the right.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SenseKey {
    pub lemma: String,
    pub synset_type: SynsetType,
    pub sense: u32,
}

impl SenseKey {
    pub fn new(lemma: impl Into<String>, synset_type: SynsetType, sense: u32) -> Self {
        Self {
            lemma: lemma.into(),
            synset_type,
            sense,
        }
    }

    /// POS whose index file holds this key's lemma.
    pub fn pos(&self) -> Pos {
        self.synset_type.pos()
    }
}

impl fmt::Display for SenseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{:02}",
            self.lemma,
            self.synset_type.to_char(),
            self.sense
        )
    }
}

/// Why a string could not be read as a [`SenseKey`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseSenseKeyError {
    /// Fewer than three dot-separated parts.
    MissingParts,
    EmptyLemma,
    InvalidPos(String),
    /// Sense numbers are 1-based; zero and non-numbers are rejected.
    InvalidSense(String),
}

impl fmt::Display for ParseSenseKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseSenseKeyError::MissingParts => f.write_str("expected lemma.pos.NN"),
            ParseSenseKeyError::EmptyLemma => f.write_str("lemma is empty"),
            ParseSenseKeyError::InvalidPos(p) => write!(f, "unknown part of speech {p:?}"),
            ParseSenseKeyError::InvalidSense(s) => write!(f, "invalid sense number {s:?}"),
        }
    }
}

impl std::error::Error for ParseSenseKeyError {}

impl FromStr for SenseKey {
    type Err = ParseSenseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().rsplitn(3, '.');
        let (Some(sense), Some(pos), Some(lemma)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ParseSenseKeyError::MissingParts);
        };
        if lemma.is_empty() {
            return Err(ParseSenseKeyError::EmptyLemma);
        }
        let mut pos_chars = pos.chars();
        let synset_type = match (pos_chars.next(), pos_chars.next()) {
            (Some(c), None) => SynsetType::from_char(c),
            _ => None,
        }
        .ok_or_else(|| ParseSenseKeyError::InvalidPos(pos.to_string()))?;
        let sense = sense
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ParseSenseKeyError::InvalidSense(sense.to_string()))?;

        Ok(SenseKey {
            lemma: lemma.to_lowercase(),
            synset_type,
            sense,
        })
    }
}

/// Decode the four-hex source/target field used in pointer blocks.
///
/// High byte is the source word number, low byte is the target word number.
/// Zero indicates "not specified" per WordNet conventions.
pub fn decode_st(hex4: &str) -> (Option<u16>, Option<u16>) {
    if hex4.len() != 4 {
        return (None, None);
    }

    match u16::from_str_radix(hex4, 16) {
        Ok(val) => {
            let src = val >> 8;
            let dst = val & 0x00FF;
            let src = if src == 0 { None } else { Some(src) };
            let dst = if dst == 0 { None } else { Some(dst) };
            (src, dst)
        }
        Err(_) => (None, None),
    }
}

pub fn is_hypernym_symbol(symbol: &str) -> bool {
    matches!(symbol, "@" | "@i")
}

/// Drop a trailing syntactic marker (`(a)`, `(p)`, `(ip)`) from an adjective lemma.
pub fn strip_adj_marker(text: &str) -> &str {
    match text.strip_suffix(')') {
        Some(head) => match head.rfind('(') {
            Some(open) => &text[..open],
            None => text,
        },
        None => text,
    }
}
