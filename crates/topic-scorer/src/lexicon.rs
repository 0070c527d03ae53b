//! The lexical database seam and its WordNet implementation.

use std::fmt;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use serde::Serialize;
use tracing::info;
use wordnet_db::{LoadMode, WordNet};
use wordnet_morphy::Morphy;
use wordnet_similarity::wup_similarity;
use wordnet_types::{Pos, SenseKey, SynsetId};

use crate::error::ScorerError;

/// Identifier and gloss of a sense, as reported to callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SenseInfo {
    /// Sense key such as `car.n.01`.
    pub id: String,
    pub gloss: String,
}

/// Everything the scorer needs from a lexical knowledge base.
///
/// Implementations are read-only; every method may be called concurrently
/// from independent scoring calls.
pub trait LexicalDatabase {
    /// Cheap handle to one sense.
    type Sense: Copy + Eq + fmt::Debug;

    /// Candidate senses of a surface word in database order. Unknown words
    /// and punctuation yield an empty list.
    fn senses(&self, word: &str) -> Vec<Self::Sense>;

    /// Resolve a sense key that must name exactly one sense.
    fn resolve(&self, key: &str) -> Result<Self::Sense, ScorerError>;

    fn describe(&self, sense: Self::Sense) -> SenseInfo;

    /// Similarity in `[0, 1]` of `topic` against `candidate`, or `None` when
    /// the two senses are not comparable.
    fn similarity(&self, topic: Self::Sense, candidate: Self::Sense) -> Option<f64>;
}

impl<L: LexicalDatabase + ?Sized> LexicalDatabase for &L {
    type Sense = L::Sense;

    fn senses(&self, word: &str) -> Vec<Self::Sense> {
        (**self).senses(word)
    }

    fn resolve(&self, key: &str) -> Result<Self::Sense, ScorerError> {
        (**self).resolve(key)
    }

    fn describe(&self, sense: Self::Sense) -> SenseInfo {
        (**self).describe(sense)
    }

    fn similarity(&self, topic: Self::Sense, candidate: Self::Sense) -> Option<f64> {
        (**self).similarity(topic, candidate)
    }
}

/// WordNet dictionary plus morphy exception lists.
///
/// Word lookup folds case and reduces inflections, so "Drove" finds the
/// senses of "drive". Similarity is Wu-Palmer.
pub struct WordNetLexicon {
    wordnet: WordNet,
    morphy: Morphy,
}

impl WordNetLexicon {
    pub fn new(wordnet: WordNet, morphy: Morphy) -> Self {
        Self { wordnet, morphy }
    }

    /// Load `data.*`/`index.*` and the optional `*.exc` files from `dict_dir`.
    pub fn load(dict_dir: impl AsRef<Path>, mode: LoadMode) -> Result<Self, ScorerError> {
        let dir = dict_dir.as_ref();
        let start = Instant::now();
        let wordnet = WordNet::load_with_mode(dir, mode)
            .with_context(|| format!("loading WordNet from {}", dir.display()))?;
        let morphy = Morphy::load(dir)
            .with_context(|| format!("loading exception lists from {}", dir.display()))?;
        info!(
            synsets = wordnet.synset_count(),
            exceptions = morphy.exception_count(),
            "wordnet loaded from {} in {} ms (mode: {:?})",
            dir.display(),
            start.elapsed().as_millis(),
            mode
        );
        Ok(Self::new(wordnet, morphy))
    }

    pub fn wordnet(&self) -> &WordNet {
        &self.wordnet
    }
}

impl LexicalDatabase for WordNetLexicon {
    type Sense = SynsetId;

    fn senses(&self, word: &str) -> Vec<SynsetId> {
        let exists = |pos, lemma: &str| self.wordnet.lemma_exists(pos, lemma);
        let mut out: Vec<SynsetId> = Vec::new();
        for pos in Pos::ALL {
            for candidate in self.morphy.lemmas_for(pos, word, &exists) {
                for sid in self.wordnet.synsets_for_lemma(pos, &candidate.lemma) {
                    if !out.contains(sid) {
                        out.push(*sid);
                    }
                }
            }
        }
        out
    }

    fn resolve(&self, key: &str) -> Result<SynsetId, ScorerError> {
        let parsed: SenseKey = key.parse().map_err(|source| ScorerError::InvalidSenseKey {
            key: key.to_string(),
            source,
        })?;
        self.wordnet
            .resolve_sense_key(&parsed)
            .ok_or_else(|| ScorerError::UnknownSenseKey(key.to_string()))
    }

    fn describe(&self, sense: SynsetId) -> SenseInfo {
        let id = self
            .wordnet
            .sense_key(sense)
            .map(|key| key.to_string())
            .unwrap_or_else(|| format!("{}.{:08}", sense.pos.to_char(), sense.offset));
        let gloss = self.wordnet.definition(sense).unwrap_or_default().to_string();
        SenseInfo { id, gloss }
    }

    fn similarity(&self, topic: SynsetId, candidate: SynsetId) -> Option<f64> {
        wup_similarity(&self.wordnet, topic, candidate)
    }
}
