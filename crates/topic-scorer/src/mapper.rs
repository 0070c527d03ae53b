//! Phrase-to-topics mapping.

use std::collections::HashMap;
use std::collections::hash_map;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ScorerError;
use crate::lexicon::LexicalDatabase;
use crate::normalize::Normalizer;
use crate::scorer::{ScoreOptions, TopicScore, tally};

/// Topic name to the sense key that defines the topic, e.g.
/// `"transportation" -> "car.n.01"`.
///
/// Serialized as a flat JSON object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicDictionary(HashMap<String, String>);

impl TopicDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, ScorerError> {
        serde_json::from_str(json).map_err(ScorerError::TopicParse)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ScorerError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScorerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ScorerError::TopicJson {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Add or replace a topic, returning the previous sense key.
    pub fn insert(&mut self, name: impl Into<String>, sense_key: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), sense_key.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TopicDictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<'a> IntoIterator for &'a TopicDictionary {
    type Item = (&'a String, &'a String);
    type IntoIter = hash_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Per-topic results, keyed exactly like the input dictionary.
pub type TopicScores = HashMap<String, TopicScore>;

/// Normalize `phrase` and score its tokens against every topic.
///
/// All topic keys are resolved before any scoring, so a bad key fails the
/// call without partial output. Each token's senses are looked up once and
/// reused across topics.
pub fn score_phrase<L: LexicalDatabase + ?Sized>(
    lexicon: &L,
    normalizer: &Normalizer,
    phrase: &str,
    topics: &TopicDictionary,
    options: ScoreOptions,
) -> Result<TopicScores, ScorerError> {
    if topics.is_empty() {
        warn!("scoring against an empty topic dictionary");
    }
    if !(0.0..=1.0).contains(&options.threshold) {
        warn!(threshold = options.threshold, "threshold outside [0, 1]");
    }

    let resolved = topics
        .iter()
        .map(|(name, key)| Ok((name, lexicon.resolve(key)?)))
        .collect::<Result<Vec<_>, ScorerError>>()?;

    let candidates: Vec<(String, Vec<L::Sense>)> = normalizer
        .normalize(phrase)
        .into_iter()
        .map(|token| {
            let senses = lexicon.senses(&token);
            (token, senses)
        })
        .collect();

    let mut scores = TopicScores::with_capacity(resolved.len());
    for (name, topic) in resolved {
        let score = tally(lexicon, &candidates, topic, options);
        debug!(topic = %name, count = score.count, tokens = candidates.len(), "topic scored");
        scores.insert(name.clone(), score);
    }
    Ok(scores)
}
