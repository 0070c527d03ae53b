//! Stateless service object bundling a lexicon with scoring defaults.

use crate::error::ScorerError;
use crate::lexicon::{LexicalDatabase, SenseInfo};
use crate::mapper::{TopicDictionary, TopicScores, score_phrase};
use crate::normalize::Normalizer;
use crate::scorer::{ScoreOptions, TopicScore, score_sentence, score_token};
use crate::senses::{WordSenses, retrieve_senses, word_scorer};

/// A lexical database bundled with a normalizer and default options.
///
/// Holds no mutable state; share it behind an `Arc` to score from several
/// threads.
pub struct TopicScorer<L> {
    lexicon: L,
    normalizer: Normalizer,
    options: ScoreOptions,
}

impl<L: LexicalDatabase> TopicScorer<L> {
    pub fn new(lexicon: L) -> Self {
        Self {
            lexicon,
            normalizer: Normalizer::default(),
            options: ScoreOptions::default(),
        }
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_options(mut self, options: ScoreOptions) -> Self {
        self.options = options;
        self
    }

    pub fn lexicon(&self) -> &L {
        &self.lexicon
    }

    pub fn options(&self) -> ScoreOptions {
        self.options
    }

    pub fn normalize(&self, phrase: &str) -> Vec<String> {
        self.normalizer.normalize(phrase)
    }

    pub fn retrieve_senses(&self, word: &str) -> Vec<SenseInfo> {
        retrieve_senses(&self.lexicon, word)
    }

    pub fn word_scorer(
        &self,
        word: &str,
        compare_to: Option<&str>,
        with_similarity_score: bool,
    ) -> Result<WordSenses, ScorerError> {
        word_scorer(&self.lexicon, word, compare_to, with_similarity_score)
    }

    /// Hit decision for one token against the topic named by `topic_key`.
    pub fn score_token(&self, token: &str, topic_key: &str) -> Result<bool, ScorerError> {
        let topic = self.lexicon.resolve(topic_key)?;
        Ok(score_token(&self.lexicon, token, topic, self.options.threshold))
    }

    pub fn score_sentence<S: AsRef<str>>(
        &self,
        tokens: &[S],
        topic_key: &str,
    ) -> Result<TopicScore, ScorerError> {
        let topic = self.lexicon.resolve(topic_key)?;
        Ok(score_sentence(&self.lexicon, tokens, topic, self.options))
    }

    pub fn score_phrase(
        &self,
        phrase: &str,
        topics: &TopicDictionary,
    ) -> Result<TopicScores, ScorerError> {
        score_phrase(&self.lexicon, &self.normalizer, phrase, topics, self.options)
    }
}
