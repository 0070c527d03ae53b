//! Topic mention detection by WordNet similarity.
//!
//! A phrase is normalized into content tokens, each token's candidate senses
//! are compared against the sense that defines a topic, and a token counts as
//! a mention when its best similarity strictly exceeds a threshold. No
//! training data is involved; a topic is just a sense key such as `car.n.01`.
//!
//! The four operations layer bottom-up:
//! - [`retrieve_senses`] / [`word_scorer`]: senses of one word, optionally
//!   scored against a reference sense;
//! - [`normalize`]: tokens with stopwords and punctuation removed;
//! - [`score_token`] / [`score_sentence`]: hit decisions against one topic;
//! - [`score_phrase`]: hit counts for every topic of a [`TopicDictionary`].
//!
//! All of them take the lexical database through [`LexicalDatabase`];
//! [`WordNetLexicon`] is the WordNet-backed implementation and
//! [`TopicScorer`] bundles one with a [`Normalizer`] and [`ScoreOptions`].
//!
//! # Example
//! ```no_run
//! use topic_scorer::{ScorerConfig, TopicDictionary};
//!
//! # fn main() -> Result<(), topic_scorer::ScorerError> {
//! let scorer = ScorerConfig::new("/path/to/wordnet").build()?;
//! let topics: TopicDictionary = [("transportation", "car.n.01")].into_iter().collect();
//! let scores = scorer.score_phrase("The car drove down the highway.", &topics)?;
//! println!("{}", scores["transportation"].count);
//! # Ok(()) }
//! ```

mod config;
mod error;
mod lexicon;
mod mapper;
mod normalize;
mod scorer;
mod senses;
mod service;

pub use config::ScorerConfig;
pub use error::ScorerError;
pub use lexicon::{LexicalDatabase, SenseInfo, WordNetLexicon};
pub use mapper::{TopicDictionary, TopicScores, score_phrase};
pub use normalize::{ENGLISH_STOPWORDS, Normalizer, Stopwords, is_punctuation, normalize, tokenize};
pub use scorer::{DEFAULT_THRESHOLD, ScoreOptions, TopicScore, score_sentence, score_token};
pub use senses::{ScoredSense, WordSenses, retrieve_senses, word_scorer};
pub use service::TopicScorer;
pub use wordnet_db::LoadMode;
