use std::path::PathBuf;

use thiserror::Error;
use wordnet_types::ParseSenseKeyError;

/// Configuration and lookup failures surfaced to callers.
///
/// Words without senses and undefined similarities are not errors; they
/// score as misses.
#[derive(Debug, Error)]
pub enum ScorerError {
    #[error("invalid sense key {key:?}: {source}")]
    InvalidSenseKey {
        key: String,
        #[source]
        source: ParseSenseKeyError,
    },
    #[error("sense key {0:?} does not name a sense in the lexical database")]
    UnknownSenseKey(String),
    #[error("similarity scores requested for {word:?} but no comparison sense key was given")]
    MissingComparisonSense { word: String },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid topic dictionary: {0}")]
    TopicParse(#[source] serde_json::Error),
    #[error("failed to parse topic dictionary {}: {source}", .path.display())]
    TopicJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

impl ScorerError {
    pub(crate) fn config<T: Into<String>>(msg: T) -> Self {
        ScorerError::Config(msg.into())
    }
}
