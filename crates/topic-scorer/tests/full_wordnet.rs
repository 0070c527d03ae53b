use std::env;
use std::path::PathBuf;

use topic_scorer::{ScorerConfig, ScorerError, TopicDictionary};

#[test]
fn scores_transport_sentence_against_full_dictionary() {
    let Some(dir) = env::var("WORDNET_DIR").ok().map(PathBuf::from) else {
        eprintln!("skipping: WORDNET_DIR not set");
        return;
    };
    let mut config = ScorerConfig::new(dir);
    config.threshold = 0.3;
    let scorer = config.build().expect("build scorer");

    let topics: TopicDictionary = [("transportation", "car.n.01")].into_iter().collect();
    let scores = scorer
        .score_phrase("The car drove down the highway.", &topics)
        .expect("score phrase");
    assert!(scores["transportation"].count >= 1);

    assert!(!scorer.retrieve_senses("code").is_empty());
    assert!(matches!(
        scorer.word_scorer("code", None, true),
        Err(ScorerError::MissingComparisonSense { .. })
    ));
}
