use std::env;
use std::time::Instant;

use anyhow::{Context, Result};
use topic_scorer::{ScorerConfig, TopicDictionary};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "usage: WORDNET_DIR=<dict> cargo run -p topic-scorer --example score -- <topics.json> <phrase>...";

fn main() -> Result<()> {
    init_tracing();

    let mut args = env::args().skip(1);
    let topics_path = args.next().context(USAGE)?;
    let phrase = args.collect::<Vec<_>>().join(" ");
    anyhow::ensure!(!phrase.is_empty(), USAGE);

    let config = ScorerConfig::from_env()?;
    let topics = TopicDictionary::from_json_file(&topics_path)?;
    info!("scoring against {} topics from {}", topics.len(), topics_path);

    let scorer = config.build()?;
    let start = Instant::now();
    let scores = scorer.score_phrase(&phrase, &topics)?;
    info!("scored in {} us", start.elapsed().as_micros());

    println!("{}", serde_json::to_string_pretty(&scores)?);
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
