//! Token and sentence scoring against a single topic sense.

use serde::Serialize;
use tracing::trace;

use crate::lexicon::LexicalDatabase;

/// Similarity a token must strictly exceed to count as a hit.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Knobs shared by [`score_sentence`] and the phrase mapper.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreOptions {
    pub threshold: f64,
    /// Report which tokens were hits alongside the count.
    pub return_hits: bool,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            return_hits: false,
        }
    }
}

impl ScoreOptions {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_hits(mut self, return_hits: bool) -> Self {
        self.return_hits = return_hits;
        self
    }
}

/// Hit count for one topic, plus the hit tokens when they were requested.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TopicScore {
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hits: Option<Vec<String>>,
}

/// Whether any sense of `token` is more similar to `topic` than `threshold`.
///
/// Tokens without senses are never hits. Incomparable sense pairs count as
/// similarity 0.
pub fn score_token<L: LexicalDatabase + ?Sized>(
    lexicon: &L,
    token: &str,
    topic: L::Sense,
    threshold: f64,
) -> bool {
    is_hit(lexicon, &lexicon.senses(token), topic, threshold)
}

/// Score every token independently and count the hits.
///
/// ```
/// # use topic_scorer::{LexicalDatabase, ScoreOptions, SenseInfo, ScorerError, score_sentence};
/// # struct Empty;
/// # impl LexicalDatabase for Empty {
/// #     type Sense = u8;
/// #     fn senses(&self, _: &str) -> Vec<u8> { Vec::new() }
/// #     fn resolve(&self, k: &str) -> Result<u8, ScorerError> { Err(ScorerError::UnknownSenseKey(k.into())) }
/// #     fn describe(&self, _: u8) -> SenseInfo { unreachable!() }
/// #     fn similarity(&self, _: u8, _: u8) -> Option<f64> { None }
/// # }
/// let tokens: [&str; 0] = [];
/// let score = score_sentence(&Empty, &tokens, 0, ScoreOptions::default().with_hits(true));
/// assert_eq!(score.count, 0);
/// assert_eq!(score.hits, Some(Vec::new()));
/// ```
pub fn score_sentence<L, S>(
    lexicon: &L,
    tokens: &[S],
    topic: L::Sense,
    options: ScoreOptions,
) -> TopicScore
where
    L: LexicalDatabase + ?Sized,
    S: AsRef<str>,
{
    let candidates: Vec<(&str, Vec<L::Sense>)> = tokens
        .iter()
        .map(|t| (t.as_ref(), lexicon.senses(t.as_ref())))
        .collect();
    tally(lexicon, &candidates, topic, options)
}

/// Count hits over tokens whose senses were already looked up.
pub(crate) fn tally<L, T>(
    lexicon: &L,
    candidates: &[(T, Vec<L::Sense>)],
    topic: L::Sense,
    options: ScoreOptions,
) -> TopicScore
where
    L: LexicalDatabase + ?Sized,
    T: AsRef<str>,
{
    let mut count = 0;
    let mut hits = Vec::new();
    for (token, senses) in candidates {
        let token = token.as_ref();
        if is_hit(lexicon, senses, topic, options.threshold) {
            count += 1;
            if options.return_hits {
                hits.push(token.to_string());
            }
        }
    }
    TopicScore {
        count,
        hits: options.return_hits.then_some(hits),
    }
}

fn is_hit<L: LexicalDatabase + ?Sized>(
    lexicon: &L,
    senses: &[L::Sense],
    topic: L::Sense,
    threshold: f64,
) -> bool {
    let best = senses
        .iter()
        .map(|sense| lexicon.similarity(topic, *sense).unwrap_or(0.0))
        .reduce(f64::max);
    let Some(best) = best else {
        trace!(threshold, "no senses; miss");
        return false;
    };
    let hit = best > threshold;
    trace!(best, threshold, hit, candidates = senses.len(), "token scored");
    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::fake::FakeLexicon;

    const TOPIC: u32 = 1;

    fn lexicon() -> FakeLexicon {
        FakeLexicon::new()
            .word("car", &[TOPIC, 20])
            .word("highway", &[30])
            .word("bank", &[40, 41])
            .word("drove", &[50])
            .sim(TOPIC, 20, 0.8)
            .sim(TOPIC, 30, 0.5)
            .sim(TOPIC, 40, 0.1)
            .sim(TOPIC, 41, 0.7)
    }

    #[test]
    fn token_uses_best_sense() {
        let lex = lexicon();
        assert!(score_token(&lex, "bank", TOPIC, 0.6));
        assert!(!score_token(&lex, "bank", TOPIC, 0.7));
    }

    #[test]
    fn threshold_is_strict() {
        let lex = lexicon();
        assert!(!score_token(&lex, "highway", TOPIC, 0.5));
        assert!(score_token(&lex, "highway", TOPIC, 0.49));
        assert!(!score_token(&lex, "car", TOPIC, 1.0));
    }

    #[test]
    fn unknown_words_and_undefined_similarity_miss() {
        let lex = lexicon();
        assert!(!score_token(&lex, "zzz", TOPIC, 0.0));
        assert!(!score_token(&lex, ".", TOPIC, 0.0));
        // Similarity to sense 50 is undefined, so it counts as 0.
        assert!(!score_token(&lex, "drove", TOPIC, 0.0));
        assert!(score_token(&lex, "drove", TOPIC, -0.1));
    }

    #[test]
    fn sentence_counts_hits_in_order() {
        let lex = lexicon();
        let tokens = ["highway", "Car", "zzz", "bank", "car"];
        let options = ScoreOptions::default().with_threshold(0.4).with_hits(true);
        let score = score_sentence(&lex, &tokens, TOPIC, options);
        assert_eq!(score.count, 4);
        assert_eq!(
            score.hits.as_deref(),
            Some(&["highway", "Car", "bank", "car"].map(String::from)[..])
        );

        let count_only = score_sentence(&lex, &tokens, TOPIC, options.with_hits(false));
        assert_eq!(count_only, TopicScore { count: 4, hits: None });
    }

    #[test]
    fn hit_list_is_empty_not_absent_when_nothing_matches() {
        let lex = lexicon();
        let score = score_sentence(
            &lex,
            &["zzz"],
            TOPIC,
            ScoreOptions::default().with_hits(true),
        );
        assert_eq!(score.count, 0);
        assert_eq!(score.hits, Some(Vec::new()));
    }

    #[test]
    fn empty_sentence_scores_zero() {
        let lex = lexicon();
        let tokens: Vec<String> = Vec::new();
        let score = score_sentence(&lex, &tokens, TOPIC, ScoreOptions::default().with_hits(true));
        assert_eq!(score, TopicScore { count: 0, hits: Some(Vec::new()) });
        let count_only = score_sentence(&lex, &tokens, TOPIC, ScoreOptions::default());
        assert_eq!(count_only, TopicScore::default());
    }

    #[test]
    fn count_never_rises_with_threshold() {
        let lex = lexicon();
        let tokens = ["car", "highway", "bank", "drove", "zzz"];
        let mut last = usize::MAX;
        for step in 0..=10 {
            let threshold = f64::from(step) / 10.0;
            let options = ScoreOptions::default().with_threshold(threshold);
            let count = score_sentence(&lex, &tokens, TOPIC, options).count;
            assert!(count <= last, "count rose at threshold {threshold}");
            last = count;
        }
    }

    #[test]
    fn serializes_hits_only_when_present() {
        let plain = TopicScore { count: 2, hits: None };
        assert_eq!(serde_json::to_string(&plain).unwrap(), r#"{"count":2}"#);
        let with_hits = TopicScore {
            count: 1,
            hits: Some(vec!["bus".into()]),
        };
        assert_eq!(
            serde_json::to_string(&with_hits).unwrap(),
            r#"{"count":1,"hits":["bus"]}"#
        );
    }
}
