//! Sense lookup for a single word, optionally scored against a reference sense.

use serde::Serialize;

use crate::error::ScorerError;
use crate::lexicon::{LexicalDatabase, SenseInfo};

/// Candidate senses of `word` with their identifiers and glosses.
pub fn retrieve_senses<L: LexicalDatabase + ?Sized>(lexicon: &L, word: &str) -> Vec<SenseInfo> {
    lexicon
        .senses(word)
        .into_iter()
        .map(|sense| lexicon.describe(sense))
        .collect()
}

/// A candidate sense with its similarity to the comparison sense.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoredSense {
    #[serde(flatten)]
    pub sense: SenseInfo,
    /// `None` when the two senses are not comparable.
    pub similarity: Option<f64>,
}

/// Output of [`word_scorer`]; the shape depends on whether scores were asked for.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WordSenses {
    Senses(Vec<SenseInfo>),
    Scored(Vec<ScoredSense>),
}

impl WordSenses {
    pub fn len(&self) -> usize {
        match self {
            WordSenses::Senses(senses) => senses.len(),
            WordSenses::Scored(scored) => scored.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// List the senses of `word`, scoring each against `compare_to` on request.
///
/// A comparison key, when given, must resolve even if no scores are asked
/// for. Asking for scores without a comparison key is an error rather than
/// an empty or partial listing.
pub fn word_scorer<L: LexicalDatabase + ?Sized>(
    lexicon: &L,
    word: &str,
    compare_to: Option<&str>,
    with_similarity_score: bool,
) -> Result<WordSenses, ScorerError> {
    let reference = compare_to.map(|key| lexicon.resolve(key)).transpose()?;
    if !with_similarity_score {
        return Ok(WordSenses::Senses(retrieve_senses(lexicon, word)));
    }
    let Some(reference) = reference else {
        return Err(ScorerError::MissingComparisonSense {
            word: word.to_string(),
        });
    };

    let scored = lexicon
        .senses(word)
        .into_iter()
        .map(|sense| ScoredSense {
            sense: lexicon.describe(sense),
            similarity: lexicon.similarity(reference, sense),
        })
        .collect();
    Ok(WordSenses::Scored(scored))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::fake::FakeLexicon;

    fn lexicon() -> FakeLexicon {
        FakeLexicon::new()
            .key("car.n.01", 1)
            .word("code", &[7, 8])
            .word("car", &[1, 2])
            .sim(1, 2, 0.8)
    }

    #[test]
    fn retrieves_senses_in_database_order() {
        let senses = retrieve_senses(&lexicon(), "Code");
        let ids: Vec<&str> = senses.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["sense.n.07", "sense.n.08"]);
        assert_eq!(senses[1].gloss, "gloss of 8");
        assert!(retrieve_senses(&lexicon(), "qwerty").is_empty());
    }

    #[test]
    fn scores_each_sense_against_reference() {
        let out = word_scorer(&lexicon(), "car", Some("car.n.01"), true).unwrap();
        let WordSenses::Scored(scored) = out else {
            panic!("expected scored senses");
        };
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].similarity, Some(1.0));
        assert_eq!(scored[1].similarity, Some(0.8));

        let code = word_scorer(&lexicon(), "code", Some("car.n.01"), true).unwrap();
        let WordSenses::Scored(code) = code else {
            panic!("expected scored senses");
        };
        assert!(code.iter().all(|s| s.similarity.is_none()));
    }

    #[test]
    fn missing_reference_is_an_error() {
        let err = word_scorer(&lexicon(), "code", None, true).unwrap_err();
        assert!(matches!(err, ScorerError::MissingComparisonSense { word } if word == "code"));

        let err = word_scorer(&lexicon(), "code", Some("nope.n.01"), true).unwrap_err();
        assert!(matches!(err, ScorerError::UnknownSenseKey(_)));
        let err = word_scorer(&lexicon(), "code", Some("nope.n.01"), false).unwrap_err();
        assert!(matches!(err, ScorerError::UnknownSenseKey(_)));
    }

    #[test]
    fn plain_listing_without_scores() {
        let out = word_scorer(&lexicon(), "code", None, false).unwrap();
        assert_eq!(out.len(), 2);
        assert!(matches!(out, WordSenses::Senses(_)));
        assert!(word_scorer(&lexicon(), "qwerty", None, false).unwrap().is_empty());
    }

    #[test]
    fn scored_senses_flatten_when_serialized() {
        let scored = ScoredSense {
            sense: SenseInfo {
                id: "car.n.01".into(),
                gloss: "a motor vehicle".into(),
            },
            similarity: None,
        };
        assert_eq!(
            serde_json::to_value(WordSenses::Scored(vec![scored])).unwrap(),
            serde_json::json!([{"id": "car.n.01", "gloss": "a motor vehicle", "similarity": null}])
        );
    }
}
