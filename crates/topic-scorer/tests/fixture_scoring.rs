use std::path::PathBuf;

use topic_scorer::{
    LexicalDatabase, LoadMode, Normalizer, ScoreOptions, ScorerConfig, ScorerError,
    TopicDictionary, WordNetLexicon, WordSenses, normalize, retrieve_senses, score_phrase,
    score_sentence, score_token, word_scorer,
};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("wordnet-db")
        .join("tests")
        .join("fixtures")
        .join("wn")
}

fn lexicon() -> WordNetLexicon {
    WordNetLexicon::load(fixture_dir(), LoadMode::Owned).expect("load fixture dictionary")
}

fn transport() -> TopicDictionary {
    [("transportation", "car.n.01")].into_iter().collect()
}

fn approx(actual: Option<f64>, expected: f64) -> bool {
    actual.is_some_and(|v| (v - expected).abs() < 1e-9)
}

#[test]
fn senses_come_back_in_database_order_with_glosses() {
    let lex = lexicon();
    let car = retrieve_senses(&lex, "Car");
    let ids: Vec<&str> = car.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["car.n.01", "car.n.02"]);
    assert_eq!(car[0].gloss, "a motor vehicle with four wheels");

    // Adjective senses (head, then satellite) before the adverb.
    let late = retrieve_senses(&lex, "late");
    let ids: Vec<&str> = late.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["late.a.01", "belated.s.01", "late.r.01"]);

    assert!(retrieve_senses(&lex, "xylophone").is_empty());
    assert!(retrieve_senses(&lex, ".").is_empty());
}

#[test]
fn inflected_tokens_find_their_lemmas() {
    let lex = lexicon();
    let drove: Vec<String> = retrieve_senses(&lex, "drove").into_iter().map(|s| s.id).collect();
    assert_eq!(drove, ["drive.v.01"]);
    let buses: Vec<String> = retrieve_senses(&lex, "Buses").into_iter().map(|s| s.id).collect();
    assert_eq!(buses, ["bus.n.01", "jalopy.n.01", "bus.v.01"]);
}

#[test]
fn wu_palmer_values_over_the_transport_taxonomy() {
    let lex = lexicon();
    let car = lex.resolve("car.n.01").unwrap();
    let sim = |key: &str| lex.similarity(car, lex.resolve(key).unwrap());

    assert!(approx(sim("car.n.01"), 1.0));
    assert!(approx(sim("highway.n.01"), 0.5));
    assert!(approx(sim("bus.n.01"), 14.0 / 21.0));
    assert!(approx(sim("bus.n.02"), 0.96));
    assert!(approx(sim("model_t.n.01"), 0.96));
    assert!(approx(sim("car.n.02"), 18.0 / 22.0));
    assert!(approx(sim("code.n.01"), 0.125));
    assert_eq!(sim("drive.v.01"), None);
    assert_eq!(sim("late.a.01"), None);
}

#[test]
fn car_sentence_counts_depend_on_threshold() {
    let lex = lexicon();
    let normalizer = Normalizer::default();
    let phrase = "The car drove down the highway.";
    assert_eq!(normalizer.normalize(phrase), ["car", "drove", "highway"]);

    let loose = ScoreOptions::default().with_threshold(0.3).with_hits(true);
    let scores = score_phrase(&lex, &normalizer, phrase, &transport(), loose).unwrap();
    let score = &scores["transportation"];
    assert!(score.count >= 1);
    assert_eq!(score.count, 2);
    assert_eq!(
        score.hits.as_deref(),
        Some(&["car".to_string(), "highway".to_string()][..])
    );

    let at = |threshold: f64| {
        let options = ScoreOptions::default().with_threshold(threshold);
        score_phrase(&lex, &normalizer, phrase, &transport(), options).unwrap()["transportation"]
            .count
    };
    assert_eq!(at(0.6), 1);
    assert_eq!(at(1.0), 0);
}

#[test]
fn bus_sentence_matches_through_a_secondary_sense() {
    let lex = lexicon();
    assert_eq!(normalize("The bus was late again."), ["bus", "late"]);
    let scores = score_phrase(
        &lex,
        &Normalizer::default(),
        "The bus was late again.",
        &transport(),
        ScoreOptions::default(),
    )
    .unwrap();
    // bus.n.02 (a jalopy) sits directly under car.n.01.
    assert_eq!(scores["transportation"].count, 1);
}

#[test]
fn verb_topics_score_verb_tokens() {
    let lex = lexicon();
    let travel = lex.resolve("travel.v.01").unwrap();
    assert!(score_token(&lex, "drove", travel, 0.6));
    assert!(!score_token(&lex, "highway", travel, 0.0));

    let drive = lex.resolve("drive.v.01").unwrap();
    let back = lex.similarity(drive, travel);
    assert!(approx(back, 0.4));
    assert!(!score_token(&lex, "travel", drive, 0.6));

    let topics: TopicDictionary = [("transportation", "car.n.01"), ("movement", "travel.v.01")]
        .into_iter()
        .collect();
    let scores = score_phrase(
        &lex,
        &Normalizer::default(),
        "The car drove down the highway.",
        &topics,
        ScoreOptions::default().with_hits(true),
    )
    .unwrap();
    assert_eq!(scores["movement"].hits, Some(vec!["drove".to_string()]));
    assert_eq!(scores["transportation"].hits, Some(vec!["car".to_string()]));
}

#[test]
fn adjective_topics_meet_at_the_simulated_root() {
    let lex = lexicon();
    let late = lex.resolve("late.a.01").unwrap();
    let belated = lex.resolve("belated.s.01").unwrap();
    assert!(approx(lex.similarity(late, belated), 0.5));
    assert!(score_token(&lex, "tardy", late, 0.4));
    assert!(!score_token(&lex, "tardy", late, 0.5));
}

#[test]
fn result_keys_match_the_dictionary_for_any_phrase() {
    let lex = lexicon();
    let topics: TopicDictionary = [
        ("transportation", "car.n.01"),
        ("roads", "highway.n.01"),
        ("secrecy", "code.n.01"),
        ("lateness", "late.a.01"),
    ]
    .into_iter()
    .collect();
    for phrase in ["", "...", "The car drove down the highway.", "zzz qqq", "Late, again!"] {
        let scores = score_phrase(
            &lex,
            &Normalizer::default(),
            phrase,
            &topics,
            ScoreOptions::default(),
        )
        .unwrap();
        let mut keys: Vec<&str> = scores.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["lateness", "roads", "secrecy", "transportation"], "{phrase:?}");
    }
}

#[test]
fn counts_are_monotone_in_threshold() {
    let lex = lexicon();
    let car = lex.resolve("car.n.01").unwrap();
    let tokens = normalize("A jalopy, a railcar, a Model_T and a bus drove the highway code");
    let mut last = usize::MAX;
    for step in 0..=20 {
        let threshold = f64::from(step) / 20.0;
        let options = ScoreOptions::default().with_threshold(threshold);
        let count = score_sentence(&lex, &tokens, car, options).count;
        assert!(count <= last, "count rose at threshold {threshold}");
        last = count;
    }
    assert_eq!(last, 0);
}

#[test]
fn repeated_phrase_scoring_is_identical() {
    let lex = lexicon();
    let normalizer = Normalizer::default();
    let options = ScoreOptions::default().with_threshold(0.3).with_hits(true);
    let phrase = "Buses and cars share the main road.";
    let first = score_phrase(&lex, &normalizer, phrase, &transport(), options).unwrap();
    let second = score_phrase(&lex, &normalizer, phrase, &transport(), options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn bad_topic_keys_are_configuration_errors() {
    let lex = lexicon();
    let normalizer = Normalizer::default();
    let options = ScoreOptions::default();

    let unknown: TopicDictionary = [("boats", "boat.n.01")].into_iter().collect();
    let err = score_phrase(&lex, &normalizer, "a car", &unknown, options).unwrap_err();
    assert!(matches!(err, ScorerError::UnknownSenseKey(_)));

    let out_of_range: TopicDictionary = [("cars", "car.n.03")].into_iter().collect();
    assert!(score_phrase(&lex, &normalizer, "a car", &out_of_range, options).is_err());

    let malformed: TopicDictionary = [("cars", "car")].into_iter().collect();
    let err = score_phrase(&lex, &normalizer, "a car", &malformed, options).unwrap_err();
    assert!(matches!(err, ScorerError::InvalidSenseKey { .. }));
}

#[test]
fn word_scorer_requires_a_comparison_sense_for_scores() {
    let lex = lexicon();
    let err = word_scorer(&lex, "code", None, true).unwrap_err();
    assert!(matches!(err, ScorerError::MissingComparisonSense { .. }));

    let listed = word_scorer(&lex, "code", None, false).unwrap();
    assert_eq!(listed.len(), 2);

    let WordSenses::Scored(scored) = word_scorer(&lex, "code", Some("car.n.01"), true).unwrap()
    else {
        panic!("expected scored senses");
    };
    let ids: Vec<&str> = scored.iter().map(|s| s.sense.id.as_str()).collect();
    assert_eq!(ids, ["code.n.01", "code.v.01"]);
    assert!(approx(scored[0].similarity, 0.125));
    assert_eq!(scored[1].similarity, None);
}

#[test]
fn scorer_builds_from_configuration_and_topic_file() {
    let dir = tempfile::tempdir().unwrap();
    let topics_path = dir.path().join("topics.json");
    std::fs::write(&topics_path, r#"{"transportation": "car.n.01", "movement": "travel.v.01"}"#)
        .unwrap();
    let stop_path = dir.path().join("stop.txt");
    std::fs::write(&stop_path, "the\ndown\n").unwrap();

    let fixture = fixture_dir();
    let stop = stop_path.to_string_lossy().into_owned();
    let config = ScorerConfig::from_lookup(|name| match name {
        "WORDNET_DIR" => Some(fixture.to_string_lossy().into_owned()),
        "WORDNET_LOAD_MODE" => Some("owned".into()),
        "TOPIC_THRESHOLD" => Some("0.3".into()),
        "TOPIC_RETURN_HITS" => Some("true".into()),
        "TOPIC_STOPWORDS" => Some(stop.clone()),
        _ => None,
    })
    .unwrap();

    let scorer = config.build().unwrap();
    let topics = TopicDictionary::from_json_file(&topics_path).unwrap();
    let scores = scorer
        .score_phrase("The car drove down the highway.", &topics)
        .unwrap();
    assert_eq!(
        scores["transportation"].hits,
        Some(vec!["car".to_string(), "highway".to_string()])
    );
    assert_eq!(scores["movement"].count, 1);
    assert!(scorer.score_token("jalopy", "car.n.01").unwrap());
}
