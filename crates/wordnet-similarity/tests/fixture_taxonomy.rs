use std::path::PathBuf;

use wordnet_db::WordNet;
use wordnet_similarity::{Depths, Node, lowest_common_hypernyms, wup_similarity};
use wordnet_types::SynsetId;

fn load() -> WordNet {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("wordnet-db")
        .join("tests")
        .join("fixtures")
        .join("wn");
    WordNet::load(dir).expect("load fixtures")
}

fn id(wn: &WordNet, key: &str) -> SynsetId {
    wn.resolve_sense_key(&key.parse().unwrap())
        .unwrap_or_else(|| panic!("{key} resolves"))
}

#[test]
fn depths_follow_the_noun_chain() {
    let wn = load();
    let mut depths = Depths::new(&wn);
    assert_eq!(depths.min_depth(Node::Synset(id(&wn, "entity.n.01"))), 0);
    assert_eq!(depths.max_depth(Node::Synset(id(&wn, "car.n.01"))), 11);
    assert_eq!(depths.max_depth(Node::Synset(id(&wn, "highway.n.01"))), 7);
    // Instance hypernyms count as edges.
    assert_eq!(depths.min_depth(Node::Synset(id(&wn, "model_t.n.01"))), 12);
}

#[test]
fn subsumers_of_transport_synsets() {
    let wn = load();
    let car = id(&wn, "car.n.01");
    assert_eq!(
        lowest_common_hypernyms(&wn, car, id(&wn, "bus.n.01"), false),
        vec![Node::Synset(id(&wn, "conveyance.n.01"))]
    );
    assert_eq!(
        lowest_common_hypernyms(&wn, car, id(&wn, "highway.n.01"), false),
        vec![Node::Synset(id(&wn, "artifact.n.01"))]
    );
    assert_eq!(
        lowest_common_hypernyms(&wn, id(&wn, "early.a.01"), id(&wn, "belated.s.01"), true),
        vec![Node::Root]
    );
}

#[test]
fn wup_scores_across_parts_of_speech() {
    let wn = load();
    let car = id(&wn, "car.n.01");
    let close = |a: Option<f64>, b: f64| a.is_some_and(|v| (v - b).abs() < 1e-9);

    assert!(close(wup_similarity(&wn, car, id(&wn, "jalopy.n.01")), 0.96));
    assert!(close(wup_similarity(&wn, car, id(&wn, "code.n.01")), 0.125));
    assert_eq!(wup_similarity(&wn, car, id(&wn, "drive.v.01")), None);

    let travel = id(&wn, "travel.v.01");
    let drive = id(&wn, "drive.v.01");
    assert!(close(wup_similarity(&wn, travel, drive), 2.0 / 3.0));
    assert!(close(wup_similarity(&wn, drive, travel), 0.4));
    // Unrelated verbs only share the simulated root.
    assert!(close(wup_similarity(&wn, drive, id(&wn, "bus.v.01")), 2.0 / 6.0));
    assert!(close(wup_similarity(&wn, drive, id(&wn, "code.v.01")), 0.4));
}
