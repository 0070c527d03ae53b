use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use wordnet_db::{LoadMode, WordNet};
use wordnet_types::Pos;

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let dict_dir = args
        .next()
        .map(PathBuf::from)
        .context("usage: cargo run -p wordnet-db --example stats -- <path-to-wordnet-dir> [word]")?;
    let word = args.next().unwrap_or_else(|| "car".to_string());

    let wn = WordNet::load_with_mode(&dict_dir, LoadMode::Mmap)
        .with_context(|| format!("loading WordNet from {}", dict_dir.display()))?;

    let mut hypernym_edges = 0usize;
    let mut gloss_example_count = 0usize;
    for syn in wn.iter_synsets() {
        hypernym_edges += syn.pointers.iter().filter(|p| p.is_hypernym()).count();
        gloss_example_count += syn.gloss.examples.len();
    }

    println!("Dictionary: {}", dict_dir.display());
    println!("Index entries : {}", wn.index_count());
    println!("Synsets       : {}", wn.synset_count());
    println!("Hypernym edges: {}", hypernym_edges);
    println!("Gloss examples: {}", gloss_example_count);

    println!("\nSenses of '{}':", word);
    for pos in Pos::ALL {
        for sid in wn.synsets_for_lemma(pos, &word) {
            let name = wn
                .sense_key(*sid)
                .map(|k| k.to_string())
                .unwrap_or_else(|| format!("{}:{}", pos.to_char(), sid.offset));
            let parents: Vec<String> = wn
                .hypernyms(*sid)
                .filter_map(|h| wn.sense_key(h))
                .map(|k| k.to_string())
                .collect();
            println!(
                "  {:<20} {} [is-a: {}]",
                name,
                wn.definition(*sid).unwrap_or_default(),
                parents.join(", ")
            );
        }
    }

    Ok(())
}
