//! Taxonomy measures over the WordNet hypernym graph.
//!
//! The graph is reached through [`HypernymGraph`], so the measures work
//! against a loaded [`wordnet_db::WordNet`] or any hand-built parent map.
//! Edges are `@` (hypernym) and `@i` (instance hypernym) pointers.
//!
//! # Wu-Palmer
//! [`wup_similarity`] scores two synsets by the depth of their lowest common
//! subsumer relative to their own distance from it:
//!
//! ```text
//! depth = max_depth(subsumer) + 1
//! sim   = 2 * depth / ((dist(a, subsumer) + depth) + (dist(b, subsumer) + depth))
//! ```
//!
//! Nouns hang off shared real roots. Verbs, adjectives and adverbs have no
//! single top node, so a simulated root sits above every synset of those
//! parts of speech. Synsets of different parts of speech are not comparable.
//!
//! ```no_run
//! use wordnet_db::WordNet;
//! use wordnet_similarity::wup_similarity;
//!
//! # fn main() -> anyhow::Result<()> {
//! let wn = WordNet::load("/path/to/wordnet")?;
//! let car = wn.resolve_sense_key(&"car.n.01".parse()?).unwrap();
//! let bus = wn.resolve_sense_key(&"bus.n.01".parse()?).unwrap();
//! println!("{:?}", wup_similarity(&wn, car, bus));
//! # Ok(()) }
//! ```

use std::collections::{HashMap, HashSet, VecDeque};

use wordnet_db::WordNet;
use wordnet_types::{Pos, SynsetId};

/// Source of direct hypernym edges.
pub trait HypernymGraph {
    /// Direct hypernyms (including instance hypernyms) of `id`.
    fn parents(&self, id: SynsetId) -> Vec<SynsetId>;
}

impl HypernymGraph for WordNet {
    fn parents(&self, id: SynsetId) -> Vec<SynsetId> {
        self.hypernyms(id).collect()
    }
}

impl<G: HypernymGraph + ?Sized> HypernymGraph for &G {
    fn parents(&self, id: SynsetId) -> Vec<SynsetId> {
        (**self).parents(id)
    }
}

/// A node in the hypernym graph, or the simulated top node.
///
/// `Root` orders before every synset, so it wins ties between equally deep
/// subsumers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Node {
    Root,
    Synset(SynsetId),
}

/// Whether synsets of this POS need a simulated root to share an ancestor.
pub fn needs_root(pos: Pos) -> bool {
    pos != Pos::Noun
}

/// Breadth-first distances from `start` to itself and each ancestor.
///
/// With `simulate_root`, [`Node::Root`] is added one step beyond the
/// farthest ancestor.
pub fn ancestor_distances<G: HypernymGraph + ?Sized>(
    graph: &G,
    start: Node,
    simulate_root: bool,
) -> HashMap<Node, u32> {
    let mut dist = HashMap::new();
    let Node::Synset(start) = start else {
        dist.insert(Node::Root, 0);
        return dist;
    };

    let mut queue = VecDeque::from([(start, 0u32)]);
    while let Some((id, d)) = queue.pop_front() {
        if dist.contains_key(&Node::Synset(id)) {
            continue;
        }
        dist.insert(Node::Synset(id), d);
        queue.extend(graph.parents(id).into_iter().map(|p| (p, d + 1)));
    }

    if simulate_root {
        let farthest = dist.values().copied().max().unwrap_or(0);
        dist.insert(Node::Root, farthest + 1);
    }
    dist
}

/// Memoised shortest and longest path lengths from synsets up to a root.
///
/// Scoped to a single computation; drop it afterwards.
pub struct Depths<'g, G: ?Sized> {
    graph: &'g G,
    min: HashMap<SynsetId, u32>,
    max: HashMap<SynsetId, u32>,
}

impl<'g, G: HypernymGraph + ?Sized> Depths<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            min: HashMap::new(),
            max: HashMap::new(),
        }
    }

    /// Length of the shortest hypernym path to a root. The simulated root is 0.
    pub fn min_depth(&mut self, node: Node) -> u32 {
        match node {
            Node::Root => 0,
            Node::Synset(id) => self.depth(id, Extreme::Min, &mut HashSet::new()),
        }
    }

    /// Length of the longest hypernym path to a root. The simulated root is 0.
    pub fn max_depth(&mut self, node: Node) -> u32 {
        match node {
            Node::Root => 0,
            Node::Synset(id) => self.depth(id, Extreme::Max, &mut HashSet::new()),
        }
    }

    fn depth(&mut self, id: SynsetId, extreme: Extreme, visiting: &mut HashSet<SynsetId>) -> u32 {
        let memo = match extreme {
            Extreme::Min => &self.min,
            Extreme::Max => &self.max,
        };
        if let Some(d) = memo.get(&id) {
            return *d;
        }

        visiting.insert(id);
        let mut best: Option<u32> = None;
        for parent in self.graph.parents(id) {
            // A malformed dictionary could loop; skip edges back into the walk.
            if visiting.contains(&parent) {
                continue;
            }
            let d = self.depth(parent, extreme, visiting) + 1;
            best = Some(match (best, extreme) {
                (None, _) => d,
                (Some(b), Extreme::Min) => b.min(d),
                (Some(b), Extreme::Max) => b.max(d),
            });
        }
        visiting.remove(&id);

        let d = best.unwrap_or(0);
        match extreme {
            Extreme::Min => self.min.insert(id, d),
            Extreme::Max => self.max.insert(id, d),
        };
        d
    }
}

#[derive(Clone, Copy)]
enum Extreme {
    Min,
    Max,
}

/// Common ancestors of `a` and `b` with the greatest minimum depth, sorted.
pub fn lowest_common_hypernyms<G: HypernymGraph + ?Sized>(
    graph: &G,
    a: SynsetId,
    b: SynsetId,
    simulate_root: bool,
) -> Vec<Node> {
    let paths_a = ancestor_distances(graph, Node::Synset(a), simulate_root);
    let paths_b = ancestor_distances(graph, Node::Synset(b), simulate_root);
    let mut depths = Depths::new(graph);
    lowest_common(&paths_a, &paths_b, &mut depths)
}

fn lowest_common<G: HypernymGraph + ?Sized>(
    paths_a: &HashMap<Node, u32>,
    paths_b: &HashMap<Node, u32>,
    depths: &mut Depths<'_, G>,
) -> Vec<Node> {
    let scored: Vec<(Node, u32)> = paths_a
        .keys()
        .filter(|node| paths_b.contains_key(node))
        .map(|node| (*node, depths.min_depth(*node)))
        .collect();
    let Some(deepest) = scored.iter().map(|(_, d)| *d).max() else {
        return Vec::new();
    };
    let mut lowest: Vec<Node> = scored
        .into_iter()
        .filter(|(_, d)| *d == deepest)
        .map(|(node, _)| node)
        .collect();
    lowest.sort();
    lowest
}

/// Shortest path between two nodes through any ancestor they share.
fn path_distance(from: &HashMap<Node, u32>, to: &HashMap<Node, u32>) -> Option<u32> {
    from.iter()
        .filter_map(|(node, d1)| to.get(node).map(|d2| d1 + d2))
        .min()
}

/// Wu-Palmer similarity of `a` against `b`, in `(0, 1]`.
///
/// `None` when the synsets have different parts of speech or share no
/// ancestor. When several subsumers tie, `a` itself is preferred, then the
/// simulated root, then the lowest synset id; the measure is therefore not
/// always symmetric.
pub fn wup_similarity<G: HypernymGraph + ?Sized>(
    graph: &G,
    a: SynsetId,
    b: SynsetId,
) -> Option<f64> {
    if a.pos != b.pos {
        return None;
    }
    let simulate_root = needs_root(a.pos);
    let paths_a = ancestor_distances(graph, Node::Synset(a), simulate_root);
    let paths_b = ancestor_distances(graph, Node::Synset(b), simulate_root);
    let mut depths = Depths::new(graph);

    let subsumers = lowest_common(&paths_a, &paths_b, &mut depths);
    let subsumer = if subsumers.contains(&Node::Synset(a)) {
        Node::Synset(a)
    } else {
        *subsumers.first()?
    };

    let depth = depths.max_depth(subsumer) + 1;
    let paths_sub = ancestor_distances(graph, subsumer, simulate_root);
    let len_a = path_distance(&paths_a, &paths_sub)? + depth;
    let len_b = path_distance(&paths_b, &paths_sub)? + depth;

    Some(2.0 * f64::from(depth) / f64::from(len_a + len_b))
}
