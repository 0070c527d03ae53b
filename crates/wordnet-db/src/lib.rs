//! Load WordNet dictionaries with zero-copy text.
//!
//! This crate ingests the canonical `data.*`/`index.*` files and exposes
//! borrowed `&str` slices for all text. Callers choose between memory-mapped
//! files or owned buffers at runtime via [`LoadMode`].
//!
//! Public access is read-only (no `pub` fields). On top of raw record access
//! the database answers the questions a sense-based scorer asks:
//! - which synsets a lemma has, in index order ([`WordNet::synsets_for_lemma`]);
//! - what a synset means ([`WordNet::definition`]);
//! - which synsets sit directly above it ([`WordNet::hypernyms`]);
//! - how to name it and find it again by name ([`WordNet::sense_key`],
//!   [`WordNet::resolve_sense_key`]).
//!
//! # Example
//! ```no_run
//! use wordnet_db::{LoadMode, WordNet};
//! use wordnet_types::{Pos, SenseKey};
//!
//! # fn main() -> anyhow::Result<()> {
//! let wn = WordNet::load_with_mode("/path/to/wordnet", LoadMode::Mmap)?;
//! for sid in wn.synsets_for_lemma(Pos::Noun, "car") {
//!     let key = wn.sense_key(*sid).unwrap();
//!     println!("{key}: {}", wn.definition(*sid).unwrap_or_default());
//! }
//!
//! let car: SenseKey = "car.n.01".parse()?;
//! let id = wn.resolve_sense_key(&car).expect("car.n.01 present");
//! println!("hypernyms: {:?}", wn.hypernyms(id).collect::<Vec<_>>());
//! # Ok(()) }
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use memmap2::Mmap;
use wordnet_types::{
    Gloss, IndexEntry, Lemma, Pointer, Pos, SenseKey, Synset, SynsetId, SynsetType, decode_st,
    is_hypernym_symbol, strip_adj_marker,
};

/// Strategy for loading dictionary files.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map each WordNet file (fast, zero-copy).
    Mmap,
    /// Read each file into an owned buffer (portable fallback).
    Owned,
}

impl LoadMode {
    /// Parse `mmap`/`owned` (case-insensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mmap" => Some(LoadMode::Mmap),
            "owned" => Some(LoadMode::Owned),
            _ => None,
        }
    }
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum FileKind {
    DataNoun,
    DataVerb,
    DataAdj,
    DataAdv,
    IndexNoun,
    IndexVerb,
    IndexAdj,
    IndexAdv,
}

impl FileKind {
    fn data(pos: Pos) -> Self {
        match pos {
            Pos::Noun => FileKind::DataNoun,
            Pos::Verb => FileKind::DataVerb,
            Pos::Adj => FileKind::DataAdj,
            Pos::Adv => FileKind::DataAdv,
        }
    }

    fn index(pos: Pos) -> Self {
        match pos {
            Pos::Noun => FileKind::IndexNoun,
            Pos::Verb => FileKind::IndexVerb,
            Pos::Adj => FileKind::IndexAdj,
            Pos::Adv => FileKind::IndexAdv,
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            FileKind::DataNoun => "data.noun",
            FileKind::DataVerb => "data.verb",
            FileKind::DataAdj => "data.adj",
            FileKind::DataAdv => "data.adv",
            FileKind::IndexNoun => "index.noun",
            FileKind::IndexVerb => "index.verb",
            FileKind::IndexAdj => "index.adj",
            FileKind::IndexAdv => "index.adv",
        }
    }
}

#[derive(Clone, Copy)]
struct TextRef {
    file: FileKind,
    start: usize,
    len: usize,
}

struct DictFiles {
    data: [Buffer; 4],
    index: [Buffer; 4],
}

impl DictFiles {
    fn load(dict_dir: &Path, mode: LoadMode) -> Result<Self> {
        let load = |kind: FileKind| load_file(dict_dir.join(kind.file_name()), mode);
        Ok(Self {
            data: [
                load(FileKind::DataNoun)?,
                load(FileKind::DataVerb)?,
                load(FileKind::DataAdj)?,
                load(FileKind::DataAdv)?,
            ],
            index: [
                load(FileKind::IndexNoun)?,
                load(FileKind::IndexVerb)?,
                load(FileKind::IndexAdj)?,
                load(FileKind::IndexAdv)?,
            ],
        })
    }

    fn bytes(&self, file: FileKind) -> &[u8] {
        match file {
            FileKind::DataNoun => self.data[0].as_slice(),
            FileKind::DataVerb => self.data[1].as_slice(),
            FileKind::DataAdj => self.data[2].as_slice(),
            FileKind::DataAdv => self.data[3].as_slice(),
            FileKind::IndexNoun => self.index[0].as_slice(),
            FileKind::IndexVerb => self.index[1].as_slice(),
            FileKind::IndexAdj => self.index[2].as_slice(),
            FileKind::IndexAdv => self.index[3].as_slice(),
        }
    }

    fn text(&self, r: TextRef) -> &str {
        let bytes = self.bytes(r.file);
        let slice = &bytes[r.start..r.start + r.len];
        // Every line was validated with `from_utf8` during parsing.
        std::str::from_utf8(slice).expect("wordnet text is valid utf8")
    }
}

struct LemmaData {
    text: TextRef,
    lex_id: u8,
}

struct PointerData {
    symbol: TextRef,
    target: SynsetId,
    src_word: Option<u16>,
    dst_word: Option<u16>,
}

struct GlossData {
    raw: TextRef,
    definition: TextRef,
    examples: Vec<TextRef>,
}

struct SynsetData {
    id: SynsetId,
    lex_filenum: u8,
    synset_type: SynsetType,
    words: Vec<LemmaData>,
    pointers: Vec<PointerData>,
    gloss: GlossData,
}

struct IndexEntryData {
    lemma: TextRef,
    synset_cnt: u32,
    p_cnt: u32,
    ptr_symbols: Vec<TextRef>,
    sense_cnt: u32,
    tagsense_cnt: u32,
    synsets: Vec<SynsetId>,
}

/// In-memory view of a WordNet dictionary backed by mmap or owned buffers.
///
/// Immutable once loaded, so it can be shared across threads behind an `Arc`.
pub struct WordNet {
    files: DictFiles,
    index: HashMap<(Pos, String), IndexEntryData>,
    synsets: HashMap<SynsetId, SynsetData>,
}

impl WordNet {
    /// Load WordNet from a directory containing `data.*` and `index.*` files.
    ///
    /// Defaults to memory-mapping the source files. Use [`load_with_mode`] to
    /// force owned buffers instead.
    ///
    /// [`load_with_mode`]: WordNet::load_with_mode
    pub fn load(dict_dir: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_mode(dict_dir, LoadMode::Mmap)
    }

    /// Load WordNet choosing between mmap and owned buffers at runtime.
    pub fn load_with_mode(dict_dir: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let dir = dict_dir.as_ref();
        for pos in Pos::ALL {
            for kind in [FileKind::data(pos), FileKind::index(pos)] {
                let path = dir.join(kind.file_name());
                if !path.exists() {
                    anyhow::bail!("missing required WordNet file: {}", path.display());
                }
            }
        }

        let files = DictFiles::load(dir, mode)?;

        let mut index = HashMap::new();
        let mut synsets = HashMap::new();
        for pos in Pos::ALL {
            let kind = FileKind::index(pos);
            parse_index(files.bytes(kind), kind, pos, &mut index)?;
            let kind = FileKind::data(pos);
            parse_data(files.bytes(kind), kind, pos, &mut synsets)?;
        }

        Ok(Self {
            files,
            index,
            synsets,
        })
    }

    /// Check whether a lemma exists for the given POS according to index files.
    pub fn lemma_exists(&self, pos: Pos, lemma: &str) -> bool {
        self.index.contains_key(&(pos, normalize_lemma(lemma)))
    }

    /// Fetch a raw `IndexEntry` if present.
    pub fn index_entry(&self, pos: Pos, lemma: &str) -> Option<IndexEntry<'_>> {
        let key = (pos, normalize_lemma(lemma));
        self.index.get(&key).map(|entry| IndexEntry {
            lemma: self.files.text(entry.lemma),
            pos,
            synset_cnt: entry.synset_cnt,
            p_cnt: entry.p_cnt,
            ptr_symbols: entry
                .ptr_symbols
                .iter()
                .map(|r| self.files.text(*r))
                .collect(),
            sense_cnt: entry.sense_cnt,
            tagsense_cnt: entry.tagsense_cnt,
            synsets: entry.synsets.as_slice(),
        })
    }

    /// Return the synsets associated with a lemma in sense order, or an empty slice.
    ///
    /// Lookup is case-insensitive; spaces are treated as underscores.
    pub fn synsets_for_lemma(&self, pos: Pos, lemma: &str) -> &[SynsetId] {
        let key = (pos, normalize_lemma(lemma));
        self.index
            .get(&key)
            .map(|entry| entry.synsets.as_slice())
            .unwrap_or_default()
    }

    /// Fetch a `Synset` by id if loaded.
    pub fn get_synset(&self, id: SynsetId) -> Option<Synset<'_>> {
        self.synsets.get(&id).map(|syn| self.make_synset_view(syn))
    }

    /// Raw `ss_type` of a synset, distinguishing adjective satellites.
    pub fn synset_type(&self, id: SynsetId) -> Option<SynsetType> {
        self.synsets.get(&id).map(|syn| syn.synset_type)
    }

    /// Gloss definition (text before the first `;`, examples excluded).
    pub fn definition(&self, id: SynsetId) -> Option<&str> {
        self.synsets
            .get(&id)
            .map(|syn| self.files.text(syn.gloss.definition))
    }

    /// Direct hypernyms of a synset: targets of its `@` and `@i` pointers.
    ///
    /// Unknown ids yield nothing.
    pub fn hypernyms(&self, id: SynsetId) -> impl Iterator<Item = SynsetId> + '_ {
        self.synsets
            .get(&id)
            .into_iter()
            .flat_map(|syn| syn.pointers.iter())
            .filter(move |ptr| is_hypernym_symbol(self.files.text(ptr.symbol)))
            .map(|ptr| ptr.target)
    }

    /// Name a synset as `lemma.pos.NN` using its first lemma.
    ///
    /// `NN` is the synset's position in that lemma's index entry. Returns
    /// `None` for unknown ids or when the index does not list the synset
    /// under its own head lemma.
    pub fn sense_key(&self, id: SynsetId) -> Option<SenseKey> {
        let data = self.synsets.get(&id)?;
        let first = data.words.first()?;
        let lemma = normalize_lemma(strip_adj_marker(self.files.text(first.text)));
        let entry = self.index.get(&(id.pos, lemma.clone()))?;
        let position = entry.synsets.iter().position(|sid| *sid == id)?;
        Some(SenseKey::new(lemma, data.synset_type, position as u32 + 1))
    }

    /// Resolve a `lemma.pos.NN` key to exactly one synset.
    ///
    /// A key with pos `s` only resolves to a satellite adjective; a head
    /// adjective must be named with `a`.
    pub fn resolve_sense_key(&self, key: &SenseKey) -> Option<SynsetId> {
        let pos = key.pos();
        let entry = self.index.get(&(pos, normalize_lemma(&key.lemma)))?;
        let position = usize::try_from(key.sense.checked_sub(1)?).ok()?;
        let id = *entry.synsets.get(position)?;
        let data = self.synsets.get(&id)?;
        if key.synset_type == SynsetType::AdjSatellite && data.synset_type == SynsetType::Adj {
            return None;
        }
        Some(id)
    }

    /// Iterate over all synsets as borrowed views.
    pub fn iter_synsets(&self) -> impl Iterator<Item = Synset<'_>> + '_ {
        self.synsets.values().map(|s| self.make_synset_view(s))
    }

    /// Number of `(pos, lemma)` index entries.
    pub fn index_count(&self) -> usize {
        self.index.len()
    }

    /// Number of synsets.
    pub fn synset_count(&self) -> usize {
        self.synsets.len()
    }

    fn make_synset_view<'a>(&'a self, data: &'a SynsetData) -> Synset<'a> {
        let words = data
            .words
            .iter()
            .map(|w| Lemma {
                text: self.files.text(w.text),
                lex_id: w.lex_id,
            })
            .collect();
        let pointers = data
            .pointers
            .iter()
            .map(|p| Pointer {
                symbol: self.files.text(p.symbol),
                target: p.target,
                src_word: p.src_word,
                dst_word: p.dst_word,
            })
            .collect();
        let gloss = Gloss {
            raw: self.files.text(data.gloss.raw),
            definition: self.files.text(data.gloss.definition),
            examples: data
                .gloss
                .examples
                .iter()
                .map(|r| self.files.text(*r))
                .collect(),
        };

        Synset {
            id: data.id,
            lex_filenum: data.lex_filenum,
            synset_type: data.synset_type,
            words,
            pointers,
            gloss,
        }
    }
}

fn load_file(path: PathBuf, mode: LoadMode) -> Result<Buffer> {
    match mode {
        LoadMode::Mmap => {
            let file = File::open(&path).with_context(|| format!("open {}", path.display()))?;
            // SAFETY: dictionary files are treated as read-only for the
            // lifetime of the map.
            unsafe { Mmap::map(&file) }
                .map(Buffer::Mmap)
                .with_context(|| format!("mmap {}", path.display()))
        }
        LoadMode::Owned => {
            let mut file = File::open(&path).with_context(|| format!("open {}", path.display()))?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}

fn parse_index(
    bytes: &[u8],
    file: FileKind,
    pos: Pos,
    index: &mut HashMap<(Pos, String), IndexEntryData>,
) -> Result<()> {
    for (lineno, raw_line) in bytes.split(|b| *b == b'\n').enumerate() {
        let line = strip_cr(raw_line);
        // License header lines start with whitespace.
        if line.is_empty() || matches!(line.first(), Some(b' ' | b'\t')) {
            continue;
        }
        let line_str = std::str::from_utf8(line)
            .with_context(|| format!("{:?}:{} not utf8", file, lineno + 1))?;
        let tokens: Vec<&str> = line_str.split_ascii_whitespace().collect();
        if tokens.len() < 6 {
            anyhow::bail!(
                "{:?}:{} malformed index line (too few tokens)",
                file,
                lineno + 1
            );
        }

        let lemma_token = tokens[0];
        let lemma_ref = text_ref_str(file, bytes, lemma_token);
        let lemma_key = normalize_lemma(lemma_token);

        let synset_cnt: u32 = tokens[2]
            .parse()
            .with_context(|| format!("index {:?}:{} synset_cnt", file, lineno + 1))?;
        let p_cnt: u32 = tokens[3]
            .parse()
            .with_context(|| format!("index {:?}:{} p_cnt", file, lineno + 1))?;

        let expected_ptrs = p_cnt as usize;
        let mut idx = 4;
        if tokens.len() < idx + expected_ptrs {
            anyhow::bail!("{:?}:{} pointer count mismatch", file, lineno + 1);
        }
        let ptr_symbols = tokens[idx..idx + expected_ptrs]
            .iter()
            .map(|sym| text_ref_str(file, bytes, sym))
            .collect::<Vec<_>>();
        idx += expected_ptrs;
        if tokens.len() < idx + 2 {
            anyhow::bail!("{:?}:{} missing sense counts", file, lineno + 1);
        }
        let sense_cnt: u32 = tokens[idx]
            .parse()
            .with_context(|| format!("index {:?}:{} sense_cnt", file, lineno + 1))?;
        idx += 1;
        let tagsense_cnt: u32 = tokens[idx]
            .parse()
            .with_context(|| format!("index {:?}:{} tagsense_cnt", file, lineno + 1))?;
        idx += 1;

        let offsets: Vec<u32> = tokens[idx..]
            .iter()
            .map(|t| {
                t.parse::<u32>()
                    .with_context(|| format!("index {:?}:{} synset_offsets", file, lineno + 1))
            })
            .collect::<Result<_>>()?;
        if offsets.len() != synset_cnt as usize {
            anyhow::bail!(
                "{:?}:{} synset_cnt mismatch (expected {}, got {})",
                file,
                lineno + 1,
                synset_cnt,
                offsets.len()
            );
        }

        index.insert(
            (pos, lemma_key),
            IndexEntryData {
                lemma: lemma_ref,
                synset_cnt,
                p_cnt,
                ptr_symbols,
                sense_cnt,
                tagsense_cnt,
                synsets: offsets
                    .into_iter()
                    .map(|offset| SynsetId { pos, offset })
                    .collect(),
            },
        );
    }

    Ok(())
}

fn parse_data(
    bytes: &[u8],
    file: FileKind,
    pos: Pos,
    synsets: &mut HashMap<SynsetId, SynsetData>,
) -> Result<()> {
    for (lineno, raw_line) in bytes.split(|b| *b == b'\n').enumerate() {
        let line = strip_cr(raw_line);
        if line.is_empty() || matches!(line.first(), Some(b' ' | b'\t')) {
            continue;
        }
        let line_str = std::str::from_utf8(line)
            .with_context(|| format!("{:?}:{} not utf8", file, lineno + 1))?;
        let (left, gloss_part) = match line_str.split_once('|') {
            Some((l, r)) => (l.trim(), r.trim()),
            None => (line_str.trim(), ""),
        };

        let tokens: Vec<&str> = left.split_ascii_whitespace().collect();
        if tokens.len() < 4 {
            anyhow::bail!("{:?}:{} malformed data line", file, lineno + 1);
        }

        let offset: u32 = tokens[0]
            .parse()
            .with_context(|| format!("{:?}:{} offset", file, lineno + 1))?;
        let lex_filenum: u8 = tokens[1]
            .parse()
            .with_context(|| format!("{:?}:{} lex_filenum", file, lineno + 1))?;
        let ss_type_char = tokens[2]
            .chars()
            .next()
            .ok_or_else(|| anyhow::anyhow!("{:?}:{} missing ss_type", file, lineno + 1))?;
        let synset_type = SynsetType::from_char(ss_type_char).ok_or_else(|| {
            anyhow::anyhow!("{:?}:{} invalid ss_type {}", file, lineno + 1, ss_type_char)
        })?;
        if synset_type.pos() != pos {
            anyhow::bail!(
                "{:?}:{} ss_type {} does not belong in this file",
                file,
                lineno + 1,
                ss_type_char
            );
        }
        let w_cnt: usize = usize::from_str_radix(tokens[3], 16)
            .with_context(|| format!("{:?}:{} w_cnt", file, lineno + 1))?;

        let mut idx = 4;
        if tokens.len() < idx + (w_cnt * 2) {
            anyhow::bail!("{:?}:{} not enough word/lex_id pairs", file, lineno + 1);
        }
        let mut words = Vec::with_capacity(w_cnt);
        for _ in 0..w_cnt {
            let text_token = tokens[idx];
            let lex_id_token = tokens[idx + 1];
            let lex_id: u8 = u8::from_str_radix(lex_id_token, 16)
                .with_context(|| format!("{:?}:{} lex_id", file, lineno + 1))?;
            words.push(LemmaData {
                text: text_ref_str(file, bytes, text_token),
                lex_id,
            });
            idx += 2;
        }

        if tokens.len() <= idx {
            anyhow::bail!("{:?}:{} missing pointer count", file, lineno + 1);
        }
        let p_cnt: usize = tokens[idx]
            .parse()
            .with_context(|| format!("{:?}:{} p_cnt", file, lineno + 1))?;
        idx += 1;

        let mut pointers = Vec::with_capacity(p_cnt);
        for _ in 0..p_cnt {
            if tokens.len() < idx + 4 {
                anyhow::bail!("{:?}:{} incomplete pointer block", file, lineno + 1);
            }
            let symbol = tokens[idx];
            let target_offset: u32 = tokens[idx + 1]
                .parse()
                .with_context(|| format!("{:?}:{} pointer target offset", file, lineno + 1))?;
            let target_pos = tokens[idx + 2]
                .chars()
                .next()
                .and_then(Pos::from_char)
                .ok_or_else(|| anyhow::anyhow!("{:?}:{} pointer target pos", file, lineno + 1))?;
            let (src_word, dst_word) = decode_st(tokens[idx + 3]);
            pointers.push(PointerData {
                symbol: text_ref_str(file, bytes, symbol),
                target: SynsetId {
                    pos: target_pos,
                    offset: target_offset,
                },
                src_word,
                dst_word,
            });
            idx += 4;
        }
        // Verb frame lists follow the pointers; nothing downstream reads them.

        let gloss = parse_gloss(file, bytes, gloss_part);
        let id = SynsetId { pos, offset };
        synsets.insert(
            id,
            SynsetData {
                id,
                lex_filenum,
                synset_type,
                words,
                pointers,
                gloss,
            },
        );
    }

    Ok(())
}

fn parse_gloss(file: FileKind, root: &[u8], gloss: &str) -> GlossData {
    let trimmed = gloss.trim();
    let gloss_raw = text_ref_str(file, root, trimmed);

    let mut examples = Vec::new();
    let mut in_quote = false;
    let mut quote_start: Option<usize> = None;
    let mut def_end = trimmed.len();
    for (idx, ch) in trimmed.char_indices() {
        match ch {
            '"' => {
                if in_quote {
                    if let Some(start) = quote_start.take()
                        && idx > start + 1
                    {
                        examples.push(text_ref_str(file, root, &trimmed[start + 1..idx]));
                    }
                } else {
                    quote_start = Some(idx);
                }
                in_quote = !in_quote;
            }
            ';' if !in_quote && def_end == trimmed.len() => {
                def_end = idx;
            }
            _ => {}
        }
    }

    GlossData {
        raw: gloss_raw,
        definition: text_ref_str(file, root, trimmed[..def_end].trim()),
        examples,
    }
}

/// Locate `token` inside `root`; `token` must be a subslice of `root`.
fn text_ref_str(file: FileKind, root: &[u8], token: &str) -> TextRef {
    let start = token.as_ptr() as usize - root.as_ptr() as usize;
    TextRef {
        file,
        start,
        len: token.len(),
    }
}

fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn normalize_lemma(text: &str) -> String {
    let mut s = text.trim().to_string();
    s.make_ascii_lowercase();
    s.replace(' ', "_")
}
