//! Lexicon - the loaded, immutable synset collection.
//!
//! Built once from a decoded document and never mutated afterwards. Share
//! it across threads as `Arc<Lexicon>`; every query borrows it read-only.

use std::fmt;
use std::path::Path;

use super::envelope::{self, MAGIC};
use super::index::LemmaIndex;
use super::morphy::{morph_candidates, morphy, normalize};
use super::store::SynsetStore;
use super::types::{LexiconDocument, Pos, Synset};
use crate::error::{EnvelopeError, LexiconError, Result};

/// Loaded lexicon: synset store plus lemma index.
#[derive(Debug)]
pub struct Lexicon {
    version: u32,

    /// SHA-256 of the payload this lexicon was decoded from, if any.
    digest: Option<String>,

    store: SynsetStore,
    index: LemmaIndex,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Lexicon {
    /// Content equality; the source digest is provenance, not content.
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version && self.store.synsets() == other.store.synsets()
    }
}

impl Lexicon {
    /// Create an empty lexicon (for testing or when no data is configured)
    pub fn empty() -> Self {
        Self::from_document(LexiconDocument::new(Vec::new()))
    }

    /// Build the store and index from a document. Lemmas are stored in
    /// normalized form.
    pub fn from_document(document: LexiconDocument) -> Self {
        let LexiconDocument { version, synsets } = document;
        let synsets: Vec<Synset> = synsets
            .into_iter()
            .map(|mut row| {
                row.lemmas = row.lemmas.iter().map(|l| normalize(l)).collect();
                row
            })
            .collect();

        let store = SynsetStore::build(synsets);
        let index = LemmaIndex::build(&store);

        tracing::info!(
            version,
            synsets = store.len(),
            lemmas = index.len(),
            "lexicon loaded"
        );

        Self {
            version,
            digest: None,
            store,
            index,
        }
    }

    pub fn with_digest(mut self, digest: String) -> Self {
        self.digest = Some(digest);
        self
    }

    /// Decode a framed or bare lexicon buffer.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        envelope::decode(bytes)
    }

    /// Load a lexicon file.
    ///
    /// `.bin` files must be framed; anything else is auto-detected.
    pub fn load_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let packed = path.extension().is_some_and(|ext| ext == "bin");
        if packed && !bytes.starts_with(MAGIC) {
            let found = &bytes[..MAGIC.len().min(bytes.len())];
            return Err(EnvelopeError::MissingMagic {
                expected: String::from_utf8_lossy(MAGIC).into_owned(),
                found: String::from_utf8_lossy(found).into_owned(),
            }
            .into());
        }

        tracing::info!(path = %path.display(), bytes = bytes.len(), "loading lexicon");
        Self::decode(&bytes)
    }

    /// Reconstruct the document this lexicon represents.
    pub fn to_document(&self) -> LexiconDocument {
        LexiconDocument {
            version: self.version,
            synsets: self.store.synsets().to_vec(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    pub fn store(&self) -> &SynsetStore {
        &self.store
    }

    pub fn index(&self) -> &LemmaIndex {
        &self.index
    }

    pub fn synset(&self, id: &str) -> Option<&Synset> {
        self.store.by_id(id)
    }

    pub fn synsets(&self) -> &[Synset] {
        self.store.synsets()
    }

    pub fn all_synsets(&self, pos: Option<Pos>) -> Vec<&Synset> {
        self.store.all_synsets(pos)
    }

    /// Sorted lemma keys, optionally restricted to a part of speech
    pub fn lemmas(&self, pos: Option<Pos>) -> Vec<&str> {
        self.index.lemmas(&self.store, pos)
    }

    // =========================================================================
    // Lemma lookup
    // =========================================================================

    /// Synsets indexed under `lemma` (normalized first), in bucket order.
    pub fn lookup(&self, lemma: &str) -> Vec<&Synset> {
        self.index
            .get(&normalize(lemma))
            .iter()
            .map(|&idx| self.store.at(idx))
            .collect()
    }

    /// Synsets for a surface word: reduce with [`morphy`], look up the
    /// root, keep only matching pos when one is given.
    pub fn synsets_for(&self, word: &str, pos: Option<Pos>) -> Vec<&Synset> {
        let root = morphy(word, pos);
        self.index
            .get(&root)
            .iter()
            .map(|&idx| self.store.at(idx))
            .filter(|s| s.matches_pos(pos))
            .collect()
    }

    /// First morphological candidate that is actually indexed (with a
    /// synset of matching pos when one is given).
    pub fn morphy_known(&self, word: &str, pos: Option<Pos>) -> Option<String> {
        morph_candidates(word, pos).into_iter().find(|candidate| {
            self.index
                .get(candidate)
                .iter()
                .any(|&idx| self.store.at(idx).matches_pos(pos))
        })
    }

    // =========================================================================
    // Statistics (for debugging/logging)
    // =========================================================================

    pub fn stats(&self) -> LexiconStats {
        let count = |pos| self.store.all_synsets(Some(pos)).len();
        LexiconStats {
            version: self.version,
            digest: self.digest.clone(),
            synset_count: self.store.len(),
            noun_count: count(Pos::Noun),
            verb_count: count(Pos::Verb),
            adjective_count: count(Pos::Adjective),
            adverb_count: count(Pos::Adverb),
            lemma_count: self.index.len(),
            taxonomy_edges: self.store.taxonomy_edge_count(),
        }
    }
}

/// Statistics about a loaded lexicon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconStats {
    pub version: u32,
    pub digest: Option<String>,
    pub synset_count: usize,
    pub noun_count: usize,
    pub verb_count: usize,
    pub adjective_count: usize,
    pub adverb_count: usize,
    pub lemma_count: usize,
    pub taxonomy_edges: usize,
}

impl fmt::Display for LexiconStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Lexicon Statistics:")?;
        writeln!(f, "  Version: {}", self.version)?;
        writeln!(f, "  Digest: {}", self.digest.as_deref().unwrap_or("-"))?;
        writeln!(f, "  Synsets: {}", self.synset_count)?;
        writeln!(
            f,
            "    n={} v={} a={} r={}",
            self.noun_count, self.verb_count, self.adjective_count, self.adverb_count
        )?;
        writeln!(f, "  Lemmas: {}", self.lemma_count)?;
        writeln!(f, "  Taxonomy edges: {}", self.taxonomy_edges)?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
