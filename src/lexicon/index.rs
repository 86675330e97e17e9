//! Lemma -> synset inverted index.
//!
//! Buckets keep lexicon declaration order. The first entry of a bucket is
//! the synset a word query resolves to, so insertion order is observable.

use smallvec::SmallVec;
use std::collections::HashMap;

use super::morphy::normalize;
use super::store::SynsetStore;
use super::types::{LemmaKey, Pos};

/// Positions into the store, in declaration order
type Bucket = SmallVec<[usize; 4]>;

#[derive(Debug, Default)]
pub struct LemmaIndex {
    buckets: HashMap<LemmaKey, Bucket>,
}

impl LemmaIndex {
    /// Index every lemma of every stored synset under its normalized form.
    ///
    /// Each lemma appends its synset, so two lemmas that normalize to the
    /// same key put the synset in that bucket twice.
    pub fn build(store: &SynsetStore) -> Self {
        let mut buckets: HashMap<LemmaKey, Bucket> = HashMap::new();
        for (idx, synset) in store.synsets().iter().enumerate() {
            for lemma in &synset.lemmas {
                buckets.entry(normalize(lemma)).or_default().push(idx);
            }
        }
        tracing::debug!(lemmas = buckets.len(), "built lemma index");
        Self { buckets }
    }

    /// Store positions for an exact lemma key; empty when absent.
    pub fn get(&self, key: &str) -> &[usize] {
        self.buckets.get(key).map(|b| b.as_slice()).unwrap_or(&[])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.buckets.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Sorted lemma keys. With a pos, only lemmas that have at least one
    /// synset of that part of speech.
    pub fn lemmas(&self, store: &SynsetStore, pos: Option<Pos>) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .buckets
            .iter()
            .filter(|(_, bucket)| bucket.iter().any(|&idx| store.at(idx).matches_pos(pos)))
            .map(|(lemma, _)| lemma.as_str())
            .collect();
        out.sort_unstable();
        out
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::types::Synset;

    fn row(id: &str, pos: Pos, lemmas: &[&str]) -> Synset {
        let mut synset = Synset::new(id, Some(pos));
        synset.lemmas = lemmas.iter().map(|s| s.to_string()).collect();
        synset
    }

    fn store() -> SynsetStore {
        SynsetStore::build(vec![
            row("run.v.01", Pos::Verb, &["run", "Run"]),
            row("run.n.01", Pos::Noun, &["run", "Test Run"]),
            row("sprint.v.01", Pos::Verb, &["sprint", "run"]),
        ])
    }

    #[test]
    fn test_bucket_order_follows_declaration() {
        let store = store();
        let index = LemmaIndex::build(&store);
        let ids: Vec<&str> = index
            .get("run")
            .iter()
            .map(|&i| store.at(i).id.as_str())
            .collect();
        // "run" and "Run" both land run.v.01 in the bucket
        assert_eq!(ids, vec!["run.v.01", "run.v.01", "run.n.01", "sprint.v.01"]);
    }

    #[test]
    fn test_keys_are_normalized() {
        let store = store();
        let index = LemmaIndex::build(&store);
        assert_eq!(index.get("test_run").len(), 1);
        assert!(index.get("Test Run").is_empty());
        assert!(index.get("walk").is_empty());
    }

    #[test]
    fn test_lemmas_listing() {
        let store = store();
        let index = LemmaIndex::build(&store);
        assert_eq!(index.lemmas(&store, None), vec!["run", "sprint", "test_run"]);
        assert_eq!(index.lemmas(&store, Some(Pos::Noun)), vec!["run", "test_run"]);
        assert!(index.lemmas(&store, Some(Pos::Adverb)).is_empty());
    }
}
