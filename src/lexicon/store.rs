//! SynsetStore - id-keyed synset storage with relation lookups.
//!
//! Relation accessors resolve lazily: ids that are not in the store are
//! dropped, and the survivors are returned sorted so that results do not
//! depend on declaration order.

use smallvec::SmallVec;
use std::collections::HashMap;

use super::types::{Pos, Relation, Synset, SynsetId};

/// Neighbour list in the undirected hypernym/hyponym graph
type Neighbours = SmallVec<[usize; 8]>;

/// Immutable synset storage, owned by the [`Lexicon`](super::Lexicon).
#[derive(Debug, Default)]
pub struct SynsetStore {
    /// Synsets in declaration order (first occurrence of each id).
    synsets: Vec<Synset>,

    /// Synset id -> position in `synsets`.
    by_id: HashMap<SynsetId, usize>,

    /// Undirected taxonomy adjacency: for each synset, every resolvable
    /// hypernym or hyponym plus every synset that names it as one.
    /// Sorted by id, no duplicates, no self loops.
    taxonomy: Vec<Neighbours>,
}

impl SynsetStore {
    /// Build the store. Later rows that repeat an earlier id are skipped.
    pub fn build(rows: Vec<Synset>) -> Self {
        let mut synsets = Vec::with_capacity(rows.len());
        let mut by_id = HashMap::with_capacity(rows.len());

        for row in rows {
            if by_id.contains_key(&row.id) {
                tracing::warn!(id = %row.id, "duplicate synset id, keeping first declaration");
                continue;
            }
            by_id.insert(row.id.clone(), synsets.len());
            synsets.push(row);
        }

        let taxonomy = build_taxonomy(&synsets, &by_id);
        Self {
            synsets,
            by_id,
            taxonomy,
        }
    }

    pub fn len(&self) -> usize {
        self.synsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synsets.is_empty()
    }

    /// All synsets in declaration order
    pub fn synsets(&self) -> &[Synset] {
        &self.synsets
    }

    /// Synsets with the given part of speech (all when `pos` is `None`)
    pub fn all_synsets(&self, pos: Option<Pos>) -> Vec<&Synset> {
        self.synsets.iter().filter(|s| s.matches_pos(pos)).collect()
    }

    pub fn by_id(&self, id: &str) -> Option<&Synset> {
        self.index_of(id).map(|idx| &self.synsets[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub(crate) fn at(&self, idx: usize) -> &Synset {
        &self.synsets[idx]
    }

    // =========================================================================
    // Relation accessors
    // =========================================================================

    /// Resolvable targets of `relation` from `id`, sorted. Repeated raw
    /// ids stay repeated. Unknown `id` gives an empty list.
    pub fn related(&self, id: &str, relation: Relation) -> Vec<&str> {
        let Some(synset) = self.by_id(id) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = synset
            .relation_ids(relation)
            .iter()
            .filter_map(|target| self.by_id(target).map(|s| s.id.as_str()))
            .collect();
        out.sort();
        out
    }

    pub fn hypernyms_of(&self, id: &str) -> Vec<&str> {
        self.related(id, Relation::Hypernym)
    }

    pub fn hyponyms_of(&self, id: &str) -> Vec<&str> {
        self.related(id, Relation::Hyponym)
    }

    pub fn similar_to_of(&self, id: &str) -> Vec<&str> {
        self.related(id, Relation::SimilarTo)
    }

    pub fn antonyms_of(&self, id: &str) -> Vec<&str> {
        self.related(id, Relation::Antonym)
    }

    /// Neighbours of `id` in the undirected hypernym/hyponym graph
    pub fn taxonomy_neighbours(&self, id: &str) -> Vec<&str> {
        self.index_of(id)
            .map(|idx| {
                self.taxonomy[idx]
                    .iter()
                    .map(|&n| self.synsets[n].id.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn taxonomy_indices(&self, idx: usize) -> &[usize] {
        &self.taxonomy[idx]
    }

    /// Number of undirected taxonomy edges
    pub fn taxonomy_edge_count(&self) -> usize {
        self.taxonomy.iter().map(|n| n.len()).sum::<usize>() / 2
    }
}

fn build_taxonomy(synsets: &[Synset], by_id: &HashMap<SynsetId, usize>) -> Vec<Neighbours> {
    let mut taxonomy: Vec<Neighbours> = vec![SmallVec::new(); synsets.len()];

    for (idx, synset) in synsets.iter().enumerate() {
        let targets = synset.hypernyms.iter().chain(synset.hyponyms.iter());
        for target in targets.filter_map(|id| by_id.get(id).copied()) {
            if target == idx {
                continue;
            }
            taxonomy[idx].push(target);
            taxonomy[target].push(idx);
        }
    }

    for neighbours in &mut taxonomy {
        neighbours.sort_unstable_by(|a, b| synsets[*a].id.cmp(&synsets[*b].id));
        neighbours.dedup();
    }
    taxonomy
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, hypernyms: &[&str], hyponyms: &[&str]) -> Synset {
        let mut synset = Synset::new(id, Some(Pos::Noun));
        synset.hypernyms = hypernyms.iter().map(|s| s.to_string()).collect();
        synset.hyponyms = hyponyms.iter().map(|s| s.to_string()).collect();
        synset
    }

    fn store() -> SynsetStore {
        SynsetStore::build(vec![
            row("dog", &["mammal", "canine", "ghost", "canine"], &[]),
            row("canine", &["carnivore"], &["dog"]),
            row("mammal", &[], &[]),
            row("carnivore", &[], &[]),
        ])
    }

    #[test]
    fn test_relations_filtered_and_sorted() {
        let store = store();
        assert_eq!(store.hypernyms_of("dog"), vec!["canine", "canine", "mammal"]);
        assert_eq!(store.hyponyms_of("canine"), vec!["dog"]);
        assert!(store.similar_to_of("dog").is_empty());
        assert!(store.antonyms_of("dog").is_empty());
    }

    #[test]
    fn test_unknown_id_is_soft_miss() {
        let store = store();
        assert!(store.by_id("ghost").is_none());
        assert!(store.hypernyms_of("ghost").is_empty());
        assert!(store.taxonomy_neighbours("ghost").is_empty());
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let store = SynsetStore::build(vec![
            row("dog", &["canine"], &[]),
            row("dog", &["wolf"], &[]),
            row("canine", &[], &[]),
        ]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.by_id("dog").unwrap().hypernyms, vec!["canine"]);
    }

    #[test]
    fn test_taxonomy_is_undirected() {
        let store = store();
        // mammal does not list dog as a hyponym, yet the edge is visible from both ends
        assert_eq!(store.taxonomy_neighbours("mammal"), vec!["dog"]);
        assert_eq!(store.taxonomy_neighbours("dog"), vec!["canine", "mammal"]);
        assert_eq!(store.taxonomy_neighbours("canine"), vec!["carnivore", "dog"]);
        assert_eq!(store.taxonomy_edge_count(), 3);
    }

    #[test]
    fn test_all_synsets_by_pos() {
        let mut rows = vec![row("dog", &[], &[])];
        rows.push(Synset::new("run", Some(Pos::Verb)));
        let store = SynsetStore::build(rows);
        assert_eq!(store.all_synsets(None).len(), 2);
        assert_eq!(store.all_synsets(Some(Pos::Verb))[0].id, "run");
    }
}
