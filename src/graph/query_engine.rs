//! Relation Query Engine over a synset store.
//!
//! All operations are read-only traversals of an immutable
//! [`SynsetStore`]. Unknown ids never fail: they produce empty lists or
//! `None`. Every traversal takes a `max_depth` bound, which is the only
//! thing that limits work on deep or cyclic taxonomies.

use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};

use crate::lexicon::SynsetStore;

/// Default bound for hypernym path enumeration
pub const DEFAULT_PATH_MAX_DEPTH: usize = 16;

/// Default bound for distance and common-ancestor search
pub const DEFAULT_SEARCH_MAX_DEPTH: usize = 64;

/// Direct relations of one synset, each list sorted by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynsetRelations<'a> {
    pub hypernyms: Vec<&'a str>,
    pub hyponyms: Vec<&'a str>,
    pub similar_to: Vec<&'a str>,
    pub antonyms: Vec<&'a str>,
}

/// Engine for taxonomy queries.
///
/// Holds only a shared borrow of the store, so it is `Copy` and can be
/// created per query or shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct GraphQueryEngine<'a> {
    store: &'a SynsetStore,
}

impl<'a> GraphQueryEngine<'a> {
    pub fn new(store: &'a SynsetStore) -> Self {
        Self { store }
    }

    // =========================================================================
    // DIRECT RELATIONS
    // =========================================================================

    /// All four relation lists for `id` (empty when unknown)
    pub fn relations(&self, id: &str) -> SynsetRelations<'a> {
        let store = self.store;
        SynsetRelations {
            hypernyms: store.hypernyms_of(id),
            hyponyms: store.hyponyms_of(id),
            similar_to: store.similar_to_of(id),
            antonyms: store.antonyms_of(id),
        }
    }

    // =========================================================================
    // PATH OPERATIONS
    // =========================================================================

    /// Every hypernym path from `id` upwards.
    ///
    /// Each path starts at `id` and ends at a synset with no eligible
    /// parent, or after `max_depth` edges. A parent is eligible only if it
    /// is not already on the path; another path may still pass through it.
    /// Paths come out in depth-first order over sorted parents. A
    /// `max_depth` of 0 is treated as 1.
    pub fn hypernym_paths(&self, id: &str, max_depth: usize) -> Vec<Vec<&'a str>> {
        let store = self.store;
        let Some(start) = store.by_id(id) else {
            return Vec::new();
        };
        let max_depth = max_depth.max(1);

        let mut paths = Vec::new();
        let mut stack: Vec<Vec<&'a str>> = vec![vec![start.id.as_str()]];

        while let Some(path) = stack.pop() {
            let depth = path.len() - 1;
            let current = path[depth];
            let parents: Vec<&'a str> = store
                .hypernyms_of(current)
                .into_iter()
                .filter(|parent| !path.contains(parent))
                .collect();

            if parents.is_empty() || depth >= max_depth {
                paths.push(path);
                continue;
            }

            // Reverse so the smallest parent is popped first
            for parent in parents.into_iter().rev() {
                let mut next = path.clone();
                next.push(parent);
                stack.push(next);
            }
        }

        paths
    }

    /// Length of the shortest hypernym/hyponym chain between two synsets,
    /// ignoring edge direction.
    ///
    /// `Some(0)` for the same known synset; `None` when either id is
    /// unknown or no chain of at most `max_depth` edges exists.
    pub fn shortest_distance(&self, left: &str, right: &str, max_depth: usize) -> Option<usize> {
        let store = self.store;
        let start = store.index_of(left)?;
        let target = store.index_of(right)?;
        if start == target {
            return Some(0);
        }
        let max_depth = max_depth.max(1);

        let mut visited = vec![false; store.len()];
        let mut queue: VecDeque<(usize, usize)> = VecDeque::new();
        visited[start] = true;
        queue.push_back((start, 0));

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= max_depth {
                continue;
            }
            for &next in store.taxonomy_indices(current) {
                if next == target {
                    return Some(depth + 1);
                }
                if visited[next] {
                    continue;
                }
                visited[next] = true;
                queue.push_back((next, depth + 1));
            }
        }

        None
    }

    /// `1 / (distance + 1)`, or `None` when there is no distance
    pub fn path_similarity(&self, left: &str, right: &str, max_depth: usize) -> Option<f64> {
        self.shortest_distance(left, right, max_depth)
            .map(|distance| 1.0 / (distance as f64 + 1.0))
    }

    // =========================================================================
    // ANCESTOR OPERATIONS
    // =========================================================================

    /// Minimum hypernym depth of every ancestor of `id` within `max_depth`,
    /// including `id` itself at depth 0.
    pub fn ancestor_depths(&self, id: &str, max_depth: usize) -> HashMap<&'a str, usize> {
        let store = self.store;
        let mut depths = HashMap::new();
        let Some(start) = store.by_id(id) else {
            return depths;
        };
        let max_depth = max_depth.max(1);

        let mut queue: VecDeque<(&'a str, usize)> = VecDeque::new();
        depths.insert(start.id.as_str(), 0);
        queue.push_back((start.id.as_str(), 0));

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= max_depth {
                continue;
            }
            for parent in store.hypernyms_of(current) {
                if depths.contains_key(parent) {
                    continue;
                }
                depths.insert(parent, depth + 1);
                queue.push_back((parent, depth + 1));
            }
        }

        depths
    }

    /// Common ancestors minimizing `depth(left) + depth(right)`.
    ///
    /// Ties are all kept; the result is sorted. Empty when either id is
    /// unknown or the two share no ancestor within `max_depth`.
    pub fn lowest_common_hypernyms(&self, left: &str, right: &str, max_depth: usize) -> Vec<&'a str> {
        let left_depths = self.ancestor_depths(left, max_depth);
        if left_depths.is_empty() {
            return Vec::new();
        }
        let right_depths = self.ancestor_depths(right, max_depth);

        let mut best = usize::MAX;
        let mut best_ids: Vec<&'a str> = Vec::new();
        for (&id, &left_depth) in &left_depths {
            let Some(&right_depth) = right_depths.get(id) else {
                continue;
            };
            let score = left_depth + right_depth;
            match score.cmp(&best) {
                Ordering::Less => {
                    best = score;
                    best_ids.clear();
                    best_ids.push(id);
                }
                Ordering::Equal => best_ids.push(id),
                Ordering::Greater => {}
            }
        }

        best_ids.sort_unstable();
        best_ids
    }
}

// =============================================================================
// Tests
// =============================================================================
