//! SynsetQueryService - runtime interface for word and synset queries.
//!
//! The service wraps a shared [`Lexicon`] and resolves batches of word
//! queries through morphology, the lemma index and the graph engine.
//!
//! ## Behaviour
//!
//! - In-memory only: no I/O after the lexicon is loaded
//! - Unknown words and ids are soft misses, never errors
//! - Batches keep input order, even when evaluated on the rayon pool

use std::sync::Arc;

use rayon::prelude::*;

use super::types::{BatchOutput, PairwiseRelation, Query, QueryResult};
use crate::config::{EngineConfig, QueryLimits};
use crate::graph::GraphQueryEngine;
use crate::lexicon::{morphy, Lexicon, Synset};

// =============================================================================
// Trait Definition
// =============================================================================

/// Trait for query service implementations.
///
/// Allows mocking in tests and alternative lexicon backings.
pub trait SynsetQueryService: Send + Sync {
    /// Digest of the underlying lexicon payload, if known.
    fn lexicon_digest(&self) -> Option<&str>;

    /// Resolve one word query.
    fn resolve(&self, query: &Query) -> QueryResult;

    /// Resolve a batch; one result per query, in input order.
    fn run_batch(&self, queries: &[Query]) -> Vec<QueryResult>;

    /// Distance, similarity and lowest common hypernyms of two synsets.
    fn compare(&self, left_id: &str, right_id: &str) -> PairwiseRelation;

    /// Resolve a batch and, when `pair` names two query positions, compare
    /// their first matches. A missing match or out-of-range position gives
    /// an empty relation.
    fn run_batch_with_relation(
        &self,
        queries: &[Query],
        pair: Option<(usize, usize)>,
    ) -> BatchOutput {
        let results = self.run_batch(queries);
        let relations = pair.map(|(left, right)| {
            let first_id = |pos: usize| results.get(pos).and_then(|r| r.first_id.as_deref());
            match (first_id(left), first_id(right)) {
                (Some(left_id), Some(right_id)) => self.compare(left_id, right_id),
                _ => PairwiseRelation::default(),
            }
        });
        BatchOutput { results, relations }
    }
}

// =============================================================================
// Implementation
// =============================================================================

/// Standard implementation backed by an in-memory lexicon.
pub struct SynsetQueryServiceImpl {
    lexicon: Arc<Lexicon>,
    limits: QueryLimits,
    parallel: bool,
}

impl SynsetQueryServiceImpl {
    /// Create a service with default depth limits and parallel batches.
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            lexicon,
            limits: QueryLimits::default(),
            parallel: true,
        }
    }

    pub fn from_config(lexicon: Arc<Lexicon>, config: &EngineConfig) -> Self {
        Self::new(lexicon)
            .with_limits(config.limits())
            .with_parallel(config.parallel)
    }

    pub fn with_limits(mut self, limits: QueryLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn limits(&self) -> QueryLimits {
        self.limits
    }

    fn engine(&self) -> GraphQueryEngine<'_> {
        GraphQueryEngine::new(self.lexicon.store())
    }

    fn describe_first(&self, query: &Query, root: String, candidates: &[&Synset]) -> QueryResult {
        let Some(first) = candidates.first() else {
            return QueryResult::miss(query, root);
        };

        let engine = self.engine();
        let relations = engine.relations(&first.id);
        let path_depth = engine
            .hypernym_paths(&first.id, self.limits.path_max_depth)
            .first()
            .map(|path| path.len() - 1);
        let owned = |ids: Vec<&str>| ids.into_iter().map(str::to_string).collect::<Vec<_>>();

        QueryResult {
            word: query.word.clone(),
            pos: query.pos,
            root,
            count: candidates.len(),
            first_id: Some(first.id.clone()),
            first_hypernyms: owned(relations.hypernyms),
            first_hyponyms: owned(relations.hyponyms),
            first_similar: owned(relations.similar_to),
            first_antonyms: owned(relations.antonyms),
            first_path_depth: path_depth,
        }
    }
}

impl SynsetQueryService for SynsetQueryServiceImpl {
    fn lexicon_digest(&self) -> Option<&str> {
        self.lexicon.digest()
    }

    fn resolve(&self, query: &Query) -> QueryResult {
        let root = morphy(&query.word, query.pos);
        let candidates: Vec<&Synset> = self
            .lexicon
            .lookup(&root)
            .into_iter()
            .filter(|synset| synset.matches_pos(query.pos))
            .collect();
        self.describe_first(query, root, &candidates)
    }

    fn run_batch(&self, queries: &[Query]) -> Vec<QueryResult> {
        let results: Vec<QueryResult> = if self.parallel {
            queries.par_iter().map(|q| self.resolve(q)).collect()
        } else {
            queries.iter().map(|q| self.resolve(q)).collect()
        };

        tracing::debug!(
            queries = queries.len(),
            misses = results.iter().filter(|r| r.is_miss()).count(),
            parallel = self.parallel,
            "resolved query batch"
        );
        results
    }

    fn compare(&self, left_id: &str, right_id: &str) -> PairwiseRelation {
        let engine = self.engine();
        let depth = self.limits.search_max_depth;
        let distance = engine.shortest_distance(left_id, right_id, depth);

        PairwiseRelation {
            distance,
            similarity: distance.map(|d| 1.0 / (d as f64 + 1.0)),
            lowest_common_hypernyms: engine
                .lowest_common_hypernyms(left_id, right_id, depth)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{LexiconDocument, Pos};

    fn synset(id: &str, pos: Pos, lemmas: &[&str], hypernyms: &[&str]) -> Synset {
        let mut row = Synset::new(id, Some(pos));
        row.lemmas = lemmas.iter().map(|s| s.to_string()).collect();
        row.hypernyms = hypernyms.iter().map(|s| s.to_string()).collect();
        row
    }

    fn service() -> SynsetQueryServiceImpl {
        let mut quick = synset("quick.a.01", Pos::Adjective, &["quick", "fast"], &[]);
        quick.similar_to = vec!["speedy.a.01".to_string(), "missing.a.01".to_string()];
        quick.antonyms = vec!["slow.a.01".to_string()];

        let lexicon = Lexicon::from_document(LexiconDocument::new(vec![
            synset("dog.n.01", Pos::Noun, &["dog"], &["canine.n.02", "domestic_animal.n.01"]),
            synset("dog.v.01", Pos::Verb, &["dog"], &[]),
            synset("canine.n.02", Pos::Noun, &["canine"], &["carnivore.n.01"]),
            synset("domestic_animal.n.01", Pos::Noun, &["domestic_animal"], &[]),
            synset("carnivore.n.01", Pos::Noun, &["carnivore"], &[]),
            synset("cat.n.01", Pos::Noun, &["cat"], &["feline.n.01"]),
            synset("feline.n.01", Pos::Noun, &["feline"], &["carnivore.n.01"]),
            quick,
            synset("speedy.a.01", Pos::Adjective, &["speedy"], &[]),
            synset("slow.a.01", Pos::Adjective, &["slow"], &[]),
        ]));
        SynsetQueryServiceImpl::new(Arc::new(lexicon))
    }

    #[test]
    fn test_resolve_plural_noun() {
        let result = service().resolve(&Query::new("dogs", Some(Pos::Noun)));
        assert_eq!(result.root, "dog");
        assert_eq!(result.count, 1);
        assert_eq!(result.first_id.as_deref(), Some("dog.n.01"));
        assert_eq!(
            result.first_hypernyms,
            vec!["canine.n.02", "domestic_animal.n.01"]
        );
        // first path: dog -> canine -> carnivore
        assert_eq!(result.first_path_depth, Some(2));
    }

    #[test]
    fn test_count_ignores_which_is_first() {
        let result = service().resolve(&Query::new("dog", None));
        assert_eq!(result.count, 2);
        assert_eq!(result.first_id.as_deref(), Some("dog.n.01"));

        let verb = service().resolve(&Query::new("dog", Some(Pos::Verb)));
        assert_eq!(verb.count, 1);
        assert_eq!(verb.first_id.as_deref(), Some("dog.v.01"));
        assert_eq!(verb.first_path_depth, Some(0));
    }

    #[test]
    fn test_similar_and_antonyms() {
        let result = service().resolve(&Query::new("quick", Some(Pos::Adjective)));
        assert_eq!(result.first_similar, vec!["speedy.a.01"]);
        assert_eq!(result.first_antonyms, vec!["slow.a.01"]);
    }

    #[test]
    fn test_count_includes_repeated_lemmas() {
        let lexicon = Lexicon::from_document(LexiconDocument::new(vec![
            synset("run.v.01", Pos::Verb, &["Run", "run"], &[]),
            synset("run.n.01", Pos::Noun, &["run"], &[]),
        ]));
        let service = SynsetQueryServiceImpl::new(Arc::new(lexicon));

        let verb = service.resolve(&Query::new("run", Some(Pos::Verb)));
        assert_eq!(verb.count, 2);
        assert_eq!(verb.first_id.as_deref(), Some("run.v.01"));
        assert_eq!(service.resolve(&Query::new("run", None)).count, 3);
    }

    #[test]
    fn test_repeated_relation_ids_are_kept() {
        let lexicon = Lexicon::from_document(LexiconDocument::new(vec![
            synset("dog.n.01", Pos::Noun, &["dog"], &["canine.n.02", "canine.n.02"]),
            synset("canine.n.02", Pos::Noun, &["canine"], &[]),
        ]));
        let service = SynsetQueryServiceImpl::new(Arc::new(lexicon));

        let result = service.resolve(&Query::new("dog", Some(Pos::Noun)));
        assert_eq!(result.first_hypernyms, vec!["canine.n.02", "canine.n.02"]);
        assert_eq!(result.first_path_depth, Some(1));
    }

    #[test]
    fn test_soft_miss() {
        let result = service().resolve(&Query::new("unicorns", Some(Pos::Noun)));
        assert_eq!(result.root, "unicorn");
        assert_eq!(result.count, 0);
        assert!(result.first_id.is_none());
        assert!(result.first_path_depth.is_none());

        let wrong_pos = service().resolve(&Query::new("quick", Some(Pos::Verb)));
        assert!(wrong_pos.is_miss());
    }

    #[test]
    fn test_batch_order_parallel_and_sequential() {
        let queries: Vec<Query> = ["cats", "dogs", "zebra", "canine", "quick"]
            .iter()
            .map(|w| Query::new(*w, None))
            .collect();
        let parallel = service().run_batch(&queries);
        let sequential = service().with_parallel(false).run_batch(&queries);
        assert_eq!(parallel, sequential);
        let words: Vec<&str> = parallel.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["cats", "dogs", "zebra", "canine", "quick"]);
    }

    #[test]
    fn test_compare() {
        let relation = service().compare("dog.n.01", "cat.n.01");
        assert_eq!(relation.distance, Some(4));
        assert_eq!(relation.similarity, Some(0.2));
        assert_eq!(relation.lowest_common_hypernyms, vec!["carnivore.n.01"]);

        let unknown = service().compare("dog.n.01", "ghost");
        assert_eq!(unknown, PairwiseRelation::default());
    }

    #[test]
    fn test_compare_respects_limits() {
        let service = service().with_limits(QueryLimits {
            path_max_depth: 16,
            search_max_depth: 2,
        });
        let relation = service.compare("dog.n.01", "cat.n.01");
        assert_eq!(relation.distance, None);
        assert_eq!(relation.similarity, None);
        assert_eq!(relation.lowest_common_hypernyms, vec!["carnivore.n.01"]);
    }

    #[test]
    fn test_run_batch_with_relation() {
        let queries = vec![
            Query::new("dogs", Some(Pos::Noun)),
            Query::new("cats", Some(Pos::Noun)),
            Query::new("unicorn", None),
        ];
        let service = service();

        let output = service.run_batch_with_relation(&queries, Some((0, 1)));
        assert_eq!(output.results.len(), 3);
        let relation = output.relations.unwrap();
        assert_eq!(relation.lowest_common_hypernyms, vec!["carnivore.n.01"]);

        let missing = service.run_batch_with_relation(&queries, Some((0, 2)));
        assert_eq!(missing.relations, Some(PairwiseRelation::default()));

        let out_of_range = service.run_batch_with_relation(&queries, Some((0, 9)));
        assert_eq!(out_of_range.relations, Some(PairwiseRelation::default()));

        assert!(service.run_batch_with_relation(&queries, None).relations.is_none());
    }
}
