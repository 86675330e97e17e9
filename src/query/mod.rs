//! Batch query facade
//!
//! Resolves word queries against a shared [`Lexicon`](crate::lexicon::Lexicon)
//! and summarizes the relation between two resolved synsets.

pub mod service;
pub mod types;

pub use service::{SynsetQueryService, SynsetQueryServiceImpl};
pub use types::{BatchOutput, BatchRequest, PairwiseRelation, Query, QueryResult};
