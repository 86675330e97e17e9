//! lexigraph - lexical-semantic graph queries over a WordNet-style lexicon
//!
//! A lexicon is decoded once (bare JSON or a `BNWN1` envelope), indexed by
//! normalized lemma, and then queried read-only from any number of threads.
//!
//! ## Call Chain
//! word -> morphy -> LemmaIndex -> SynsetStore -> GraphQueryEngine -> QueryResult
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use lexigraph::{Lexicon, Pos, Query, SynsetQueryService, SynsetQueryServiceImpl};
//!
//! let lexicon = Lexicon::load_path(Path::new("models/wordnet_full.bin")).unwrap();
//! let service = SynsetQueryServiceImpl::new(Arc::new(lexicon));
//! let result = service.resolve(&Query::new("dogs", Some(Pos::Noun)));
//! assert_eq!(result.root, "dog");
//! ```

// Core error handling
pub mod error;

// Engine settings (env / YAML)
pub mod config;

// Decoding, storage and lemma index
pub mod lexicon;

// Taxonomy traversal
pub mod graph;

// Batch query facade
pub mod query;

pub use config::{EngineConfig, QueryLimits};
pub use error::{EnvelopeError, LexiconError, Result};
pub use graph::GraphQueryEngine;
pub use lexicon::{Lexicon, LexiconDocument, Pos, Relation, Synset, SynsetId};
pub use query::{
    BatchOutput, BatchRequest, PairwiseRelation, Query, QueryResult, SynsetQueryService,
    SynsetQueryServiceImpl,
};
