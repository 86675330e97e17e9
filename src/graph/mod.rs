//! Taxonomy traversal over the synset relation graph

pub mod query_engine;

pub use query_engine::{
    GraphQueryEngine, SynsetRelations, DEFAULT_PATH_MAX_DEPTH, DEFAULT_SEARCH_MAX_DEPTH,
};
