//! Lexicon loading and storage.
//!
//! ```text
//! bytes ──► envelope::decode ──► LexiconDocument ──► Lexicon
//!                                                   ├── SynsetStore (id → synset, relations)
//!                                                   └── LemmaIndex  (lemma → synsets)
//! ```

pub mod envelope;
pub mod index;
pub mod morphy;
pub mod snapshot;
pub mod store;
pub mod types;

pub use envelope::{decode, encode, pack, verify_pack, PackManifest};
pub use index::LemmaIndex;
pub use morphy::{morph_candidates, morphy, normalize};
pub use snapshot::{Lexicon, LexiconStats};
pub use store::SynsetStore;
pub use types::{LemmaKey, LexiconDocument, Pos, Relation, Synset, SynsetId};
