//! Lexicon record types.
//!
//! These mirror the serialized lexicon document one-to-one. Field names use
//! camelCase on the wire (`similarTo`), snake_case in Rust.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Synset identifier (e.g., "dog.n.01", "02084071.n")
pub type SynsetId = String;

/// Canonical lemma key (lowercase, whitespace replaced by underscores)
pub type LemmaKey = String;

// =============================================================================
// Part of Speech
// =============================================================================

/// Part of speech of a synset.
///
/// Serialized as the single-letter WordNet code. Adjective satellites (`s`)
/// fold into [`Pos::Adjective`] on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pos {
    #[serde(rename = "n", alias = "noun")]
    Noun,
    #[serde(rename = "v", alias = "verb")]
    Verb,
    #[serde(rename = "a", alias = "s", alias = "adjective")]
    Adjective,
    #[serde(rename = "r", alias = "adverb")]
    Adverb,
}

impl Pos {
    pub const ALL: [Pos; 4] = [Pos::Noun, Pos::Verb, Pos::Adjective, Pos::Adverb];

    /// Single-letter WordNet code
    pub fn code(self) -> &'static str {
        match self {
            Self::Noun => "n",
            Self::Verb => "v",
            Self::Adjective => "a",
            Self::Adverb => "r",
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Pos {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" | "noun" => Ok(Self::Noun),
            "v" | "verb" => Ok(Self::Verb),
            "a" | "s" | "adjective" => Ok(Self::Adjective),
            "r" | "adverb" => Ok(Self::Adverb),
            other => Err(format!("unknown part of speech: {}", other)),
        }
    }
}

// =============================================================================
// Relations
// =============================================================================

/// Directed semantic relation kinds carried on a synset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Hypernym,
    Hyponym,
    SimilarTo,
    Antonym,
}

// =============================================================================
// Synset
// =============================================================================

/// A single word sense with its outgoing relation references.
///
/// Relation lists hold raw ids as declared. Ids that do not resolve in the
/// loaded lexicon are kept here and filtered out by the store on access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Synset {
    pub id: SynsetId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<Pos>,
    #[serde(default)]
    pub lemmas: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gloss: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    #[serde(default)]
    pub hypernyms: Vec<SynsetId>,
    #[serde(default)]
    pub hyponyms: Vec<SynsetId>,
    #[serde(default)]
    pub similar_to: Vec<SynsetId>,
    #[serde(default)]
    pub antonyms: Vec<SynsetId>,
}

impl Synset {
    /// Create a bare synset with no lemmas or relations
    pub fn new(id: impl Into<String>, pos: Option<Pos>) -> Self {
        Self {
            id: id.into(),
            pos,
            lemmas: Vec::new(),
            gloss: String::new(),
            examples: Vec::new(),
            hypernyms: Vec::new(),
            hyponyms: Vec::new(),
            similar_to: Vec::new(),
            antonyms: Vec::new(),
        }
    }

    /// Raw relation ids for a relation kind, in declaration order
    pub fn relation_ids(&self, relation: Relation) -> &[SynsetId] {
        match relation {
            Relation::Hypernym => &self.hypernyms,
            Relation::Hyponym => &self.hyponyms,
            Relation::SimilarTo => &self.similar_to,
            Relation::Antonym => &self.antonyms,
        }
    }

    /// True when `pos` is unset or equals this synset's part of speech
    pub fn matches_pos(&self, pos: Option<Pos>) -> bool {
        pos.is_none() || self.pos == pos
    }
}

// =============================================================================
// Document
// =============================================================================

fn default_version() -> u32 {
    1
}

/// The serialized lexicon document: `{ "version": 1, "synsets": [...] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconDocument {
    #[serde(default = "default_version")]
    pub version: u32,
    pub synsets: Vec<Synset>,
}

impl LexiconDocument {
    pub fn new(synsets: Vec<Synset>) -> Self {
        Self {
            version: default_version(),
            synsets,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
