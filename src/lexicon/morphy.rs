//! Morphological normalization of surface word forms.
//!
//! [`morphy`] is a fixed suffix cascade per part of speech: rules are tried
//! in order and the first match wins. It is not a general stemmer.
//! [`morph_candidates`] lists every inflection the cascade could have
//! meant, for callers that want to probe the lemma index.

use super::types::{LemmaKey, Pos};

/// A suffix rewrite guarded by a strict minimum character length.
struct SuffixRule {
    suffix: &'static str,
    /// The word must be strictly longer than this many characters.
    min_len: usize,
    replacement: &'static str,
}

const fn rule(suffix: &'static str, min_len: usize, replacement: &'static str) -> SuffixRule {
    SuffixRule {
        suffix,
        min_len,
        replacement,
    }
}

const NOUN_RULES: &[SuffixRule] = &[
    rule("ies", 3, "y"),
    rule("ves", 3, "f"),
    rule("es", 2, ""),
    rule("s", 1, ""),
];

const VERB_RULES: &[SuffixRule] = &[
    rule("ies", 3, "y"),
    rule("ing", 4, ""),
    rule("ed", 3, ""),
    rule("s", 1, ""),
];

const ADJECTIVE_RULES: &[SuffixRule] = &[rule("est", 3, ""), rule("er", 2, "")];

impl SuffixRule {
    fn apply(&self, word: &str) -> Option<String> {
        if word.chars().count() <= self.min_len {
            return None;
        }
        let stem = word.strip_suffix(self.suffix)?;
        Some(format!("{}{}", stem, self.replacement))
    }
}

fn rules_for(pos: Option<Pos>) -> &'static [SuffixRule] {
    match pos {
        Some(Pos::Noun) | None => NOUN_RULES,
        Some(Pos::Verb) => VERB_RULES,
        Some(Pos::Adjective) => ADJECTIVE_RULES,
        Some(Pos::Adverb) => &[],
    }
}

/// Canonical lemma form: lowercase, each run of whitespace replaced by a
/// single underscore.
pub fn normalize(lemma: &str) -> LemmaKey {
    // Whole-string lowercasing keeps context rules such as final sigma
    let lower = lemma.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut in_whitespace = false;
    for ch in lower.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
        } else {
            out.push(ch);
            in_whitespace = false;
        }
    }
    out
}

/// Reduce a word to its root: normalize, then apply the first matching
/// suffix rule for `pos`. Without a pos the noun rules apply.
pub fn morphy(word: &str, pos: Option<Pos>) -> LemmaKey {
    let lower = normalize(word);
    rules_for(pos)
        .iter()
        .find_map(|rule| rule.apply(&lower))
        .unwrap_or(lower)
}

/// Every candidate root for `word`, most literal first, without duplicates.
///
/// Unlike [`morphy`] this keeps going after the first matching rule and
/// adds the `e`-restoring verb variants (`baking` -> `bake`, `baked` ->
/// `bake`). Without a pos the noun, verb and adjective candidates are
/// chained in that order.
pub fn morph_candidates(word: &str, pos: Option<Pos>) -> Vec<LemmaKey> {
    let lower = normalize(word);
    let mut out = Vec::new();
    match pos {
        Some(Pos::Noun) => noun_candidates(&lower, &mut out),
        Some(Pos::Verb) => verb_candidates(&lower, &mut out),
        Some(Pos::Adjective) => adjective_candidates(&lower, &mut out),
        Some(Pos::Adverb) => push_unique(&mut out, lower),
        None => {
            noun_candidates(&lower, &mut out);
            verb_candidates(&lower, &mut out);
            adjective_candidates(&lower, &mut out);
        }
    }
    out
}

fn push_unique(out: &mut Vec<LemmaKey>, candidate: String) {
    if !out.contains(&candidate) {
        out.push(candidate);
    }
}

fn noun_candidates(lower: &str, out: &mut Vec<LemmaKey>) {
    push_unique(out, lower.to_string());
    for rule in NOUN_RULES {
        if let Some(candidate) = rule.apply(lower) {
            push_unique(out, candidate);
        }
    }
}

fn verb_candidates(lower: &str, out: &mut Vec<LemmaKey>) {
    push_unique(out, lower.to_string());
    for rule in VERB_RULES {
        let Some(candidate) = rule.apply(lower) else {
            continue;
        };
        match rule.suffix {
            "ing" => {
                let restored = format!("{}e", candidate);
                push_unique(out, candidate);
                push_unique(out, restored);
            }
            "ed" => {
                // "baked" -> "bake": drop only the trailing "d"
                let restored = lower[..lower.len() - 1].to_string();
                push_unique(out, candidate);
                push_unique(out, restored);
            }
            _ => push_unique(out, candidate),
        }
    }
}

fn adjective_candidates(lower: &str, out: &mut Vec<LemmaKey>) {
    push_unique(out, lower.to_string());
    for rule in ADJECTIVE_RULES.iter().rev() {
        if let Some(candidate) = rule.apply(lower) {
            push_unique(out, candidate);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
