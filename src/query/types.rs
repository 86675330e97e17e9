//! Batch query request and result documents.

use serde::{Deserialize, Serialize};

use crate::lexicon::{Pos, SynsetId};

/// One word lookup: `{ "word": "dogs", "pos": "n" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub word: String,
    #[serde(default)]
    pub pos: Option<Pos>,
}

impl Query {
    pub fn new(word: impl Into<String>, pos: Option<Pos>) -> Self {
        Self {
            word: word.into(),
            pos,
        }
    }
}

/// Resolution of one [`Query`].
///
/// The `first*` fields describe the first matching synset in lemma-index
/// order. `count` is the number of matches and does not depend on which
/// one is first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub word: String,
    pub pos: Option<Pos>,
    /// Root produced by morphology for the lookup
    pub root: String,
    pub count: usize,
    pub first_id: Option<SynsetId>,
    pub first_hypernyms: Vec<SynsetId>,
    pub first_hyponyms: Vec<SynsetId>,
    pub first_similar: Vec<SynsetId>,
    pub first_antonyms: Vec<SynsetId>,
    /// Edge count of the first hypernym path of the first match
    pub first_path_depth: Option<usize>,
}

impl QueryResult {
    /// Result for a word with no matching synset
    pub fn miss(query: &Query, root: String) -> Self {
        Self {
            word: query.word.clone(),
            pos: query.pos,
            root,
            count: 0,
            first_id: None,
            first_hypernyms: Vec::new(),
            first_hyponyms: Vec::new(),
            first_similar: Vec::new(),
            first_antonyms: Vec::new(),
            first_path_depth: None,
        }
    }

    pub fn is_miss(&self) -> bool {
        self.count == 0
    }
}

/// Relational summary between two synsets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairwiseRelation {
    pub distance: Option<usize>,
    /// `1 / (distance + 1)` when a distance exists
    pub similarity: Option<f64>,
    pub lowest_common_hypernyms: Vec<SynsetId>,
}

/// Full batch response: `{ "results": [...], "relations": {...} }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutput {
    pub results: Vec<QueryResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relations: Option<PairwiseRelation>,
}

/// Batch input: either a bare query list or
/// `{ "queries": [...], "compare": [i, j] }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BatchRequest {
    Queries(Vec<Query>),
    WithRelation {
        queries: Vec<Query>,
        #[serde(default)]
        compare: Option<(usize, usize)>,
    },
}

impl BatchRequest {
    pub fn into_parts(self) -> (Vec<Query>, Option<(usize, usize)>) {
        match self {
            Self::Queries(queries) => (queries, None),
            Self::WithRelation { queries, compare } => (queries, compare),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_parses_with_and_without_pos() {
        let queries: Vec<Query> =
            serde_json::from_str(r#"[{"word":"dogs","pos":"n"},{"word":"quick"}]"#).unwrap();
        assert_eq!(queries[0], Query::new("dogs", Some(Pos::Noun)));
        assert_eq!(queries[1], Query::new("quick", None));
    }

    #[test]
    fn test_batch_request_shapes() {
        let bare: BatchRequest = serde_json::from_str(r#"[{"word":"dog"}]"#).unwrap();
        let (queries, pair) = bare.into_parts();
        assert_eq!(queries, vec![Query::new("dog", None)]);
        assert_eq!(pair, None);

        let with_pair: BatchRequest = serde_json::from_str(
            r#"{"queries":[{"word":"dog","pos":"n"},{"word":"cat","pos":"n"}],"compare":[0,1]}"#,
        )
        .unwrap();
        let (queries, pair) = with_pair.into_parts();
        assert_eq!(queries.len(), 2);
        assert_eq!(pair, Some((0, 1)));
    }

    #[test]
    fn test_result_wire_names() {
        let result = QueryResult::miss(&Query::new("zzz", None), "zzz".to_string());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["firstId"], serde_json::Value::Null);
        assert_eq!(json["firstPathDepth"], serde_json::Value::Null);
        assert_eq!(json["firstSimilar"], serde_json::json!([]));
        assert_eq!(json["count"], 0);
        assert!(result.is_miss());
    }

    #[test]
    fn test_relations_block_omitted_when_absent() {
        let output = BatchOutput {
            results: Vec::new(),
            relations: None,
        };
        let json = serde_json::to_string(&output).unwrap();
        assert_eq!(json, r#"{"results":[]}"#);

        let relation = PairwiseRelation::default();
        let json = serde_json::to_value(&relation).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"distance": null, "similarity": null, "lowestCommonHypernyms": []})
        );
    }
}
