//! Closed value tree the pruner walks.

use serde::ser::{Serialize, Serializer};
use serde_json::Number;
use std::collections::BTreeMap;

/// A decoded document tree.
///
/// Maps are `BTreeMap`s, so rendering always emits keys in lexicographic
/// order. Lists keep their order.
#[derive(Debug, Clone, PartialEq)]
pub enum GenericValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<GenericValue>),
    Map(BTreeMap<String, GenericValue>),
}

impl GenericValue {
    pub fn as_map(&self) -> Option<&BTreeMap<String, GenericValue>> {
        match self {
            GenericValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Follow a path of map keys.
    pub fn pointer(&self, keys: &[&str]) -> Option<&GenericValue> {
        keys.iter()
            .try_fold(self, |node, key| node.as_map()?.get(*key))
    }
}

impl From<serde_json::Value> for GenericValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => GenericValue::Null,
            serde_json::Value::Bool(b) => GenericValue::Bool(b),
            serde_json::Value::Number(n) => GenericValue::Number(n),
            serde_json::Value::String(s) => GenericValue::String(s),
            serde_json::Value::Array(items) => {
                GenericValue::List(items.into_iter().map(GenericValue::from).collect())
            }
            serde_json::Value::Object(map) => GenericValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, GenericValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<GenericValue> for serde_json::Value {
    fn from(value: GenericValue) -> Self {
        match value {
            GenericValue::Null => serde_json::Value::Null,
            GenericValue::Bool(b) => serde_json::Value::Bool(b),
            GenericValue::Number(n) => serde_json::Value::Number(n),
            GenericValue::String(s) => serde_json::Value::String(s),
            GenericValue::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            GenericValue::Map(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

impl Serialize for GenericValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GenericValue::Null => serializer.serialize_unit(),
            GenericValue::Bool(b) => serializer.serialize_bool(*b),
            GenericValue::Number(n) => n.serialize(serializer),
            GenericValue::String(s) => serializer.serialize_str(s),
            GenericValue::List(items) => serializer.collect_seq(items),
            GenericValue::Map(map) => serializer.collect_map(map),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_from_json_and_back() {
        let raw = json!({ "b": [1, "x", null], "a": { "flag": true } });
        let tree = GenericValue::from(raw.clone());
        assert_eq!(serde_json::Value::from(tree), raw);
    }

    #[test]
    fn pointer_walks_nested_maps() {
        let tree = GenericValue::from(json!({ "spec": { "config": { "n": 1 } } }));
        assert_eq!(
            tree.pointer(&["spec", "config", "n"]),
            Some(&GenericValue::Number(1.into()))
        );
        assert_eq!(tree.pointer(&["spec", "missing"]), None);
        assert_eq!(tree.pointer(&[]), Some(&tree));
    }

    #[test]
    fn serializes_maps_with_sorted_keys() {
        let tree = GenericValue::from(json!({ "zeta": 1, "alpha": 2, "Mid": 3 }));
        let out = serde_json::to_string(&tree).expect("serialize");
        assert_eq!(out, r#"{"Mid":3,"alpha":2,"zeta":1}"#);
    }
}
