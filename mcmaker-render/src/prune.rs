//! Recursive zero-value pruning.
//!
//! Per-field `skip_serializing_if` cannot drop a struct whose fields are all
//! zero-valued; this pass removes such residue bottom-up.

use crate::value::GenericValue;
use serde_json::Number;
use std::collections::BTreeMap;

/// Remove every zero value from `value`.
///
/// Returns `None` when nothing is left: `null`, `false`, `0`, `""`, and maps
/// or lists that become empty once their children are pruned.
pub fn prune(value: GenericValue) -> Option<GenericValue> {
    match value {
        GenericValue::Map(map) => {
            let kept: BTreeMap<String, GenericValue> = map
                .into_iter()
                .filter_map(|(key, child)| prune(child).map(|child| (key, child)))
                .collect();
            (!kept.is_empty()).then_some(GenericValue::Map(kept))
        }
        GenericValue::List(items) => {
            let kept: Vec<GenericValue> = items.into_iter().filter_map(prune).collect();
            (!kept.is_empty()).then_some(GenericValue::List(kept))
        }
        GenericValue::String(s) => (!s.is_empty()).then_some(GenericValue::String(s)),
        GenericValue::Bool(b) => b.then_some(GenericValue::Bool(true)),
        GenericValue::Number(n) => (!is_zero(&n)).then_some(GenericValue::Number(n)),
        GenericValue::Null => None,
    }
}

fn is_zero(n: &Number) -> bool {
    if let Some(i) = n.as_i64() {
        i == 0
    } else if let Some(u) = n.as_u64() {
        u == 0
    } else {
        n.as_f64() == Some(0.0)
    }
}
