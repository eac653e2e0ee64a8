#![no_main]

//! Fuzz target for the generic pruner.
//!
//! Feeds arbitrary JSON through `GenericValue` and `prune`, checking that
//! pruning is idempotent, never keeps a zero value, and always renders.

use libfuzzer_sys::fuzz_target;
use mcmaker_render::prune::prune;
use mcmaker_render::value::GenericValue;

fn has_zero(value: &GenericValue) -> bool {
    match value {
        GenericValue::Null => true,
        GenericValue::Bool(b) => !b,
        GenericValue::Number(n) => n.as_f64() == Some(0.0),
        GenericValue::String(s) => s.is_empty(),
        GenericValue::List(items) => items.is_empty() || items.iter().any(has_zero),
        GenericValue::Map(map) => map.is_empty() || map.values().any(has_zero),
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    let Some(pruned) = prune(GenericValue::from(json)) else {
        return;
    };
    assert!(!has_zero(&pruned), "zero value survived pruning: {pruned:?}");
    assert_eq!(prune(pruned.clone()).as_ref(), Some(&pruned));

    let _ = serde_yaml::to_string(&pruned);
});
