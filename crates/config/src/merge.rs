//! Deep merge of configuration trees
//!
//! - Objects: deep-merge by key
//! - Arrays: replaced wholesale
//! - Scalars: replaced
//! - Null: ignored, the target value is kept

use serde_json::Value;

/// Deep merge `patch` into `target` in place.
pub fn deep_merge(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (_, Value::Null) => {}
        (Value::Object(target_map), Value::Object(patch_map)) => {
            for (key, patch_value) in patch_map {
                match target_map.get_mut(key) {
                    Some(target_value) => deep_merge(target_value, patch_value),
                    None if patch_value.is_null() => {}
                    None => {
                        target_map.insert(key.clone(), strip_nulls(patch_value));
                    }
                }
            }
        }
        (target, patch) => *target = strip_nulls(patch),
    }
}

/// Merge several patches onto a base, in order (last has highest precedence)
pub fn merge_layers<'a>(base: Value, patches: impl IntoIterator<Item = &'a Value>) -> Value {
    patches.into_iter().fold(base, |mut merged, patch| {
        deep_merge(&mut merged, patch);
        merged
    })
}

// A null nested inside a freshly inserted object means "absent" too.
fn strip_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), strip_nulls(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}
