/*!

Helm chart values are modeled as a JSON object tree. An addon computes a baseline tree from its
typed options and the caller supplies an overlay tree; the two are combined with [`merge`].

!*/

use serde_json::{Map, Value};

/// A tree of Helm chart values.
pub type Values = Map<String, Value>;

/// Deep-merge `overlay` on top of `base` and return the result.
///
/// - When both sides are objects, keys are merged recursively. Keys found on one side only are kept.
/// - In every other case the overlay value replaces the base value, whatever its type. Arrays are
///   replaced as a whole and an explicit `null` in the overlay replaces the base value.
pub fn merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            Value::Object(merge_values(base, overlay))
        }
        (_, overlay) => overlay,
    }
}

/// Object-level form of [`merge`].
pub fn merge_values(mut base: Values, overlay: Values) -> Values {
    for (key, overlay_value) in overlay {
        let merged = match base.remove(&key) {
            Some(base_value) => merge(base_value, overlay_value),
            None => overlay_value,
        };
        base.insert(key, merged);
    }
    base
}

/// Insert `value` at `key` below the nested object found by following `path`, creating empty
/// objects along the way. A non-object found on the path is replaced by an object.
pub fn insert_path<V>(values: &mut Values, path: &[&str], key: &str, value: V)
where
    V: Into<Value>,
{
    let mut current = values;
    for segment in path {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        current = match entry {
            Value::Object(map) => map,
            // Replaced with an object just above.
            _ => return,
        };
    }
    current.insert(key.to_string(), value.into());
}

/// Like [`insert_path`], but does nothing when `value` is `None`.
pub fn insert_path_opt<V>(values: &mut Values, path: &[&str], key: &str, value: Option<V>)
where
    V: Into<Value>,
{
    if let Some(value) = value {
        insert_path(values, path, key, value)
    }
}

/// Follow `path` through nested objects and return the value found there, if any.
pub fn get_path<'a>(values: &'a Values, path: &[&str]) -> Option<&'a Value> {
    let (last, parents) = path.split_last()?;
    let mut current = values;
    for segment in parents {
        current = current.get(*segment)?.as_object()?;
    }
    current.get(*last)
}
