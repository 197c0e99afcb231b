//! Keeping one typed key at its original position in an otherwise opaque JSON object.
//!
//! `.cartridgerc` and `package.json` each have a single key this crate edits
//! (`modules`, `dependencies`). The rest of the object is carried as a
//! [`Map`] so a save writes keys back in the order they were read.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Remove `key` from `map`, returning the index it occupied and its value.
pub fn take_key(map: &mut Map<String, Value>, key: &str) -> Option<(usize, Value)> {
    let index = map.keys().position(|existing| existing == key)?;
    map.shift_remove(key).map(|value| (index, value))
}

/// Serialize `other` with `key: value` placed at index `at`.
///
/// A `None` value omits the key. A missing or out-of-range `at` appends it.
pub fn serialize_with_key_at<S, T>(
    serializer: S,
    other: &Map<String, Value>,
    key: &str,
    value: Option<&T>,
    at: Option<usize>,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize + ?Sized,
{
    let mut map = serializer.serialize_map(Some(other.len() + usize::from(value.is_some())))?;
    let mut pending = value;

    for (index, (name, entry)) in other.iter().enumerate() {
        if Some(index) == at {
            if let Some(value) = pending.take() {
                map.serialize_entry(key, value)?;
            }
        }
        map.serialize_entry(name, entry)?;
    }
    if let Some(value) = pending {
        map.serialize_entry(key, value)?;
    }

    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Doc {
        other: Map<String, Value>,
        tagged: Option<Value>,
        at: Option<usize>,
    }

    impl Serialize for Doc {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serialize_with_key_at(serializer, &self.other, "tagged", self.tagged.as_ref(), self.at)
        }
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_take_and_restore_position() {
        let mut other = object(json!({"a": 1, "tagged": [1], "b": 2}));
        let (at, tagged) = take_key(&mut other, "tagged").unwrap();
        assert_eq!(at, 1);

        let doc = Doc {
            other,
            tagged: Some(tagged),
            at: Some(at),
        };
        assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"a":1,"tagged":[1],"b":2}"#);
    }

    #[test]
    fn test_new_key_appends_and_none_omits() {
        let doc = Doc {
            other: object(json!({"a": 1, "b": 2})),
            tagged: Some(json!({})),
            at: None,
        };
        assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"a":1,"b":2,"tagged":{}}"#);

        let doc = Doc {
            tagged: None,
            at: Some(0),
            ..doc
        };
        assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn test_take_missing_key() {
        let mut other = object(json!({"a": 1}));
        assert!(take_key(&mut other, "tagged").is_none());
        assert_eq!(other.len(), 1);
    }
}
