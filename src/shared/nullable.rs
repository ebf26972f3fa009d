//! Tri-state fields for partial updates.
//!
//! A PATCH body distinguishes three cases for a nullable column:
//! the key is absent (keep the stored value), the key is `null` (clear it),
//! or the key carries a value (replace it). Serde collapses the first two
//! into `None` for a plain `Option<T>`, so such fields are declared as
//! `Option<Option<T>>` with `#[serde(default, deserialize_with = "nullable::deserialize")]`.

use serde::{Deserialize, Deserializer};

/// Deserialize a present key into `Some(inner)`, leaving absent keys to `#[serde(default)]`
pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Apply a tri-state patch to a stored value
pub fn apply<T>(current: Option<T>, patch: Option<Option<T>>) -> Option<T> {
    match patch {
        Some(next) => next,
        None => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize")]
        value: Option<Option<i32>>,
    }

    #[test]
    fn test_absent_null_and_value() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"value": null}"#).unwrap();
        let set: Patch = serde_json::from_str(r#"{"value": 7}"#).unwrap();

        assert_eq!(absent.value, None);
        assert_eq!(null.value, Some(None));
        assert_eq!(set.value, Some(Some(7)));
    }

    #[test]
    fn test_apply() {
        assert_eq!(apply(Some(1), None), Some(1));
        assert_eq!(apply(Some(1), Some(None)), None);
        assert_eq!(apply(None, Some(Some(2))), Some(2));
    }
}
