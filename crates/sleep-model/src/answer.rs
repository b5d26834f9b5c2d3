//! Classification of raw diary answers.

use serde_json::{Map, Value};

/// Key under which a tagged answer carries its value.
pub const TAG_KEY: &str = "v";

/// A raw answer entry, borrowed from the payload it was read from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawAnswer<'a> {
    /// `{"v": x}`: the answer value is `x`.
    Tagged(&'a Value),
    /// A nested sequence, e.g. the final awakening pair.
    Sequence(&'a [Value]),
    /// An object without a `v` key. Kept as-is rather than dropped.
    Untagged(&'a Map<String, Value>),
    /// A bare scalar (including null).
    Scalar(&'a Value),
}

impl<'a> RawAnswer<'a> {
    /// Classify a raw answer value.
    #[must_use]
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => match map.get(TAG_KEY) {
                Some(inner) => Self::Tagged(inner),
                None => Self::Untagged(map),
            },
            Value::Array(items) => Self::Sequence(items),
            scalar => Self::Scalar(scalar),
        }
    }
}

/// Returns the inner value when `value` is a tagged answer.
#[must_use]
pub fn tagged_value(value: &Value) -> Option<&Value> {
    match RawAnswer::classify(value) {
        RawAnswer::Tagged(inner) => Some(inner),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classify_variants() {
        let tagged = json!({"v": "22:30"});
        assert_eq!(RawAnswer::classify(&tagged), RawAnswer::Tagged(&json!("22:30")));

        let sequence = json!([{"v": "06:45"}, {"v": 10}]);
        assert!(matches!(RawAnswer::classify(&sequence), RawAnswer::Sequence(items) if items.len() == 2));

        let untagged = json!({"value": 3});
        assert!(matches!(RawAnswer::classify(&untagged), RawAnswer::Untagged(_)));

        let scalar = json!(7);
        assert_eq!(RawAnswer::classify(&scalar), RawAnswer::Scalar(&json!(7)));
        assert_eq!(RawAnswer::classify(&Value::Null), RawAnswer::Scalar(&Value::Null));
    }

    #[test]
    fn tagged_null_is_still_tagged() {
        let value = json!({"v": null});
        assert_eq!(tagged_value(&value), Some(&Value::Null));
        assert_eq!(tagged_value(&json!("plain")), None);
    }
}
