//! Integer coercion for count and duration answers.

use serde_json::Value;
use sleep_model::value_kind;

use crate::error::IntegerParseError;
use crate::normalization::datetime::is_null_text;

/// Coerce a number or numeric text to an integer.
///
/// Null, empty text and `"null"` are absent. Zero is a real value and stays
/// `Some(0)`. Fractional numbers truncate toward zero; fractional text is
/// rejected.
pub fn coerce_integer(value: &Value) -> Result<Option<i64>, IntegerParseError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(Some(int));
            }
            let float = number.as_f64().ok_or(IntegerParseError::OutOfRange)?;
            if float.is_finite() && float >= i64::MIN as f64 && float < i64::MAX as f64 {
                Ok(Some(float.trunc() as i64))
            } else {
                Err(IntegerParseError::OutOfRange)
            }
        }
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() || is_null_text(text) {
                return Ok(None);
            }
            text.parse::<i64>()
                .map(Some)
                .map_err(|_| IntegerParseError::NotInteger)
        }
        other => Err(IntegerParseError::WrongKind(value_kind(other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_and_numeric_text_coerce() {
        assert_eq!(coerce_integer(&json!(15)), Ok(Some(15)));
        assert_eq!(coerce_integer(&json!("15")), Ok(Some(15)));
        assert_eq!(coerce_integer(&json!(" 42 ")), Ok(Some(42)));
        assert_eq!(coerce_integer(&json!(12.7)), Ok(Some(12)));
    }

    #[test]
    fn zero_is_kept() {
        assert_eq!(coerce_integer(&json!(0)), Ok(Some(0)));
        assert_eq!(coerce_integer(&json!("0")), Ok(Some(0)));
    }

    #[test]
    fn absent_values_are_none() {
        assert_eq!(coerce_integer(&Value::Null), Ok(None));
        assert_eq!(coerce_integer(&json!("")), Ok(None));
        assert_eq!(coerce_integer(&json!("null")), Ok(None));
    }

    #[test]
    fn non_integers_are_errors() {
        assert_eq!(coerce_integer(&json!("ten")), Err(IntegerParseError::NotInteger));
        assert_eq!(coerce_integer(&json!("1.5")), Err(IntegerParseError::NotInteger));
        assert_eq!(
            coerce_integer(&json!(true)),
            Err(IntegerParseError::WrongKind("boolean"))
        );
        assert_eq!(
            coerce_integer(&json!([1])),
            Err(IntegerParseError::WrongKind("array"))
        );
    }
}
