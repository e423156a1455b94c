//! Conversion helpers shared by the lenient (`coerce`) checks.

use luft_core::Value;

/// How an array or tuple schema turns a string input into a list during
/// coercion. Typical source: a query parameter such as `?ids=1,2,3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListParser {
    /// Strings are not split. An array schema wraps them as one element.
    #[default]
    None,
    /// Split on commas, trimming each piece. A blank string is the empty list.
    Csv,
    /// Parse the string as a JSON array.
    Json,
}

impl ListParser {
    /// Split `input` into list elements.
    ///
    /// Returns `None` when this parser does not apply to strings, and
    /// `Some(Err(reason))` when the string is malformed.
    pub fn parse(&self, input: &str) -> Option<Result<Vec<Value>, String>> {
        match self {
            ListParser::None => None,
            ListParser::Csv => {
                if input.trim().is_empty() {
                    return Some(Ok(Vec::new()));
                }
                Some(Ok(input
                    .split(',')
                    .map(|piece| Value::String(piece.trim().to_string()))
                    .collect()))
            }
            ListParser::Json => Some(match serde_json::from_str::<serde_json::Value>(input) {
                Ok(serde_json::Value::Array(items)) => {
                    Ok(items.into_iter().map(Value::from).collect())
                }
                Ok(_) => Err("expected a JSON array".to_string()),
                Err(err) => Err(format!("invalid JSON list: {err}")),
            }),
        }
    }
}

/// A single-element array stands for its element (repeated query keys
/// collapse to one value).
pub(crate) fn unwrap_singleton(value: Value) -> Value {
    match value {
        Value::Array(mut items) if items.len() == 1 => items.pop().unwrap_or_default(),
        other => other,
    }
}

/// Render a primitive as the string a client would have sent.
pub(crate) fn primitive_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_finite() => Some(value.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_splits_and_trims() {
        let items = ListParser::Csv.parse(" a, b ,c").unwrap().unwrap();
        assert_eq!(
            items,
            vec![Value::from("a"), Value::from("b"), Value::from("c")]
        );
        assert!(ListParser::Csv.parse("  ").unwrap().unwrap().is_empty());
    }

    #[test]
    fn json_requires_array() {
        let items = ListParser::Json.parse("[1, \"x\"]").unwrap().unwrap();
        assert_eq!(items, vec![Value::from(1), Value::from("x")]);
        assert!(ListParser::Json.parse("{}").unwrap().is_err());
        assert!(ListParser::Json.parse("[1,").unwrap().is_err());
        assert!(ListParser::None.parse("[1]").is_none());
    }

    #[test]
    fn singleton_unwraps_only_one_element() {
        assert_eq!(
            unwrap_singleton(Value::Array(vec![Value::from(3)])),
            Value::from(3)
        );
        let pair = Value::Array(vec![Value::from(1), Value::from(2)]);
        assert_eq!(unwrap_singleton(pair.clone()), pair);
    }

    #[test]
    fn primitives_render_like_the_wire() {
        assert_eq!(primitive_to_string(&Value::from(5)).as_deref(), Some("5"));
        assert_eq!(primitive_to_string(&Value::from(1.5)).as_deref(), Some("1.5"));
        assert_eq!(primitive_to_string(&Value::from(true)).as_deref(), Some("true"));
        assert_eq!(primitive_to_string(&Value::Null), None);
    }
}
