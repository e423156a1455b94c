//! Literal kind: the value must equal one of a fixed set of primitives.

use luft_core::{IssueDetail, ParsingContext, Value};

use crate::coerce::unwrap_singleton;
use crate::kind::{Checked, KindSpec, KindTag};
use crate::schema::Schema;

#[derive(Debug, Clone, Default)]
pub struct LiteralKind {
    values: Vec<Value>,
    case_insensitive: bool,
}

impl LiteralKind {
    pub(crate) fn new(values: Vec<Value>) -> Self {
        Self {
            values,
            case_insensitive: false,
        }
    }

    /// The allowed values, in declaration order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    fn matches(&self, allowed: &Value, value: &Value) -> bool {
        if allowed == value {
            return true;
        }
        match (allowed, value) {
            (Value::String(a), Value::String(b)) if self.case_insensitive => {
                a.to_lowercase() == b.to_lowercase()
            }
            _ => false,
        }
    }

    /// Match the string form of a number or boolean literal.
    fn matches_loosely(&self, allowed: &Value, value: &Value) -> bool {
        let Value::String(s) = value else {
            return false;
        };
        let s = s.trim();
        match allowed {
            Value::Number(n) => s.parse::<f64>().is_ok_and(|parsed| parsed == *n),
            Value::Bool(b) => s.eq_ignore_ascii_case(if *b { "true" } else { "false" }),
            Value::Null => s == "null",
            _ => false,
        }
    }

    fn find(&self, value: &Value) -> Option<&Value> {
        self.values
            .iter()
            .find(|allowed| self.matches(allowed, value))
            .or_else(|| {
                self.values
                    .iter()
                    .find(|allowed| self.matches_loosely(allowed, value))
            })
    }

    fn reject(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        ctx.report(IssueDetail::InvalidValue {
            received: value,
            options: self.values.clone(),
            pattern: None,
        });
        Ok(None)
    }
}

impl KindSpec for LiteralKind {
    fn tag(&self) -> KindTag {
        KindTag::Literal
    }

    fn check_validate(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        if self.values.iter().any(|allowed| self.matches(allowed, &value)) {
            return Ok(Some(value));
        }
        self.reject(value, ctx)
    }

    /// Returns the canonical declared literal rather than the input.
    ///
    /// The input is compared as given before a one-element list is
    /// unwrapped, so a declared list literal still matches itself.
    fn check_coerce(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        if let Some(allowed) = self.find(&value) {
            return Ok(Some(allowed.clone()));
        }
        let value = unwrap_singleton(value);
        match self.find(&value) {
            Some(allowed) => Ok(Some(allowed.clone())),
            None => self.reject(value, ctx),
        }
    }
}

impl Schema<LiteralKind> {
    /// Compare string literals without regard to case.
    pub fn case_insensitive(self) -> Self {
        self.update_kind(|k| k.case_insensitive = true)
    }
}

#[cfg(test)]
mod tests {
    use crate::factory as l;
    use luft_core::{IssueDetail, Value};

    #[test]
    fn validate_matches_exactly() {
        let schema = l::literal(["red", "green"]);
        assert_eq!(schema.validate("red").unwrap(), Value::from("red"));
        let err = schema.validate("blue").unwrap_err();
        assert_eq!(
            err.issues().unwrap()[0].detail,
            IssueDetail::InvalidValue {
                received: Value::from("blue"),
                options: vec![Value::from("red"), Value::from("green")],
                pattern: None,
            }
        );
    }

    #[test]
    fn case_insensitive_returns_canonical_on_coerce() {
        let schema = l::literal(["Active", "Closed"]).case_insensitive();
        assert_eq!(schema.validate("ACTIVE").unwrap(), Value::from("ACTIVE"));
        assert_eq!(schema.coerce("ACTIVE").unwrap(), Value::from("Active"));
        assert!(l::literal(["Active"]).validate("active").is_err());
    }

    #[test]
    fn coerce_matches_string_forms() {
        let schema = l::literal([Value::from(1), Value::from(true)]);
        assert_eq!(schema.coerce("1").unwrap(), Value::from(1));
        assert_eq!(schema.coerce("TRUE").unwrap(), Value::from(true));
        assert!(schema.validate("1").is_err());
        assert!(schema.coerce("2").is_err());
    }

    #[test]
    fn list_literal_matches_itself_in_both_modes() {
        let listed = Value::Array(vec![Value::from("x")]);
        let schema = l::literal([listed.clone()]);
        assert_eq!(schema.validate(listed.clone()).unwrap(), listed);
        assert_eq!(schema.coerce(listed.clone()).unwrap(), listed);
        assert!(schema.coerce("x").is_err());
    }

    #[test]
    fn coerce_still_unwraps_singletons() {
        let schema = l::literal(["asc", "desc"]);
        assert_eq!(
            schema.coerce(Value::Array(vec![Value::from("desc")])).unwrap(),
            Value::from("desc")
        );
    }
}
