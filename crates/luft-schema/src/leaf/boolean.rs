//! Boolean kind.

use luft_core::{IssueDetail, ParsingContext, Value};

use crate::coerce::unwrap_singleton;
use crate::kind::{Checked, KindSpec, KindTag};
use crate::schema::Schema;

#[derive(Debug, Clone, Default)]
pub struct BooleanKind {
    numeric: bool,
}

impl BooleanKind {
    /// Whether coercion also accepts `0`/`1`.
    pub fn accepts_numeric(&self) -> bool {
        self.numeric
    }

    fn convert(&self, value: &Value) -> Option<bool> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                "1" if self.numeric => Some(true),
                "0" if self.numeric => Some(false),
                _ => None,
            },
            Value::Number(n) if self.numeric && *n == 1.0 => Some(true),
            Value::Number(n) if self.numeric && *n == 0.0 => Some(false),
            _ => None,
        }
    }
}

impl KindSpec for BooleanKind {
    fn tag(&self) -> KindTag {
        KindTag::Boolean
    }

    fn check_validate(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        match value {
            Value::Bool(b) => Ok(Some(Value::Bool(b))),
            other => {
                ctx.report(IssueDetail::invalid_type("boolean", &other));
                Ok(None)
            }
        }
    }

    fn check_coerce(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        let value = unwrap_singleton(value);
        match self.convert(&value) {
            Some(b) => Ok(Some(Value::Bool(b))),
            None => {
                ctx.report(IssueDetail::invalid_type("boolean", &value));
                Ok(None)
            }
        }
    }
}

impl Schema<BooleanKind> {
    /// Also coerce `0`, `1`, `"0"`, and `"1"`.
    pub fn numeric(self) -> Self {
        self.update_kind(|k| k.numeric = true)
    }
}
