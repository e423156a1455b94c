//! Pattern kind: strings matching a regular expression.

use regex::Regex;

use luft_core::{IssueDetail, ParsingContext, Value};

use crate::coerce::{primitive_to_string, unwrap_singleton};
use crate::kind::{Checked, KindSpec, KindTag};
use crate::schema::Schema;

#[derive(Debug, Clone)]
pub struct PatternKind {
    regex: Regex,
    trim: bool,
}

impl PatternKind {
    pub(crate) fn new(regex: Regex) -> Self {
        Self { regex, trim: false }
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    fn mismatch(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        ctx.report(IssueDetail::InvalidValue {
            received: value,
            options: Vec::new(),
            pattern: Some(self.regex.as_str().to_string()),
        });
        Ok(None)
    }
}

impl KindSpec for PatternKind {
    fn tag(&self) -> KindTag {
        KindTag::Pattern
    }

    fn check_validate(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        match value {
            Value::String(s) if self.regex.is_match(&s) => Ok(Some(Value::String(s))),
            Value::String(s) => self.mismatch(Value::String(s), ctx),
            other => {
                ctx.report(IssueDetail::invalid_type("string", &other));
                Ok(None)
            }
        }
    }

    fn check_coerce(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        let value = unwrap_singleton(value);
        let Some(s) = primitive_to_string(&value) else {
            ctx.report(IssueDetail::invalid_type("string", &value));
            return Ok(None);
        };
        if self.trim {
            let trimmed = s.trim();
            if self.regex.is_match(trimmed) {
                return Ok(Some(Value::String(trimmed.to_string())));
            }
        }
        if self.regex.is_match(&s) {
            return Ok(Some(Value::String(s)));
        }
        self.mismatch(Value::String(s), ctx)
    }
}

impl Schema<PatternKind> {
    /// Strip surrounding whitespace during coercion before matching.
    pub fn trim(self) -> Self {
        self.update_kind(|k| k.trim = true)
    }
}
