//! String kind: length bounds (counted in characters) and optional trimming.

use luft_core::{IssueDetail, ParsingContext, Value};

use crate::coerce::{primitive_to_string, unwrap_singleton};
use crate::kind::{Checked, KindSpec, KindTag};
use crate::leaf::check_length;
use crate::schema::Schema;

#[derive(Debug, Clone, Default)]
pub struct StringKind {
    min: Option<usize>,
    max: Option<usize>,
    trim: bool,
}

impl StringKind {
    pub fn min_len(&self) -> Option<usize> {
        self.min
    }

    pub fn max_len(&self) -> Option<usize> {
        self.max
    }

    pub fn trims(&self) -> bool {
        self.trim
    }

    fn check(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        let Value::String(s) = value else {
            ctx.report(IssueDetail::invalid_type("string", &value));
            return Ok(None);
        };
        let s = if self.trim { s.trim().to_string() } else { s };
        if !check_length(s.chars().count(), self.min, self.max, ctx) {
            return Ok(None);
        }
        Ok(Some(Value::String(s)))
    }
}

impl KindSpec for StringKind {
    fn tag(&self) -> KindTag {
        KindTag::String
    }

    fn check_validate(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        self.check(value, ctx)
    }

    fn check_coerce(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        let value = unwrap_singleton(value);
        let value = match primitive_to_string(&value) {
            Some(s) => Value::String(s),
            None => value,
        };
        self.check(value, ctx)
    }
}

impl Schema<StringKind> {
    /// Require at least `n` characters.
    pub fn min_len(self, n: usize) -> Self {
        self.update_kind(|k| k.min = Some(n))
    }

    /// Allow at most `n` characters.
    pub fn max_len(self, n: usize) -> Self {
        self.update_kind(|k| k.max = Some(n))
    }

    /// Require exactly `n` characters.
    pub fn length(self, n: usize) -> Self {
        self.update_kind(|k| {
            k.min = Some(n);
            k.max = Some(n);
        })
    }

    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    /// Strip surrounding whitespace before the length check.
    pub fn trim(self) -> Self {
        self.update_kind(|k| k.trim = true)
    }
}
