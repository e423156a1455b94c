//! The special kinds: `any`, `never`, `null`, and `undefined`.

use luft_core::{IssueDetail, ParsingContext, Value};

use crate::kind::{Checked, KindSpec, KindTag};

/// Accepts every value unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyKind;

/// Rejects every value.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverKind;

/// Accepts only `null`. Coercion also maps `undefined` to `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullKind;

/// Accepts only `undefined`. Coercion also maps `null` to `undefined`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UndefinedKind;

impl KindSpec for AnyKind {
    fn tag(&self) -> KindTag {
        KindTag::Any
    }

    fn check_validate(&self, value: Value, _ctx: &mut ParsingContext) -> Checked {
        Ok(Some(value))
    }

    fn check_coerce(&self, value: Value, _ctx: &mut ParsingContext) -> Checked {
        Ok(Some(value))
    }
}

impl KindSpec for NeverKind {
    fn tag(&self) -> KindTag {
        KindTag::Never
    }

    fn check_validate(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        ctx.report(IssueDetail::invalid_type("never", &value));
        Ok(None)
    }

    fn check_coerce(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        self.check_validate(value, ctx)
    }
}

impl KindSpec for NullKind {
    fn tag(&self) -> KindTag {
        KindTag::Null
    }

    fn check_validate(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        if value.is_null() {
            return Ok(Some(Value::Null));
        }
        ctx.report(IssueDetail::invalid_type("null", &value));
        Ok(None)
    }

    fn check_coerce(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        if value.is_nullish() {
            return Ok(Some(Value::Null));
        }
        ctx.report(IssueDetail::invalid_type("null", &value));
        Ok(None)
    }
}

impl KindSpec for UndefinedKind {
    fn tag(&self) -> KindTag {
        KindTag::Undefined
    }

    fn check_validate(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        if value.is_undefined() {
            return Ok(Some(Value::Undefined));
        }
        ctx.report(IssueDetail::invalid_type("undefined", &value));
        Ok(None)
    }

    fn check_coerce(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        if value.is_nullish() {
            return Ok(Some(Value::Undefined));
        }
        ctx.report(IssueDetail::invalid_type("undefined", &value));
        Ok(None)
    }
}
