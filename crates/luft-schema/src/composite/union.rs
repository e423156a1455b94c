//! Union kind: the first alternative that accepts the input wins.
//!
//! Each alternative runs in its own forked context, so a failed attempt
//! leaves nothing behind in the caller's context. When every alternative
//! fails, one `INVALID_UNION` issue is recorded carrying each attempt's
//! issues in order.
//!
//! Sentinel alternatives (`null`, `undefined`) only widen a schema, as in
//! `optional()`. When the input is not itself a sentinel and exactly one
//! alternative is not a sentinel, that alternative's issues are reported
//! directly at their own paths instead of being bundled.

use luft_core::{Issue, IssueDetail, ParsingContext, UsageError, Value};

use crate::kind::{Checked, KindSpec, KindTag};
use crate::schema::Schema;

#[derive(Debug, Clone, Default)]
pub struct UnionKind {
    alternatives: Vec<Schema>,
}

/// Run one alternative in isolation.
fn attempt(
    alternative: &Schema,
    value: Value,
    ctx: &ParsingContext,
) -> Result<Result<Value, Vec<Issue>>, UsageError> {
    let mut scratch = ctx.fork();
    Ok(match alternative.run(value, &mut scratch)? {
        Some(value) => Ok(value),
        None => Err(scratch.into_issues()),
    })
}

impl UnionKind {
    pub(crate) fn new(alternatives: Vec<Schema>) -> Self {
        Self { alternatives }
    }

    pub fn alternatives(&self) -> &[Schema] {
        &self.alternatives
    }

    /// The single non-sentinel alternative, if there is exactly one.
    fn primary_index(&self) -> Option<usize> {
        let mut primary = self
            .alternatives
            .iter()
            .enumerate()
            .filter(|(_, alt)| !matches!(alt.tag(), KindTag::Null | KindTag::Undefined))
            .map(|(index, _)| index);
        match (primary.next(), primary.next()) {
            (Some(index), None) => Some(index),
            _ => None,
        }
    }

    fn check(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        let sentinel_input = value.is_nullish();
        let mut errors = Vec::with_capacity(self.alternatives.len());
        for alternative in &self.alternatives {
            match attempt(alternative, value.clone(), ctx)? {
                Ok(value) => return Ok(Some(value)),
                Err(issues) => errors.push(issues),
            }
        }
        if !sentinel_input {
            if let Some(index) = self.primary_index() {
                ctx.absorb(errors.swap_remove(index));
                return Ok(None);
            }
        }
        tracing::debug!(
            path = %ctx.path_string(),
            alternatives = errors.len(),
            "no union alternative matched"
        );
        ctx.report(IssueDetail::InvalidUnion { errors });
        Ok(None)
    }
}

impl KindSpec for UnionKind {
    fn tag(&self) -> KindTag {
        KindTag::Union
    }

    fn check_validate(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        self.check(value, ctx)
    }

    fn check_coerce(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        self.check(value, ctx)
    }
}

impl Schema<UnionKind> {
    /// Append an alternative, tried after the existing ones.
    pub fn alternative(self, schema: impl Into<Schema>) -> Self {
        let schema = schema.into();
        self.update_kind(|k| k.alternatives.push(schema))
    }
}
