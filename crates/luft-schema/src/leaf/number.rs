//! Number and integer kinds.
//!
//! `int()` is a number kind with the integer flag set. Bounds come in
//! exclusive (`min`, `max`) and inclusive (`min_eq`, `max_eq`) flavors;
//! a violation of either side records one `INVALID_RANGE` issue carrying
//! both configured bounds.

use serde::Serialize;

use luft_core::{IssueDetail, ParsingContext, UsageError, Value};

use crate::coerce::unwrap_singleton;
use crate::kind::{Checked, KindSpec, KindTag};
use crate::schema::Schema;

/// Relative tolerance for the `multiple_of` check.
const MULTIPLE_TOLERANCE: f64 = 1e-9;

/// One side of a numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumberBound {
    pub value: f64,
    pub inclusive: bool,
}

/// How integer coercion treats a fractional input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Floor,
    Ceil,
    Truncate,
    /// Half away from zero.
    Round,
}

impl Rounding {
    fn apply(self, n: f64) -> f64 {
        match self {
            Rounding::Floor => n.floor(),
            Rounding::Ceil => n.ceil(),
            Rounding::Truncate => n.trunc(),
            Rounding::Round => n.round(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NumberKind {
    integer: bool,
    min: Option<NumberBound>,
    max: Option<NumberBound>,
    allow_nan: bool,
    multiple_of: Option<f64>,
    rounding: Option<Rounding>,
}

impl NumberKind {
    pub(crate) fn integer() -> Self {
        Self {
            integer: true,
            ..Self::default()
        }
    }

    pub fn is_integer(&self) -> bool {
        self.integer
    }

    pub fn minimum(&self) -> Option<NumberBound> {
        self.min
    }

    pub fn maximum(&self) -> Option<NumberBound> {
        self.max
    }

    pub fn allows_nan(&self) -> bool {
        self.allow_nan
    }

    pub fn divisor(&self) -> Option<f64> {
        self.multiple_of
    }

    pub fn rounding(&self) -> Option<Rounding> {
        self.rounding
    }

    fn expected(&self) -> &'static str {
        if self.integer {
            "integer"
        } else {
            "number"
        }
    }

    fn parse(&self, input: &str) -> Option<f64> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let n = trimmed.parse::<f64>().ok()?;
        if n.is_nan() {
            return self.allow_nan.then_some(n);
        }
        n.is_finite().then_some(n)
    }

    fn check(&self, n: f64, ctx: &mut ParsingContext) -> Checked {
        if n.is_nan() {
            if self.allow_nan {
                return Ok(Some(Value::Number(n)));
            }
            ctx.report(IssueDetail::invalid_type(self.expected(), &Value::Number(n)));
            return Ok(None);
        }
        if self.integer && n.fract() != 0.0 {
            ctx.report(IssueDetail::invalid_type("integer", &Value::Number(n)));
            return Ok(None);
        }

        let mut valid = true;
        let below = self.min.is_some_and(|b| {
            if b.inclusive {
                n < b.value
            } else {
                n <= b.value
            }
        });
        let above = self.max.is_some_and(|b| {
            if b.inclusive {
                n > b.value
            } else {
                n >= b.value
            }
        });
        if below || above {
            ctx.report(IssueDetail::InvalidRange {
                received: Value::Number(n),
                minimum: self.min.map(|b| Value::Number(b.value)),
                min_inclusive: self.min.is_some_and(|b| b.inclusive),
                maximum: self.max.map(|b| Value::Number(b.value)),
                max_inclusive: self.max.is_some_and(|b| b.inclusive),
            });
            valid = false;
        }
        if let Some(divisor) = self.multiple_of {
            if !is_multiple(n, divisor) {
                ctx.report(IssueDetail::MultipleOf {
                    received: n,
                    multiple_of: divisor,
                });
                valid = false;
            }
        }
        Ok(valid.then_some(Value::Number(n)))
    }
}

/// Whether `n / divisor` is within tolerance of an integer.
fn is_multiple(n: f64, divisor: f64) -> bool {
    let ratio = n / divisor;
    (ratio - ratio.round()).abs() <= MULTIPLE_TOLERANCE * ratio.abs().max(1.0)
}

impl KindSpec for NumberKind {
    fn tag(&self) -> KindTag {
        if self.integer {
            KindTag::Integer
        } else {
            KindTag::Number
        }
    }

    fn check_validate(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        match value {
            Value::Number(n) => self.check(n, ctx),
            other => {
                ctx.report(IssueDetail::invalid_type(self.expected(), &other));
                Ok(None)
            }
        }
    }

    fn check_coerce(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        let n = match unwrap_singleton(value) {
            Value::Number(n) => n,
            Value::String(s) => match self.parse(&s) {
                Some(n) => n,
                None => {
                    let detail = IssueDetail::invalid_type(self.expected(), &Value::String(s.clone()));
                    ctx.report_with(detail, format!("could not parse {s:?} as {}", self.expected()));
                    return Ok(None);
                }
            },
            other => {
                ctx.report(IssueDetail::invalid_type(self.expected(), &other));
                return Ok(None);
            }
        };
        let n = match self.rounding {
            Some(rounding) if self.integer && n.is_finite() => rounding.apply(n),
            _ => n,
        };
        self.check(n, ctx)
    }
}

impl Schema<NumberKind> {
    /// Require a value strictly greater than `bound`.
    pub fn min(self, bound: impl Into<f64>) -> Self {
        let value = bound.into();
        self.update_kind(|k| {
            k.min = Some(NumberBound {
                value,
                inclusive: false,
            })
        })
    }

    /// Require a value greater than or equal to `bound`.
    pub fn min_eq(self, bound: impl Into<f64>) -> Self {
        let value = bound.into();
        self.update_kind(|k| {
            k.min = Some(NumberBound {
                value,
                inclusive: true,
            })
        })
    }

    /// Require a value strictly less than `bound`.
    pub fn max(self, bound: impl Into<f64>) -> Self {
        let value = bound.into();
        self.update_kind(|k| {
            k.max = Some(NumberBound {
                value,
                inclusive: false,
            })
        })
    }

    /// Require a value less than or equal to `bound`.
    pub fn max_eq(self, bound: impl Into<f64>) -> Self {
        let value = bound.into();
        self.update_kind(|k| {
            k.max = Some(NumberBound {
                value,
                inclusive: true,
            })
        })
    }

    pub fn positive(self) -> Self {
        self.min(0)
    }

    pub fn non_negative(self) -> Self {
        self.min_eq(0)
    }

    pub fn negative(self) -> Self {
        self.max(0)
    }

    /// Accept NaN (rejected by default).
    pub fn allow_nan(self) -> Self {
        self.update_kind(|k| k.allow_nan = true)
    }

    /// Require the value to be a multiple of `divisor`.
    ///
    /// Fails when `divisor` is not a finite positive number.
    pub fn multiple_of(self, divisor: impl Into<f64>) -> Result<Self, UsageError> {
        let divisor = divisor.into();
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(UsageError::invalid_argument(
                "multiple_of",
                format!("divisor must be a finite positive number, got {divisor}"),
            ));
        }
        Ok(self.update_kind(|k| k.multiple_of = Some(divisor)))
    }

    /// Round fractional inputs during integer coercion. Validation still
    /// rejects fractional values.
    pub fn rounding(self, rounding: Rounding) -> Self {
        self.update_kind(|k| k.rounding = Some(rounding))
    }
}
