//! Date kind: UTC instants with optional exclusive or inclusive bounds.
//!
//! Coercion accepts RFC 3339 strings, naive `YYYY-MM-DDTHH:MM:SS[.fff]`
//! strings (read as UTC), bare `YYYY-MM-DD` dates (midnight UTC), and
//! numbers as epoch milliseconds.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use luft_core::{IssueDetail, ParsingContext, UsageError, Value};

use crate::coerce::unwrap_singleton;
use crate::kind::{Checked, KindSpec, KindTag};
use crate::schema::Schema;

/// One side of a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateBound {
    pub at: DateTime<Utc>,
    pub inclusive: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DateKind {
    after: Option<DateBound>,
    before: Option<DateBound>,
}

/// Parse the date string forms accepted by coercion.
pub(crate) fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl DateKind {
    pub fn lower(&self) -> Option<DateBound> {
        self.after
    }

    pub fn upper(&self) -> Option<DateBound> {
        self.before
    }

    fn check(&self, at: DateTime<Utc>, ctx: &mut ParsingContext) -> Checked {
        let too_early = self.after.is_some_and(|b| {
            if b.inclusive {
                at < b.at
            } else {
                at <= b.at
            }
        });
        let too_late = self.before.is_some_and(|b| {
            if b.inclusive {
                at > b.at
            } else {
                at >= b.at
            }
        });
        if too_early || too_late {
            ctx.report(IssueDetail::InvalidRange {
                received: Value::Date(at),
                minimum: self.after.map(|b| Value::Date(b.at)),
                min_inclusive: self.after.is_some_and(|b| b.inclusive),
                maximum: self.before.map(|b| Value::Date(b.at)),
                max_inclusive: self.before.is_some_and(|b| b.inclusive),
            });
            return Ok(None);
        }
        Ok(Some(Value::Date(at)))
    }
}

impl KindSpec for DateKind {
    fn tag(&self) -> KindTag {
        KindTag::Date
    }

    fn check_validate(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        match value {
            Value::Date(at) => self.check(at, ctx),
            other => {
                ctx.report(IssueDetail::invalid_type("date", &other));
                Ok(None)
            }
        }
    }

    fn check_coerce(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        let at = match unwrap_singleton(value) {
            Value::Date(at) => at,
            Value::String(s) => match parse_date(&s) {
                Some(at) => at,
                None => {
                    let detail = IssueDetail::invalid_type("date", &Value::String(s.clone()));
                    ctx.report_with(detail, format!("could not parse {s:?} as date"));
                    return Ok(None);
                }
            },
            Value::Number(ms) if ms.is_finite() => {
                match DateTime::from_timestamp_millis(ms.trunc() as i64) {
                    Some(at) => at,
                    None => {
                        ctx.report_with(
                            IssueDetail::invalid_type("date", &Value::Number(ms)),
                            format!("timestamp {ms} is out of range"),
                        );
                        return Ok(None);
                    }
                }
            }
            other => {
                ctx.report(IssueDetail::invalid_type("date", &other));
                return Ok(None);
            }
        };
        self.check(at, ctx)
    }
}

fn parse_bound(builder: &'static str, input: &str) -> Result<DateTime<Utc>, UsageError> {
    parse_date(input)
        .ok_or_else(|| UsageError::invalid_argument(builder, format!("{input:?} is not a date")))
}

impl Schema<DateKind> {
    /// Require an instant strictly after `at`.
    pub fn after(self, at: DateTime<Utc>) -> Self {
        self.update_kind(|k| {
            k.after = Some(DateBound {
                at,
                inclusive: false,
            })
        })
    }

    /// Require an instant at or after `at`.
    pub fn after_eq(self, at: DateTime<Utc>) -> Self {
        self.update_kind(|k| {
            k.after = Some(DateBound {
                at,
                inclusive: true,
            })
        })
    }

    /// Require an instant strictly before `at`.
    pub fn before(self, at: DateTime<Utc>) -> Self {
        self.update_kind(|k| {
            k.before = Some(DateBound {
                at,
                inclusive: false,
            })
        })
    }

    /// Require an instant at or before `at`.
    pub fn before_eq(self, at: DateTime<Utc>) -> Self {
        self.update_kind(|k| {
            k.before = Some(DateBound {
                at,
                inclusive: true,
            })
        })
    }

    /// [`Schema::after`] with the bound given as a date string.
    pub fn after_str(self, at: &str) -> Result<Self, UsageError> {
        Ok(self.after(parse_bound("after", at)?))
    }

    pub fn after_eq_str(self, at: &str) -> Result<Self, UsageError> {
        Ok(self.after_eq(parse_bound("after_eq", at)?))
    }

    pub fn before_str(self, at: &str) -> Result<Self, UsageError> {
        Ok(self.before(parse_bound("before", at)?))
    }

    pub fn before_eq_str(self, at: &str) -> Result<Self, UsageError> {
        Ok(self.before_eq(parse_bound("before_eq", at)?))
    }
}
