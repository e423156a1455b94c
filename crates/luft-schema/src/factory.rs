//! # Factory
//!
//! Free functions constructing a fresh schema of each kind. Import the
//! module under a short alias:
//!
//! ```
//! use luft_schema::factory as l;
//!
//! let user = l::object()
//!     .field("name", l::string().min_len(1))
//!     .field("age", l::int().min_eq(0))
//!     .field("tags", l::array(l::string()).optional());
//! ```

use std::sync::Arc;

use luft_core::{UsageError, Value};
use regex::Regex;

use crate::composite::{ArrayKind, LazyKind, ObjectKind, RecordKind, TupleKind, UnionKind};
use crate::leaf::{
    AnyKind, BooleanKind, DateKind, LiteralKind, NeverKind, NullKind, NumberKind, PatternKind,
    StringKind, UndefinedKind, UrlKind, UuidKind,
};
use crate::schema::Schema;

pub fn string() -> Schema<StringKind> {
    Schema::from_kind(StringKind::default())
}

pub fn number() -> Schema<NumberKind> {
    Schema::from_kind(NumberKind::default())
}

/// A number schema that also requires an integral value.
pub fn int() -> Schema<NumberKind> {
    Schema::from_kind(NumberKind::integer())
}

pub fn boolean() -> Schema<BooleanKind> {
    Schema::from_kind(BooleanKind::default())
}

pub fn date() -> Schema<DateKind> {
    Schema::from_kind(DateKind::default())
}

/// Accept exactly one of `values`.
pub fn literal<I, V>(values: I) -> Schema<LiteralKind>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Schema::from_kind(LiteralKind::new(values.into_iter().map(Into::into).collect()))
}

/// Strings matching `expr`. An invalid expression is a usage error.
pub fn pattern(expr: &str) -> Result<Schema<PatternKind>, UsageError> {
    Ok(pattern_from(Regex::new(expr)?))
}

/// Strings matching an already compiled expression.
pub fn pattern_from(regex: Regex) -> Schema<PatternKind> {
    Schema::from_kind(PatternKind::new(regex))
}

pub fn url() -> Schema<UrlKind> {
    Schema::from_kind(UrlKind::default())
}

pub fn uuid() -> Schema<UuidKind> {
    Schema::from_kind(UuidKind::default())
}

pub fn any() -> Schema<AnyKind> {
    Schema::from_kind(AnyKind)
}

pub fn never() -> Schema<NeverKind> {
    Schema::from_kind(NeverKind)
}

pub fn null() -> Schema<NullKind> {
    Schema::from_kind(NullKind)
}

pub fn undefined() -> Schema<UndefinedKind> {
    Schema::from_kind(UndefinedKind)
}

/// An object with no declared fields. Add them with `.field(name, schema)`.
pub fn object() -> Schema<ObjectKind> {
    Schema::from_kind(ObjectKind::default())
}

pub fn array(element: impl Into<Schema>) -> Schema<ArrayKind> {
    Schema::from_kind(ArrayKind::new(element.into()))
}

pub fn tuple<I, S>(items: I) -> Schema<TupleKind>
where
    I: IntoIterator<Item = S>,
    S: Into<Schema>,
{
    Schema::from_kind(TupleKind::new(items.into_iter().map(Into::into).collect()))
}

pub fn record(key: impl Into<Schema>, value: impl Into<Schema>) -> Schema<RecordKind> {
    Schema::from_kind(RecordKind::new(key.into(), value.into()))
}

/// Try each alternative in order. An empty union rejects every input.
pub fn union<I, S>(alternatives: I) -> Schema<UnionKind>
where
    I: IntoIterator<Item = S>,
    S: Into<Schema>,
{
    Schema::from_kind(UnionKind::new(
        alternatives.into_iter().map(Into::into).collect(),
    ))
}

/// A schema resolved from `supplier` each time a value is checked. Used for
/// recursion.
pub fn lazy<F, S>(supplier: F) -> Schema<LazyKind>
where
    F: Fn() -> S + Send + Sync + 'static,
    S: Into<Schema>,
{
    Schema::from_kind(LazyKind::new(Arc::new(move || -> Schema { supplier().into() })))
}
