//! # Schema Kinds
//!
//! Every schema pairs shared metadata with exactly one *kind*: the
//! kind-specific constraints and the two core checks (strict validation and
//! lenient coercion). The set of kinds is closed.
//!
//! ## Design
//!
//! Each kind is a plain struct (`StringKind`, `ObjectKind`, ...) that
//! implements the sealed [`KindSpec`] trait. A typed `Schema<StringKind>`
//! exposes only the string builders. [`Kind`] is the erased sum over all
//! kinds. Composites hold erased `Schema` children, and every typed schema
//! converts into the erased form with `From`.

use std::fmt;

use serde::Serialize;

use luft_core::{ParsingContext, UsageError, Value};

use crate::composite::{ArrayKind, LazyKind, ObjectKind, RecordKind, TupleKind, UnionKind};
use crate::leaf::{
    AnyKind, BooleanKind, DateKind, LiteralKind, NeverKind, NullKind, NumberKind, PatternKind,
    StringKind, UndefinedKind, UrlKind, UuidKind,
};
use crate::schema::Schema;

/// Outcome of a core check or a full schema run.
///
/// - `Ok(Some(value))`: the input conformed and produced `value`.
/// - `Ok(None)`: the input did not conform. At least one issue was recorded.
/// - `Err(_)`: programmer misuse; propagates unmodified to the caller.
pub type Checked = Result<Option<Value>, UsageError>;

/// Closed tag identifying a kind. Used in diagnostics, logs, and the
/// OpenAPI projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KindTag {
    String,
    Number,
    Integer,
    Boolean,
    Date,
    Literal,
    Pattern,
    Url,
    Uuid,
    Any,
    Never,
    Null,
    Undefined,
    Object,
    Array,
    Tuple,
    Record,
    Union,
}

impl KindTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Literal => "literal",
            Self::Pattern => "pattern",
            Self::Url => "url",
            Self::Uuid => "uuid",
            Self::Any => "any",
            Self::Never => "never",
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Object => "object",
            Self::Array => "array",
            Self::Tuple => "tuple",
            Self::Record => "record",
            Self::Union => "union",
        }
    }
}

impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Sealed Trait ────────────────────────────────────────────────────

mod private {
    pub trait Sealed {}
    impl Sealed for super::Kind {}
    impl Sealed for crate::leaf::StringKind {}
    impl Sealed for crate::leaf::NumberKind {}
    impl Sealed for crate::leaf::BooleanKind {}
    impl Sealed for crate::leaf::DateKind {}
    impl Sealed for crate::leaf::LiteralKind {}
    impl Sealed for crate::leaf::PatternKind {}
    impl Sealed for crate::leaf::UrlKind {}
    impl Sealed for crate::leaf::UuidKind {}
    impl Sealed for crate::leaf::AnyKind {}
    impl Sealed for crate::leaf::NeverKind {}
    impl Sealed for crate::leaf::NullKind {}
    impl Sealed for crate::leaf::UndefinedKind {}
    impl Sealed for crate::composite::ObjectKind {}
    impl Sealed for crate::composite::ArrayKind {}
    impl Sealed for crate::composite::TupleKind {}
    impl Sealed for crate::composite::RecordKind {}
    impl Sealed for crate::composite::UnionKind {}
    impl Sealed for crate::composite::LazyKind {}
}

/// Kind-specific half of a schema.
///
/// Sealed — only the kinds defined in this crate implement it. Extension
/// happens through hooks, not new kinds.
///
/// Implementations record issues on `ctx` at the current path and return
/// `Ok(None)` on failure. They never touch the path of the value they
/// check; composites push child segments with [`ParsingContext::enter`].
pub trait KindSpec: private::Sealed + Clone + fmt::Debug + Send + Sync + 'static {
    /// The tag of this kind.
    fn tag(&self) -> KindTag;

    /// Strict check: the input must already have the right shape.
    fn check_validate(&self, value: Value, ctx: &mut ParsingContext) -> Checked;

    /// Lenient check: attempt conversion first, then apply the same
    /// constraints as [`KindSpec::check_validate`].
    fn check_coerce(&self, value: Value, ctx: &mut ParsingContext) -> Checked;
}

/// The erased sum over every kind.
#[derive(Debug, Clone)]
pub enum Kind {
    String(StringKind),
    Number(NumberKind),
    Boolean(BooleanKind),
    Date(DateKind),
    Literal(LiteralKind),
    Pattern(PatternKind),
    Url(UrlKind),
    Uuid(UuidKind),
    Any(AnyKind),
    Never(NeverKind),
    Null(NullKind),
    Undefined(UndefinedKind),
    Object(ObjectKind),
    Array(ArrayKind),
    Tuple(TupleKind),
    Record(RecordKind),
    Union(UnionKind),
    Lazy(LazyKind),
}

/// Exhaustive dispatch over every [`Kind`] variant.
macro_rules! dispatch {
    ($kind:expr, $inner:ident => $body:expr) => {
        match $kind {
            Kind::String($inner) => $body,
            Kind::Number($inner) => $body,
            Kind::Boolean($inner) => $body,
            Kind::Date($inner) => $body,
            Kind::Literal($inner) => $body,
            Kind::Pattern($inner) => $body,
            Kind::Url($inner) => $body,
            Kind::Uuid($inner) => $body,
            Kind::Any($inner) => $body,
            Kind::Never($inner) => $body,
            Kind::Null($inner) => $body,
            Kind::Undefined($inner) => $body,
            Kind::Object($inner) => $body,
            Kind::Array($inner) => $body,
            Kind::Tuple($inner) => $body,
            Kind::Record($inner) => $body,
            Kind::Union($inner) => $body,
            Kind::Lazy($inner) => $body,
        }
    };
}

impl KindSpec for Kind {
    fn tag(&self) -> KindTag {
        dispatch!(self, kind => kind.tag())
    }

    fn check_validate(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        dispatch!(self, kind => kind.check_validate(value, ctx))
    }

    fn check_coerce(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        dispatch!(self, kind => kind.check_coerce(value, ctx))
    }
}

/// Erase a typed kind (and a typed schema) into the [`Kind`] sum.
macro_rules! impl_erase_kind {
    ($kind_type:ty, $variant:ident) => {
        impl From<$kind_type> for Kind {
            fn from(kind: $kind_type) -> Self {
                Kind::$variant(kind)
            }
        }

        impl From<Schema<$kind_type>> for Schema {
            fn from(schema: Schema<$kind_type>) -> Self {
                schema.map_kind_type(Kind::$variant)
            }
        }
    };
}

impl_erase_kind!(StringKind, String);
impl_erase_kind!(NumberKind, Number);
impl_erase_kind!(BooleanKind, Boolean);
impl_erase_kind!(DateKind, Date);
impl_erase_kind!(LiteralKind, Literal);
impl_erase_kind!(PatternKind, Pattern);
impl_erase_kind!(UrlKind, Url);
impl_erase_kind!(UuidKind, Uuid);
impl_erase_kind!(AnyKind, Any);
impl_erase_kind!(NeverKind, Never);
impl_erase_kind!(NullKind, Null);
impl_erase_kind!(UndefinedKind, Undefined);
impl_erase_kind!(ObjectKind, Object);
impl_erase_kind!(ArrayKind, Array);
impl_erase_kind!(TupleKind, Tuple);
impl_erase_kind!(RecordKind, Record);
impl_erase_kind!(UnionKind, Union);
impl_erase_kind!(LazyKind, Lazy);
