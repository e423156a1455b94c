//! # luft-schema — Schema Descriptors and the Checking Engine
//!
//! Schemas describe the expected shape of JSON-shaped data and check
//! inputs against it in one of two modes:
//!
//! - **validate** is strict: the input must already have the right types.
//! - **coerce** is lenient: leaf kinds convert first (`"42"` to `42`,
//!   `"2024-01-01"` to a date, `"a,b"` to a list when configured), then
//!   apply the same constraints.
//!
//! Every failure is reported as a list of [`Issue`]s with the path of the
//! offending value; one call reports every problem it finds.
//!
//! ## Usage
//!
//! ```
//! use luft_schema::factory as l;
//! use serde_json::json;
//!
//! let query = l::object()
//!     .field("page", l::int().min_eq(1).default(1))
//!     .field("tags", l::array(l::string()).optional());
//!
//! let parsed = query.coerce(json!({"page": "3", "tags": "rust"})).unwrap();
//! assert_eq!(parsed.to_json(), json!({"page": 3, "tags": ["rust"]}));
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `luft-core` within the workspace.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests. Programmer misuse surfaces
//!   as [`UsageError`].
//!
//! [`Issue`]: luft_core::Issue
//! [`UsageError`]: luft_core::UsageError

pub mod coerce;
pub mod composite;
pub mod factory;
pub mod hook;
pub mod kind;
pub mod leaf;
pub mod schema;

pub use coerce::ListParser;
pub use composite::{ArrayKind, LazyKind, ObjectKind, RecordKind, TupleKind, UnionKind, UnknownKeys};
pub use hook::{Hook, HookAction, HookFn, HookMode};
pub use kind::{Checked, Kind, KindSpec, KindTag};
pub use leaf::{
    AnyKind, BooleanKind, DateBound, DateKind, LiteralKind, NeverKind, NullKind, NumberBound,
    NumberKind, PatternKind, Rounding, StringKind, UndefinedKind, UrlKind, UuidKind,
};
pub use schema::{Deprecation, Meta, Schema, SchemaView};

// Re-export the core types every caller needs alongside schemas.
pub use luft_core::{
    render_path, Issue, IssueCode, IssueDetail, LuftError, Map, Mode, ParsingContext,
    ParsingResult, PathSegment, UsageError, ValidationError, Value,
};
