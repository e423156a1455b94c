//! # luft-core — Foundational Types for the Luft Toolkit
//!
//! This crate is the leaf of the Luft dependency DAG. It defines the data
//! the schema engine operates on and the diagnostics it produces, but none
//! of the schema kinds themselves (those live in `luft-schema`).
//!
//! ## Key Design Principles
//!
//! 1. **One value model.** [`Value`] is the JSON-shaped graph every schema
//!    checks: primitives, lists, maps, plus first-class `Date` and `Url`
//!    values and an `Undefined` sentinel distinct from `Null`.
//!
//! 2. **Plain-data diagnostics.** An [`Issue`] serializes to
//!    `{ code, path, message, ...fields }` and can be embedded in an HTTP
//!    error body without transformation.
//!
//! 3. **Two disjoint error families.** [`ValidationError`] means the data
//!    did not conform and carries every collected issue. [`UsageError`]
//!    means the programmer misused a schema or hook. [`LuftError`] unifies
//!    the two for the convenience entry points.
//!
//! 4. **Per-call state only.** [`ParsingContext`] is created fresh for each
//!    top-level call and owned exclusively by it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `luft-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod context;
pub mod error;
pub mod issue;
pub mod path;
pub mod result;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use context::{Mode, ParsingContext};
pub use error::{LuftError, UsageError, ValidationError};
pub use issue::{Issue, IssueCode, IssueDetail};
pub use path::{render_path, PathSegment};
pub use result::ParsingResult;
pub use value::{Map, Value};
