//! # Composite Kinds
//!
//! Kinds that contain other schemas: objects, arrays, tuples, records,
//! unions, and lazily resolved (recursive) schemas.
//!
//! Composites delegate to their children through [`Schema::run`], pushing a
//! path segment for each child. A child failure marks the composite as
//! failed but does not stop it; every child is checked so that one call
//! reports every problem.
//!
//! [`Schema::run`]: crate::Schema::run

mod array;
mod lazy;
mod object;
mod record;
mod tuple;
mod union;

pub use array::ArrayKind;
pub use lazy::LazyKind;
pub use object::{ObjectKind, UnknownKeys};
pub use record::RecordKind;
pub use tuple::TupleKind;
pub use union::UnionKind;

use luft_core::{IssueDetail, Map, ParsingContext, Value};

/// Unpack a map-shaped input. When `lenient`, a string holding a JSON
/// object is parsed first. Records an issue and returns `None` otherwise.
pub(crate) fn object_input(value: Value, lenient: bool, ctx: &mut ParsingContext) -> Option<Map> {
    match value {
        Value::Object(map) => Some(map),
        Value::String(s) if lenient => match serde_json::from_str::<serde_json::Value>(&s) {
            Ok(serde_json::Value::Object(map)) => {
                Some(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
            Ok(_) => {
                ctx.report(IssueDetail::invalid_type("object", &Value::String(s)));
                None
            }
            Err(err) => {
                ctx.report(IssueDetail::parsing(format!("invalid JSON object: {err}")));
                None
            }
        },
        other => {
            ctx.report(IssueDetail::invalid_type("object", &other));
            None
        }
    }
}
