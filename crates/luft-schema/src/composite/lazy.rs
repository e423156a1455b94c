//! Lazy kind: a schema produced by a supplier function at check time.
//!
//! This is how recursive schemas are written: the supplier may reference
//! the schema being defined, because it is not called until a value is
//! checked. The supplier runs on every check; nothing is cached.
//!
//! A supplier must eventually produce a non-lazy schema. Introspection
//! (`tag`) follows at most [`MAX_LAZY_HOPS`] lazy-to-lazy steps and reports
//! `any` past that; checking a value has no such limit.

use std::fmt;
use std::sync::Arc;

use luft_core::{ParsingContext, Value};

use crate::kind::{Checked, Kind, KindSpec, KindTag};
use crate::schema::Schema;

/// Lazy schemas `tag` will resolve through before giving up.
pub const MAX_LAZY_HOPS: usize = 32;

/// Produces the schema a lazy kind stands for.
pub type SchemaSupplier = Arc<dyn Fn() -> Schema + Send + Sync>;

#[derive(Clone)]
pub struct LazyKind {
    supplier: SchemaSupplier,
}

impl LazyKind {
    pub(crate) fn new(supplier: SchemaSupplier) -> Self {
        Self { supplier }
    }

    /// Call the supplier and return the schema this lazy kind stands for.
    pub fn resolve(&self) -> Schema {
        (self.supplier)()
    }
}

impl fmt::Debug for LazyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyKind").finish_non_exhaustive()
    }
}

impl KindSpec for LazyKind {
    fn tag(&self) -> KindTag {
        let mut target = self.resolve();
        for _ in 0..MAX_LAZY_HOPS {
            let next = match target.kind() {
                Kind::Lazy(inner) => inner.resolve(),
                other => return other.tag(),
            };
            target = next;
        }
        KindTag::Any
    }

    fn check_validate(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        self.resolve().run(value, ctx)
    }

    fn check_coerce(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        self.resolve().run(value, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory as l;
    use luft_core::PathSegment;
    use serde_json::json;

    fn category() -> Schema {
        l::object()
            .field("name", l::string())
            .field("children", l::array(l::lazy(category)).optional())
            .into()
    }

    #[test]
    fn recursive_schema_accepts_nested_data() {
        let input = json!({
            "name": "root",
            "children": [
                {"name": "a", "children": [{"name": "a1"}]},
                {"name": "b"}
            ]
        });
        let out = category().validate(Value::from(input.clone())).unwrap();
        assert_eq!(out, Value::from(input));
    }

    #[test]
    fn recursive_issue_paths() {
        let input = json!({"name": "root", "children": [{"name": "a", "children": [{"name": 3}]}]});
        let err = category().validate(Value::from(input)).unwrap_err();
        assert_eq!(
            err.issues().unwrap()[0].path,
            vec![
                PathSegment::from("children"),
                PathSegment::Index(0),
                PathSegment::from("children"),
                PathSegment::Index(0),
                PathSegment::from("name"),
            ]
        );
    }

    #[test]
    fn supplier_runs_on_every_check() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let schema = l::lazy(|| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            l::int()
        });
        assert!(schema.validate(1).is_ok());
        assert!(schema.validate(2).is_ok());
        assert_eq!(CALLS.load(Ordering::SeqCst), 2);
    }

    fn nested() -> Schema {
        l::lazy(|| l::lazy(l::int)).into()
    }

    fn endless() -> Schema {
        l::lazy(endless).into()
    }

    #[test]
    fn tag_sees_through_nested_lazies() {
        assert_eq!(l::lazy(nested).tag(), KindTag::Integer);
        assert_eq!(l::lazy(category).tag(), KindTag::Object);
    }

    #[test]
    fn tag_gives_up_on_endless_lazies() {
        assert_eq!(l::lazy(endless).tag(), KindTag::Any);
    }

    #[test]
    fn debug_does_not_resolve() {
        let schema = l::lazy(category);
        assert_eq!(format!("{:?}", schema.kind()), "LazyKind { .. }");
    }
}
