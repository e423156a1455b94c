//! # Schema Contract
//!
//! [`Schema<K>`] pairs shared metadata ([`Meta`]) with one kind `K`. Every
//! kind goes through the same driver:
//!
//! 1. Run the before-hooks registered for the active mode, in order.
//! 2. Run the kind's core check (`check_validate` or `check_coerce`).
//! 3. Run the after-hooks registered for the active mode, in order.
//! 4. Settle: a success must not have recorded issues, a failure must have
//!    recorded at least one. A violation is a [`UsageError`].
//!
//! ## Builders
//!
//! Schemas are persistent values. Every builder consumes `self` and
//! returns a new schema; cloning first leaves the original untouched. The
//! kind sits behind an `Arc`, so clones are cheap and a builder only copies
//! the kind when it is shared.
//!
//! ## Thread Safety
//!
//! Schemas are `Send + Sync`. All per-call state lives in the
//! [`ParsingContext`] created by each top-level call.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use luft_core::{
    Issue, IssueDetail, LuftError, Mode, ParsingContext, ParsingResult, UsageError,
    ValidationError, Value,
};

use crate::composite::UnionKind;
use crate::hook::{hook_fn, Hook, HookAction, HookMode, HookRole};
use crate::kind::{Checked, Kind, KindSpec, KindTag};
use crate::leaf::{NullKind, UndefinedKind};

/// Deprecation marker carried in a schema's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deprecation {
    /// Migration hint shown in the warning, if any.
    pub message: Option<String>,
}

/// Metadata shared by every schema kind.
#[derive(Clone, Default)]
pub struct Meta {
    name: Option<String>,
    description: Option<String>,
    default: Option<Value>,
    deprecation: Option<Deprecation>,
    extensions: BTreeMap<String, serde_json::Value>,
    before: Vec<Hook>,
    after: Vec<Hook>,
}

impl Meta {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The value substituted for a nullish input, if one was set.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn deprecation(&self) -> Option<&Deprecation> {
        self.deprecation.as_ref()
    }

    /// Free-form extension metadata, keyed by namespace (e.g. `"http.status"`).
    pub fn extensions(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.extensions
    }

    pub fn extension(&self, key: &str) -> Option<&serde_json::Value> {
        self.extensions.get(key)
    }

    pub fn before_hooks(&self) -> &[Hook] {
        &self.before
    }

    pub fn after_hooks(&self) -> &[Hook] {
        &self.after
    }

    fn remove_role(&mut self, role: HookRole) {
        self.before.retain(|hook| hook.role() != role);
    }
}

impl fmt::Debug for Meta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Meta")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("default", &self.default)
            .field("deprecation", &self.deprecation)
            .field("extensions", &self.extensions)
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .finish()
    }
}

/// Read-only view of a schema, handed to hooks.
pub trait SchemaView {
    fn meta(&self) -> &Meta;

    fn tag(&self) -> KindTag;

    /// The schema's name if set, otherwise its kind tag.
    fn display_name(&self) -> String {
        self.meta()
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| self.tag().to_string())
    }
}

/// A schema: shared metadata plus one kind.
///
/// `Schema` without a parameter is the erased form held by composites.
#[derive(Debug, Clone)]
pub struct Schema<K = Kind> {
    kind: Arc<K>,
    meta: Meta,
}

impl<K: KindSpec> SchemaView for Schema<K> {
    fn meta(&self) -> &Meta {
        &self.meta
    }

    fn tag(&self) -> KindTag {
        self.kind.tag()
    }
}

// ─── Driver ──────────────────────────────────────────────────────────

impl<K: KindSpec> Schema<K> {
    pub(crate) fn from_kind(kind: K) -> Self {
        Self {
            kind: Arc::new(kind),
            meta: Meta::default(),
        }
    }

    /// Rewrap the kind, keeping the metadata.
    pub(crate) fn map_kind_type<T>(self, f: impl FnOnce(K) -> T) -> Schema<T> {
        Schema {
            kind: Arc::new(f(Arc::unwrap_or_clone(self.kind))),
            meta: self.meta,
        }
    }

    /// Mutate the kind in place, copying it first if it is shared.
    pub(crate) fn update_kind(mut self, f: impl FnOnce(&mut K)) -> Self {
        f(Arc::make_mut(&mut self.kind));
        self
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    pub fn tag(&self) -> KindTag {
        self.kind.tag()
    }

    pub fn name(&self) -> Option<&str> {
        self.meta.name()
    }

    pub fn description_text(&self) -> Option<&str> {
        self.meta.description()
    }

    pub fn deprecation(&self) -> Option<&Deprecation> {
        self.meta.deprecation()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.meta.default_value()
    }

    pub fn extensions(&self) -> &BTreeMap<String, serde_json::Value> {
        self.meta.extensions()
    }

    /// The schema's name if set, otherwise its kind tag.
    pub fn display_name(&self) -> String {
        SchemaView::display_name(self)
    }

    /// Strict check. Fails with every collected issue, or with a usage error.
    pub fn validate(&self, input: impl Into<Value>) -> Result<Value, LuftError> {
        Ok(self.validate_checked(input)?.into_result()?)
    }

    /// Lenient check: converts where possible, then applies the same
    /// constraints as [`Schema::validate`].
    pub fn coerce(&self, input: impl Into<Value>) -> Result<Value, LuftError> {
        Ok(self.coerce_checked(input)?.into_result()?)
    }

    /// Strict check returning a tagged result. Only usage errors are `Err`.
    pub fn validate_checked(&self, input: impl Into<Value>) -> Result<ParsingResult, UsageError> {
        self.execute(Mode::Validate, input.into())
    }

    /// Lenient check returning a tagged result. Only usage errors are `Err`.
    pub fn coerce_checked(&self, input: impl Into<Value>) -> Result<ParsingResult, UsageError> {
        self.execute(Mode::Coerce, input.into())
    }

    /// Strict check, then deserialize the produced value into `T`.
    pub fn validate_as<T: DeserializeOwned>(
        &self,
        input: impl Into<Value>,
    ) -> Result<T, LuftError> {
        deserialize_output(self.validate(input)?)
    }

    /// Lenient check, then deserialize the produced value into `T`.
    pub fn coerce_as<T: DeserializeOwned>(
        &self,
        input: impl Into<Value>,
    ) -> Result<T, LuftError> {
        deserialize_output(self.coerce(input)?)
    }

    fn execute(&self, mode: Mode, input: Value) -> Result<ParsingResult, UsageError> {
        let mut ctx = ParsingContext::new(mode);
        let outcome = self.run(input, &mut ctx).inspect_err(|err| {
            tracing::error!(
                schema = %self.display_name(),
                mode = mode.as_str(),
                error = %err,
                "schema usage error"
            );
        })?;
        match outcome {
            Some(value) => Ok(ParsingResult::Success(value)),
            None => {
                tracing::debug!(
                    schema = %self.display_name(),
                    mode = mode.as_str(),
                    issues = ctx.issue_count(),
                    "input rejected"
                );
                Ok(ParsingResult::Failure(ctx.into_issues()))
            }
        }
    }

    /// Run this schema against `value` inside an existing context.
    ///
    /// This is the entry point composites and hooks use to delegate to a
    /// child schema. Issues are recorded on `ctx` at its current path.
    pub fn run(&self, value: Value, ctx: &mut ParsingContext) -> Checked {
        let mode = ctx.mode();
        let baseline = ctx.issue_count();

        let mut value = value;
        for hook in self.meta.before.iter().filter(|h| h.mode().applies(mode)) {
            match hook.call(value, ctx, self) {
                HookAction::Continue(next) => value = next,
                HookAction::Abort => return self.settle(None, baseline, ctx),
                HookAction::Break(done) => return self.settle(Some(done), baseline, ctx),
            }
        }

        let checked = match mode {
            Mode::Validate => self.kind.check_validate(value, ctx)?,
            Mode::Coerce => self.kind.check_coerce(value, ctx)?,
        };
        let Some(mut value) = checked else {
            return self.settle(None, baseline, ctx);
        };

        for hook in self.meta.after.iter().filter(|h| h.mode().applies(mode)) {
            match hook.call(value, ctx, self) {
                HookAction::Continue(next) => value = next,
                HookAction::Abort => return self.settle(None, baseline, ctx),
                HookAction::Break(done) => return self.settle(Some(done), baseline, ctx),
            }
        }
        self.settle(Some(value), baseline, ctx)
    }

    /// Enforce that issues were recorded if and only if the run failed.
    fn settle(&self, outcome: Option<Value>, baseline: usize, ctx: &ParsingContext) -> Checked {
        let recorded = ctx.issue_count().saturating_sub(baseline);
        match (&outcome, recorded) {
            (Some(_), 0) => Ok(outcome),
            (Some(_), recorded) => Err(UsageError::SuccessWithIssues {
                schema: self.display_name(),
                recorded,
            }),
            (None, 0) => Err(UsageError::FailureWithoutIssues {
                schema: self.display_name(),
            }),
            (None, _) => Ok(None),
        }
    }
}

fn deserialize_output<T: DeserializeOwned>(value: Value) -> Result<T, LuftError> {
    serde_json::from_value(value.to_json()).map_err(|err| {
        let issue = Issue::new(Vec::new(), IssueDetail::parsing(err.to_string()));
        LuftError::from(ValidationError::new(vec![issue]))
    })
}

// ─── Metadata Builders ───────────────────────────────────────────────

impl<K: KindSpec> Schema<K> {
    /// Set a human-readable name, used in logs and usage errors.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.meta.name = Some(name.into());
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.meta.description = Some(text.into());
        self
    }

    /// Mark the schema deprecated. The first use logs one warning.
    /// `deprecated(false, None)` clears the marker.
    pub fn deprecated(mut self, flag: bool, message: Option<&str>) -> Self {
        self.meta.remove_role(HookRole::Deprecation);
        if flag {
            let message = message.map(str::to_string);
            self.meta.deprecation = Some(Deprecation {
                message: message.clone(),
            });
            self.meta.before.insert(0, Hook::deprecation(message));
        } else {
            self.meta.deprecation = None;
        }
        self
    }

    /// Substitute `value` when the input is null or undefined, skipping the
    /// core check. Replaces any earlier default.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.meta.remove_role(HookRole::Default);
        self.meta.default = Some(value.clone());
        let position = self
            .meta
            .before
            .iter()
            .take_while(|hook| hook.role() == HookRole::Deprecation)
            .count();
        self.meta
            .before
            .insert(position, Hook::default_value(value));
        self
    }

    /// Append a hook that runs before the core check.
    pub fn before_hook<F>(mut self, mode: HookMode, f: F) -> Self
    where
        F: Fn(Value, &mut ParsingContext, &dyn SchemaView) -> HookAction + Send + Sync + 'static,
    {
        self.meta.before.push(Hook::user(mode, hook_fn(f)));
        self
    }

    /// Append a hook that runs after a successful core check.
    pub fn after_hook<F>(mut self, mode: HookMode, f: F) -> Self
    where
        F: Fn(Value, &mut ParsingContext, &dyn SchemaView) -> HookAction + Send + Sync + 'static,
    {
        self.meta.after.push(Hook::user(mode, hook_fn(f)));
        self
    }

    /// Attach free-form metadata for collaborators (OpenAPI projection,
    /// HTTP status overrides).
    pub fn extension(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.meta.extensions.insert(key.into(), value);
        self
    }
}

// ─── Combinators ─────────────────────────────────────────────────────

impl<K: KindSpec> Schema<K>
where
    Schema<K>: Into<Schema>,
{
    /// Erase the kind parameter.
    pub fn erase(self) -> Schema {
        self.into()
    }

    /// Accept `undefined` in addition to this schema.
    pub fn optional(self) -> Schema<UnionKind> {
        self.or(Schema::from_kind(UndefinedKind))
    }

    /// Accept `null` in addition to this schema.
    pub fn nullable(self) -> Schema<UnionKind> {
        self.or(Schema::from_kind(NullKind))
    }

    /// Accept `null` and `undefined` in addition to this schema.
    pub fn nullish(self) -> Schema<UnionKind> {
        Schema::from_kind(UnionKind::new(vec![
            self.into(),
            Schema::from_kind(NullKind).into(),
            Schema::from_kind(UndefinedKind).into(),
        ]))
    }

    /// Accept either this schema or `other`, trying this one first.
    pub fn or(self, other: impl Into<Schema>) -> Schema<UnionKind> {
        Schema::from_kind(UnionKind::new(vec![self.into(), other.into()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory as l;
    use luft_core::IssueCode;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn schemas_are_send_and_sync() {
        assert_send_sync::<Schema>();
        assert_send_sync::<Schema<crate::leaf::StringKind>>();
    }

    #[test]
    fn builders_do_not_mutate_the_original() {
        let base = l::string();
        let bounded = base.clone().min_len(3);
        assert!(base.validate("ab").is_ok());
        assert!(bounded.validate("ab").is_err());
    }

    #[test]
    fn before_hook_replaces_value() {
        let schema = l::string().before_hook(HookMode::Both, |value, _, _| match value {
            Value::String(s) => HookAction::Continue(Value::String(s.to_uppercase())),
            other => HookAction::Continue(other),
        });
        assert_eq!(schema.validate("abc").unwrap(), Value::from("ABC"));
    }

    #[test]
    fn hook_mode_filters_by_call() {
        let schema = l::string().before_hook(HookMode::Coerce, |_, _, _| {
            HookAction::Continue(Value::from("coerced"))
        });
        assert_eq!(schema.validate("x").unwrap(), Value::from("x"));
        assert_eq!(schema.coerce("x").unwrap(), Value::from("coerced"));
    }

    #[test]
    fn break_skips_core_check() {
        let schema = l::number().before_hook(HookMode::Both, |value, _, _| {
            if value.is_null() {
                HookAction::Break(Value::from(0))
            } else {
                HookAction::Continue(value)
            }
        });
        assert_eq!(schema.validate(Value::Null).unwrap(), Value::from(0));
        assert!(schema.validate("nope").is_err());
    }

    #[test]
    fn abort_with_issue_fails() {
        let schema = l::string().after_hook(HookMode::Both, |value, ctx, _| {
            if value.as_str() == Some("forbidden") {
                ctx.report(IssueDetail::parsing("word is forbidden"));
                HookAction::Abort
            } else {
                HookAction::Continue(value)
            }
        });
        assert!(schema.validate("fine").is_ok());
        let err = schema.validate("forbidden").unwrap_err();
        let issues = err.issues().unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code(), IssueCode::ParsingIssue);
    }

    #[test]
    fn abort_without_issue_is_usage_error() {
        let schema = l::string()
            .named("silent")
            .after_hook(HookMode::Both, |_, _, _| HookAction::Abort);
        let err = schema.validate_checked("x").unwrap_err();
        assert!(matches!(
            err,
            UsageError::FailureWithoutIssues { ref schema } if schema == "silent"
        ));
    }

    #[test]
    fn success_with_issue_is_usage_error() {
        let schema = l::string().after_hook(HookMode::Both, |value, ctx, _| {
            ctx.report(IssueDetail::parsing("recorded but continued"));
            HookAction::Continue(value)
        });
        let err = schema.validate("x").unwrap_err();
        assert!(matches!(
            err,
            LuftError::Usage(UsageError::SuccessWithIssues { recorded: 1, .. })
        ));
    }

    #[test]
    fn usage_error_in_child_propagates_unmodified() {
        let bad = l::string().after_hook(HookMode::Both, |_, _, _| HookAction::Abort);
        let schema = l::object().field("name", bad);
        let input = Value::from(serde_json::json!({"name": "x"}));
        let err = schema.validate_checked(input).unwrap_err();
        assert!(matches!(err, UsageError::FailureWithoutIssues { .. }));
    }

    #[test]
    fn default_substitutes_nullish() {
        let schema = l::number().default(5);
        assert_eq!(schema.validate(Value::Undefined).unwrap(), Value::from(5));
        assert_eq!(schema.validate(Value::Null).unwrap(), Value::from(5));
        assert_eq!(schema.validate(7).unwrap(), Value::from(7));
        assert_eq!(schema.meta().default_value(), Some(&Value::from(5)));
    }

    #[test]
    fn default_replaces_earlier_default() {
        let schema = l::number().default(1).default(2);
        assert_eq!(schema.validate(Value::Undefined).unwrap(), Value::from(2));
        assert_eq!(schema.meta().before_hooks().len(), 1);
    }

    #[test]
    fn deprecated_marks_and_clears() {
        let schema = l::string().deprecated(true, Some("use `label`"));
        assert_eq!(
            schema.meta().deprecation().and_then(|d| d.message.as_deref()),
            Some("use `label`")
        );
        assert!(schema.validate("a").is_ok());
        assert!(schema.validate("b").is_ok());

        let cleared = schema.deprecated(false, None);
        assert!(cleared.meta().deprecation().is_none());
        assert!(cleared.meta().before_hooks().is_empty());
    }

    // ── Deprecation warnings ──────────────────────────────────────────

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture_warnings(f: impl FnOnce()) -> String {
        let sink = Captured::default();
        let writer = sink.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        sink.text()
    }

    #[test]
    fn deprecation_warns_once_with_path_and_message() {
        let schema = l::object().field(
            "label",
            l::string().deprecated(true, Some("use title")),
        );
        let logs = capture_warnings(|| {
            let input = Value::from(serde_json::json!({"label": "a"}));
            assert!(schema.validate(input.clone()).is_ok());
            assert!(schema.coerce(input).is_ok());
        });
        assert_eq!(logs.matches("deprecated schema used").count(), 1);
        assert!(logs.contains("path=label"), "{logs}");
        assert!(logs.contains("use title"), "{logs}");
    }

    #[test]
    fn derived_schema_warns_on_its_own_first_use() {
        let original = l::string().deprecated(true, Some("use title"));
        let derived = original.clone().min_len(1);
        let logs = capture_warnings(|| {
            assert!(original.validate("a").is_ok());
            assert!(original.validate("a").is_ok());
            assert!(derived.validate("b").is_ok());
            assert!(derived.validate("b").is_ok());
        });
        assert_eq!(logs.matches("deprecated schema used").count(), 2);
    }

    #[test]
    fn deprecated_runs_before_default() {
        let schema = l::string().default("x").deprecated(true, None);
        let roles: Vec<HookRole> = schema.meta().before_hooks().iter().map(Hook::role).collect();
        assert_eq!(roles, vec![HookRole::Deprecation, HookRole::Default]);
    }

    #[test]
    fn hook_sees_schema_view() {
        let schema = l::string()
            .named("username")
            .before_hook(HookMode::Both, |value, ctx, schema| {
                if schema.display_name() != "username" {
                    ctx.report(IssueDetail::parsing("wrong view"));
                    return HookAction::Abort;
                }
                HookAction::Continue(value)
            });
        assert!(schema.validate("bob").is_ok());
    }

    #[test]
    fn metadata_accessors() {
        let schema = l::string()
            .named("email")
            .description("primary contact address")
            .extension("http.status", serde_json::json!(422));
        assert_eq!(schema.meta().name(), Some("email"));
        assert_eq!(schema.meta().description(), Some("primary contact address"));
        assert_eq!(
            schema.meta().extension("http.status"),
            Some(&serde_json::json!(422))
        );
        assert_eq!(l::string().display_name(), "string");
    }

    #[test]
    fn optional_nullable_nullish() {
        let optional = l::string().optional();
        assert!(optional.validate(Value::Undefined).is_ok());
        assert!(optional.validate(Value::Null).is_err());

        let nullable = l::string().nullable();
        assert!(nullable.validate(Value::Null).is_ok());
        assert!(nullable.validate(Value::Undefined).is_err());

        let nullish = l::string().nullish();
        assert!(nullish.validate(Value::Null).is_ok());
        assert!(nullish.validate(Value::Undefined).is_ok());
        assert!(nullish.validate("a").is_ok());
        assert!(nullish.validate(1).is_err());
    }

    #[test]
    fn typed_extraction() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Pagination {
            page: u32,
            size: u32,
        }
        let schema = l::object()
            .field("page", l::int().min_eq(1))
            .field("size", l::int().default(20));
        let input = Value::from(serde_json::json!({"page": "3"}));
        let parsed: Pagination = schema.coerce_as(input).unwrap();
        assert_eq!(parsed, Pagination { page: 3, size: 20 });
    }

    #[test]
    fn typed_extraction_mismatch_is_parsing_issue() {
        #[derive(serde::Deserialize, Debug)]
        #[allow(dead_code)]
        struct NeedsId {
            id: u32,
        }
        let err = l::object()
            .validate_as::<NeedsId>(Value::from(serde_json::json!({})))
            .unwrap_err();
        assert_eq!(err.issues().unwrap()[0].code(), IssueCode::ParsingIssue);
    }
}
