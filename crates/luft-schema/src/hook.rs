//! # Hooks
//!
//! User-supplied transformation steps that run before or after a schema's
//! core check. A hook receives the current value, the parsing context, and
//! a read-only view of the schema it is attached to, and returns a
//! [`HookAction`].
//!
//! The built-in default-value and deprecation behaviors are ordinary
//! before-hooks tagged with a [`HookRole`] so that re-registering them
//! replaces the earlier instance instead of stacking.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use luft_core::{Mode, ParsingContext, Value};

use crate::schema::SchemaView;

/// What the driver does after a hook returns.
#[derive(Debug, Clone, PartialEq)]
pub enum HookAction {
    /// Continue with this (possibly replaced) value.
    Continue(Value),
    /// Fail the schema. The hook must have recorded at least one issue.
    Abort,
    /// Succeed immediately with this value, skipping the remaining hooks
    /// and the core check. The hook must not have recorded any issue.
    Break(Value),
}

/// Which mode(s) a hook runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookMode {
    Validate,
    Coerce,
    Both,
}

impl HookMode {
    /// Whether a hook registered with this mode runs under `mode`.
    pub fn applies(self, mode: Mode) -> bool {
        matches!(
            (self, mode),
            (HookMode::Both, _)
                | (HookMode::Validate, Mode::Validate)
                | (HookMode::Coerce, Mode::Coerce)
        )
    }
}

/// Hook function signature.
pub type HookFn =
    Arc<dyn Fn(Value, &mut ParsingContext, &dyn SchemaView) -> HookAction + Send + Sync>;

/// Box a closure as a [`HookFn`].
pub(crate) fn hook_fn<F>(f: F) -> HookFn
where
    F: Fn(Value, &mut ParsingContext, &dyn SchemaView) -> HookAction + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Origin of a hook. Built-in roles are replaced on re-registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HookRole {
    User,
    Default,
    Deprecation,
}

/// Body of a hook: a user or default function, or the deprecation warning.
enum HookBody {
    Func(HookFn),
    /// `warned` belongs to this hook instance alone; a clone starts unwarned.
    Deprecation {
        message: Option<String>,
        warned: AtomicBool,
    },
}

impl Clone for HookBody {
    fn clone(&self) -> Self {
        match self {
            Self::Func(func) => Self::Func(Arc::clone(func)),
            Self::Deprecation { message, .. } => Self::Deprecation {
                message: message.clone(),
                warned: AtomicBool::new(false),
            },
        }
    }
}

/// A registered hook.
#[derive(Clone)]
pub struct Hook {
    mode: HookMode,
    role: HookRole,
    body: HookBody,
}

impl Hook {
    pub(crate) fn user(mode: HookMode, func: HookFn) -> Self {
        Self {
            mode,
            role: HookRole::User,
            body: HookBody::Func(func),
        }
    }

    /// Substitutes `value` for a nullish input and short-circuits.
    pub(crate) fn default_value(value: Value) -> Self {
        let func = hook_fn(move |input, _ctx, _schema| {
            if input.is_nullish() {
                HookAction::Break(value.clone())
            } else {
                HookAction::Continue(input)
            }
        });
        Self {
            mode: HookMode::Both,
            role: HookRole::Default,
            body: HookBody::Func(func),
        }
    }

    /// Emits one warning the first time this schema instance is used.
    /// Clones and builder results warn on their own first use.
    pub(crate) fn deprecation(message: Option<String>) -> Self {
        Self {
            mode: HookMode::Both,
            role: HookRole::Deprecation,
            body: HookBody::Deprecation {
                message,
                warned: AtomicBool::new(false),
            },
        }
    }

    pub fn mode(&self) -> HookMode {
        self.mode
    }

    pub(crate) fn role(&self) -> HookRole {
        self.role
    }

    pub(crate) fn call(
        &self,
        value: Value,
        ctx: &mut ParsingContext,
        schema: &dyn SchemaView,
    ) -> HookAction {
        match &self.body {
            HookBody::Func(func) => func(value, ctx, schema),
            HookBody::Deprecation { message, warned } => {
                if !warned.swap(true, Ordering::Relaxed) {
                    tracing::warn!(
                        schema = %schema.display_name(),
                        path = %ctx.path_string(),
                        note = message.as_deref().unwrap_or("no replacement given"),
                        "deprecated schema used"
                    );
                }
                HookAction::Continue(value)
            }
        }
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("mode", &self.mode)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
