//! # Parsing Context
//!
//! Per-call mutable state for one top-level `validate`/`coerce` invocation:
//! the active [`Mode`], the path of the value under inspection, and the
//! issues recorded so far.
//!
//! ## Invariants
//!
//! - The path always describes the exact position of the value currently
//!   being checked. [`ParsingContext::enter`] pushes a segment for the
//!   duration of a closure and pops it afterwards, so callers cannot forget
//!   the pop.
//! - A context forked for a union alternative ([`ParsingContext::fork`])
//!   shares nothing mutable with its parent. Its issues reach the parent
//!   only if the caller explicitly moves them there.

use serde::{Deserialize, Serialize};

use crate::issue::{Issue, IssueDetail};
use crate::path::{render_path, PathSegment};

/// Which check family a call runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Strict: the input's shape must already match.
    Validate,
    /// Lenient: leaf kinds attempt type conversion first.
    Coerce,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Validate => "validate",
            Mode::Coerce => "coerce",
        }
    }
}

/// Transient state for one top-level check.
#[derive(Debug, Clone)]
pub struct ParsingContext {
    mode: Mode,
    path: Vec<PathSegment>,
    issues: Vec<Issue>,
}

impl ParsingContext {
    /// Create a fresh context at the root path with no issues.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            path: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The path of the value currently under inspection.
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// The path rendered as `a.b[0]`, or `(root)`.
    pub fn path_string(&self) -> String {
        render_path(&self.path)
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    /// Run `f` with `segment` pushed onto the path, popping it afterwards.
    pub fn enter<T>(
        &mut self,
        segment: impl Into<PathSegment>,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        self.path.push(segment.into());
        let out = f(self);
        self.path.pop();
        out
    }

    /// Run `f` in `mode`, restoring the previous mode afterwards.
    pub fn with_mode<T>(&mut self, mode: Mode, f: impl FnOnce(&mut Self) -> T) -> T {
        let previous = std::mem::replace(&mut self.mode, mode);
        let out = f(self);
        self.mode = previous;
        out
    }

    /// An independent context at the same mode and path with no issues.
    pub fn fork(&self) -> Self {
        Self {
            mode: self.mode,
            path: self.path.clone(),
            issues: Vec::new(),
        }
    }

    /// Record an issue at the current path with the detail's default message.
    pub fn report(&mut self, detail: IssueDetail) {
        let issue = Issue::new(self.path.clone(), detail);
        self.issues.push(issue);
    }

    /// Record an issue at the current path with a custom message.
    pub fn report_with(&mut self, detail: IssueDetail, message: impl Into<String>) {
        let issue = Issue::with_message(self.path.clone(), detail, message);
        self.issues.push(issue);
    }

    /// Append issues collected elsewhere (e.g. in a forked context).
    pub fn absorb(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn enter_pushes_and_pops() {
        let mut ctx = ParsingContext::new(Mode::Validate);
        ctx.enter("users", |ctx| {
            ctx.enter(0usize, |ctx| {
                assert_eq!(ctx.path_string(), "users[0]");
                ctx.report(IssueDetail::invalid_type("string", &Value::Null));
            });
            assert_eq!(ctx.path().len(), 1);
        });
        assert!(ctx.path().is_empty());
        assert_eq!(ctx.issues()[0].path.len(), 2);
    }

    #[test]
    fn fork_does_not_leak_issues() {
        let mut ctx = ParsingContext::new(Mode::Coerce);
        ctx.enter("field", |ctx| {
            let mut attempt = ctx.fork();
            attempt.report(IssueDetail::parsing("nope"));
            assert_eq!(attempt.path_string(), "field");
            assert_eq!(attempt.mode(), Mode::Coerce);
            assert_eq!(attempt.issue_count(), 1);
        });
        assert!(!ctx.has_issues());
    }

    #[test]
    fn absorb_moves_issues() {
        let mut ctx = ParsingContext::new(Mode::Validate);
        let mut attempt = ctx.fork();
        attempt.report(IssueDetail::parsing("bad"));
        ctx.absorb(attempt.into_issues());
        assert_eq!(ctx.issue_count(), 1);
    }

    #[test]
    fn with_mode_restores() {
        let mut ctx = ParsingContext::new(Mode::Validate);
        let inner = ctx.with_mode(Mode::Coerce, |ctx| ctx.mode());
        assert_eq!(inner, Mode::Coerce);
        assert_eq!(ctx.mode(), Mode::Validate);
    }

    #[test]
    fn report_with_custom_message() {
        let mut ctx = ParsingContext::new(Mode::Validate);
        ctx.report_with(IssueDetail::parsing("x"), "custom");
        assert_eq!(ctx.issues()[0].message, "custom");
        assert_eq!(ctx.issues()[0].to_string(), "(root): custom");
    }
}
