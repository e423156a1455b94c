//! # Error Hierarchy
//!
//! Two disjoint error families, built with `thiserror`:
//!
//! - [`ValidationError`]: the data did not conform. Expected and
//!   recoverable. Carries the full issue list so a client can fix every
//!   problem in one round trip.
//! - [`UsageError`]: a schema or hook was misused by the programmer
//!   (a hook claiming success while recording issues, an invalid builder
//!   argument). These are bugs and must propagate unmodified.
//!
//! [`LuftError`] is the umbrella returned by the convenience
//! `validate`/`coerce` entry points.

use std::fmt;

use thiserror::Error;

use crate::issue::Issue;

/// Aggregate validation failure carrying every issue collected in one call.
#[derive(Error, Debug, Clone, PartialEq)]
pub struct ValidationError {
    issues: Vec<Issue>,
}

impl ValidationError {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// The collected issues, in the order they were recorded.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed with {} issue(s)", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "\n  {issue}")?;
        }
        Ok(())
    }
}

/// Programmer misuse of a schema, builder, or hook.
#[derive(Error, Debug)]
pub enum UsageError {
    /// A check or hook reported success but recorded issues.
    #[error("schema '{schema}' reported success but recorded {recorded} issue(s)")]
    SuccessWithIssues {
        /// Name or kind of the schema whose run violated the contract.
        schema: String,
        /// Number of issues recorded during the run.
        recorded: usize,
    },

    /// A check or hook reported failure without recording any issue.
    #[error("schema '{schema}' reported failure without recording an issue")]
    FailureWithoutIssues {
        /// Name or kind of the schema whose run violated the contract.
        schema: String,
    },

    /// A builder received an argument it cannot represent.
    #[error("invalid argument to {builder}: {reason}")]
    InvalidArgument {
        /// The builder method that rejected the argument.
        builder: &'static str,
        /// Why the argument was rejected.
        reason: String,
    },

    /// A pattern schema was built from an invalid regular expression.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

impl UsageError {
    /// Shorthand for [`UsageError::InvalidArgument`].
    pub fn invalid_argument(builder: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            builder,
            reason: reason.into(),
        }
    }
}

/// Umbrella error for the convenience `validate`/`coerce` entry points.
#[derive(Error, Debug)]
pub enum LuftError {
    /// The input did not conform to the schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The schema or one of its hooks was misused.
    #[error("usage error: {0}")]
    Usage(#[from] UsageError),
}

impl LuftError {
    /// The validation issues, if this is a validation failure.
    pub fn issues(&self) -> Option<&[Issue]> {
        match self {
            Self::Validation(err) => Some(err.issues()),
            Self::Usage(_) => None,
        }
    }

    /// Consume and return the validation error, if any.
    pub fn into_validation(self) -> Option<ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Usage(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueDetail;
    use crate::path::PathSegment;
    use crate::value::Value;

    fn sample_issue() -> Issue {
        Issue::new(
            vec![PathSegment::from("age")],
            IssueDetail::invalid_type("number", &Value::from("old")),
        )
    }

    #[test]
    fn validation_error_display_lists_issues() {
        let err = ValidationError::new(vec![sample_issue()]);
        let display = err.to_string();
        assert!(display.starts_with("validation failed with 1 issue(s)"));
        assert!(display.contains("age: expected number, received string"));
    }

    #[test]
    fn luft_error_exposes_issues() {
        let err = LuftError::from(ValidationError::new(vec![sample_issue()]));
        assert_eq!(err.issues().map(<[Issue]>::len), Some(1));
        let usage = LuftError::from(UsageError::invalid_argument("min", "negative"));
        assert!(usage.issues().is_none());
    }

    #[test]
    fn usage_error_messages() {
        let err = UsageError::SuccessWithIssues {
            schema: "string".into(),
            recorded: 2,
        };
        assert_eq!(
            err.to_string(),
            "schema 'string' reported success but recorded 2 issue(s)"
        );
        let err = UsageError::invalid_argument("multiple_of", "divisor must be positive");
        assert!(err.to_string().contains("multiple_of"));
    }

    #[test]
    fn invalid_regex_converts() {
        let regex_err = regex::Regex::new("(").unwrap_err();
        let err = UsageError::from(regex_err);
        assert!(matches!(err, UsageError::InvalidPattern(_)));
    }
}
