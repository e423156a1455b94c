//! # Diagnostic Model
//!
//! An [`Issue`] is one structured diagnostic describing a single shape
//! violation: a machine-readable code, the path at the time of failure, a
//! human message, and code-specific fields.
//!
//! ## Wire Shape
//!
//! Issues serialize flat, with the code as a discriminator:
//!
//! ```text
//! { "code": "INVALID_LENGTH", "length": 1, "minimum": 3,
//!   "path": ["user", "name"], "message": "expected at least 3 characters, received 1" }
//! ```
//!
//! The code set is closed. Collaborators may match on [`IssueCode`]
//! exhaustively.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path::{render_path, PathSegment};
use crate::value::Value;

/// The closed set of issue codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    InvalidType,
    InvalidRange,
    InvalidLength,
    InvalidValue,
    MissingKeys,
    ExtraKeys,
    InvalidUnion,
    NotUnique,
    MultipleOf,
    ParsingIssue,
}

impl IssueCode {
    /// The wire name of this code (e.g., `"MISSING_KEYS"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidType => "INVALID_TYPE",
            Self::InvalidRange => "INVALID_RANGE",
            Self::InvalidLength => "INVALID_LENGTH",
            Self::InvalidValue => "INVALID_VALUE",
            Self::MissingKeys => "MISSING_KEYS",
            Self::ExtraKeys => "EXTRA_KEYS",
            Self::InvalidUnion => "INVALID_UNION",
            Self::NotUnique => "NOT_UNIQUE",
            Self::MultipleOf => "MULTIPLE_OF",
            Self::ParsingIssue => "PARSING_ISSUE",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code-specific payload of an [`Issue`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueDetail {
    /// The value has the wrong type entirely.
    InvalidType { expected: String, received: String },

    /// A number or date fell outside its bounds.
    InvalidRange {
        received: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        minimum: Option<Value>,
        #[serde(default)]
        min_inclusive: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        maximum: Option<Value>,
        #[serde(default)]
        max_inclusive: bool,
    },

    /// A string, list, or map has the wrong size.
    InvalidLength {
        length: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        minimum: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        maximum: Option<usize>,
    },

    /// The value has the right type but is not an allowed value
    /// (literal mismatch, pattern mismatch, disallowed protocol).
    InvalidValue {
        received: Value,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        options: Vec<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },

    /// Required object keys are absent. Collected once per object.
    MissingKeys { keys: Vec<String> },

    /// The object carries keys the schema does not declare.
    ExtraKeys { keys: Vec<String> },

    /// No union alternative matched. `errors[i]` holds the issues of
    /// alternative `i`.
    InvalidUnion { errors: Vec<Vec<Issue>> },

    /// A list that must hold distinct elements has duplicates at these indexes.
    NotUnique { indexes: Vec<usize> },

    /// A number is not a multiple of the required divisor.
    MultipleOf { received: f64, multiple_of: f64 },

    /// Conversion of the input failed (bad date string, malformed JSON list,
    /// custom hook failure).
    ParsingIssue { reason: String },
}

impl IssueDetail {
    /// Shorthand for an [`IssueDetail::InvalidType`] describing `received`.
    pub fn invalid_type(expected: impl Into<String>, received: &Value) -> Self {
        Self::InvalidType {
            expected: expected.into(),
            received: received.type_name().to_string(),
        }
    }

    /// Shorthand for an [`IssueDetail::ParsingIssue`].
    pub fn parsing(reason: impl Into<String>) -> Self {
        Self::ParsingIssue {
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> IssueCode {
        match self {
            Self::InvalidType { .. } => IssueCode::InvalidType,
            Self::InvalidRange { .. } => IssueCode::InvalidRange,
            Self::InvalidLength { .. } => IssueCode::InvalidLength,
            Self::InvalidValue { .. } => IssueCode::InvalidValue,
            Self::MissingKeys { .. } => IssueCode::MissingKeys,
            Self::ExtraKeys { .. } => IssueCode::ExtraKeys,
            Self::InvalidUnion { .. } => IssueCode::InvalidUnion,
            Self::NotUnique { .. } => IssueCode::NotUnique,
            Self::MultipleOf { .. } => IssueCode::MultipleOf,
            Self::ParsingIssue { .. } => IssueCode::ParsingIssue,
        }
    }

    /// Default human-readable message for this detail.
    pub fn default_message(&self) -> String {
        match self {
            Self::InvalidType { expected, received } => {
                format!("expected {expected}, received {received}")
            }
            Self::InvalidRange {
                received,
                minimum,
                min_inclusive,
                maximum,
                max_inclusive,
            } => {
                let mut bounds = Vec::new();
                if let Some(min) = minimum {
                    let op = if *min_inclusive { ">=" } else { ">" };
                    bounds.push(format!("{op} {min}"));
                }
                if let Some(max) = maximum {
                    let op = if *max_inclusive { "<=" } else { "<" };
                    bounds.push(format!("{op} {max}"));
                }
                format!("expected value {}, received {received}", bounds.join(" and "))
            }
            Self::InvalidLength {
                length,
                minimum,
                maximum,
            } => match (minimum, maximum) {
                (Some(min), Some(max)) => {
                    format!("expected length between {min} and {max}, received {length}")
                }
                (Some(min), None) => format!("expected length of at least {min}, received {length}"),
                (None, Some(max)) => format!("expected length of at most {max}, received {length}"),
                (None, None) => format!("unexpected length {length}"),
            },
            Self::InvalidValue {
                received,
                options,
                pattern,
            } => {
                if let Some(pattern) = pattern {
                    format!("value {received} does not match pattern {pattern}")
                } else {
                    let options: Vec<String> = options.iter().map(Value::to_string).collect();
                    format!(
                        "expected one of [{}], received {received}",
                        options.join(", ")
                    )
                }
            }
            Self::MissingKeys { keys } => format!("missing required keys: {}", keys.join(", ")),
            Self::ExtraKeys { keys } => format!("unrecognized keys: {}", keys.join(", ")),
            Self::InvalidUnion { errors } => {
                format!("value did not match any of {} alternatives", errors.len())
            }
            Self::NotUnique { indexes } => {
                let indexes: Vec<String> = indexes.iter().map(usize::to_string).collect();
                format!("duplicate elements at indexes {}", indexes.join(", "))
            }
            Self::MultipleOf {
                received,
                multiple_of,
            } => format!("expected a multiple of {multiple_of}, received {received}"),
            Self::ParsingIssue { reason } => reason.clone(),
        }
    }
}

/// One structured diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(flatten)]
    pub detail: IssueDetail,
    /// Location of the offending value, from the root of the input.
    pub path: Vec<PathSegment>,
    pub message: String,
}

impl Issue {
    /// Create an issue with the detail's default message.
    pub fn new(path: Vec<PathSegment>, detail: IssueDetail) -> Self {
        let message = detail.default_message();
        Self {
            detail,
            path,
            message,
        }
    }

    /// Create an issue with a caller-supplied message.
    pub fn with_message(
        path: Vec<PathSegment>,
        detail: IssueDetail,
        message: impl Into<String>,
    ) -> Self {
        Self {
            detail,
            path,
            message: message.into(),
        }
    }

    pub fn code(&self) -> IssueCode {
        self.detail.code()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", render_path(&self.path), self.message)
    }
}
