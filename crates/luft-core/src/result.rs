//! # Parsing Result
//!
//! The outcome of one checked `validate`/`coerce` call: the produced value,
//! or every issue collected during the call.
//!
//! Serializes to `{ "success": true, "data": ... }` or
//! `{ "success": false, "issues": [...] }` so a router can place it
//! directly in a response body.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::ValidationError;
use crate::issue::Issue;
use crate::value::Value;

/// Tagged success/failure result of a checked call.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsingResult {
    Success(Value),
    Failure(Vec<Issue>),
}

impl ParsingResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The produced value, if the call succeeded.
    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// The collected issues. Empty on success.
    pub fn issues(&self) -> &[Issue] {
        match self {
            Self::Success(_) => &[],
            Self::Failure(issues) => issues,
        }
    }

    /// Convert into a `Result`, wrapping issues in a [`ValidationError`].
    pub fn into_result(self) -> Result<Value, ValidationError> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(issues) => Err(ValidationError::new(issues)),
        }
    }
}

impl Serialize for ParsingResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ParsingResult", 2)?;
        match self {
            Self::Success(value) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", value)?;
            }
            Self::Failure(issues) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("issues", issues)?;
            }
        }
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueDetail;
    use serde_json::json;

    #[test]
    fn success_serializes_with_data() {
        let result = ParsingResult::Success(Value::from("ok"));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"success": true, "data": "ok"})
        );
        assert!(result.issues().is_empty());
    }

    #[test]
    fn failure_serializes_with_issues() {
        let issue = Issue::new(vec![], IssueDetail::parsing("boom"));
        let result = ParsingResult::Failure(vec![issue]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["issues"][0]["code"], "PARSING_ISSUE");
        assert_eq!(json["issues"][0]["reason"], "boom");
        assert!(result.data().is_none());
    }

    #[test]
    fn into_result_preserves_issues() {
        let issue = Issue::new(vec![], IssueDetail::parsing("boom"));
        let err = ParsingResult::Failure(vec![issue.clone()])
            .into_result()
            .unwrap_err();
        assert_eq!(err.issues(), &[issue]);
    }
}
