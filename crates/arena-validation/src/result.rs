//! Validation result and failure reasons

use serde::{Deserialize, Serialize};

/// Why a scenario failed validation
///
/// Failure is a normal negative outcome, not an exceptional one; every
/// variant renders a human-readable explanation naming what was expected
/// and what was observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ValidationError {
    /// Expected tool call never happened
    #[error("no `{function}` call was made by the agent")]
    MissingCall { function: String },

    /// The tool was called, but never with the expected arguments
    #[error("no `{function}` call matched: expected {expected}")]
    NoMatchingCall { function: String, expected: String },

    /// A call of one kind happened without the required later call
    #[error("`{first}` was called but no `{then}` call was observed afterwards")]
    MissingFollowUp { first: String, then: String },

    /// Required apps were never touched
    #[error("agent did not access all required apps; missing: {missing:?}, accessed: {accessed:?}")]
    MissingApps {
        missing: Vec<String>,
        accessed: Vec<String>,
    },

    /// Forbidden distractor apps were touched
    #[error("agent incorrectly accessed distractor apps: {apps:?}")]
    ForbiddenApps { apps: Vec<String> },

    /// Scenario-specific failure
    #[error("{0}")]
    Failed(String),
}

impl ValidationError {
    /// Scenario-specific failure with a free-form message
    #[inline]
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Terminal pass/fail outcome of one scenario run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioValidationResult {
    pub success: bool,
    /// Present exactly when `success` is false
    pub exception: Option<ValidationError>,
}

impl ScenarioValidationResult {
    /// Passing result
    #[inline]
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            exception: None,
        }
    }

    /// Failing result with a reason
    #[inline]
    #[must_use]
    pub fn fail(exception: ValidationError) -> Self {
        Self {
            success: false,
            exception: Some(exception),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The failure message, if any
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        self.exception.as_ref().map(ToString::to_string)
    }
}

impl From<Result<(), ValidationError>> for ScenarioValidationResult {
    fn from(check: Result<(), ValidationError>) -> Self {
        match check {
            Ok(()) => Self::ok(),
            Err(e) => Self::fail(e),
        }
    }
}
