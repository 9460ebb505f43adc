//! Error types shared by all mock apps

/// App-level errors
///
/// `NotFound` is the reportable failure mandated by the harness contract:
/// unknown identifiers surface to the caller, they are never swallowed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    /// Lookup by unknown identifier
    #[error("{app}: entry '{id}' does not exist")]
    NotFound { app: &'static str, id: String },

    /// Request that cannot be satisfied from current app state
    #[error("{app}: {reason}")]
    InvalidRequest { app: &'static str, reason: String },
}

impl AppError {
    /// Create a `NotFound` error
    #[inline]
    #[must_use]
    pub fn not_found(app: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            app,
            id: id.into(),
        }
    }

    /// Create an `InvalidRequest` error
    #[inline]
    #[must_use]
    pub fn invalid(app: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            app,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = AppError::not_found("DbApp", "42");
        assert_eq!(err.to_string(), "DbApp: entry '42' does not exist");
    }
}
