//! Result and error types for Pasarela.

use thiserror::Error;

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Errors that can occur while driving the application under test
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Driver failed to reach a URL. Always re-raised after logging,
    /// never swallowed.
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// A wait exceeded its budget. Distinguishes "element never appeared"
    /// from "action failed".
    #[error("Timed out after {ms}ms waiting for {what}")]
    Timeout {
        /// What was being waited on
        what: String,
        /// Timeout budget in milliseconds
        ms: u64,
    },

    /// A descriptor expected to be unique matched more than one element.
    /// This signals a broken locator, not a product bug.
    #[error("Descriptor {descriptor} matched {count} elements, expected exactly one")]
    MultipleMatches {
        /// The offending descriptor
        descriptor: String,
        /// Number of elements matched
        count: usize,
    },

    /// A page object's declared postcondition did not hold
    #[error("Assertion failed: {message}")]
    Assertion {
        /// What went wrong, naming the failing sub-condition
        message: String,
    },

    /// Fixture construction or teardown failed
    #[error("Fixture '{name}': {message}")]
    Fixture {
        /// Fixture name
        name: String,
        /// Error message
        message: String,
    },

    /// Opaque driver-internal failure
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Invalid wait-for-url pattern
    #[error("Invalid URL pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HarnessError {
    /// Whether this error is a wait timeout.
    ///
    /// Used by `click(..., await_navigation: true)` to swallow a
    /// navigation-settlement timeout without hiding click failures.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Shorthand for an assertion failure with a formatted message
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_detection() {
        let err = HarnessError::Timeout {
            what: "login heading".to_string(),
            ms: 5000,
        };
        assert!(err.is_timeout());

        let err = HarnessError::Driver {
            message: "boom".to_string(),
        };
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_display_names_failing_condition() {
        let err = HarnessError::MultipleMatches {
            descriptor: "role=button name=Login".to_string(),
            count: 3,
        };
        let text = err.to_string();
        assert!(text.contains("matched 3 elements"));
        assert!(text.contains("role=button"));
    }

    #[test]
    fn test_assertion_helper() {
        let err = HarnessError::assertion("welcome message absent");
        assert_eq!(
            err.to_string(),
            "Assertion failed: welcome message absent"
        );
    }
}
