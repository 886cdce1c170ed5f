//! Shared error types for covtree.
//!
//! The aggregation core (counters, formulas, executor) has no failure modes of
//! its own. Errors only arise at the edges: reading LCOV reports, loading
//! configuration, and assembling the component tree.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for covtree operations
#[derive(Debug, Error)]
pub enum Error {
    /// LCOV report could not be read or contained a malformed record
    #[error("LCOV error in {}: {message}", path.display())]
    Lcov { path: PathBuf, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Component tree construction errors
    #[error("Component tree error: {0}")]
    Tree(String),

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// Pattern errors
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}

impl Error {
    /// Create an LCOV error with the report path
    pub fn lcov(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Lcov {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn tree(message: impl Into<String>) -> Self {
        Self::Tree(message.into())
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lcov_error_display_includes_path() {
        let err = Error::lcov("coverage/lcov.info", "unexpected record");
        assert_eq!(
            err.to_string(),
            "LCOV error in coverage/lcov.info: unexpected record"
        );
    }

    #[test]
    fn test_context_wraps_message() {
        let result: Result<()> = Err(Error::tree("duplicate key 'p:src'"));
        let err = result.context("building tree").unwrap_err();
        assert_eq!(
            err.to_string(),
            "building tree: Component tree error: duplicate key 'p:src'"
        );
    }
}
