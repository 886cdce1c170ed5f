//! Unit-test file detection by path.

use crate::errors::Result;
use glob::{MatchOptions, Pattern};
use std::path::Path;

/// Glob patterns that mark a file as test code when no configuration says
/// otherwise.
pub const DEFAULT_TEST_PATTERNS: &[&str] = &[
    "**/tests/**",
    "**/test/**",
    "**/*_test.*",
    "**/*_tests.*",
    "**/test_*.*",
    "**/*.test.*",
    "**/*.spec.*",
];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Decides which files are unit tests from their project-relative paths.
#[derive(Debug, Clone)]
pub struct TestFileClassifier {
    patterns: Vec<Pattern>,
}

impl Default for TestFileClassifier {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_TEST_PATTERNS
                .iter()
                .filter_map(|p| Pattern::new(p).ok())
                .collect(),
        }
    }
}

impl TestFileClassifier {
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| Pattern::new(p.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Classifier that never reports a test file.
    pub fn none() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    pub fn is_unit_test(&self, path: &Path) -> bool {
        let matched = self
            .patterns
            .iter()
            .find(|p| p.matches_path_with(path, MATCH_OPTIONS));
        if let Some(pattern) = matched {
            log::debug!(
                "Classified {} as unit test (pattern {})",
                path.display(),
                pattern.as_str()
            );
        }
        matched.is_some()
    }
}
