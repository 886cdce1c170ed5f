use crate::component::classification::DEFAULT_TEST_PATTERNS;
use crate::formula::TraversalMode;
use serde::{Deserialize, Serialize};

/// Root configuration structure for covtree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CovtreeConfig {
    /// Key of the root project component
    pub project_key: String,

    /// Unit-test file detection
    pub tests: TestsConfig,

    /// Traversal configuration
    pub traversal: TraversalConfig,

    /// Report configuration
    pub report: ReportConfig,

    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for CovtreeConfig {
    fn default() -> Self {
        Self {
            project_key: default_project_key(),
            tests: TestsConfig::default(),
            traversal: TraversalConfig::default(),
            report: ReportConfig::default(),
            log_level: "warn".to_string(),
        }
    }
}

fn default_project_key() -> String {
    "project".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TestsConfig {
    /// Glob patterns, matched against project-relative paths
    pub patterns: Vec<String>,
}

impl Default for TestsConfig {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_TEST_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TraversalConfig {
    /// Aggregate sibling subtrees on the rayon pool
    pub parallel: bool,
}

impl TraversalConfig {
    pub fn mode(&self) -> TraversalMode {
        if self.parallel {
            TraversalMode::Parallel
        } else {
            TraversalMode::Sequential
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Fail when project coverage is below this percentage
    pub min_coverage: Option<f64>,

    /// Include file rows in reports
    pub show_files: bool,
}
