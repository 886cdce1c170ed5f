//! Configuration loaded from `.covtree.toml`.
//!
//! The file is optional. When no path is given, the working directory and up
//! to nine of its ancestors are searched; the first readable, valid file wins.

mod core;
mod loader;

pub use self::core::{CovtreeConfig, ReportConfig, TestsConfig, TraversalConfig};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

use crate::component::TestFileClassifier;
use crate::errors::Result;

impl CovtreeConfig {
    pub fn test_classifier(&self) -> Result<TestFileClassifier> {
        TestFileClassifier::new(&self.tests.patterns)
    }
}
