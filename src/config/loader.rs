use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::CovtreeConfig;
use crate::component::TestFileClassifier;
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".covtree.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Read raw config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<CovtreeConfig> {
    let config = toml::from_str::<CovtreeConfig>(contents)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &CovtreeConfig) -> Result<()> {
    if let Some(min) = config.report.min_coverage {
        if !(0.0..=100.0).contains(&min) {
            return Err(Error::config(format!(
                "report.min_coverage must be within 0..=100, got {}",
                min
            )));
        }
    }
    if config.project_key.trim().is_empty() {
        return Err(Error::config("project_key must not be empty"));
    }
    TestFileClassifier::new(&config.tests.patterns)?;
    Ok(())
}

/// Load configuration from an explicit path. Any failure is an error.
pub fn load_config_from(path: &Path) -> Result<CovtreeConfig> {
    let contents = read_config_file(path)
        .map_err(|e| Error::config(format!("cannot read {}: {}", path.display(), e)))?;
    let config = parse_and_validate_config(&contents)
        .map_err(|e| e.with_context(format!("invalid {}", path.display())))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try loading config from a discovered path; problems fall back to defaults
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<CovtreeConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("Ignoring {}: {}. Using defaults.", config_path.display(), e);
            None
        }
    }
}

/// Only log actual errors, not "file not found"
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Directory ancestors of `start`, itself included, up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.covtree.toml`
pub fn discover_config(start: &Path) -> CovtreeConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            CovtreeConfig::default()
        })
}

/// Discover configuration from the current working directory
pub fn load_config() -> CovtreeConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(&dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            CovtreeConfig::default()
        }
    }
}
