//! Component model consumed by the aggregation engine.
//!
//! Components form a tree: files roll up into directories, directories into
//! modules, modules into the project. A second family of types describes
//! portfolio-style views, where project views are the leaves.
//!
//! Counters only read two facts from a component: whether its type comes from
//! an analysis report ([`ComponentType::is_report_type`]) and whether a file is
//! unit-test code ([`FileAttributes::is_unit_test`]).

pub mod classification;
pub mod tree;

pub use classification::TestFileClassifier;
pub use tree::{ComponentId, ComponentTree, ComponentTreeBuilder};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of node in a component tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Project,
    Module,
    Directory,
    File,
    View,
    SubView,
    ProjectView,
}

impl ComponentType {
    /// Types built from an analysis report, as opposed to views assembled
    /// on top of already-analysed projects.
    pub fn is_report_type(self) -> bool {
        matches!(
            self,
            Self::Project | Self::Module | Self::Directory | Self::File
        )
    }

    /// Types whose measures originate from raw data rather than from
    /// children.
    pub fn is_leaf_type(self) -> bool {
        matches!(self, Self::File | Self::ProjectView)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Module => "module",
            Self::Directory => "directory",
            Self::File => "file",
            Self::View => "view",
            Self::SubView => "sub_view",
            Self::ProjectView => "project_view",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes carried by file components only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttributes {
    pub is_unit_test: bool,
    pub language_key: Option<String>,
    pub lines: Option<u32>,
}

impl FileAttributes {
    pub fn new(is_unit_test: bool) -> Self {
        Self {
            is_unit_test,
            ..Self::default()
        }
    }

    pub fn production() -> Self {
        Self::new(false)
    }

    pub fn unit_test() -> Self {
        Self::new(true)
    }

    pub fn with_language(mut self, language_key: impl Into<String>) -> Self {
        self.language_key = Some(language_key.into());
        self
    }

    pub fn with_lines(mut self, lines: u32) -> Self {
        self.lines = Some(lines);
        self
    }

    pub fn is_unit_test(&self) -> bool {
        self.is_unit_test
    }
}

/// A node of the component tree.
///
/// Identity is the `key`, which must be unique within one tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    key: String,
    name: String,
    component_type: ComponentType,
    file_attributes: Option<FileAttributes>,
}

impl Component {
    pub fn new(key: impl Into<String>, name: impl Into<String>, component_type: ComponentType) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            component_type,
            file_attributes: None,
        }
    }

    pub fn file(key: impl Into<String>, name: impl Into<String>, attributes: FileAttributes) -> Self {
        Self {
            file_attributes: Some(attributes),
            ..Self::new(key, name, ComponentType::File)
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    /// `None` for every component that is not a file.
    pub fn file_attributes(&self) -> Option<&FileAttributes> {
        self.file_attributes.as_ref()
    }

    /// Absent attributes read as production code.
    pub fn is_unit_test(&self) -> bool {
        self.file_attributes
            .as_ref()
            .is_some_and(FileAttributes::is_unit_test)
    }
}
