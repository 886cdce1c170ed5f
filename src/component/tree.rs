//! Arena-backed component tree.
//!
//! Nodes live in a single `Vec` and refer to each other by [`ComponentId`].
//! The executor allocates per-node counters in parallel arenas indexed by the
//! same ids, so no counter is ever shared by pointer.

use super::{Component, ComponentType, FileAttributes};
use crate::errors::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::{Component as PathComponent, Path};

/// Index of a node in a [`ComponentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(usize);

impl ComponentId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Node {
    component: Component,
    parent: Option<ComponentId>,
    children: Vec<ComponentId>,
}

#[derive(Debug, Clone)]
pub struct ComponentTree {
    nodes: Vec<Node>,
    by_key: HashMap<String, ComponentId>,
}

impl ComponentTree {
    pub fn root(&self) -> ComponentId {
        ComponentId(0)
    }

    pub fn get(&self, id: ComponentId) -> &Component {
        &self.nodes[id.0].component
    }

    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.nodes[id.0].parent
    }

    pub fn find_by_key(&self, key: &str) -> Option<ComponentId> {
        self.by_key.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Depth of a node, the root being at depth 0.
    pub fn depth(&self, id: ComponentId) -> usize {
        std::iter::successors(self.parent(id), |p| self.parent(*p)).count()
    }

    /// Children before parents; siblings in insertion order.
    pub fn post_order(&self) -> Vec<ComponentId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root(), false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            stack.push((id, true));
            for child in self.children(id).iter().rev() {
                stack.push((*child, false));
            }
        }
        order
    }

    /// Parents before children; siblings in insertion order.
    pub fn pre_order(&self) -> Vec<ComponentId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        order
    }
}

/// Incrementally assembles a [`ComponentTree`].
///
/// # Examples
///
/// ```rust
/// use covtree::component::{ComponentTreeBuilder, FileAttributes};
///
/// let mut builder = ComponentTreeBuilder::new("demo");
/// builder.add_file("src/lib.rs", FileAttributes::production()).unwrap();
/// builder.add_file("tests/it.rs", FileAttributes::unit_test()).unwrap();
/// let tree = builder.build();
///
/// assert!(tree.find_by_key("demo:src").is_some());
/// assert_eq!(tree.len(), 5);
/// ```
#[derive(Debug)]
pub struct ComponentTreeBuilder {
    project_key: String,
    tree: ComponentTree,
}

impl ComponentTreeBuilder {
    /// Start a report tree rooted at a project component.
    pub fn new(project_key: impl Into<String>) -> Self {
        let project_key = project_key.into();
        let root = Component::new(project_key.clone(), project_key.clone(), ComponentType::Project);
        Self::with_root(project_key, root)
    }

    /// Start a tree from an arbitrary root, e.g. a view.
    pub fn with_root(project_key: impl Into<String>, root: Component) -> Self {
        let mut by_key = HashMap::new();
        by_key.insert(root.key().to_string(), ComponentId(0));
        Self {
            project_key: project_key.into(),
            tree: ComponentTree {
                nodes: vec![Node {
                    component: root,
                    parent: None,
                    children: Vec::new(),
                }],
                by_key,
            },
        }
    }

    pub fn root(&self) -> ComponentId {
        self.tree.root()
    }

    pub fn find_by_key(&self, key: &str) -> Option<ComponentId> {
        self.tree.find_by_key(key)
    }

    pub fn get(&self, id: ComponentId) -> &Component {
        self.tree.get(id)
    }

    /// Attach `component` under `parent`.
    ///
    /// Fails when the key is already taken or the parent is a leaf type.
    pub fn add_child(&mut self, parent: ComponentId, component: Component) -> Result<ComponentId> {
        let parent_node = self
            .tree
            .nodes
            .get(parent.0)
            .ok_or_else(|| Error::tree(format!("unknown parent {}", parent)))?;
        if parent_node.component.component_type().is_leaf_type() {
            return Err(Error::tree(format!(
                "cannot add '{}' under {} '{}'",
                component.key(),
                parent_node.component.component_type(),
                parent_node.component.key()
            )));
        }
        if self.tree.by_key.contains_key(component.key()) {
            return Err(Error::tree(format!(
                "duplicate component key '{}'",
                component.key()
            )));
        }

        let id = ComponentId(self.tree.nodes.len());
        self.tree.by_key.insert(component.key().to_string(), id);
        self.tree.nodes.push(Node {
            component,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.tree.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Add a file by relative path, creating intermediate directories.
    ///
    /// Directory keys are `<project>:<dir path>`; the file key is
    /// `<project>:<file path>`. Paths use `/` separators in keys regardless
    /// of platform.
    pub fn add_file(&mut self, path: impl AsRef<Path>, attributes: FileAttributes) -> Result<ComponentId> {
        let segments = normalized_segments(path.as_ref())?;
        let (file_name, dirs) = segments
            .split_last()
            .ok_or_else(|| Error::tree(format!("empty file path '{}'", path.as_ref().display())))?;

        let mut parent = self.root();
        let mut dir_path = String::new();
        for dir in dirs {
            if !dir_path.is_empty() {
                dir_path.push('/');
            }
            dir_path.push_str(dir);
            let key = format!("{}:{}", self.project_key, dir_path);
            parent = match self.tree.find_by_key(&key) {
                Some(existing) => {
                    let existing_type = self.tree.get(existing).component_type();
                    if existing_type != ComponentType::Directory {
                        return Err(Error::tree(format!(
                            "'{}' is a {}, not a directory",
                            key, existing_type
                        )));
                    }
                    existing
                }
                None => self.add_child(
                    parent,
                    Component::new(key, dir_path.clone(), ComponentType::Directory),
                )?,
            };
        }

        let file_path = if dir_path.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", dir_path, file_name)
        };
        let key = format!("{}:{}", self.project_key, file_path);
        self.add_child(parent, Component::file(key, file_path, attributes))
    }

    pub fn build(self) -> ComponentTree {
        self.tree
    }
}

/// Path segments with `.` and `..` resolved and any root or prefix dropped.
///
/// Fails when `..` climbs above the first segment.
pub(crate) fn normalized_segments(path: &Path) -> Result<Vec<String>> {
    let mut segments = Vec::new();
    for part in path.components() {
        match part {
            PathComponent::Normal(s) => segments.push(s.to_string_lossy().into_owned()),
            PathComponent::CurDir => {}
            PathComponent::ParentDir => {
                if segments.pop().is_none() {
                    return Err(Error::tree(format!(
                        "path '{}' escapes the project root",
                        path.display()
                    )));
                }
            }
            PathComponent::RootDir | PathComponent::Prefix(_) => {}
        }
    }
    Ok(segments)
}
