use std::collections::HashMap;

use crate::filesystem::Content;

/// Handle of a node inside its owning [`VfsTree`](crate::filesystem::VfsTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(super) usize);

/// Represents the type of a virtual filesystem node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    File { content: Content },
    Directory { children: HashMap<String, NodeId> },
}

/// One entry of the virtual filesystem.
///
/// `parent` only points upwards for `..` and path rendering; the tree owns
/// every node and links flow downwards through `children`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    parent: Option<NodeId>,
    kind: NodeKind,
}

impl Node {
    pub(super) fn directory(name: impl Into<String>, parent: Option<NodeId>) -> Self {
        Node {
            name: name.into(),
            parent,
            kind: NodeKind::Directory {
                children: HashMap::new(),
            },
        }
    }

    pub(super) fn file(name: impl Into<String>, parent: NodeId, content: Content) -> Self {
        Node {
            name: name.into(),
            parent: Some(parent),
            kind: NodeKind::File { content },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    /// Payload of a file, `None` for directories.
    pub fn content(&self) -> Option<&Content> {
        match &self.kind {
            NodeKind::File { content } => Some(content),
            NodeKind::Directory { .. } => None,
        }
    }

    pub fn children(&self) -> Option<&HashMap<String, NodeId>> {
        match &self.kind {
            NodeKind::Directory { children } => Some(children),
            NodeKind::File { .. } => None,
        }
    }

    pub(super) fn children_mut(&mut self) -> Option<&mut HashMap<String, NodeId>> {
        match &mut self.kind {
            NodeKind::Directory { children } => Some(children),
            NodeKind::File { .. } => None,
        }
    }

    /// Name as shown by a listing: directories carry a trailing separator.
    pub fn display_name(&self) -> String {
        if self.is_directory() {
            format!("{}{}", self.name, super::SEPARATOR)
        } else {
            self.name.clone()
        }
    }
}
