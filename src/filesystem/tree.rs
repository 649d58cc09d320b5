use std::path::Path;

use snafu::{OptionExt, Snafu, location};
use tracing::{debug, error};

use crate::filesystem::{Content, Node, NodeId};
use crate::manifest::{ManifestError, ManifestRecord, RecordKind, read_manifest, records};

pub const SEPARATOR: char = '/';
pub const ROOT_MARKER: &str = "/";
pub const PARENT_MARKER: &str = "..";

const ROOT: NodeId = NodeId(0);

/// Virtual filesystem tree with a current-directory cursor.
#[derive(Debug, Clone)]
pub struct VfsTree {
    nodes: Vec<Node>,
    cursor: NodeId,
}

impl Default for VfsTree {
    fn default() -> Self {
        Self::new()
    }
}

impl VfsTree {
    /// Creates a tree holding only the root directory, with the cursor on it.
    pub fn new() -> Self {
        VfsTree {
            nodes: vec![Node::directory("", None)],
            cursor: ROOT,
        }
    }

    /// Loads a tree from a manifest file. The first invalid record aborts
    /// the whole load.
    pub async fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let contents = read_manifest(path).await?;
        Self::try_from(contents.as_str())
    }

    /// Applies one record: missing intermediate directories are created,
    /// files replace whatever held their name, directories are only created
    /// when absent.
    pub fn apply(&mut self, record: &ManifestRecord) {
        let mut segments = record.segments().collect::<Vec<_>>();
        let Some(name) = segments.pop() else {
            debug!("Record '{}' names the root, nothing to create", record.path());
            return;
        };

        let parent = segments
            .into_iter()
            .fold(ROOT, |dir, segment| self.materialize_directory(dir, segment));

        match record.kind() {
            RecordKind::File => {
                let content = Content::new(record.content());
                debug!("Storing {} payload for '{}'", content.encoding(), name);
                let file = Node::file(name, parent, content);
                match self.child(parent, name) {
                    Some(existing) => self.nodes[existing.0] = file,
                    None => {
                        self.attach(parent, file);
                    }
                }
            }
            RecordKind::Directory => {
                if self.child(parent, name).is_none() {
                    self.attach(parent, Node::directory(name, Some(parent)));
                }
            }
        }
    }

    /// The directory under the cursor.
    pub fn current(&self) -> &Node {
        self.node(self.cursor)
    }

    /// Looks up a node by absolute path. Empty segments are ignored.
    pub fn lookup(&self, path: &str) -> Option<&Node> {
        if !path.starts_with(SEPARATOR) {
            return None;
        }
        path.split(SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .try_fold(ROOT, |dir, segment| self.child(dir, segment))
            .map(|id| self.node(id))
    }

    /// Sorted names in the current directory; directories end with `/`.
    pub fn list_current(&self) -> Vec<String> {
        let mut entries = self
            .current()
            .children()
            .into_iter()
            .flat_map(|children| children.values())
            .map(|id| self.node(*id).display_name())
            .collect::<Vec<_>>();
        entries.sort();
        entries
    }

    /// Moves the cursor. On failure the cursor is left where it was.
    ///
    /// `/` goes to the root and `..` to the parent (a no-op at the root).
    /// Other targets without a leading `/` name a direct child of the current
    /// directory; targets with one are resolved from the root.
    pub fn change_directory(&mut self, target: &str) -> Result<(), NavigationError> {
        let destination = match target {
            ROOT_MARKER => Some(ROOT),
            PARENT_MARKER => Some(self.current().parent().unwrap_or(self.cursor)),
            relative if !relative.starts_with(SEPARATOR) => {
                self.child_directory(self.cursor, relative)
            }
            absolute => absolute
                .split(SEPARATOR)
                .filter(|segment| !segment.is_empty())
                .try_fold(ROOT, |dir, segment| self.child_directory(dir, segment)),
        };

        self.cursor = destination.context(NavigationSnafu { target })?;
        debug!("Changed directory to {}", self.current_path());
        Ok(())
    }

    /// Absolute path of the cursor, `/` for the root.
    pub fn current_path(&self) -> String {
        let mut names = Vec::new();
        let mut position = self.cursor;
        while position != ROOT {
            let node = self.node(position);
            names.push(node.name());
            match node.parent() {
                Some(parent) => position = parent,
                None => break,
            }
        }

        if names.is_empty() {
            return ROOT_MARKER.to_string();
        }

        names.iter().rev().fold(String::new(), |mut path, name| {
            path.push(SEPARATOR);
            path.push_str(name);
            path
        })
    }

    /// Number of nodes reachable from the root, the root excluded.
    pub fn node_count(&self) -> usize {
        let mut pending = vec![ROOT];
        let mut count = 0;
        while let Some(id) = pending.pop() {
            if let Some(children) = self.node(id).children() {
                count += children.len();
                pending.extend(children.values().copied());
            }
        }
        count
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn child(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.node(dir)
            .children()
            .and_then(|children| children.get(name))
            .copied()
    }

    fn child_directory(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.child(dir, name)
            .filter(|id| self.node(*id).is_directory())
    }

    /// Returns the directory `name` below `parent`, creating it or replacing
    /// a file of that name.
    fn materialize_directory(&mut self, parent: NodeId, name: &str) -> NodeId {
        match self.child(parent, name) {
            Some(id) if self.node(id).is_directory() => id,
            Some(id) => {
                debug!("Replacing file '{}' with a directory", name);
                self.nodes[id.0] = Node::directory(name, Some(parent));
                id
            }
            None => self.attach(parent, Node::directory(name, Some(parent))),
        }
    }

    fn attach(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        let name = node.name().to_string();
        self.nodes.push(node);

        match self.nodes[parent.0].children_mut() {
            Some(children) => {
                children.insert(name, id);
            }
            None => error!(
                "Assumption that nodes are only attached below directories failed {}",
                location!()
            ),
        }
        id
    }
}

impl TryFrom<&str> for VfsTree {
    type Error = ManifestError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        records(contents).try_fold(VfsTree::new(), |mut tree, record| {
            let record = record?;
            debug!("Applying {} record for {}", record.kind(), record.path());
            tree.apply(&record);
            Ok(tree)
        })
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("no such directory: {}", target))]
pub struct NavigationError {
    target: String,
}
