//! In-memory virtual filesystem.
//!
//! The tree is an arena of nodes addressed by [`NodeId`]. Directories own
//! their children through a name map, while each node keeps a plain handle to
//! its parent for upward traversal. A single cursor marks the current
//! directory used by navigation and listing.

mod content;
mod node;
mod tree;

pub use content::{Content, Encoding};
pub use node::{Node, NodeId, NodeKind};
pub use tree::{NavigationError, PARENT_MARKER, ROOT_MARKER, SEPARATOR, VfsTree};
