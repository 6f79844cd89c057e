// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reasons an edit is turned down.

use mindmap_tree::{NodeId, NodeType};
use thiserror::Error;

/// Why an edit was not applied.
///
/// Rejections are ordinary results, not failures: the snapshot the caller
/// passed in is untouched and stays current. The `Display` text is suitable
/// for a user-facing message.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    /// No node with this id exists in the tree.
    #[error("node {0} does not exist")]
    NodeNotFound(NodeId),
    /// The id for a new node is already taken.
    #[error("node id {0} is already in use")]
    DuplicateId(NodeId),
    /// A sibling of the root was requested; a map has exactly one root.
    #[error("the root cannot have siblings")]
    SecondRoot,
    /// Deleting would leave the map without any node.
    #[error("cannot delete the last node")]
    LastNode,
    /// A node cannot become its own parent.
    #[error("cannot move a node onto itself")]
    SelfMove,
    /// The target lies inside the moved node's subtree.
    #[error("cannot move {node} into its own subtree")]
    Cycle {
        /// Node being moved.
        node: NodeId,
        /// Requested new parent, a descendant of `node`.
        target: NodeId,
    },
    /// The constraint table does not allow this child type under this parent type.
    #[error("a {parent} node cannot contain a {child} node")]
    TypeNotAllowed {
        /// Type of the would-be parent.
        parent: NodeType,
        /// Type of the would-be child.
        child: NodeType,
    },
    /// The parent already holds the maximum number of children of this type.
    #[error("a {parent} node can hold at most {max} {child} node(s)")]
    CardinalityExceeded {
        /// Type of the would-be parent.
        parent: NodeType,
        /// Type of the would-be child.
        child: NodeType,
        /// The cap from the constraint table.
        max: usize,
    },
    /// The host's move guard refused an otherwise legal move.
    #[error("the move was refused")]
    Vetoed,
    /// Only nodes with children can be collapsed.
    #[error("node {0} has no children to collapse")]
    NoChildren(NodeId),
    /// An imported node does not match the map's schema variant.
    #[error("node {0} does not match the map's schema")]
    SchemaMismatch(NodeId),
    /// The field only exists on extended nodes.
    #[error("node {0} does not carry extended fields")]
    NotExtended(NodeId),
    /// Priority level outside `0..=5`.
    #[error("priority {0} is out of range")]
    InvalidPriority(u8),
    /// Structural edits are disabled.
    #[error("the map is read-only")]
    ReadOnly,
    /// No map has been loaded yet.
    #[error("no map is loaded")]
    EmptyTree,
}
