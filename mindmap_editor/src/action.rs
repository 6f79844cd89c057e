// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Actions accepted by the reducer, and what a step changed.

use alloc::string::String;

use mindmap_tree::{Node, NodeId, NodeType};
use serde_json::Value;

use crate::state::{EditorState, Viewport};

/// Keyboard-style moves of the selection through the tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// To the parent.
    Parent,
    /// To the first child, unless the node is collapsed.
    FirstChild,
    /// To the next sibling.
    NextSibling,
    /// To the previous sibling.
    PrevSibling,
}

/// One user intent.
///
/// Structural actions are recorded by [`History`](crate::History); the rest
/// only replace the present state. See [`Action::is_undoable`].
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Add a child under `parent`, or under the root. Selects the new node.
    Add {
        /// Parent id; the root when `None`.
        parent: Option<NodeId>,
        /// Label of the new node.
        text: String,
        /// Type tag for extended trees.
        node_type: Option<NodeType>,
    },
    /// Add a node right after `sibling`. Selects the new node.
    AddSibling {
        /// The node to insert after.
        sibling: NodeId,
        /// Label of the new node.
        text: String,
        /// Type tag for extended trees.
        node_type: Option<NodeType>,
    },
    /// Delete a node and its subtree. Selects its parent.
    Delete(NodeId),
    /// Re-parent a node.
    Move {
        /// Node to move, with its subtree.
        node: NodeId,
        /// Its new parent.
        new_parent: NodeId,
    },
    /// Replace a node's label.
    UpdateText {
        /// Target node.
        node: NodeId,
        /// New label.
        text: String,
    },
    /// Set a node's priority level, `0` to clear.
    UpdatePriority {
        /// Target node.
        node: NodeId,
        /// Level in `0..=5`.
        level: u8,
    },
    /// Set or clear a node's style override.
    UpdateStyle {
        /// Target node.
        node: NodeId,
        /// Opaque style object.
        style: Option<Value>,
    },
    /// Collapse or expand a node that has children.
    ToggleCollapse(NodeId),
    /// Collapse every non-root branch, or expand everything.
    SetAllCollapsed(bool),
    /// Replace the whole tree as an undoable edit.
    ///
    /// Rejected when ids repeat or nodes do not match the editor's schema.
    Import(Node),
    /// Select a node, or clear the selection.
    Select(Option<NodeId>),
    /// Start editing a node's text.
    BeginEdit(NodeId),
    /// Finish editing.
    EndEdit,
    /// Move the selection through the tree.
    Navigate(Navigation),
    /// Store the host's view transform.
    SetViewport(Viewport),
    /// Search for a term; an empty term clears the results.
    SetSearchTerm(String),
    /// Advance to the next search match.
    NextMatch,
    /// Step back to the previous search match.
    PreviousMatch,
    /// Enable or disable structural edits.
    SetReadOnly(bool),
}

impl Action {
    /// Whether the action is a structural edit that history records.
    pub fn is_undoable(&self) -> bool {
        matches!(
            self,
            Self::Add { .. }
                | Self::AddSibling { .. }
                | Self::Delete(_)
                | Self::Move { .. }
                | Self::UpdateText { .. }
                | Self::UpdatePriority { .. }
                | Self::UpdateStyle { .. }
                | Self::ToggleCollapse(_)
                | Self::SetAllCollapsed(_)
                | Self::Import(_)
        )
    }

    /// Whether the action is refused in read-only mode.
    ///
    /// Every structural edit is, and so is starting a text edit.
    pub fn needs_write(&self) -> bool {
        self.is_undoable() || matches!(self, Self::BeginEdit(_))
    }
}

bitflags::bitflags! {
    /// Parts of the state a reducer step changed, so the renderer knows what to redraw.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Changes: u8 {
        /// Tree structure, text or geometry.
        const TREE      = 0b0000_0001;
        /// Selection or edit target.
        const FOCUS     = 0b0000_0010;
        /// Search term, matches or current match.
        const SEARCH    = 0b0000_0100;
        /// View transform.
        const VIEWPORT  = 0b0000_1000;
        /// Read-only flag.
        const READ_ONLY = 0b0001_0000;
    }
}

impl Changes {
    /// Compare two states field by field.
    pub fn between(before: &EditorState, after: &EditorState) -> Self {
        let mut changes = Self::empty();
        changes.set(Self::TREE, before.root != after.root);
        changes.set(Self::FOCUS, before.focus != after.focus);
        changes.set(Self::SEARCH, before.search != after.search);
        changes.set(Self::VIEWPORT, before.viewport != after.viewport);
        changes.set(Self::READ_ONLY, before.read_only != after.read_only);
        changes
    }
}
