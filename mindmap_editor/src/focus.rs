// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection and text-edit target as a single state.

use mindmap_tree::{Node, NodeId};

/// Which node, if any, the user is working on.
///
/// Editing implies selection, so the edit target is never tracked apart
/// from the selection. Transitions run `None -> Selected -> Editing -> None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FocusState {
    /// Nothing selected.
    #[default]
    None,
    /// A node is selected.
    Selected(NodeId),
    /// A node is selected and its text is being edited.
    Editing(NodeId),
}

impl FocusState {
    /// The selected node, whether or not it is being edited.
    pub fn selected(&self) -> Option<&NodeId> {
        match self {
            Self::None => None,
            Self::Selected(id) | Self::Editing(id) => Some(id),
        }
    }

    /// The node under text edit.
    pub fn editing(&self) -> Option<&NodeId> {
        match self {
            Self::Editing(id) => Some(id),
            _ => None,
        }
    }

    /// Whether a text edit is in progress.
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    /// Select `id`. Selecting another node leaves edit mode; re-selecting the
    /// node under edit keeps editing it.
    pub fn select(&mut self, id: NodeId) {
        if self.editing() != Some(&id) {
            *self = Self::Selected(id);
        }
    }

    /// Start editing `id`, selecting it.
    pub fn begin_edit(&mut self, id: NodeId) {
        *self = Self::Editing(id);
    }

    /// Finish a text edit. Leaves other states alone.
    pub fn end_edit(&mut self) {
        if self.is_editing() {
            *self = Self::None;
        }
    }

    /// Leave edit mode but keep the node selected.
    pub fn exit_edit(&mut self) {
        if let Self::Editing(id) = self {
            *self = Self::Selected(id.clone());
        }
    }

    /// Drop the focus if its node is no longer in `root`.
    pub(crate) fn retain_in(&mut self, root: Option<&Node>) {
        let gone = self
            .selected()
            .is_some_and(|id| !root.is_some_and(|r| r.contains(id)));
        if gone {
            *self = Self::None;
        }
    }

    /// Move the focus off a node hidden under a collapsed ancestor, onto the
    /// outermost collapsed ancestor.
    pub(crate) fn reveal_in(&mut self, root: Option<&Node>) {
        let (Some(root), Some(id)) = (root, self.selected()) else {
            return;
        };
        let Some(path) = root.path_to(id) else {
            return;
        };
        let hidden_under = path[..path.len() - 1]
            .iter()
            .find(|ancestor| root.find(ancestor).is_some_and(Node::is_collapsed));
        if let Some(ancestor) = hidden_under {
            *self = Self::Selected(ancestor.clone());
        }
    }
}
