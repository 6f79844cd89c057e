// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The state envelope around a tree snapshot.

use alloc::format;

use kurbo::Vec2;
use mindmap_search::SearchState;
use mindmap_tree::{Node, NodeId};

use crate::focus::FocusState;

/// Pan and zoom of the host's view.
///
/// Owned by the rendering layer and only stored here; the editor never reads it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Pan offset in screen space.
    pub offset: Vec2,
    /// Zoom factor; `1.0` is unscaled.
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

/// Everything the renderer needs to draw one frame of the editor.
///
/// States are plain values; reducer steps return new states and never
/// modify the one they were given.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditorState {
    /// The laid-out tree, `None` before anything was loaded.
    pub root: Option<Node>,
    /// Selection and edit target.
    pub focus: FocusState,
    /// Host view transform.
    pub viewport: Viewport,
    /// Whether structural edits are disabled.
    pub read_only: bool,
    /// Search term and results for [`EditorState::root`].
    pub search: SearchState,
    /// Counter behind minted `node-<n>` ids. Part of the undo snapshot.
    pub id_seq: u64,
}

impl EditorState {
    /// The selected node, if it exists in the tree.
    pub fn selected_node(&self) -> Option<&Node> {
        let id = self.focus.selected()?;
        self.root.as_ref()?.find(id)
    }

    /// Produce an id that is not yet used in the tree.
    pub(crate) fn mint_id(&mut self) -> NodeId {
        loop {
            self.id_seq += 1;
            let id = NodeId::new(format!("node-{}", self.id_seq));
            if !self.root.as_ref().is_some_and(|root| root.contains(&id)) {
                return id;
            }
        }
    }
}
