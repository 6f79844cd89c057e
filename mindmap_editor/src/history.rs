// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear undo/redo log of whole editor states.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::mem;

use mindmap_edit::Rejection;
use mindmap_tree::{Node, TextMeasure, normalize};
use serde_json::Value;

use crate::action::{Action, Changes};
use crate::editor::{Editor, Reduced};
use crate::state::EditorState;

/// Past, present and future editor states.
///
/// Structural actions push the present onto the past and clear the future;
/// every other action replaces the present in place. Undo and redo move whole
/// snapshots between the stacks, so nothing is ever diffed or replayed.
///
/// The read-only flag and the viewport live outside the log: a snapshot that
/// comes back through undo or redo carries their live values and is otherwise
/// restored as recorded. A snapshot without a tree gets the last loaded one,
/// with its search and focus brought in line with that tree.
#[derive(Clone, Debug, Default)]
pub struct History {
    past: VecDeque<EditorState>,
    present: EditorState,
    future: Vec<EditorState>,
    last_loaded: Option<Node>,
    limit: Option<usize>,
}

impl History {
    /// Start a log at `present`. Its tree counts as loaded.
    pub fn new(present: EditorState) -> Self {
        Self {
            last_loaded: present.root.clone(),
            present,
            ..Self::default()
        }
    }

    /// Keep at most `limit` undo steps, dropping the oldest first.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self.trim();
        self
    }

    /// The current state.
    pub fn present(&self) -> &EditorState {
        &self.present
    }

    /// Whether there is anything to undo.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether there is anything to redo.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of recorded undo steps.
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    /// Number of undone steps that can be redone.
    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    /// Apply `action` to the present state.
    ///
    /// Rejected actions change nothing and are not recorded.
    pub fn dispatch<M: TextMeasure>(
        &mut self,
        editor: &Editor<M>,
        action: &Action,
    ) -> Result<Changes, Rejection> {
        let Reduced {
            state,
            outcome,
            changes,
        } = editor.apply(&self.present, action);
        outcome?;

        if action.is_undoable() {
            let previous = mem::replace(&mut self.present, state);
            self.past.push_back(previous);
            self.future.clear();
            self.trim();
            if matches!(action, Action::Import(_)) {
                self.last_loaded.clone_from(&self.present.root);
            }
            tracing::debug!(depth = self.past.len(), "history push");
        } else {
            self.present = state;
        }
        Ok(changes)
    }

    /// Step back one structural edit. `None` when there is nothing to undo.
    pub fn undo<M: TextMeasure>(&mut self, editor: &Editor<M>) -> Option<Changes> {
        let snapshot = self.past.pop_back()?;
        let restored = self.patch(editor, snapshot);
        let old = mem::replace(&mut self.present, restored);
        let changes = Changes::between(&old, &self.present);
        self.future.push(old);
        tracing::debug!(past = self.past.len(), future = self.future.len(), "undo");
        Some(changes)
    }

    /// Re-apply one undone edit. `None` when there is nothing to redo.
    pub fn redo<M: TextMeasure>(&mut self, editor: &Editor<M>) -> Option<Changes> {
        let snapshot = self.future.pop()?;
        let restored = self.patch(editor, snapshot);
        let old = mem::replace(&mut self.present, restored);
        let changes = Changes::between(&old, &self.present);
        self.past.push_back(old);
        tracing::debug!(past = self.past.len(), future = self.future.len(), "redo");
        Some(changes)
    }

    /// Show a new map, discarding selection, search and both stacks.
    ///
    /// The read-only flag, viewport and id counter carry over.
    pub fn load<M: TextMeasure>(&mut self, editor: &Editor<M>, root: &Node) {
        let mut state = editor.load(root);
        state.read_only = self.present.read_only;
        state.viewport = self.present.viewport;
        state.id_seq = self.present.id_seq;
        self.last_loaded.clone_from(&state.root);
        self.present = state;
        self.past.clear();
        self.future.clear();
        tracing::debug!(nodes = root.node_count(), "map loaded");
    }

    /// Normalize raw tree data for the editor's schema and [`load`](Self::load) it.
    pub fn load_value<M: TextMeasure>(&mut self, editor: &Editor<M>, value: &Value) {
        let root = normalize(value, editor.schema);
        self.load(editor, &root);
    }

    fn patch<M: TextMeasure>(&self, editor: &Editor<M>, mut snapshot: EditorState) -> EditorState {
        snapshot.read_only = self.present.read_only;
        snapshot.viewport = self.present.viewport;
        if snapshot.root.is_none() && self.last_loaded.is_some() {
            snapshot.root.clone_from(&self.last_loaded);
            editor.reconcile(&mut snapshot);
        }
        if snapshot.read_only {
            snapshot.focus.exit_edit();
        }
        snapshot
    }

    fn trim(&mut self) {
        if let Some(limit) = self.limit {
            while self.past.len() > limit {
                self.past.pop_front();
            }
        }
    }
}
