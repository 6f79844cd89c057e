// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Search term, results, and the current-match cursor.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashSet;
use mindmap_tree::{Node, NodeId};

use crate::index::{SearchResult, SearchScope, search};

/// A search term together with its results against some tree.
///
/// Results are only as fresh as the last [`SearchState::set_term`] or
/// [`SearchState::refresh`]; call `refresh` after every tree change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchState {
    term: String,
    matches: Vec<NodeId>,
    highlighted: HashSet<NodeId>,
    current: Option<usize>,
}

impl SearchState {
    /// An empty search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the term and search `root` with it.
    ///
    /// The cursor lands on the first match, or nowhere when nothing matches.
    pub fn set_term(&mut self, root: Option<&Node>, term: impl Into<String>, scope: SearchScope) {
        self.term = term.into();
        self.apply(search(root, &self.term, scope));
        self.current = if self.matches.is_empty() { None } else { Some(0) };
        tracing::debug!(term = %self.term, matches = self.matches.len(), "search term set");
    }

    /// Re-run the current term against a changed tree.
    ///
    /// The cursor stays on the same node when it still matches; otherwise it
    /// keeps its index, clamped to the new match count.
    pub fn refresh(&mut self, root: Option<&Node>, scope: SearchScope) {
        let previous = self.current_id().cloned();
        let index = self.current;
        self.apply(search(root, &self.term, scope));
        self.current = match previous.and_then(|id| self.matches.iter().position(|m| *m == id)) {
            Some(found) => Some(found),
            None if self.matches.is_empty() => None,
            None => Some(index.unwrap_or(0).min(self.matches.len() - 1)),
        };
    }

    /// Drop the term and all results.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn apply(&mut self, result: SearchResult) {
        self.matches = result.matches;
        self.highlighted = result.highlighted;
    }

    /// Advance to the next match, wrapping after the last one.
    pub fn next(&mut self) -> Option<&NodeId> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }
        self.current = Some(self.current.map_or(0, |i| (i + 1) % len));
        self.current_id()
    }

    /// Step back to the previous match, wrapping before the first one.
    pub fn prev(&mut self) -> Option<&NodeId> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }
        self.current = Some(self.current.map_or(len - 1, |i| (i + len - 1) % len));
        self.current_id()
    }

    /// The current term.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Matching ids in document order.
    pub fn matches(&self) -> &[NodeId] {
        &self.matches
    }

    /// Set of matching ids.
    pub fn highlighted(&self) -> &HashSet<NodeId> {
        &self.highlighted
    }

    /// Whether `id` is among the matches.
    pub fn is_highlighted(&self, id: &NodeId) -> bool {
        self.highlighted.contains(id)
    }

    /// Index of the current match.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Id of the current match.
    pub fn current_id(&self) -> Option<&NodeId> {
        self.current.and_then(|i| self.matches.get(i))
    }
}
