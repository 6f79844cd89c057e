// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full-tree substring scan.

use alloc::vec::Vec;

use hashbrown::HashSet;
use mindmap_tree::{Node, NodeId, Schema};

/// Which part of the tree a search reaches.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SearchScope {
    /// Every node, including those hidden under collapsed ancestors.
    #[default]
    All,
    /// Only nodes that are not hidden under a collapsed ancestor.
    VisibleOnly,
}

impl SearchScope {
    /// The scope each schema variant searches with.
    ///
    /// Minimal trees skip collapsed subtrees; extended trees search everything.
    pub fn for_schema(schema: Schema) -> Self {
        match schema {
            Schema::Minimal => Self::VisibleOnly,
            Schema::Extended => Self::All,
        }
    }
}

/// Output of [`search`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResult {
    /// Matching ids in document (pre-)order.
    pub matches: Vec<NodeId>,
    /// The same ids, for membership tests while rendering.
    pub highlighted: HashSet<NodeId>,
}

/// Case-insensitive substring search.
///
/// An empty term matches nothing. A missing tree matches nothing.
pub fn search(root: Option<&Node>, term: &str, scope: SearchScope) -> SearchResult {
    let mut result = SearchResult::default();
    let Some(root) = root else {
        return result;
    };
    if term.is_empty() {
        return result;
    }
    let needle = term.to_lowercase();
    let nodes = match scope {
        SearchScope::All => root.pre_order(),
        SearchScope::VisibleOnly => root.visible_pre_order(),
    };
    for node in nodes {
        if node.text.to_lowercase().contains(needle.as_str()) {
            result.matches.push(node.id.clone());
            result.highlighted.insert(node.id.clone());
        }
    }
    result
}
