// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for search.
//!
//! 1. The highlight set is exactly the set of matches.
//! 2. Matches come out in document order and every match really matches.
//! 3. Stepping forward `len` times returns to the starting match.
//! 4. Visible-only results are a subsequence of full results.

use mindmap_search::{SearchScope, SearchState, search};
use mindmap_tree::{Node, NodeId};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct Shape {
    text: String,
    collapsed: bool,
    children: Vec<Shape>,
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = ("[ab ]{0,6}", any::<bool>()).prop_map(|(text, collapsed)| Shape {
        text,
        collapsed,
        children: Vec::new(),
    });
    leaf.prop_recursive(4, 40, 4, |inner| {
        ("[ab ]{0,6}", any::<bool>(), prop::collection::vec(inner, 0..4)).prop_map(
            |(text, collapsed, children)| Shape {
                text,
                collapsed,
                children,
            },
        )
    })
}

fn build(shape: &Shape, next: &mut usize) -> Node {
    let mut node = Node::new(format!("n{next}"), shape.text.clone());
    *next += 1;
    for child in &shape.children {
        node.children.push(build(child, next));
    }
    node.set_collapsed(shape.collapsed && !node.children.is_empty());
    node
}

fn tree_strategy() -> impl Strategy<Value = Node> {
    shape_strategy().prop_map(|shape| build(&shape, &mut 0))
}

fn term_strategy() -> impl Strategy<Value = String> {
    "[abAB]{0,2}"
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Highlight set equals the match list
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn highlight_set_equals_matches(tree in tree_strategy(), term in term_strategy()) {
        let result = search(Some(&tree), &term, SearchScope::All);
        prop_assert_eq!(result.highlighted.len(), result.matches.len());
        for id in &result.matches {
            prop_assert!(result.highlighted.contains(id));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Document order
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn matches_follow_document_order(tree in tree_strategy(), term in term_strategy()) {
        let result = search(Some(&tree), &term, SearchScope::All);
        let expected: Vec<NodeId> = if term.is_empty() {
            Vec::new()
        } else {
            let needle = term.to_lowercase();
            tree.pre_order()
                .filter(|n| n.text.to_lowercase().contains(&needle))
                .map(|n| n.id.clone())
                .collect()
        };
        prop_assert_eq!(result.matches, expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Cursor cycles
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn next_cycles_back(tree in tree_strategy(), term in term_strategy(), steps in 0_usize..6) {
        let mut state = SearchState::new();
        state.set_term(Some(&tree), term, SearchScope::All);
        for _ in 0..steps {
            state.next();
        }
        let start = state.current_id().cloned();
        for _ in 0..state.matches().len() {
            state.next();
        }
        prop_assert_eq!(state.current_id().cloned(), start);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Visible-only is a subsequence of all
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn visible_results_are_a_subsequence(tree in tree_strategy(), term in term_strategy()) {
        let all = search(Some(&tree), &term, SearchScope::All).matches;
        let visible = search(Some(&tree), &term, SearchScope::VisibleOnly).matches;
        let mut rest = all.iter();
        for id in &visible {
            prop_assert!(rest.any(|a| a == id), "{} out of order or missing", id);
        }
    }
}
