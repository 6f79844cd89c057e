// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for structural commands.
//!
//! 1. Delete completeness: nothing of the deleted subtree survives, and the
//!    reported ids are exactly that subtree.
//! 2. Move safety: moving a node into its own subtree is rejected.
//! 3. Successful moves keep every node and end with a settled layout.
//! 4. Adds never break id uniqueness.

use std::collections::HashSet;

use mindmap_edit::{AllowAll, Commands, NewNode, Rejection, TypeRules};
use mindmap_tree::{Layout, Node, NodeId};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct Shape {
    children: Vec<Shape>,
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    Just(Shape {
        children: Vec::new(),
    })
    .prop_recursive(4, 40, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(|children| Shape { children })
    })
}

fn build(shape: &Shape, next: &mut usize) -> Node {
    let mut node = Node::new(format!("n{next}"), format!("Node {next}"));
    *next += 1;
    for child in &shape.children {
        node.children.push(build(child, next));
    }
    node
}

/// A laid-out tree together with two indices into its pre-order.
fn tree_and_picks() -> impl Strategy<Value = (Node, usize, usize)> {
    shape_strategy().prop_flat_map(|shape| {
        let layout: Layout = Layout::default();
        let tree = layout.apply(&build(&shape, &mut 0));
        let len = tree.node_count();
        (Just(tree), 0..len, 0..len)
    })
}

fn nth_id(tree: &Node, n: usize) -> NodeId {
    tree.pre_order().nth(n).map(|node| node.id.clone()).unwrap()
}

fn id_set(tree: &Node) -> HashSet<NodeId> {
    tree.subtree_ids().into_iter().collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Delete completeness
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn delete_removes_exactly_the_subtree((tree, pick, _) in tree_and_picks()) {
        let layout: Layout = Layout::default();
        let rules = TypeRules::new();
        let commands = Commands::new(&layout, &rules, &AllowAll);
        let id = nth_id(&tree, pick);
        prop_assume!(id != tree.id);

        let subtree = tree.find(&id).unwrap().subtree_ids();
        let deleted = commands.delete(&tree, &id).unwrap();
        for gone in &subtree {
            prop_assert!(deleted.root.find(gone).is_none(), "{} survived", gone);
        }
        prop_assert_eq!(&deleted.removed, &subtree);
        prop_assert_eq!(
            deleted.root.node_count() + subtree.len(),
            tree.node_count()
        );
        prop_assert!(deleted.root.contains(&deleted.select));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Move safety
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn moving_into_own_subtree_is_rejected((tree, a, b) in tree_and_picks()) {
        let layout: Layout = Layout::default();
        let rules = TypeRules::new();
        let commands = Commands::new(&layout, &rules, &AllowAll);
        let (node, target) = (nth_id(&tree, a), nth_id(&tree, b));
        let subtree = tree.find(&node).unwrap();
        prop_assume!(subtree.contains(&target));

        let before = tree.clone();
        let result = commands.move_node(&tree, &node, &target);
        prop_assert!(
            matches!(result, Err(Rejection::SelfMove | Rejection::Cycle { .. })),
            "unexpected {:?}",
            result
        );
        prop_assert_eq!(tree, before);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Legal moves keep every node
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn legal_moves_keep_nodes((tree, a, b) in tree_and_picks()) {
        let layout: Layout = Layout::default();
        let rules = TypeRules::new();
        let commands = Commands::new(&layout, &rules, &AllowAll);
        let (node, target) = (nth_id(&tree, a), nth_id(&tree, b));
        prop_assume!(!tree.find(&node).unwrap().contains(&target));

        let moved = commands.move_node(&tree, &node, &target).unwrap();
        prop_assert_eq!(id_set(&moved.root), id_set(&tree));
        let parent = moved.root.find_with_parent(&node).unwrap().parent.unwrap();
        prop_assert_eq!(&parent.id, &target);
        prop_assert_eq!(parent.children.last().map(|c| &c.id), Some(&node));
        prop_assert_eq!(layout.apply(&moved.root), moved.root);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Adds keep ids unique
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn adds_keep_ids_unique((tree, a, b) in tree_and_picks()) {
        let layout: Layout = Layout::default();
        let rules = TypeRules::new();
        let commands = Commands::new(&layout, &rules, &AllowAll);
        let parent = nth_id(&tree, a);
        let taken = nth_id(&tree, b);

        prop_assert_eq!(
            commands.add(&tree, Some(&parent), NewNode::new(taken.clone(), "dup")),
            Err(Rejection::DuplicateId(taken))
        );
        let added = commands
            .add(&tree, Some(&parent), NewNode::new("fresh", "Fresh"))
            .unwrap();
        prop_assert_eq!(added.root.node_count(), tree.node_count() + 1);
        prop_assert_eq!(id_set(&added.root).len(), added.root.node_count());
    }
}
