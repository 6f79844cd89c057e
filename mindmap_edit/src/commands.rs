// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural commands over tree snapshots.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashSet;
use mindmap_tree::{
    Layout, MonospaceMeasure, Node, NodeExt, NodeId, NodeType, Priority, Schema, TextMeasure,
};
use serde_json::Value;

use crate::rejection::Rejection;
use crate::rules::{MoveGuard, TypeRules, type_of};

/// Request payload for a node to be created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewNode {
    /// Id of the new node; must not exist in the tree yet.
    pub id: NodeId,
    /// Initial label.
    pub text: String,
    /// Type tag. Ignored under a parent without extended fields.
    pub node_type: Option<NodeType>,
}

impl NewNode {
    /// A node request without a type tag.
    pub fn new(id: impl Into<NodeId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            node_type: None,
        }
    }

    /// Set the type tag.
    #[must_use]
    pub fn typed(mut self, node_type: impl Into<NodeType>) -> Self {
        self.node_type = Some(node_type.into());
        self
    }

    /// Materialize the node for a parent.
    ///
    /// Children of extended nodes are extended too, with the default type
    /// unless one was requested. Children of minimal nodes stay minimal.
    fn build(self, parent: &Node) -> Node {
        let node = Node::new(self.id, self.text);
        if parent.ext.is_none() {
            return node;
        }
        node.with_ext(NodeExt::typed(self.node_type.unwrap_or_default()))
    }
}

/// Result of a successful add.
#[derive(Clone, Debug, PartialEq)]
pub struct Added {
    /// The new, laid-out tree.
    pub root: Node,
    /// Id of the created node.
    pub id: NodeId,
}

/// Result of a successful delete.
#[derive(Clone, Debug, PartialEq)]
pub struct Deleted {
    /// The new, laid-out tree.
    pub root: Node,
    /// Every id that no longer exists, in pre-order of the old tree.
    pub removed: Vec<NodeId>,
    /// Node to select next: the deleted node's parent, or the promoted root.
    pub select: NodeId,
}

/// Result of a successful move.
#[derive(Clone, Debug, PartialEq)]
pub struct Moved {
    /// The new, laid-out tree.
    pub root: Node,
    /// The parent the node was detached from.
    pub old_parent: NodeId,
}

/// Result of a successful collapse toggle.
#[derive(Clone, Debug, PartialEq)]
pub struct Toggled {
    /// The new, laid-out tree.
    pub root: Node,
    /// Collapse state of the toggled node after the command.
    pub collapsed: bool,
}

/// Validated structural edits.
///
/// Every command takes the current snapshot by reference and never mutates
/// it. On success it returns a fresh snapshot that has been laid out again in
/// full; on [`Rejection`] the caller simply keeps the snapshot it has.
pub struct Commands<'a, M = MonospaceMeasure> {
    layout: &'a Layout<M>,
    rules: &'a TypeRules,
    guard: &'a dyn MoveGuard,
}

impl<M: fmt::Debug> fmt::Debug for Commands<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Commands")
            .field("layout", self.layout)
            .field("rules", self.rules)
            .finish_non_exhaustive()
    }
}

impl<'a, M: TextMeasure> Commands<'a, M> {
    /// Bundle the collaborators a command needs.
    pub fn new(layout: &'a Layout<M>, rules: &'a TypeRules, guard: &'a dyn MoveGuard) -> Self {
        Self {
            layout,
            rules,
            guard,
        }
    }

    fn settle(&self, mut root: Node) -> Node {
        self.layout.apply_in_place(&mut root);
        root
    }

    /// Add a child under `parent`, or under the root when `parent` is `None`.
    ///
    /// A collapsed parent is expanded so the new node is visible.
    pub fn add(
        &self,
        root: &Node,
        parent: Option<&NodeId>,
        new: NewNode,
    ) -> Result<Added, Rejection> {
        let parent_id = parent.unwrap_or(&root.id).clone();
        logged("add", self.insert_child(root, &parent_id, None, new))
    }

    /// Add a node right after `sibling` under the same parent.
    pub fn add_sibling(
        &self,
        root: &Node,
        sibling: &NodeId,
        new: NewNode,
    ) -> Result<Added, Rejection> {
        let result = root
            .find_with_parent(sibling)
            .ok_or_else(|| Rejection::NodeNotFound(sibling.clone()))
            .and_then(|found| {
                let parent = found.parent.ok_or(Rejection::SecondRoot)?;
                let after = parent.children.iter().position(|c| c.id == *sibling);
                let parent_id = parent.id.clone();
                self.insert_child(root, &parent_id, after.map(|i| i + 1), new)
            });
        logged("add_sibling", result)
    }

    fn insert_child(
        &self,
        root: &Node,
        parent_id: &NodeId,
        at: Option<usize>,
        new: NewNode,
    ) -> Result<Added, Rejection> {
        let parent = root
            .find(parent_id)
            .ok_or_else(|| Rejection::NodeNotFound(parent_id.clone()))?;
        if root.contains(&new.id) {
            return Err(Rejection::DuplicateId(new.id));
        }
        let child = new.build(parent);
        let child_type = type_of(&child);
        self.rules.check_placement(parent, &child_type, None)?;
        let front = self.rules.is_fixed_first(&child_type) && self.rules.is_constrained(parent);
        let index = match at {
            _ if front => 0,
            Some(at) => at,
            None => parent.children.len(),
        };

        let id = child.id.clone();
        let mut next = root.clone();
        let Some(parent) = next.find_mut(parent_id) else {
            unreachable!("parent {parent_id} vanished from a private copy");
        };
        parent.children.insert(index.min(parent.children.len()), child);
        if parent.is_collapsed() {
            parent.set_collapsed(false);
        }
        Ok(Added {
            root: self.settle(next),
            id,
        })
    }

    /// Delete a node and its whole subtree.
    ///
    /// Deleting the root promotes its first child; the other children of the
    /// old root are re-attached after the promoted node's own children, each
    /// checked against the type rules as if it were added there. A lone root
    /// cannot be deleted.
    pub fn delete(&self, root: &Node, id: &NodeId) -> Result<Deleted, Rejection> {
        logged("delete", self.delete_inner(root, id))
    }

    fn delete_inner(&self, root: &Node, id: &NodeId) -> Result<Deleted, Rejection> {
        let found = root
            .find_with_parent(id)
            .ok_or_else(|| Rejection::NodeNotFound(id.clone()))?;

        let Some(parent) = found.parent else {
            if root.is_leaf() {
                return Err(Rejection::LastNode);
            }
            let mut rest = root.children.clone();
            let mut promoted = rest.remove(0);
            for child in rest {
                let child_type = type_of(&child);
                self.rules.check_placement(&promoted, &child_type, None)?;
                let index = self.rules.insert_index(&promoted, &child_type);
                promoted.children.insert(index, child);
            }
            promoted.set_collapsed(false);
            let select = promoted.id.clone();
            return Ok(Deleted {
                root: self.settle(promoted),
                removed: alloc::vec![root.id.clone()],
                select,
            });
        };

        let removed = found.node.subtree_ids();
        let select = parent.id.clone();
        let mut next = root.clone();
        let Some(parent) = next.find_mut(&select) else {
            unreachable!("parent {select} vanished from a private copy");
        };
        parent.children.retain(|c| c.id != *id);
        expand_if_emptied(parent);
        Ok(Deleted {
            root: self.settle(next),
            removed,
            select,
        })
    }

    /// Re-parent a node, with its subtree, under `new_parent`.
    ///
    /// The node is appended to the new parent's children, or put first when
    /// it is a fixed-first type under a constrained parent.
    pub fn move_node(
        &self,
        root: &Node,
        id: &NodeId,
        new_parent: &NodeId,
    ) -> Result<Moved, Rejection> {
        logged("move", self.move_inner(root, id, new_parent))
    }

    fn move_inner(
        &self,
        root: &Node,
        id: &NodeId,
        new_parent: &NodeId,
    ) -> Result<Moved, Rejection> {
        if id == new_parent {
            return Err(Rejection::SelfMove);
        }
        let found = root
            .find_with_parent(id)
            .ok_or_else(|| Rejection::NodeNotFound(id.clone()))?;
        let target = root
            .find(new_parent)
            .ok_or_else(|| Rejection::NodeNotFound(new_parent.clone()))?;
        if found.node.contains(new_parent) {
            return Err(Rejection::Cycle {
                node: id.clone(),
                target: new_parent.clone(),
            });
        }
        // Only the root has no parent, and the root contains every target.
        let Some(old_parent) = found.parent else {
            unreachable!("root {id} passed the cycle check");
        };
        let child_type = type_of(found.node);
        self.rules.check_placement(target, &child_type, Some(id))?;
        if !self.guard.allow_move(found.node, target) {
            return Err(Rejection::Vetoed);
        }

        let old_parent = old_parent.id.clone();
        let mut next = root.clone();
        let Some(source) = next.find_mut(&old_parent) else {
            unreachable!("parent {old_parent} vanished from a private copy");
        };
        let Some(at) = source.children.iter().position(|c| c.id == *id) else {
            unreachable!("{id} is not a child of its parent {old_parent}");
        };
        let node = source.children.remove(at);
        expand_if_emptied(source);

        let Some(target) = next.find_mut(new_parent) else {
            unreachable!("target {new_parent} vanished from a private copy");
        };
        let index = self.rules.insert_index(target, &child_type);
        target.children.insert(index, node);
        Ok(Moved {
            root: self.settle(next),
            old_parent,
        })
    }

    /// Flip the collapse state of a node that has children.
    pub fn toggle_collapse(&self, root: &Node, id: &NodeId) -> Result<Toggled, Rejection> {
        let result = root
            .find(id)
            .ok_or_else(|| Rejection::NodeNotFound(id.clone()))
            .and_then(|node| {
                if node.is_leaf() {
                    Err(Rejection::NoChildren(id.clone()))
                } else {
                    Ok(!node.is_collapsed())
                }
            })
            .map(|collapsed| {
                let next = self.edit(root, id, |node| node.set_collapsed(collapsed));
                Toggled {
                    root: next,
                    collapsed,
                }
            });
        logged("toggle_collapse", result)
    }

    /// Expand every node, or collapse every non-root node that has children.
    pub fn set_all_collapsed(&self, root: &Node, collapsed: bool) -> Node {
        fn walk(node: &mut Node, collapsed: bool) {
            for child in &mut node.children {
                walk(child, collapsed);
            }
            node.set_collapsed(collapsed && !node.is_leaf());
        }

        let mut next = root.clone();
        for child in &mut next.children {
            walk(child, collapsed);
        }
        next.set_collapsed(false);
        self.settle(next)
    }

    /// Check a whole tree brought in from outside and lay it out.
    ///
    /// Ids must be unique. Every node of an extended map carries extended
    /// fields and no node of a minimal map does.
    pub fn import(&self, root: &Node, schema: Schema) -> Result<Node, Rejection> {
        logged("import", check_import(root, schema)).map(|()| self.layout.apply(root))
    }

    /// Replace the label of one node.
    pub fn update_text(
        &self,
        root: &Node,
        id: &NodeId,
        text: impl Into<String>,
    ) -> Result<Node, Rejection> {
        let result = self
            .require(root, id)
            .map(|_| self.edit(root, id, |node| node.text = text.into()));
        logged("update_text", result)
    }

    /// Set the priority of an extended node. `0` clears it.
    pub fn update_priority(&self, root: &Node, id: &NodeId, level: u8) -> Result<Node, Rejection> {
        let result = self.require_ext(root, id).and_then(|_| {
            let priority = Priority::new(level).ok_or(Rejection::InvalidPriority(level))?;
            Ok(self.edit(root, id, |node| {
                if let Some(ext) = &mut node.ext {
                    ext.priority = priority;
                }
            }))
        });
        logged("update_priority", result)
    }

    /// Set or clear the style override of an extended node.
    pub fn update_style(
        &self,
        root: &Node,
        id: &NodeId,
        style: Option<Value>,
    ) -> Result<Node, Rejection> {
        let result = self.require_ext(root, id).map(|_| {
            self.edit(root, id, |node| {
                if let Some(ext) = &mut node.ext {
                    ext.style = style;
                }
            })
        });
        logged("update_style", result)
    }

    fn require<'t>(&self, root: &'t Node, id: &NodeId) -> Result<&'t Node, Rejection> {
        root.find(id).ok_or_else(|| Rejection::NodeNotFound(id.clone()))
    }

    fn require_ext<'t>(&self, root: &'t Node, id: &NodeId) -> Result<&'t NodeExt, Rejection> {
        self.require(root, id)?
            .ext
            .as_ref()
            .ok_or_else(|| Rejection::NotExtended(id.clone()))
    }

    /// Apply `f` to one node of a private copy and lay the copy out.
    ///
    /// The node must have been found in `root` already.
    fn edit(&self, root: &Node, id: &NodeId, f: impl FnOnce(&mut Node)) -> Node {
        let mut next = root.clone();
        let Some(node) = next.find_mut(id) else {
            unreachable!("{id} vanished from a private copy");
        };
        f(node);
        self.settle(next)
    }
}

fn check_import(root: &Node, schema: Schema) -> Result<(), Rejection> {
    let extended = schema == Schema::Extended;
    let mut seen = HashSet::new();
    for node in root.pre_order() {
        if !seen.insert(&node.id) {
            return Err(Rejection::DuplicateId(node.id.clone()));
        }
        if node.ext.is_some() != extended {
            return Err(Rejection::SchemaMismatch(node.id.clone()));
        }
    }
    Ok(())
}

/// A collapsed node that lost its last child is a leaf again.
fn expand_if_emptied(node: &mut Node) {
    if node.is_leaf() && node.is_collapsed() {
        node.set_collapsed(false);
    }
}

fn logged<T>(command: &'static str, result: Result<T, Rejection>) -> Result<T, Rejection> {
    result.inspect_err(|reason| tracing::debug!(command, %reason, "edit rejected"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::AllowAll;
    use alloc::vec;
    use serde_json::json;

    fn ids(node: &Node) -> Vec<&str> {
        node.pre_order().map(|n| n.id.as_str()).collect()
    }

    fn sample() -> Node {
        let layout: Layout = Layout::default();
        layout.apply(
            &Node::new("r", "Root")
                .with_child(
                    Node::new("a", "A")
                        .with_child(Node::new("a1", "A1"))
                        .with_child(Node::new("a2", "A2")),
                )
                .with_child(Node::new("b", "B")),
        )
    }

    fn typed(id: &str, tag: &str) -> Node {
        Node::new(id, id).with_ext(NodeExt::typed(NodeType::new(tag)))
    }

    struct Fixture {
        layout: Layout,
        rules: TypeRules,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                layout: Layout::default(),
                rules: TypeRules::new(),
            }
        }

        fn constrained() -> Self {
            Self {
                layout: Layout::default(),
                rules: TypeRules::new()
                    .allow("goal", ["summary", "task"])
                    .limit("goal", "summary", 1)
                    .fixed_first("summary"),
            }
        }

        fn commands(&self) -> Commands<'_> {
            Commands::new(&self.layout, &self.rules, &AllowAll)
        }
    }

    #[test]
    fn add_appends_and_lays_out() {
        let fx = Fixture::new();
        let tree = sample();
        let added = fx.commands().add(&tree, None, NewNode::new("c", "C")).unwrap();
        assert_eq!(added.id.as_str(), "c");
        assert_eq!(ids(&added.root), ["r", "a", "a1", "a2", "b", "c"]);
        let c = added.root.find(&"c".into()).unwrap();
        assert!(c.width() > 0.0, "new node is laid out");
        assert_eq!(ids(&tree).len(), 5, "input untouched");
    }

    #[test]
    fn add_rejections() {
        let fx = Fixture::new();
        let cmds = fx.commands();
        let tree = sample();
        assert_eq!(
            cmds.add(&tree, Some(&"zz".into()), NewNode::new("c", "C")),
            Err(Rejection::NodeNotFound("zz".into()))
        );
        assert_eq!(
            cmds.add(&tree, None, NewNode::new("a1", "again")),
            Err(Rejection::DuplicateId("a1".into()))
        );
    }

    #[test]
    fn add_expands_collapsed_parent() {
        let fx = Fixture::new();
        let cmds = fx.commands();
        let tree = cmds.toggle_collapse(&sample(), &"a".into()).unwrap().root;
        let added = cmds.add(&tree, Some(&"a".into()), NewNode::new("a3", "A3")).unwrap();
        let a = added.root.find(&"a".into()).unwrap();
        assert!(!a.is_collapsed());
        assert_eq!(a.children.len(), 3);
    }

    #[test]
    fn add_sibling_inserts_after() {
        let fx = Fixture::new();
        let cmds = fx.commands();
        let tree = sample();
        let added = cmds.add_sibling(&tree, &"a1".into(), NewNode::new("x", "X")).unwrap();
        assert_eq!(ids(&added.root), ["r", "a", "a1", "x", "a2", "b"]);
        assert_eq!(
            cmds.add_sibling(&tree, &"r".into(), NewNode::new("x", "X")),
            Err(Rejection::SecondRoot)
        );
    }

    #[test]
    fn add_follows_type_rules() {
        let fx = Fixture::constrained();
        let cmds = fx.commands();
        let tree = typed("g", "goal").with_child(typed("t", "task"));

        let added = cmds
            .add(&tree, None, NewNode::new("s", "Summary").typed("summary"))
            .unwrap();
        let order: Vec<_> = added.root.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, ["s", "t"], "fixed-first type is unshifted");

        assert!(matches!(
            cmds.add(&added.root, None, NewNode::new("s2", "Again").typed("summary")),
            Err(Rejection::CardinalityExceeded { max: 1, .. })
        ));
        // Untyped children of an extended parent get the default type.
        assert!(matches!(
            cmds.add(&tree, None, NewNode::new("x", "Plain")),
            Err(Rejection::TypeNotAllowed { .. })
        ));
        let task = cmds.add(&tree, Some(&"t".into()), NewNode::new("x", "Plain")).unwrap();
        let x = task.root.find(&"x".into()).unwrap();
        assert!(x.node_type().is_some_and(NodeType::is_default));
    }

    #[test]
    fn minimal_parents_get_minimal_children() {
        let fx = Fixture::new();
        let added = fx
            .commands()
            .add(&sample(), None, NewNode::new("c", "C").typed("task"))
            .unwrap();
        assert!(added.root.find(&"c".into()).unwrap().ext.is_none());
    }

    #[test]
    fn import_checks_ids_and_schema() {
        let fx = Fixture::new();
        let cmds = fx.commands();
        let imported = cmds.import(&sample(), Schema::Minimal).unwrap();
        assert_eq!(imported, sample());

        let twice = Node::new("r", "Root")
            .with_child(Node::new("a", "A"))
            .with_child(Node::new("b", "B").with_child(Node::new("a", "Again")));
        assert_eq!(
            cmds.import(&twice, Schema::Minimal),
            Err(Rejection::DuplicateId("a".into()))
        );

        let mixed = Node::new("r", "Root").with_child(typed("t", "task"));
        assert_eq!(
            cmds.import(&mixed, Schema::Minimal),
            Err(Rejection::SchemaMismatch("t".into()))
        );
        assert_eq!(
            cmds.import(&mixed, Schema::Extended),
            Err(Rejection::SchemaMismatch("r".into()))
        );
        let board = typed("r", "board").with_child(typed("t", "task"));
        assert!(cmds.import(&board, Schema::Extended).is_ok());
    }

    #[test]
    fn delete_removes_subtree() {
        let fx = Fixture::new();
        let tree = sample();
        let deleted = fx.commands().delete(&tree, &"a".into()).unwrap();
        let removed: Vec<_> = deleted.removed.iter().map(NodeId::as_str).collect();
        assert_eq!(removed, ["a", "a1", "a2"]);
        assert_eq!(deleted.select.as_str(), "r");
        assert_eq!(ids(&deleted.root), ["r", "b"]);
    }

    #[test]
    fn delete_root_promotes_first_child() {
        let fx = Fixture::new();
        let cmds = fx.commands();
        let deleted = cmds.delete(&sample(), &"r".into()).unwrap();
        assert_eq!(deleted.removed, vec![NodeId::from("r")]);
        assert_eq!(deleted.select.as_str(), "a");
        assert_eq!(ids(&deleted.root), ["a", "a1", "a2", "b"]);
        let layout: Layout = Layout::default();
        assert_eq!(deleted.root.position().x, layout.config.root_x);

        let lone = Node::new("r", "Root");
        assert_eq!(cmds.delete(&lone, &"r".into()), Err(Rejection::LastNode));
        assert_eq!(
            cmds.delete(&lone, &"zz".into()),
            Err(Rejection::NodeNotFound("zz".into()))
        );
    }

    #[test]
    fn delete_root_places_children_by_the_rules() {
        let fx = Fixture::constrained();
        let cmds = fx.commands();
        let tree = typed("board", "board")
            .with_child(typed("g", "goal").with_child(typed("t", "task")))
            .with_child(typed("s", "summary"));
        let deleted = cmds.delete(&tree, &"board".into()).unwrap();
        assert_eq!(ids(&deleted.root), ["g", "s", "t"], "fixed-first goes to the front");

        let crowded = typed("board", "board")
            .with_child(typed("g", "goal").with_child(typed("s1", "summary")))
            .with_child(typed("s2", "summary"));
        assert!(matches!(
            cmds.delete(&crowded, &"board".into()),
            Err(Rejection::CardinalityExceeded { max: 1, .. })
        ));

        let leafy = Fixture {
            layout: Layout::default(),
            rules: TypeRules::new().allow("summary", Vec::<&str>::new()),
        };
        let tree = typed("board", "board")
            .with_child(typed("s", "summary"))
            .with_child(typed("t", "task"));
        assert_eq!(
            leafy.commands().delete(&tree, &"board".into()),
            Err(Rejection::TypeNotAllowed {
                parent: NodeType::new("summary"),
                child: NodeType::new("task"),
            })
        );
    }

    #[test]
    fn deleting_last_child_expands_parent() {
        let fx = Fixture::new();
        let cmds = fx.commands();
        let tree = Node::new("r", "Root")
            .with_child(Node::new("a", "A").with_child(Node::new("a1", "A1")));
        let tree = cmds.toggle_collapse(&tree, &"a".into()).unwrap().root;
        let deleted = cmds.delete(&tree, &"a1".into()).unwrap();
        let a = deleted.root.find(&"a".into()).unwrap();
        assert!(!a.is_collapsed());
        assert_eq!(a.children_count(), 0);
    }

    #[test]
    fn move_reparents_and_appends() {
        let fx = Fixture::new();
        let tree = sample();
        let moved = fx.commands().move_node(&tree, &"a".into(), &"b".into()).unwrap();
        assert_eq!(moved.old_parent.as_str(), "r");
        assert_eq!(ids(&moved.root), ["r", "b", "a", "a1", "a2"]);
        let b = moved.root.find(&"b".into()).unwrap();
        let a = moved.root.find(&"a".into()).unwrap();
        assert!(a.position().x > b.position().x + b.width());
    }

    #[test]
    fn move_rejections_leave_tree_alone() {
        let fx = Fixture::new();
        let cmds = fx.commands();
        let tree = sample();
        assert_eq!(
            cmds.move_node(&tree, &"a".into(), &"a".into()),
            Err(Rejection::SelfMove)
        );
        assert_eq!(
            cmds.move_node(&tree, &"a".into(), &"a2".into()),
            Err(Rejection::Cycle {
                node: "a".into(),
                target: "a2".into(),
            })
        );
        assert!(matches!(
            cmds.move_node(&tree, &"r".into(), &"b".into()),
            Err(Rejection::Cycle { .. })
        ));
        assert_eq!(
            cmds.move_node(&tree, &"a".into(), &"zz".into()),
            Err(Rejection::NodeNotFound("zz".into()))
        );
        assert_eq!(tree, sample());
    }

    #[test]
    fn move_respects_rules_and_guard() {
        let fx = Fixture::constrained();
        let tree = typed("root", "board")
            .with_child(typed("g", "goal").with_child(typed("t", "task")))
            .with_child(typed("s", "summary"))
            .with_child(typed("n", "note"));

        let moved = fx.commands().move_node(&tree, &"s".into(), &"g".into()).unwrap();
        let g = moved.root.find(&"g".into()).unwrap();
        assert_eq!(g.children[0].id.as_str(), "s", "fixed-first goes to the front");

        assert!(matches!(
            fx.commands().move_node(&tree, &"n".into(), &"g".into()),
            Err(Rejection::TypeNotAllowed { .. })
        ));

        let veto = |node: &Node, _: &Node| node.id.as_str() != "s";
        let guarded = Commands::new(&fx.layout, &fx.rules, &veto);
        assert_eq!(
            guarded.move_node(&tree, &"s".into(), &"g".into()),
            Err(Rejection::Vetoed)
        );
    }

    #[test]
    fn toggle_collapse_round_trip() {
        let fx = Fixture::new();
        let cmds = fx.commands();
        let tree = sample();
        let collapsed = cmds.toggle_collapse(&tree, &"a".into()).unwrap();
        assert!(collapsed.collapsed);
        let a = collapsed.root.find(&"a".into()).unwrap();
        assert_eq!(a.children_count(), 2);
        assert!(collapsed.root.branch_height() < tree.branch_height());

        let expanded = cmds.toggle_collapse(&collapsed.root, &"a".into()).unwrap();
        assert!(!expanded.collapsed);
        assert_eq!(expanded.root, tree);

        assert_eq!(
            cmds.toggle_collapse(&tree, &"b".into()),
            Err(Rejection::NoChildren("b".into()))
        );
    }

    #[test]
    fn set_all_collapsed_keeps_root_open() {
        let fx = Fixture::new();
        let cmds = fx.commands();
        let collapsed = cmds.set_all_collapsed(&sample(), true);
        assert!(!collapsed.is_collapsed());
        assert!(collapsed.find(&"a".into()).unwrap().is_collapsed());
        assert!(!collapsed.find(&"b".into()).unwrap().is_collapsed());
        assert_eq!(cmds.set_all_collapsed(&collapsed, false), sample());
    }

    #[test]
    fn field_updates() {
        let fx = Fixture::new();
        let cmds = fx.commands();
        let tree = sample();
        let renamed = cmds
            .update_text(&tree, &"b".into(), "a much longer label than before")
            .unwrap();
        let b = renamed.find(&"b".into()).unwrap();
        assert!(b.width() > tree.find(&"b".into()).unwrap().width());
        assert_eq!(
            cmds.update_priority(&tree, &"b".into(), 2),
            Err(Rejection::NotExtended("b".into()))
        );

        let ext = typed("t", "task");
        let prioritized = cmds.update_priority(&ext, &"t".into(), 3).unwrap();
        assert_eq!(prioritized.ext.as_ref().unwrap().priority.level(), 3);
        assert_eq!(
            cmds.update_priority(&ext, &"t".into(), 9),
            Err(Rejection::InvalidPriority(9))
        );
        let styled = cmds
            .update_style(&ext, &"t".into(), Some(json!({ "fill": "red" })))
            .unwrap();
        assert!(styled.ext.unwrap().style.is_some());
    }

    #[test]
    fn example_scenario() {
        let fx = Fixture::new();
        let cmds = fx.commands();
        let root = Node::new("R", "Root");
        let a = cmds.add(&root, Some(&"R".into()), NewNode::new("A", "A")).unwrap();
        assert_eq!(a.root.node_count(), 2);
        let b = cmds.add(&a.root, Some(&"R".into()), NewNode::new("B", "B")).unwrap();
        assert_eq!(ids(&b.root), ["R", "A", "B"]);
        let deleted = cmds.delete(&b.root, &"A".into()).unwrap();
        assert_eq!(deleted.root.node_count(), 2);
        assert_eq!(deleted.select.as_str(), "R");
        assert_eq!(
            cmds.move_node(&deleted.root, &"B".into(), &"A".into()),
            Err(Rejection::NodeNotFound("A".into()))
        );
    }
}
