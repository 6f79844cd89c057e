// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The node entity and id-based queries over a tree of nodes.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::iter::PreOrder;
use crate::types::{NodeExt, NodeId, NodeType};

/// A node of a mind map together with its whole subtree.
///
/// A tree is represented by its root `Node`; there is no separate registry, so
/// every lookup walks down from the root. Nodes own their children and
/// `Clone` is a full structural copy, which is what commands rely on to leave
/// earlier snapshots untouched.
///
/// Geometry (`position`, `size`, `branch_height`) is written only by
/// [`Layout`](crate::Layout); there are no public setters for it. After any
/// structural or text change the whole tree must be laid out again before its
/// geometry can be trusted.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Stable unique identifier.
    pub id: NodeId,
    /// Display text. Drives the computed box size.
    pub text: String,
    /// Optional color hint for the renderer.
    pub color: Option<String>,
    /// Extension fields; present for [`Schema::Extended`](crate::Schema::Extended) trees.
    pub ext: Option<NodeExt>,
    /// Ordered children. Order determines vertical stacking.
    pub children: Vec<Self>,
    pub(crate) collapsed: bool,
    pub(crate) children_count: usize,
    pub(crate) position: Point,
    pub(crate) size: Size,
    pub(crate) branch_height: f64,
}

/// A node found by [`Node::find_with_parent`].
#[derive(Clone, Copy, Debug)]
pub struct Located<'a> {
    /// The matched node.
    pub node: &'a Node,
    /// Its immediate parent, `None` only for the root.
    pub parent: Option<&'a Node>,
}

impl Node {
    /// Create an expanded leaf with zero geometry and no extension.
    pub fn new(id: impl Into<NodeId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            color: None,
            ext: None,
            children: Vec::new(),
            collapsed: false,
            children_count: 0,
            position: Point::ZERO,
            size: Size::ZERO,
            branch_height: 0.0,
        }
    }

    /// Attach extension fields.
    #[must_use]
    pub fn with_ext(mut self, ext: NodeExt) -> Self {
        self.ext = Some(ext);
        self
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Type tag of an extended node.
    pub fn node_type(&self) -> Option<&NodeType> {
        self.ext.as_ref().map(|ext| &ext.node_type)
    }

    /// Whether the node's children are hidden.
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Collapse or expand the node.
    ///
    /// Collapsing caches [`Node::count_descendants`] in
    /// [`Node::children_count`]; expanding resets the cache to zero.
    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
        self.children_count = if collapsed {
            self.count_descendants()
        } else {
            0
        };
    }

    /// Cached descendant count. Only meaningful while collapsed; zero otherwise.
    pub fn children_count(&self) -> usize {
        self.children_count
    }

    /// Top-left corner in world space, as of the last layout pass.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Box size, as of the last layout pass.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Box width.
    pub fn width(&self) -> f64 {
        self.size.width
    }

    /// Box height.
    pub fn height(&self) -> f64 {
        self.size.height
    }

    /// Vertical extent of the rendered subtree, as of the last layout pass.
    pub fn branch_height(&self) -> f64 {
        self.branch_height
    }

    /// World y of the top of this node's branch.
    ///
    /// The node box is centered vertically inside its branch, so this is the
    /// box top minus half the slack between branch and box.
    pub fn branch_top(&self) -> f64 {
        self.position.y - (self.branch_height - self.size.height) / 2.0
    }

    /// World-space box of this node.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Whether the node has no children at all (collapsed or not).
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Children that take part in layout and rendering.
    pub fn visible_children(&self) -> &[Self] {
        if self.collapsed { &[] } else { &self.children }
    }

    /// Find a node by id in pre-order. The first match wins.
    pub fn find(&self, id: &NodeId) -> Option<&Self> {
        self.pre_order().find(|n| n.id == *id)
    }

    /// Mutable variant of [`Node::find`].
    pub fn find_mut(&mut self, id: &NodeId) -> Option<&mut Self> {
        if self.id == *id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// Find a node and its immediate parent.
    pub fn find_with_parent(&self, id: &NodeId) -> Option<Located<'_>> {
        if self.id == *id {
            return Some(Located {
                node: self,
                parent: None,
            });
        }
        self.find_below(id)
    }

    fn find_below(&self, id: &NodeId) -> Option<Located<'_>> {
        for child in &self.children {
            if child.id == *id {
                return Some(Located {
                    node: child,
                    parent: Some(self),
                });
            }
            if let Some(found) = child.find_below(id) {
                return Some(found);
            }
        }
        None
    }

    /// Parent of the node with `id`, for mutation.
    ///
    /// Returns `None` when `id` is the root or absent.
    pub fn parent_of_mut(&mut self, id: &NodeId) -> Option<&mut Self> {
        if self.children.iter().any(|c| c.id == *id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.parent_of_mut(id))
    }

    /// Whether a node with `id` exists in this subtree (including `self`).
    pub fn contains(&self, id: &NodeId) -> bool {
        self.find(id).is_some()
    }

    /// Number of descendants, ignoring collapse state.
    ///
    /// This is the subtree size minus one, not the number of visible nodes.
    pub fn count_descendants(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.count_descendants())
            .sum()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.count_descendants()
    }

    /// Ids of this node and every descendant, in pre-order.
    pub fn subtree_ids(&self) -> Vec<NodeId> {
        self.pre_order().map(|n| n.id.clone()).collect()
    }

    /// Ids from the root down to the node with `id`, inclusive.
    pub fn path_to(&self, id: &NodeId) -> Option<Vec<NodeId>> {
        let mut path = Vec::new();
        if self.collect_path(id, &mut path) {
            path.reverse();
            Some(path)
        } else {
            None
        }
    }

    fn collect_path(&self, id: &NodeId, path: &mut Vec<NodeId>) -> bool {
        if self.id == *id || self.children.iter().any(|c| c.collect_path(id, path)) {
            path.push(self.id.clone());
            true
        } else {
            false
        }
    }

    /// Pre-order traversal over every node, collapsed subtrees included.
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder::new(self, false)
    }

    /// Pre-order traversal that does not descend into collapsed nodes.
    pub fn visible_pre_order(&self) -> PreOrder<'_> {
        PreOrder::new(self, true)
    }

    /// Union of the boxes of every visible node.
    pub fn tree_bounds(&self) -> Rect {
        self.visible_pre_order()
            .skip(1)
            .fold(self.bounds(), |acc, n| acc.union(n.bounds()))
    }
}
