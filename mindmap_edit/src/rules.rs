// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-type structural constraints and the move guard seam.

use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use mindmap_tree::{Node, NodeId, NodeType};

use crate::rejection::Rejection;

/// Constraints on the children of one parent type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeRule {
    /// Child types allowed under this parent. `None` allows any type.
    pub allowed_children: Option<Vec<NodeType>>,
    /// Upper bound on the number of children of a given type.
    pub max_children: HashMap<NodeType, usize>,
}

/// The type-constraint table.
///
/// The table is configuration owned by the host: the editor consults it but
/// never changes it. A parent is *constrained* when it is an extended node
/// whose type has a [`TypeRule`]. Unconstrained parents accept any child, and
/// nodes of the minimal schema are never constrained. A child without an
/// extension counts as [`NodeType::default`].
///
/// ## Example
///
/// ```rust
/// use mindmap_edit::TypeRules;
/// use mindmap_tree::NodeType;
///
/// let rules = TypeRules::new()
///     .allow("goal", ["summary", "task"])
///     .limit("goal", "summary", 1)
///     .fixed_first("summary");
/// assert!(rules.rule(&NodeType::new("goal")).is_some());
/// assert!(rules.is_fixed_first(&NodeType::new("summary")));
/// ```
#[derive(Clone, Debug, Default)]
pub struct TypeRules {
    rules: HashMap<NodeType, TypeRule>,
    fixed_first: HashSet<NodeType>,
}

impl TypeRules {
    /// An empty table; every placement is legal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict `parent` to the listed child types.
    #[must_use]
    pub fn allow<I, T>(mut self, parent: impl Into<NodeType>, children: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeType>,
    {
        let rule = self.rules.entry(parent.into()).or_default();
        rule.allowed_children = Some(children.into_iter().map(Into::into).collect());
        self
    }

    /// Cap how many `child` nodes a `parent` node may hold.
    #[must_use]
    pub fn limit(
        mut self,
        parent: impl Into<NodeType>,
        child: impl Into<NodeType>,
        max: usize,
    ) -> Self {
        let rule = self.rules.entry(parent.into()).or_default();
        rule.max_children.insert(child.into(), max);
        self
    }

    /// Mark `child` as a type that always sits first under a constrained parent.
    #[must_use]
    pub fn fixed_first(mut self, child: impl Into<NodeType>) -> Self {
        self.fixed_first.insert(child.into());
        self
    }

    /// The rule for a parent type, if any.
    pub fn rule(&self, parent: &NodeType) -> Option<&TypeRule> {
        self.rules.get(parent)
    }

    /// Whether `child` is a fixed-first type.
    pub fn is_fixed_first(&self, child: &NodeType) -> bool {
        self.fixed_first.contains(child)
    }

    fn rule_for(&self, parent: &Node) -> Option<(&NodeType, &TypeRule)> {
        self.rules.get_key_value(parent.node_type()?)
    }

    /// Whether `parent` is subject to a rule.
    pub fn is_constrained(&self, parent: &Node) -> bool {
        self.rule_for(parent).is_some()
    }

    /// Check that a child of `child_type` may be placed under `parent`.
    ///
    /// `moving` names a node that is being re-inserted and must not count
    /// against the cap (it may already be one of `parent`'s children).
    pub fn check_placement(
        &self,
        parent: &Node,
        child_type: &NodeType,
        moving: Option<&NodeId>,
    ) -> Result<(), Rejection> {
        let Some((parent_type, rule)) = self.rule_for(parent) else {
            return Ok(());
        };
        if let Some(allowed) = &rule.allowed_children
            && !allowed.contains(child_type)
        {
            return Err(Rejection::TypeNotAllowed {
                parent: parent_type.clone(),
                child: child_type.clone(),
            });
        }
        if let Some(&max) = rule.max_children.get(child_type) {
            let present = parent
                .children
                .iter()
                .filter(|c| Some(&c.id) != moving && type_of(c) == *child_type)
                .count();
            if present >= max {
                return Err(Rejection::CardinalityExceeded {
                    parent: parent_type.clone(),
                    child: child_type.clone(),
                    max,
                });
            }
        }
        Ok(())
    }

    /// Index at which a new child of `child_type` goes in `parent.children`.
    ///
    /// Fixed-first types go to the front of constrained parents; everything
    /// else is appended.
    pub fn insert_index(&self, parent: &Node, child_type: &NodeType) -> usize {
        if self.is_fixed_first(child_type) && self.is_constrained(parent) {
            0
        } else {
            parent.children.len()
        }
    }
}

/// The type a node is checked as: its tag, or the default for minimal nodes.
pub(crate) fn type_of(node: &Node) -> NodeType {
    node.node_type().cloned().unwrap_or_default()
}

/// Host-supplied veto over moves that the constraint table allows.
///
/// Any `Fn(&Node, &Node) -> bool` closure is a guard; it receives the node
/// being moved and its would-be parent.
pub trait MoveGuard {
    /// Whether `node` may be re-parented under `new_parent`.
    fn allow_move(&self, node: &Node, new_parent: &Node) -> bool;
}

impl<F> MoveGuard for F
where
    F: Fn(&Node, &Node) -> bool,
{
    fn allow_move(&self, node: &Node, new_parent: &Node) -> bool {
        self(node, new_parent)
    }
}

/// A guard that allows every move.
#[derive(Copy, Clone, Debug, Default)]
pub struct AllowAll;

impl MoveGuard for AllowAll {
    fn allow_move(&self, _: &Node, _: &Node) -> bool {
        true
    }
}
