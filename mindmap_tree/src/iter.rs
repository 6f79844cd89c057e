// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth-first traversal.

use smallvec::SmallVec;

use crate::node::Node;

/// Pre-order iterator over a node and its descendants.
///
/// Created by [`Node::pre_order`] and [`Node::visible_pre_order`]. Children are
/// yielded in array order.
#[derive(Clone, Debug)]
pub struct PreOrder<'a> {
    stack: SmallVec<[&'a Node; 16]>,
    skip_collapsed: bool,
}

impl<'a> PreOrder<'a> {
    pub(crate) fn new(root: &'a Node, skip_collapsed: bool) -> Self {
        let mut stack = SmallVec::new();
        stack.push(root);
        Self {
            stack,
            skip_collapsed,
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if !(self.skip_collapsed && node.is_collapsed()) {
            self.stack.extend(node.children.iter().rev());
        }
        Some(node)
    }
}
