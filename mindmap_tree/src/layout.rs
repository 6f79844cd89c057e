// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Branch layout: assigns every node its box size and world position.
//!
//! ## Overview
//!
//! The tree fans out left to right. Each node's children form a column placed
//! `horizontal_spacing` to the right of the node, stacked top to bottom in
//! array order with `vertical_spacing` between their *branch* boxes, so a
//! large subtree pushes the following sibling down by its full height.
//!
//! ## Passes
//!
//! - Measure (post-order): compute the own box size of every node from its
//!   text, then its branch height: the own height for leaves and collapsed
//!   nodes, otherwise `max(own, column)` where `column` is the sum of the
//!   children's branch heights plus the gaps between them.
//! - Place (pre-order): starting from the root anchor, put each node and its
//!   column. Whichever of the two is taller sits at the anchor; the shorter
//!   one is centered against it.
//!
//! A change anywhere can shift nodes anywhere below it, so a pass always
//! covers the whole tree.

use kurbo::{Point, Size};

use crate::measure::{MonospaceMeasure, TextMeasure, wrap};
use crate::node::Node;

/// Spacing and sizing parameters for [`Layout`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Gap between a node's right edge and its children column.
    pub horizontal_spacing: f64,
    /// Gap between consecutive sibling branches.
    pub vertical_spacing: f64,
    /// World x of the root's left edge. The root's branch starts at y = 0.
    pub root_x: f64,
    /// Horizontal padding inside a box, on each side.
    pub padding_x: f64,
    /// Vertical padding inside a box, on each side.
    pub padding_y: f64,
    /// Narrowest box.
    pub min_width: f64,
    /// Widest box; longer text wraps.
    pub max_width: f64,
    /// Room reserved for a node-type badge (extended nodes of a non-default type).
    pub type_badge_width: f64,
    /// Room reserved for a priority badge (extended nodes with a priority).
    pub priority_badge_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 48.0,
            vertical_spacing: 16.0,
            root_x: 40.0,
            padding_x: 12.0,
            padding_y: 8.0,
            min_width: 64.0,
            max_width: 240.0,
            type_badge_width: 28.0,
            priority_badge_width: 20.0,
        }
    }
}

/// The layout engine.
///
/// The type parameter `M` chooses how label text is measured. It defaults to
/// [`MonospaceMeasure`], so most callers can use `Layout::default()`.
///
/// ## Example
///
/// ```rust
/// use mindmap_tree::{Layout, Node};
///
/// let tree = Node::new("root", "Root").with_child(Node::new("a", "Child"));
/// let layout: Layout = Layout::default();
/// let laid_out = layout.apply(&tree);
///
/// let root = &laid_out;
/// let child = &laid_out.children[0];
/// assert!(child.position().x > root.position().x + root.width());
/// // The input snapshot is left untouched.
/// assert_eq!(tree.width(), 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct Layout<M = MonospaceMeasure> {
    /// Spacing and sizing parameters.
    pub config: LayoutConfig,
    /// Text measurement backend.
    pub measure: M,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(LayoutConfig::default(), MonospaceMeasure::default())
    }
}

impl<M: TextMeasure> Layout<M> {
    /// Create a layout engine from a configuration and a text measurer.
    pub fn new(config: LayoutConfig, measure: M) -> Self {
        Self { config, measure }
    }

    /// Lay out a copy of `root` and return it. The input is never mutated.
    #[must_use]
    pub fn apply(&self, root: &Node) -> Node {
        let mut copy = root.clone();
        self.apply_in_place(&mut copy);
        copy
    }

    /// Lay out an optional tree. `None` has nothing to lay out and stays `None`.
    #[must_use]
    pub fn apply_opt(&self, root: Option<&Node>) -> Option<Node> {
        root.map(|r| self.apply(r))
    }

    /// Lay out a tree the caller already owns privately.
    pub fn apply_in_place(&self, root: &mut Node) {
        self.measure_branch(root);
        self.place(root, self.config.root_x, 0.0);
        tracing::trace!(
            root = %root.id,
            height = root.branch_height,
            "layout pass"
        );
    }

    /// Own box size of a single node, ignoring its children.
    pub fn box_size(&self, node: &Node) -> Size {
        let c = &self.config;
        let chrome = 2.0 * c.padding_x + self.badge_width(node);
        let budget = (c.max_width - chrome).max(0.0);
        let lines = wrap(&self.measure, &node.text, budget);
        let text_width = lines.iter().fold(0.0_f64, |acc, l| acc.max(l.width));
        let width = (text_width + chrome).max(c.min_width).min(c.max_width);

        #[allow(
            clippy::cast_precision_loss,
            reason = "Line counts are tiny."
        )]
        let line_count = lines.len().max(1) as f64;
        let height = line_count * self.measure.line_height() + 2.0 * c.padding_y;
        Size::new(width, height)
    }

    fn badge_width(&self, node: &Node) -> f64 {
        let Some(ext) = &node.ext else {
            return 0.0;
        };
        let mut width = 0.0;
        if !ext.node_type.is_default() {
            width += self.config.type_badge_width;
        }
        if ext.priority.is_set() {
            width += self.config.priority_badge_width;
        }
        width
    }

    /// Height of the column formed by `children`, gaps included.
    fn column_height(&self, children: &[Node]) -> f64 {
        if children.is_empty() {
            return 0.0;
        }
        #[allow(
            clippy::cast_precision_loss,
            reason = "Sibling counts are far below 2^52."
        )]
        let gaps = (children.len() - 1) as f64;
        children.iter().map(|c| c.branch_height).sum::<f64>() + gaps * self.config.vertical_spacing
    }

    fn measure_branch(&self, node: &mut Node) {
        node.size = self.box_size(node);
        // Hidden descendants are measured too so every node carries fresh geometry.
        for child in &mut node.children {
            self.measure_branch(child);
        }
        if node.collapsed {
            node.children_count = node.count_descendants();
        }
        let own = node.size.height;
        node.branch_height = if node.visible_children().is_empty() {
            own
        } else {
            own.max(self.column_height(&node.children))
        };
    }

    fn place(&self, node: &mut Node, x: f64, top: f64) {
        if node.visible_children().is_empty() {
            node.position = Point::new(x, top);
            let origin = node.position;
            park(&mut node.children, origin);
            return;
        }

        let own = node.size.height;
        let column = self.column_height(&node.children);
        let mut cursor = if own >= column {
            node.position = Point::new(x, top);
            top + (own - column) / 2.0
        } else {
            node.position = Point::new(x, top + (column - own) / 2.0);
            top
        };

        let child_x = x + node.size.width + self.config.horizontal_spacing;
        let spacing = self.config.vertical_spacing;
        for child in &mut node.children {
            self.place(child, child_x, cursor);
            cursor += child.branch_height + spacing;
        }
    }
}

/// Move hidden descendants onto their collapsed ancestor's origin.
fn park(children: &mut [Node], origin: Point) {
    for child in children {
        child.position = origin;
        park(&mut child.children, origin);
    }
}
