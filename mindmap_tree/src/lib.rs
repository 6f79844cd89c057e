// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mind Map Tree: the node model and branch layout engine of a mind map editor.
//!
//! A mind map is a single root [`Node`] with recursively nested, ordered
//! children. This crate provides:
//!
//! - [`Node`]: the tree entity. A tree is just its root; `Clone` is a deep
//!   copy, and every lookup ([`Node::find`], [`Node::find_with_parent`],
//!   [`Node::path_to`]) walks from the root in pre-order.
//! - [`Layout`]: the layout engine. It sizes each box from its label via a
//!   [`TextMeasure`] and positions the whole tree left to right. Node geometry
//!   has no public setters, so a tree's geometry always comes from a layout pass.
//! - [`normalize`] / [`try_normalize`]: the input boundary, turning loosely
//!   shaped JSON-like data into nodes with defaults filled in and malformed
//!   subtrees dropped.
//! - [`Schema`]: the two node schema variants. Extended trees carry a
//!   [`NodeExt`] (type tag, [`Priority`], style override) on every node.
//!
//! ## Minimal example
//!
//! ```rust
//! use mindmap_tree::{Layout, Node, NodeId};
//!
//! let tree = Node::new("root", "Root")
//!     .with_child(Node::new("a", "Ideas").with_child(Node::new("a1", "More")))
//!     .with_child(Node::new("b", "Tasks"));
//!
//! let layout: Layout = Layout::default();
//! let tree = layout.apply(&tree);
//!
//! let found = tree.find_with_parent(&NodeId::from("a1")).unwrap();
//! assert_eq!(found.parent.unwrap().text, "Ideas");
//! assert_eq!(tree.count_descendants(), 3);
//! assert!(found.node.position().x > tree.position().x);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod iter;
mod layout;
mod measure;
mod node;
mod normalize;
mod types;

pub use iter::PreOrder;
pub use layout::{Layout, LayoutConfig};
pub use measure::{MonospaceMeasure, TextMeasure};
pub use node::{Located, Node};
pub use normalize::{
    FALLBACK_ROOT_ID, FALLBACK_ROOT_TEXT, NormalizeError, normalize, try_normalize,
};
pub use types::{NodeExt, NodeId, NodeType, Priority, Schema};
