// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mind Map Edit: validated structural edits on mind map trees.
//!
//! [`Commands`] turns a tree snapshot and a request into a new, fully laid-out
//! snapshot, or into a [`Rejection`] explaining why nothing happened. The input
//! snapshot is never mutated, so a rejected command leaves the caller exactly
//! where it was and earlier snapshots held in an undo log stay intact.
//!
//! Placement is checked against two host-supplied collaborators:
//!
//! - [`TypeRules`]: per parent type, the allowed child types, per child type
//!   cardinality caps, and the set of fixed-first types that always sit at the
//!   front of a constrained parent.
//! - [`MoveGuard`]: a veto over moves that the table allows. Any
//!   `Fn(&Node, &Node) -> bool` closure works; [`AllowAll`] vetoes nothing.
//!
//! ## Example
//!
//! ```rust
//! use mindmap_edit::{AllowAll, Commands, NewNode, Rejection, TypeRules};
//! use mindmap_tree::{Layout, Node, NodeId};
//!
//! let layout: Layout = Layout::default();
//! let rules = TypeRules::new();
//! let commands = Commands::new(&layout, &rules, &AllowAll);
//!
//! let root = Node::new("r", "Root");
//! let added = commands.add(&root, None, NewNode::new("a", "Ideas")).unwrap();
//! assert_eq!(added.root.children.len(), 1);
//!
//! let a = NodeId::from("a");
//! let r = NodeId::from("r");
//! assert_eq!(
//!     commands.move_node(&added.root, &r, &a),
//!     Err(Rejection::Cycle { node: r.clone(), target: a.clone() }),
//! );
//! let deleted = commands.delete(&added.root, &a).unwrap();
//! assert_eq!(deleted.select, r);
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

mod commands;
mod rejection;
mod rules;

pub use commands::{Added, Commands, Deleted, Moved, NewNode, Toggled};
pub use rejection::Rejection;
pub use rules::{AllowAll, MoveGuard, TypeRule, TypeRules};
