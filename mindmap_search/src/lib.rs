// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mind Map Search: substring search over a mind map tree.
//!
//! - [`search`] scans a tree in pre-order and returns the matching node ids in
//!   document order plus the same ids as a highlight set.
//! - [`SearchScope`] decides whether collapsed subtrees are searched. The two
//!   node schemas differ here: [`SearchScope::for_schema`] maps the minimal
//!   schema to [`SearchScope::VisibleOnly`] and the extended schema to
//!   [`SearchScope::All`].
//! - [`SearchState`] keeps a term, its results, and a current-match cursor that
//!   wraps around in both directions.
//!
//! ## Minimal example
//!
//! ```rust
//! use mindmap_search::{SearchScope, SearchState};
//! use mindmap_tree::Node;
//!
//! let tree = Node::new("r", "Root").with_child(Node::new("b", "Book"));
//!
//! let mut state = SearchState::new();
//! state.set_term(Some(&tree), "OO", SearchScope::All);
//! assert_eq!(state.matches().len(), 2);
//! assert_eq!(state.current_id().map(|id| id.as_str()), Some("r"));
//!
//! state.next();
//! assert_eq!(state.current_id().map(|id| id.as_str()), Some("b"));
//! state.next();
//! assert_eq!(state.current_id().map(|id| id.as_str()), Some("r"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod index;
mod state;

pub use index::{SearchResult, SearchScope, search};
pub use state::SearchState;
