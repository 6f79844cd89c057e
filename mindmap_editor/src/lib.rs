// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mind Map Editor: the editing state machine of a mind map editor.
//!
//! This crate ties the tree, search and command crates into a pure reducer
//! with an undo log:
//!
//! - [`EditorState`]: one value holding the laid-out tree, the [`FocusState`]
//!   (selection and text-edit target as a single enum), the viewport, the
//!   read-only flag and the search state.
//! - [`Editor`]: host configuration (layout engine, type rules, move guard,
//!   schema variant). [`Editor::apply`] maps a state and an [`Action`] to the
//!   next state, reporting a [`Rejection`] and the [`Changes`] the renderer
//!   should redraw.
//! - [`History`]: past, present and future snapshots, owned by the caller.
//!   Structural actions are recorded; selection, search, viewport and mode
//!   changes only replace the present.
//!
//! Everything is synchronous and single-threaded. The caller owns the
//! history and feeds it actions one at a time.
//!
//! ## Minimal example
//!
//! ```rust
//! use mindmap_editor::{Action, Editor, FocusState, History};
//! use mindmap_tree::Node;
//!
//! let editor: Editor = Editor::default();
//! let mut history = History::default();
//! history.load(&editor, &Node::new("root", "Root"));
//!
//! history
//!     .dispatch(&editor, &Action::Add { parent: None, text: "Idea".into(), node_type: None })
//!     .unwrap();
//! let present = history.present();
//! assert_eq!(present.root.as_ref().unwrap().children.len(), 1);
//! assert!(matches!(present.focus, FocusState::Selected(_)));
//!
//! history.undo(&editor);
//! assert!(history.present().root.as_ref().unwrap().children.is_empty());
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

mod action;
mod editor;
mod focus;
mod history;
mod state;

pub use action::{Action, Changes, Navigation};
pub use editor::{Editor, Reduced};
pub use focus::FocusState;
pub use history::History;
pub use mindmap_edit::Rejection;
pub use state::{EditorState, Viewport};
