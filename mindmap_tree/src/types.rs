// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the node tree: identifiers, schema variants, and the extension fields.

use alloc::string::{String, ToString};
use core::fmt;

use serde_json::Value;

/// Identifier for a node in the tree.
///
/// Ids are opaque strings that stay stable for the lifetime of a node. Source
/// data may carry numeric ids; normalization stringifies them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    /// Create an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Which of the two node schemas a tree follows.
///
/// The minimal schema carries only text, children, and collapse state. The
/// extended schema adds a [`NodeExt`] to every node (type tag, priority, and a
/// style override). The two variants differ in more than data: see
/// `mindmap_search` for the collapsed-subtree rule.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Schema {
    /// Plain text nodes.
    #[default]
    Minimal,
    /// Typed nodes with priority and style.
    Extended,
}

/// Node category tag used by structural constraints.
///
/// The vocabulary is open: hosts define whichever types their constraint
/// table mentions. [`NodeType::default`] is `"topic"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeType(String);

impl NodeType {
    /// The type assigned when the source data names none.
    pub const DEFAULT: &'static str = "topic";

    /// Create a type tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the default type.
    pub fn is_default(&self) -> bool {
        self.0 == Self::DEFAULT
    }
}

impl Default for NodeType {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Node priority: `0` means unset, `1..=5` are levels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Priority(u8);

impl Priority {
    /// No priority.
    pub const NONE: Self = Self(0);
    /// Highest accepted level.
    pub const MAX_LEVEL: u8 = 5;

    /// Create a priority, or `None` if `level` is above [`Priority::MAX_LEVEL`].
    pub const fn new(level: u8) -> Option<Self> {
        if level <= Self::MAX_LEVEL {
            Some(Self(level))
        } else {
            None
        }
    }

    /// The numeric level (`0` when unset).
    pub const fn level(self) -> u8 {
        self.0
    }

    /// Whether a level is set.
    pub const fn is_set(self) -> bool {
        self.0 != 0
    }
}

/// Extension fields carried by nodes of the [`Schema::Extended`] variant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeExt {
    /// Category tag consulted by the constraint table.
    pub node_type: NodeType,
    /// Priority badge.
    pub priority: Priority,
    /// Opaque presentation override, passed through to the renderer untouched.
    pub style: Option<Value>,
}

impl NodeExt {
    /// Extension with the given type and default priority/style.
    pub fn typed(node_type: NodeType) -> Self {
        Self {
            node_type,
            ..Self::default()
        }
    }
}
