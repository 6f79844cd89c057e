// Copyright 2025 the Mind Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion from raw, loosely shaped tree data into [`Node`]s.
//!
//! Source data is a JSON-like object per node with an `id` (string or
//! integer), a label under `text`, `name`, or `label`, and optional
//! `children`. Geometry is never read from the source; layout recomputes it.
//!
//! A child that cannot be parsed is dropped together with its subtree. No
//! placeholder takes its place. Only a wholly invalid root is replaced, and
//! only by [`normalize`].

use alloc::string::{String, ToString};

use hashbrown::HashSet;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::node::Node;
use crate::types::{NodeExt, NodeId, NodeType, Priority, Schema};

/// Id of the placeholder root produced for unusable input.
pub const FALLBACK_ROOT_ID: &str = "root";
/// Text of the placeholder root produced for unusable input.
pub const FALLBACK_ROOT_TEXT: &str = "Root";

/// Why a source node could not be turned into a [`Node`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// The value is not an object.
    #[error("node is not an object")]
    NotAnObject,
    /// No usable `id` field.
    #[error("node has no usable id")]
    MissingId,
    /// None of `text`, `name`, `label` holds a usable value.
    #[error("node {0} has no text, name or label")]
    MissingText(NodeId),
    /// The id was already used earlier in the document.
    #[error("duplicate node id {0}")]
    DuplicateId(NodeId),
}

/// Normalize source data, failing if the root itself is unusable.
///
/// Malformed descendants are dropped and logged; they do not fail the call.
pub fn try_normalize(value: &Value, schema: Schema) -> Result<Node, NormalizeError> {
    let mut normalizer = Normalizer {
        schema,
        seen: HashSet::new(),
    };
    normalizer.node(value)
}

/// Normalize source data, substituting a placeholder root when the root is unusable.
pub fn normalize(value: &Value, schema: Schema) -> Node {
    match try_normalize(value, schema) {
        Ok(root) => root,
        Err(error) => {
            tracing::warn!(%error, "unusable root, substituting placeholder");
            let root = Node::new(FALLBACK_ROOT_ID, FALLBACK_ROOT_TEXT);
            match schema {
                Schema::Minimal => root,
                Schema::Extended => root.with_ext(NodeExt::default()),
            }
        }
    }
}

struct Normalizer {
    schema: Schema,
    seen: HashSet<NodeId>,
}

impl Normalizer {
    fn node(&mut self, value: &Value) -> Result<Node, NormalizeError> {
        let obj = value.as_object().ok_or(NormalizeError::NotAnObject)?;
        let id = read_id(obj).ok_or(NormalizeError::MissingId)?;
        let text = read_text(obj).ok_or_else(|| NormalizeError::MissingText(id.clone()))?;
        if !self.seen.insert(id.clone()) {
            return Err(NormalizeError::DuplicateId(id));
        }

        let mut node = Node::new(id, text);
        node.color = obj.get("color").and_then(Value::as_str).map(ToString::to_string);
        if self.schema == Schema::Extended {
            node.ext = Some(read_ext(obj));
        }

        if let Some(children) = obj.get("children").and_then(Value::as_array) {
            for child in children {
                match self.node(child) {
                    Ok(child) => node.children.push(child),
                    Err(error) => {
                        tracing::warn!(parent = %node.id, %error, "dropping malformed subtree");
                    }
                }
            }
        }

        let collapsed = ["isCollapsed", "collapsed"]
            .iter()
            .find_map(|key| obj.get(*key).and_then(Value::as_bool))
            .unwrap_or(false);
        // Only a node with children can be collapsed.
        node.set_collapsed(collapsed && !node.children.is_empty());
        Ok(node)
    }
}

fn read_id(obj: &Map<String, Value>) -> Option<NodeId> {
    match obj.get("id")? {
        Value::String(s) if !s.is_empty() => Some(NodeId::new(s.as_str())),
        Value::Number(n) => Some(NodeId::new(n.to_string())),
        _ => None,
    }
}

fn read_text(obj: &Map<String, Value>) -> Option<String> {
    ["text", "name", "label"]
        .iter()
        .find_map(|key| match obj.get(*key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

fn read_ext(obj: &Map<String, Value>) -> NodeExt {
    let node_type = ["nodeType", "type"]
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str))
        .filter(|tag| !tag.is_empty())
        .map(NodeType::new)
        .unwrap_or_default();
    let priority = obj
        .get("priority")
        .and_then(Value::as_u64)
        .and_then(|p| u8::try_from(p).ok())
        .and_then(Priority::new)
        .unwrap_or_default();
    let style = obj.get("style").filter(|s| s.is_object()).cloned();
    NodeExt {
        node_type,
        priority,
        style,
    }
}
