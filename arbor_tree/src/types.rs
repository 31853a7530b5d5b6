// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the hierarchy tree: node identifiers, payloads, and filters.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

/// Identifier for a node in a [`Tree`](crate::Tree).
///
/// Handles are generational: clearing the tree bumps its generation, so handles
/// taken before a [`Tree::clear`](crate::Tree::clear) are rejected afterwards
/// instead of silently aliasing new nodes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Position of the node in insertion order.
    pub const fn index(self) -> usize {
        self.idx()
    }
}

/// The inspectable payload of a node.
///
/// `key` is the stable, unique identifier used as the join key by renderers;
/// `name` is an optional human label; `data` is searched and shown in detail views.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeInfo {
    /// Unique identifier within a tree.
    pub key: String,
    /// Optional display name, independent of `key`.
    pub name: Option<String>,
    /// Opaque key/value payload.
    pub data: BTreeMap<String, String>,
}

impl NodeInfo {
    /// Create a payload with the given key and no name or data.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add one data entry, replacing an existing value for the same key.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// The display name if set, otherwise the key.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key)
    }

    /// Look up a data value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

/// A visibility predicate attached to a node.
///
/// A filter attached to a node is evaluated against that node and against every
/// node below it. Filters are cheap to clone and may be shared between nodes.
#[derive(Clone)]
pub struct Filter(Arc<dyn Fn(&NodeInfo) -> bool + Send + Sync>);

impl Filter {
    /// Wrap a predicate.
    pub fn new(predicate: impl Fn(&NodeInfo) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(predicate))
    }

    /// Hide the node with exactly this key (and, through traversal, its subtree).
    pub fn exclude_key(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(move |info| info.key != key)
    }

    /// Keep only nodes whose `data[key]` equals `value`.
    ///
    /// Nodes without the data key are rejected.
    pub fn data_equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        Self::new(move |info| info.get(&key) == Some(value.as_str()))
    }

    /// Evaluate the predicate.
    #[inline]
    pub fn test(&self, info: &NodeInfo) -> bool {
        (self.0)(info)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Filter").finish_non_exhaustive()
    }
}
