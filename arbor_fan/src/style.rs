// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node presentation hooks supplied by the host.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use arbor_tree::{NodeId, Tree};

/// Presentation hooks consulted while building a diagram.
///
/// `Class` is the host's color classification. Adjacent siblings with the same
/// parent and an equal class may be merged into one span when a level overflows,
/// so the class should capture everything that must stay visually distinct.
pub trait NodeStyle {
    /// Color classification of a node.
    type Class: Clone + PartialEq;

    /// Classify a node.
    fn classify(&self, tree: &Tree, node: NodeId) -> Self::Class;

    /// Text shown next to a node. Defaults to the display name, else the key.
    fn label(&self, tree: &Tree, node: NodeId) -> String {
        tree.info(node)
            .map(|info| info.label().to_string())
            .unwrap_or_default()
    }

    /// Fields shown in a detail view. Defaults to the node's data entries.
    fn describe(&self, tree: &Tree, node: NodeId) -> Vec<(String, String)> {
        tree.info(node)
            .map(|info| {
                info.data
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A style that classifies nodes by one data value.
///
/// With no class key, every node shares the class `None`.
#[derive(Clone, Debug, Default)]
pub struct DefaultStyle {
    class_key: Option<String>,
}

impl DefaultStyle {
    /// A style where every node has the same class.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify nodes by `data[key]`; nodes without the key get `None`.
    pub fn by_data_key(key: impl Into<String>) -> Self {
        Self {
            class_key: Some(key.into()),
        }
    }
}

impl NodeStyle for DefaultStyle {
    type Class = Option<String>;

    fn classify(&self, tree: &Tree, node: NodeId) -> Self::Class {
        let key = self.class_key.as_deref()?;
        tree.info(node)?.get(key).map(ToString::to_string)
    }
}

/// What a detail panel shows for the focused node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Detail {
    /// The described node.
    pub node: NodeId,
    /// [`NodeStyle::label`] of the node.
    pub label: String,
    /// [`NodeStyle::describe`] of the node.
    pub fields: Vec<(String, String)>,
}

impl Detail {
    /// Build the detail record for `node`.
    pub fn new<S: NodeStyle + ?Sized>(tree: &Tree, style: &S, node: NodeId) -> Self {
        Self {
            node,
            label: style.label(tree, node),
            fields: style.describe(tree, node),
        }
    }
}
