// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactive navigation state: the current root and focus.

use arbor_tree::{NodeId, Tree, TreeError};
use kurbo::Rect;

use crate::assemble::assemble;
use crate::config::FanConfig;
use crate::diagram::Diagram;
use crate::style::{Detail, NodeStyle};

/// A user action on a placed node.
///
/// Hosts typically derive these from pointer input via
/// [`Diagram::hit_test`]: a click maps to [`Activation::Primary`] and a
/// double-click or context action to [`Activation::Secondary`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Activation {
    /// Focus the node; the diagram keeps its root.
    Primary(NodeId),
    /// Re-root the diagram at the node.
    Secondary(NodeId),
}

/// State carried between draws of one explorer view.
///
/// The tree itself is not owned; every operation borrows it, so hosts are free
/// to mutate the tree (toggle filters, add nodes) between calls. Stale handles
/// are reported as [`TreeError::UnknownNode`].
#[derive(Clone, Debug, PartialEq)]
pub struct Explorer {
    root: NodeId,
    focus: Option<NodeId>,
    area: Rect,
    config: FanConfig,
}

impl Explorer {
    /// Start exploring at `root` inside `area` with the default config.
    pub fn new(root: NodeId, area: Rect) -> Self {
        Self {
            root,
            focus: None,
            area,
            config: FanConfig::default(),
        }
    }

    /// Replace the layout config.
    #[must_use]
    pub fn with_config(mut self, config: FanConfig) -> Self {
        self.config = config;
        self
    }

    /// Current diagram root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Current focus, if any.
    pub fn focus(&self) -> Option<NodeId> {
        self.focus
    }

    /// Diagram area.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Resize the diagram area.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    /// Layout config.
    pub fn config(&self) -> &FanConfig {
        &self.config
    }

    /// Apply an activation.
    pub fn handle(&mut self, tree: &Tree, activation: Activation) -> Result<(), TreeError> {
        match activation {
            Activation::Primary(node) => self.on_activate(tree, node),
            Activation::Secondary(node) => self.on_activate_secondary(tree, node),
        }
    }

    /// Focus `node` without changing the root.
    pub fn on_activate(&mut self, tree: &Tree, node: NodeId) -> Result<(), TreeError> {
        if !tree.is_alive(node) {
            return Err(TreeError::UnknownNode(node));
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?node, "focus");
        self.focus = Some(node);
        Ok(())
    }

    /// Re-root the diagram at `node`. The focus is kept.
    pub fn on_activate_secondary(&mut self, tree: &Tree, node: NodeId) -> Result<(), TreeError> {
        if !tree.is_alive(node) {
            return Err(TreeError::UnknownNode(node));
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?node, "re-root");
        self.root = node;
        Ok(())
    }

    /// Re-root at the structural root of the current root.
    pub fn reset_root(&mut self, tree: &Tree) -> Result<(), TreeError> {
        let top = tree.root_of(self.root).ok_or(TreeError::UnknownNode(self.root))?;
        self.on_activate_secondary(tree, top)
    }

    /// Drop the focus.
    pub fn clear_focus(&mut self) {
        self.focus = None;
    }

    /// Assemble the diagram for the current state.
    pub fn diagram<S: NodeStyle + ?Sized>(
        &self,
        tree: &Tree,
        style: &S,
    ) -> Result<Diagram<S::Class>, TreeError> {
        assemble(tree, self.root, self.focus, style, self.area, &self.config)
    }

    /// Find the first node whose data contains `term` and focus it.
    ///
    /// The whole tree under the structural root is searched, not just the
    /// current view. When the hit lies outside the current root's subtree the
    /// view is re-rooted at the structural root so the focus stays visible.
    /// A miss leaves the state unchanged.
    pub fn search(
        &mut self,
        tree: &Tree,
        term: &str,
        allowed_keys: Option<&[&str]>,
    ) -> Result<Option<NodeId>, TreeError> {
        let top = tree.root_of(self.root).ok_or(TreeError::UnknownNode(self.root))?;
        let Some(hit) = tree.search(top, term, allowed_keys) else {
            return Ok(None);
        };
        if tree.root_distance(hit, Some(self.root)).is_err() {
            self.on_activate_secondary(tree, top)?;
        }
        self.on_activate(tree, hit)?;
        Ok(Some(hit))
    }

    /// Detail record for the focused node.
    pub fn detail<S: NodeStyle + ?Sized>(&self, tree: &Tree, style: &S) -> Option<Detail> {
        let focus = self.focus.filter(|&node| tree.is_alive(node))?;
        Some(Detail::new(tree, style, focus))
    }
}
