// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, edits, filtered queries.

use alloc::{string::String, vec, vec::Vec};
use core::convert::Infallible;
use core::ops::ControlFlow;

use hashbrown::HashMap;

use crate::error::TreeError;
use crate::filter::FilterChain;
use crate::types::{Filter, NodeId, NodeInfo};

/// An arena of hierarchy nodes.
///
/// A tree may hold several disconnected hierarchies; each node without a parent
/// is a structural root. Every derived query ([`Tree::children`],
/// [`Tree::descendants`], [`Tree::level_nodes`], [`Tree::node_count`],
/// [`Tree::max_depth`], [`Tree::dft`]) only sees **included** nodes: nodes for
/// which every filter attached to them or to one of their ancestors returns `true`.
/// A node that fails its chain hides its whole subtree from those queries while
/// staying structurally present ([`Tree::children_of`], [`Tree::parent_of`]).
///
/// Nothing is cached; each query recomputes from the current structure and
/// filters, so edits never need invalidation.
///
/// ## Example
///
/// ```rust
/// use arbor_tree::{Filter, NodeInfo, Tree};
///
/// let mut tree = Tree::new();
/// let root = tree.insert(NodeInfo::new("root")).unwrap();
/// let a = tree.insert_child(root, NodeInfo::new("A")).unwrap();
/// let b = tree.insert_child(root, NodeInfo::new("B")).unwrap();
/// tree.insert_child(a, NodeInfo::new("A1")).unwrap();
///
/// assert_eq!(tree.node_count(root, true), 4);
///
/// // Hiding `A` also hides everything below it.
/// tree.set_filters(root, [Filter::exclude_key("A")]).unwrap();
/// assert_eq!(tree.children(root), vec![b]);
/// assert_eq!(tree.node_count(root, true), 2);
/// ```
pub struct Tree {
    nodes: Vec<Node>,
    keys: HashMap<String, NodeId>,
    generation: u32,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let roots = self.nodes.iter().filter(|n| n.parent.is_none()).count();
        let filtered = self.nodes.iter().filter(|n| !n.filters.is_empty()).count();
        f.debug_struct("Tree")
            .field("nodes", &self.nodes.len())
            .field("roots", &roots)
            .field("filtered_nodes", &filtered)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Node {
    info: NodeInfo,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    filters: Vec<Filter>,
}

impl Node {
    fn new(info: NodeInfo) -> Self {
        Self {
            info,
            parent: None,
            children: Vec::new(),
            filters: Vec::new(),
        }
    }
}

/// What a walk does after visiting a node.
enum Step<B, S> {
    /// Visit the children with this state.
    Descend(S),
    /// Skip the node's subtree.
    Prune,
    /// End the walk.
    Stop(B),
}

impl Tree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            keys: HashMap::new(),
            generation: 1,
        }
    }

    /// Drop every node. Handles from before the call become stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.keys.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Number of nodes, included or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true if `id` refers to a node of this tree.
    pub fn is_alive(&self, id: NodeId) -> bool {
        id.1 == self.generation && id.idx() < self.nodes.len()
    }

    /// Insert a detached node. It is a structural root until linked with
    /// [`Tree::add_child`].
    pub fn insert(&mut self, info: NodeInfo) -> Result<NodeId, TreeError> {
        if self.keys.contains_key(&info.key) {
            return Err(TreeError::DuplicateKey(info.key));
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let id = NodeId::new(self.nodes.len() as u32, self.generation);
        self.keys.insert(info.key.clone(), id);
        self.nodes.push(Node::new(info));
        Ok(id)
    }

    /// Insert a node as the last child of `parent`.
    pub fn insert_child(&mut self, parent: NodeId, info: NodeInfo) -> Result<NodeId, TreeError> {
        self.check(parent)?;
        let id = self.insert(info)?;
        self.link_parent(id, parent);
        Ok(id)
    }

    /// Append `child` to the children of `parent`.
    ///
    /// A child that already has a parent is moved. Fails with
    /// [`TreeError::Cycle`] if `child` is `parent` or one of its ancestors.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.check(parent)?;
        self.check(child)?;
        if child == parent || self.is_ancestor_of(child, parent) {
            #[cfg(feature = "tracing")]
            tracing::warn!(?parent, ?child, "rejected link that would create a cycle");
            return Err(TreeError::Cycle { parent, child });
        }
        if let Some(old) = self.node(child).parent {
            self.unlink_parent(child, old);
        }
        self.link_parent(child, parent);
        Ok(())
    }

    /// Replace the filters attached directly to `id`. Ancestors are untouched.
    pub fn set_filters(
        &mut self,
        id: NodeId,
        filters: impl IntoIterator<Item = Filter>,
    ) -> Result<(), TreeError> {
        self.check(id)?;
        self.node_mut(id).filters = filters.into_iter().collect();
        Ok(())
    }

    /// Filters attached directly to `id`, or an empty slice if `id` is stale.
    pub fn filters(&self, id: NodeId) -> &[Filter] {
        if !self.is_alive(id) {
            return &[];
        }
        &self.node(id).filters
    }

    /// Payload of a live node.
    pub fn info(&self, id: NodeId) -> Option<&NodeInfo> {
        self.is_alive(id).then(|| &self.node(id).info)
    }

    /// Set or clear the display name.
    pub fn set_name(&mut self, id: NodeId, name: Option<String>) -> Result<(), TreeError> {
        self.check(id)?;
        self.node_mut(id).info.name = name;
        Ok(())
    }

    /// Set one data entry, returning the previous value.
    pub fn set_data(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>, TreeError> {
        self.check(id)?;
        Ok(self.node_mut(id).info.data.insert(key.into(), value.into()))
    }

    /// Find a node by its key.
    pub fn find(&self, key: &str) -> Option<NodeId> {
        self.keys.get(key).copied()
    }

    /// Returns the parent of a node, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        if !self.is_alive(id) {
            return None;
        }
        self.node(id).parent
    }

    /// Structural children of a node, ignoring filters. Empty for stale ids.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        if !self.is_alive(id) {
            return &[];
        }
        &self.node(id).children
    }

    /// Iterate the structural roots in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(i, _)| {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "NodeId uses 32-bit indices by design."
                )]
                NodeId::new(i as u32, self.generation)
            })
    }

    /// The structural root above `id` (or `id` itself).
    pub fn root_of(&self, id: NodeId) -> Option<NodeId> {
        if !self.is_alive(id) {
            return None;
        }
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            current = parent;
        }
        Some(current)
    }

    /// Structural ancestors of `id`, ordered from the root down, excluding `id`.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut ancestors = Vec::new();
        let mut current = self.parent_of(id);
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.node(parent).parent;
        }
        ancestors.reverse();
        ancestors
    }

    /// Number of parent hops from `id` up to `relative_root`.
    ///
    /// `relative_root` defaults to the structural root. Fails with
    /// [`TreeError::NotAnAncestor`] if `relative_root` is neither `id` nor one
    /// of its ancestors. Filters are not consulted.
    pub fn root_distance(
        &self,
        id: NodeId,
        relative_root: Option<NodeId>,
    ) -> Result<usize, TreeError> {
        self.check(id)?;
        if let Some(root) = relative_root {
            self.check(root)?;
        }
        let mut distance = 0;
        let mut current = id;
        loop {
            if Some(current) == relative_root {
                return Ok(distance);
            }
            match self.node(current).parent {
                Some(parent) => {
                    distance += 1;
                    current = parent;
                }
                None => {
                    return match relative_root {
                        None => Ok(distance),
                        Some(root) => Err(TreeError::NotAnAncestor { node: id, root }),
                    };
                }
            }
        }
    }

    /// Whether every filter on `id` and its ancestors accepts `id`.
    ///
    /// Always walks to the structural root; a re-rooted view filters exactly like
    /// the full tree. Stale ids are not included.
    pub fn is_included(&self, id: NodeId) -> bool {
        self.is_alive(id) && self.chain_of(id).admits(&self.node(id).info)
    }

    /// Included direct children, in insertion order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        if !self.is_alive(id) {
            return Vec::new();
        }
        let chain = self.chain_of(id);
        self.node(id)
            .children
            .iter()
            .copied()
            .filter(|&child| {
                let node = self.node(child);
                chain.extended(&node.filters).admits(&node.info)
            })
            .collect()
    }

    /// Every included node below `id`, in pre-order. `id` itself is not listed.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk(id, (), |node, ()| {
            if node != id {
                out.push(node);
            }
            Step::<Infallible, ()>::Descend(())
        });
        out
    }

    /// Included nodes exactly `depth` hops below `id`, in pre-order.
    ///
    /// A depth of zero yields `[id]` when `id` is included.
    pub fn descendants_at_depth(&self, id: NodeId, depth: usize) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk(id, 0_usize, |node, d| {
            if d == depth {
                out.push(node);
                Step::<Infallible, usize>::Prune
            } else {
                Step::Descend(d + 1)
            }
        });
        out
    }

    /// Included nodes at the same distance from the root as `id`.
    ///
    /// The root is `relative_root`, or the structural root of `id` when `None`.
    pub fn level_nodes(
        &self,
        id: NodeId,
        relative_root: Option<NodeId>,
    ) -> Result<Vec<NodeId>, TreeError> {
        let root = match relative_root {
            Some(root) => root,
            None => self.root_of(id).ok_or(TreeError::UnknownNode(id))?,
        };
        let distance = self.root_distance(id, Some(root))?;
        Ok(self.descendants_at_depth(root, distance))
    }

    /// Height of the included subtree under `id`: `0` for a leaf.
    pub fn max_depth(&self, id: NodeId) -> usize {
        let mut max = 0;
        self.walk(id, 0_usize, |_, depth| {
            max = max.max(depth);
            Step::<Infallible, usize>::Descend(depth + 1)
        });
        max
    }

    /// Number of included nodes below `id`, plus `id` itself if `include_self`.
    ///
    /// Returns `0` when `id` is not included.
    pub fn node_count(&self, id: NodeId, include_self: bool) -> usize {
        let mut count = 0;
        self.walk(id, (), |_, ()| {
            count += 1;
            Step::<Infallible, ()>::Descend(())
        });
        match count {
            0 => 0,
            n if include_self => n,
            n => n - 1,
        }
    }

    /// Pre-order depth-first traversal over included nodes, starting at `start`.
    ///
    /// The visitor receives each node with the state produced by its parent's
    /// visit (`state` for `start`). Returning [`ControlFlow::Continue`] threads the
    /// new state to the node's children; [`ControlFlow::Break`] ends the walk and
    /// its value is returned. Excluded nodes and their subtrees are never visited,
    /// and nothing is visited if `start` itself is excluded.
    pub fn dft<S, B, F>(&self, start: NodeId, state: S, mut visit: F) -> Option<B>
    where
        S: Clone,
        F: FnMut(NodeId, S) -> ControlFlow<B, S>,
    {
        self.walk(start, state, |id, state| match visit(id, state) {
            ControlFlow::Continue(next) => Step::Descend(next),
            ControlFlow::Break(value) => Step::Stop(value),
        })
    }

    // --- internals ---

    fn walk<S, B, F>(&self, start: NodeId, state: S, mut visit: F) -> Option<B>
    where
        S: Clone,
        F: FnMut(NodeId, S) -> Step<B, S>,
    {
        if !self.is_alive(start) {
            return None;
        }
        let mut stack = vec![(start, self.inherited_chain(start), state)];
        while let Some((id, inherited, state)) = stack.pop() {
            let node = self.node(id);
            let chain = inherited.extended(&node.filters);
            if !chain.admits(&node.info) {
                continue;
            }
            match visit(id, state) {
                Step::Descend(next) => {
                    // Reverse so children pop in insertion order.
                    for &child in node.children.iter().rev() {
                        stack.push((child, chain.clone(), next.clone()));
                    }
                }
                Step::Prune => {}
                Step::Stop(value) => return Some(value),
            }
        }
        None
    }

    /// Filters of every ancestor of `id`, root first.
    fn inherited_chain(&self, id: NodeId) -> FilterChain<'_> {
        self.ancestors(id)
            .into_iter()
            .fold(FilterChain::new(), |chain, ancestor| {
                chain.extended(&self.node(ancestor).filters)
            })
    }

    /// The full chain that decides whether `id` is included.
    fn chain_of(&self, id: NodeId) -> FilterChain<'_> {
        self.inherited_chain(id).extended(&self.node(id).filters)
    }

    fn is_ancestor_of(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        let mut current = self.node(descendant).parent;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.node(parent).parent;
        }
        false
    }

    fn check(&self, id: NodeId) -> Result<(), TreeError> {
        if self.is_alive(id) {
            Ok(())
        } else {
            Err(TreeError::UnknownNode(id))
        }
    }

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.idx()]
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.idx()]
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    /// `root → {A, B}`, `A → {A1, A2}`.
    fn sample() -> (Tree, [NodeId; 5]) {
        let mut tree = Tree::new();
        let root = tree.insert(NodeInfo::new("root")).unwrap();
        let a = tree.insert_child(root, NodeInfo::new("A")).unwrap();
        let b = tree.insert_child(root, NodeInfo::new("B")).unwrap();
        let a1 = tree.insert_child(a, NodeInfo::new("A1")).unwrap();
        let a2 = tree.insert_child(a, NodeInfo::new("A2")).unwrap();
        (tree, [root, a, b, a1, a2])
    }

    #[test]
    fn unfiltered_queries() {
        let (tree, [root, a, b, a1, a2]) = sample();
        assert_eq!(tree.max_depth(root), 2);
        assert_eq!(tree.max_depth(a1), 0);
        assert_eq!(tree.node_count(root, true), 5);
        assert_eq!(tree.node_count(root, false), 4);
        assert_eq!(tree.root_distance(a, None), Ok(1));
        assert_eq!(tree.root_distance(root, Some(root)), Ok(0));
        assert_eq!(tree.level_nodes(a1, None).unwrap(), vec![a1, a2]);
        assert_eq!(tree.level_nodes(a, None).unwrap(), vec![a, b]);
        assert_eq!(tree.descendants(root), vec![a, a1, a2, b]);
        assert_eq!(tree.descendants_at_depth(root, 0), vec![root]);
        assert_eq!(tree.ancestors(a2), vec![root, a]);
        assert!(tree.ancestors(root).is_empty());
    }

    #[test]
    fn filter_on_root_hides_subtree() {
        let (mut tree, [root, a, b, ..]) = sample();
        tree.set_filters(root, [Filter::new(|n| n.key != "B")])
            .unwrap();
        assert_eq!(tree.children(root), vec![a]);
        assert_eq!(tree.node_count(root, true), 4);
        assert!(!tree.is_included(b));
        // Structure is untouched.
        assert_eq!(tree.children_of(root), &[a, b]);
    }

    #[test]
    fn excluded_parent_hides_children_from_traversal() {
        let (mut tree, [root, a, _, a1, _]) = sample();
        tree.set_filters(root, [Filter::exclude_key("A")]).unwrap();
        // A1 passes its own chain, but it is unreachable through A.
        assert!(tree.is_included(a1));
        assert!(!tree.is_included(a));
        assert_eq!(tree.max_depth(root), 1);
        assert!(tree.descendants_at_depth(root, 2).is_empty());
    }

    #[test]
    fn filters_apply_to_descendants_only() {
        let (mut tree, [root, a, b, a1, a2]) = sample();
        tree.set_filters(a, [Filter::exclude_key("A2")]).unwrap();
        assert!(tree.is_included(a1));
        assert!(!tree.is_included(a2));
        assert!(tree.is_included(b));
        assert_eq!(tree.node_count(root, true), 4);
        // A filter that rejects its own node hides the node too.
        tree.set_filters(a, [Filter::exclude_key("A")]).unwrap();
        assert_eq!(tree.node_count(root, true), 2);
        assert_eq!(tree.node_count(a, true), 0);
    }

    #[test]
    fn relative_root_distance() {
        let (tree, [root, a, b, a1, _]) = sample();
        assert_eq!(tree.root_distance(a1, Some(a)), Ok(1));
        assert_eq!(
            tree.root_distance(a1, Some(b)),
            Err(TreeError::NotAnAncestor { node: a1, root: b })
        );
        assert_eq!(tree.level_nodes(a1, Some(a)).unwrap().len(), 2);
        assert!(tree.level_nodes(a1, Some(b)).is_err());
        assert_eq!(tree.root_of(a1), Some(root));
    }

    #[test]
    fn cycles_are_rejected() {
        let (mut tree, [root, a, _, a1, _]) = sample();
        assert_eq!(
            tree.add_child(a1, root),
            Err(TreeError::Cycle {
                parent: a1,
                child: root
            })
        );
        assert_eq!(
            tree.add_child(a, a),
            Err(TreeError::Cycle {
                parent: a,
                child: a
            })
        );
    }

    #[test]
    fn add_child_moves_existing_child() {
        let (mut tree, [root, a, b, a1, a2]) = sample();
        tree.add_child(b, a1).unwrap();
        assert_eq!(tree.children_of(a), &[a2]);
        assert_eq!(tree.children_of(b), &[a1]);
        assert_eq!(tree.parent_of(a1), Some(b));
        assert_eq!(tree.descendants(root), vec![a, a2, b, a1]);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let (mut tree, [root, ..]) = sample();
        assert_eq!(
            tree.insert_child(root, NodeInfo::new("A")),
            Err(TreeError::DuplicateKey("A".into()))
        );
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.find("A2").map(|id| tree.info(id).unwrap().key.as_str()), Some("A2"));
    }

    #[test]
    fn clear_invalidates_handles() {
        let (mut tree, [root, ..]) = sample();
        tree.clear();
        assert!(tree.is_empty());
        assert!(!tree.is_alive(root));
        let fresh = tree.insert(NodeInfo::new("root")).unwrap();
        assert_eq!(fresh.index(), root.index());
        assert!(!tree.is_alive(root));
        assert_eq!(
            tree.root_distance(root, None),
            Err(TreeError::UnknownNode(root))
        );
        assert!(tree.children_of(root).is_empty());
    }

    #[test]
    fn dft_threads_state_and_breaks() {
        let (tree, [root, _, b, ..]) = sample();
        let mut seen = Vec::new();
        let _ = tree.dft(root, 0_usize, |id, depth| {
            seen.push((tree.info(id).unwrap().key.clone(), depth));
            ControlFlow::<(), usize>::Continue(depth + 1)
        });
        let seen: Vec<(&str, usize)> = seen.iter().map(|(k, d)| (k.as_str(), *d)).collect();
        assert_eq!(
            seen,
            vec![("root", 0), ("A", 1), ("A1", 2), ("A2", 2), ("B", 1)]
        );

        let found = tree.dft(root, (), |id, ()| {
            if tree.info(id).unwrap().key == "B" {
                ControlFlow::Break(id)
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(found, Some(b));
    }

    #[test]
    fn multiple_roots() {
        let (mut tree, [root, ..]) = sample();
        let other = tree.insert(NodeInfo::new("other")).unwrap();
        assert_eq!(tree.roots().collect::<Vec<_>>(), vec![root, other]);
        assert_eq!(tree.node_count(other, true), 1);
    }

    #[test]
    fn payload_edits_feed_filters() {
        let (mut tree, [root, a, b, a1, a2]) = sample();
        tree.set_data(a, "site", "Lyon").unwrap();
        tree.set_data(b, "site", "Lyon").unwrap();
        tree.set_filters(root, [Filter::new(|info| info.get("site") != Some("Oslo"))])
            .unwrap();
        assert_eq!(tree.children(root), vec![a, b]);

        // Filters read the current payload on every query.
        let previous = tree.set_data(a, "site", "Oslo").unwrap();
        assert_eq!(previous.as_deref(), Some("Lyon"));
        assert_eq!(tree.children(root), vec![b]);
        assert!(!tree.is_included(a));
        assert_eq!(tree.node_count(root, true), 2);

        tree.set_data(a, "level", "senior").unwrap();
        tree.set_filters(a, [Filter::data_equals("level", "senior")]).unwrap();
        tree.set_filters(root, []).unwrap();
        assert!(tree.children(a).is_empty());
        tree.set_data(a2, "level", "senior").unwrap();
        assert_eq!(tree.children(a), vec![a2]);
        assert!(!tree.is_included(a1));
    }

    #[test]
    fn display_names_can_change() {
        let (mut tree, [_, a, ..]) = sample();
        assert_eq!(tree.info(a).unwrap().label(), "A");
        tree.set_name(a, Some("Accounts".into())).unwrap();
        assert_eq!(tree.info(a).unwrap().label(), "Accounts");
        tree.set_name(a, None).unwrap();
        assert_eq!(tree.info(a).unwrap().label(), "A");
        // The key index is untouched by name edits.
        assert_eq!(tree.find("A"), Some(a));

        tree.clear();
        assert_eq!(tree.set_name(a, None), Err(TreeError::UnknownNode(a)));
        assert_eq!(tree.set_data(a, "k", "v"), Err(TreeError::UnknownNode(a)));
    }
}
