// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for filter inheritance and depth queries over random trees.
//!
//! Every tree is described by a parent table (`parents[i] < i + 1`) plus a list
//! of filters, each attached to one node and rejecting a set of keys. Expected
//! results are computed directly from that description and compared with the
//! arena's answers.

use std::collections::BTreeSet;

use arbor_tree::{Filter, NodeId, NodeInfo, Tree};
use proptest::prelude::*;
use proptest::sample::Index;

#[derive(Debug, Clone)]
struct Shape {
    /// `parents[i]` is the parent of node `i + 1`; node 0 is the root.
    parents: Vec<usize>,
    /// `(owner, rejected keys)` pairs.
    filters: Vec<(usize, BTreeSet<usize>)>,
}

impl Shape {
    fn len(&self) -> usize {
        self.parents.len() + 1
    }

    fn parent(&self, node: usize) -> Option<usize> {
        (node > 0).then(|| self.parents[node - 1])
    }

    /// Path from the root down to `node`, inclusive.
    fn path(&self, node: usize) -> Vec<usize> {
        let mut path = vec![node];
        let mut current = node;
        while let Some(p) = self.parent(current) {
            path.push(p);
            current = p;
        }
        path.reverse();
        path
    }

    fn depth(&self, node: usize) -> usize {
        self.path(node).len() - 1
    }

    /// Every filter owned by `node` or an ancestor accepts `node`.
    fn included(&self, node: usize) -> bool {
        let path = self.path(node);
        self.filters
            .iter()
            .filter(|(owner, _)| path.contains(owner))
            .all(|(_, rejected)| !rejected.contains(&node))
    }

    /// Every node on the path from the root is included.
    fn reachable(&self, node: usize) -> bool {
        self.path(node).into_iter().all(|n| self.included(n))
    }

    fn build(&self) -> (Tree, Vec<NodeId>) {
        let mut tree = Tree::new();
        let mut ids = vec![tree.insert(NodeInfo::new("n0")).unwrap()];
        for (i, &p) in self.parents.iter().enumerate() {
            let id = tree
                .insert_child(ids[p], NodeInfo::new(format!("n{}", i + 1)))
                .unwrap();
            ids.push(id);
        }
        for node in 0..self.len() {
            let filters: Vec<Filter> = self
                .filters
                .iter()
                .filter(|(owner, _)| *owner == node)
                .map(|(_, rejected)| {
                    let rejected: BTreeSet<String> =
                        rejected.iter().map(|k| format!("n{k}")).collect();
                    Filter::new(move |info| !rejected.contains(&info.key))
                })
                .collect();
            tree.set_filters(ids[node], filters).unwrap();
        }
        (tree, ids)
    }
}

fn shape() -> impl Strategy<Value = Shape> {
    (
        prop::collection::vec(any::<Index>(), 0..40),
        prop::collection::vec(
            (any::<Index>(), prop::collection::vec(any::<Index>(), 0..4)),
            0..6,
        ),
    )
        .prop_map(|(parent_picks, filter_picks)| {
            let parents: Vec<usize> = parent_picks
                .iter()
                .enumerate()
                .map(|(i, pick)| pick.index(i + 1))
                .collect();
            let len = parents.len() + 1;
            let filters = filter_picks
                .into_iter()
                .map(|(owner, rejected)| {
                    (
                        owner.index(len),
                        rejected.into_iter().map(|r| r.index(len)).collect(),
                    )
                })
                .collect();
            Shape { parents, filters }
        })
}

proptest! {
    #[test]
    fn inclusion_matches_filter_chain(shape in shape()) {
        let (tree, ids) = shape.build();
        for node in 0..shape.len() {
            prop_assert_eq!(tree.is_included(ids[node]), shape.included(node), "node {}", node);
        }
    }

    #[test]
    fn root_distance_counts_parent_hops(shape in shape()) {
        let (tree, ids) = shape.build();
        for node in 0..shape.len() {
            prop_assert_eq!(tree.root_distance(ids[node], None), Ok(shape.depth(node)));
            prop_assert_eq!(tree.root_distance(ids[node], Some(ids[node])), Ok(0));
            for (hops, &ancestor) in shape.path(node).iter().rev().enumerate() {
                prop_assert_eq!(tree.root_distance(ids[node], Some(ids[ancestor])), Ok(hops));
            }
        }
    }

    #[test]
    fn level_nodes_share_depth(shape in shape()) {
        let (tree, ids) = shape.build();
        let root = ids[0];
        for node in 0..shape.len() {
            let depth = shape.depth(node);
            let level = tree.level_nodes(ids[node], Some(root)).unwrap();
            for &other in &level {
                prop_assert_eq!(tree.root_distance(other, Some(root)), Ok(depth));
            }
            let expected: BTreeSet<usize> = (0..shape.len())
                .filter(|&n| shape.depth(n) == depth && shape.reachable(n))
                .collect();
            let actual: BTreeSet<usize> = level.iter().map(|id| id.index()).collect();
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn descendants_match_node_count(shape in shape()) {
        let (tree, ids) = shape.build();
        for node in 0..shape.len() {
            let id = ids[node];
            prop_assert_eq!(tree.descendants(id).len(), tree.node_count(id, false));
        }
        let reachable = (0..shape.len()).filter(|&n| shape.reachable(n)).count();
        prop_assert_eq!(tree.node_count(ids[0], true), reachable);
    }
}
