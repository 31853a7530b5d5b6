// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Payload search.

use alloc::string::String;
use core::ops::ControlFlow;

use crate::tree::Tree;
use crate::types::{NodeId, NodeInfo};

impl Tree {
    /// Find the first included node, in pre-order from `start`, whose payload
    /// contains `term`.
    ///
    /// Matching is a case-insensitive substring test against `data` values. When
    /// `allowed_keys` is given, only values stored under those keys are tested.
    /// Keys and display names are never searched. A blank `term` matches nothing.
    ///
    /// ```rust
    /// use arbor_tree::{NodeInfo, Tree};
    ///
    /// let mut tree = Tree::new();
    /// let root = tree.insert(NodeInfo::new("root")).unwrap();
    /// let ada = tree
    ///     .insert_child(root, NodeInfo::new("e1").with_data("title", "Staff Engineer"))
    ///     .unwrap();
    ///
    /// assert_eq!(tree.search(root, "engineer", None), Some(ada));
    /// assert_eq!(tree.search(root, "engineer", Some(&["email"])), None);
    /// ```
    pub fn search(&self, start: NodeId, term: &str, allowed_keys: Option<&[&str]>) -> Option<NodeId> {
        if term.trim().is_empty() {
            return None;
        }
        let needle = term.to_lowercase();
        self.dft(start, (), |id, ()| match self.info(id) {
            Some(info) if payload_matches(info, &needle, allowed_keys) => ControlFlow::Break(id),
            _ => ControlFlow::Continue(()),
        })
    }
}

fn payload_matches(info: &NodeInfo, needle: &str, allowed_keys: Option<&[&str]>) -> bool {
    info.data
        .iter()
        .filter(|(key, _)| allowed_keys.is_none_or(|keys| keys.contains(&key.as_str())))
        .any(|(_, value)| contains_folded(value, needle))
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    let folded: String = haystack.to_lowercase();
    folded.contains(needle)
}
