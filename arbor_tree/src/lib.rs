// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Tree: an arena hierarchy with inheritable visibility filters.
//!
//! Arbor Tree is the data model behind hierarchy explorers such as org charts,
//! taxonomies, and category browsers.
//!
//! - Nodes live in a [`Tree`] arena and are addressed by a copyable [`NodeId`].
//! - Each node carries a [`NodeInfo`] payload: a unique string key, an optional
//!   display name, and a key/value data map.
//! - Any node may carry [`Filter`]s. A filter applies to its node and to every
//!   node below it, so a single toggle high in the tree hides a whole subtree
//!   from every derived query without touching the structure.
//!
//! ## Included nodes
//!
//! A node is *included* when every filter on the path from its structural root
//! down to the node itself accepts it (see [`FilterChain`]). Derived queries walk
//! the tree top-down and skip excluded nodes together with their subtrees:
//!
//! - [`Tree::children`], [`Tree::descendants`], [`Tree::descendants_at_depth`]
//! - [`Tree::level_nodes`]: the included nodes at the same depth as a node
//! - [`Tree::max_depth`], [`Tree::node_count`]
//! - [`Tree::dft`]: a pre-order walk threading caller state from parent to child
//! - [`Tree::search`]: first node whose payload contains a term
//!
//! Structural accessors ([`Tree::children_of`], [`Tree::parent_of`],
//! [`Tree::ancestors`], [`Tree::root_of`]) ignore filters.
//!
//! ## Relative roots
//!
//! Depth-style queries take an optional relative root so the same tree can be
//! viewed from any node without copying it. Asking for the distance to a node
//! that is not an ancestor is reported as [`TreeError::NotAnAncestor`], and
//! links that would form a cycle are refused with [`TreeError::Cycle`].
//!
//! ```rust
//! use arbor_tree::{NodeInfo, Tree};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert(NodeInfo::new("root")).unwrap();
//! let a = tree.insert_child(root, NodeInfo::new("A")).unwrap();
//! let a1 = tree.insert_child(a, NodeInfo::new("A1")).unwrap();
//!
//! assert_eq!(tree.root_distance(a1, None), Ok(2));
//! assert_eq!(tree.root_distance(a1, Some(a)), Ok(1));
//! assert!(tree.add_child(a1, root).is_err());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod filter;
mod search;
mod tree;
mod types;

pub use error::TreeError;
pub use filter::FilterChain;
pub use tree::Tree;
pub use types::{Filter, NodeId, NodeInfo};
