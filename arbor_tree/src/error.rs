// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use crate::types::NodeId;

/// Errors reported by [`Tree`](crate::Tree) operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The handle is stale or belongs to another tree.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
    /// A node with this key already exists.
    #[error("duplicate node key `{0}`")]
    DuplicateKey(String),
    /// Linking `child` under `parent` would make `child` its own ancestor.
    #[error("adding {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Requested parent.
        parent: NodeId,
        /// Requested child.
        child: NodeId,
    },
    /// `root` is neither `node` nor one of its ancestors.
    #[error("{root:?} is not an ancestor of {node:?}")]
    NotAnAncestor {
        /// Node whose depth was requested.
        node: NodeId,
        /// Root the depth was measured against.
        root: NodeId,
    },
}
