// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inherited filter chains.

use smallvec::SmallVec;

use crate::types::{Filter, NodeInfo};

/// The effective filter set of a node: its ancestors' filters, root first,
/// followed by its own.
///
/// A chain is an immutable value. [`FilterChain::extended`] returns a new chain
/// that shares the receiver's segments, so traversals can hand each child its own
/// accumulator without one branch observing another's filters.
#[derive(Clone, Debug, Default)]
pub struct FilterChain<'a> {
    segments: SmallVec<[&'a [Filter]; 8]>,
}

impl<'a> FilterChain<'a> {
    /// An empty chain; admits every node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a chain with `filters` appended after the existing segments.
    #[must_use]
    pub fn extended(&self, filters: &'a [Filter]) -> Self {
        let mut next = self.clone();
        if !filters.is_empty() {
            next.segments.push(filters);
        }
        next
    }

    /// Whether every filter in the chain accepts `info`.
    ///
    /// Filters are evaluated in chain order (ancestors first) and stop at the
    /// first rejection.
    pub fn admits(&self, info: &NodeInfo) -> bool {
        self.segments
            .iter()
            .flat_map(|segment| segment.iter())
            .all(|filter| filter.test(info))
    }

    /// Total number of filters in the chain.
    pub fn len(&self) -> usize {
        self.segments.iter().map(|segment| segment.len()).sum()
    }

    /// Returns `true` if the chain has no filters.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
