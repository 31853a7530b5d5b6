// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The assembled diagram: placements, edges, and render partitions.

use alloc::string::String;
use alloc::vec::Vec;

use arbor_tree::NodeId;
use kurbo::{Circle, Line, Point, Rect};

bitflags::bitflags! {
    /// Markers on a [`Placement`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PlacementFlags: u8 {
        /// The node carries a text label.
        const LABELED    = 0b0000_0001;
        /// The node was folded into a span and is not drawn on its own.
        const HIDDEN     = 0b0000_0010;
        /// The node is an ancestor shown in the breadcrumb row.
        const BREADCRUMB = 0b0000_0100;
        /// The node is the current focus.
        const FOCUSED    = 0b0000_1000;
    }
}

/// Where and how one node is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement<C> {
    /// The tree node; doubles as the join key for render diffing.
    pub node: NodeId,
    /// Center in area coordinates.
    pub center: Point,
    /// Circle radius.
    pub radius: f64,
    /// Direction from the fan origin in radians (0 for breadcrumbs).
    pub angle: f64,
    /// Label font size.
    pub label_size: f64,
    /// Label text.
    pub label: String,
    /// Depth below the diagram root, or the position in the breadcrumb row.
    pub level: usize,
    /// Host classification from [`NodeStyle::classify`](crate::NodeStyle::classify).
    pub class: C,
    /// Render markers.
    pub flags: PlacementFlags,
    /// For the visible anchor of a collapsed run: index of the last placement
    /// folded into it.
    pub span: Option<usize>,
}

impl<C> Placement<C> {
    /// Whether this placement was folded into a span.
    pub fn is_hidden(&self) -> bool {
        self.flags.contains(PlacementFlags::HIDDEN)
    }

    /// Whether this placement carries a label.
    pub fn is_labeled(&self) -> bool {
        self.flags.contains(PlacementFlags::LABELED)
    }

    /// Whether this placement belongs to the breadcrumb row.
    pub fn is_breadcrumb(&self) -> bool {
        self.flags.contains(PlacementFlags::BREADCRUMB)
    }

    /// Whether this placement is the focused node.
    pub fn is_focused(&self) -> bool {
        self.flags.contains(PlacementFlags::FOCUSED)
    }

    /// The node's circle.
    pub fn circle(&self) -> Circle {
        Circle::new(self.center, self.radius)
    }
}

/// A parent → child link, as indices into [`Diagram::placements`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Parent placement.
    pub from: usize,
    /// Child placement.
    pub to: usize,
}

/// Output of [`assemble`](crate::assemble): everything a renderer needs for
/// one frame.
///
/// Breadcrumb placements come first, followed by the fan level by level.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagram<C> {
    pub(crate) placements: Vec<Placement<C>>,
    pub(crate) edges: Vec<Edge>,
}

impl<C> Default for Diagram<C> {
    fn default() -> Self {
        Self {
            placements: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<C> Diagram<C> {
    /// All placements, hidden ones included.
    pub fn placements(&self) -> &[Placement<C>] {
        &self.placements
    }

    /// All edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns `true` if nothing was placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Index of the placement of `node`.
    pub fn index_of(&self, node: NodeId) -> Option<usize> {
        self.placements.iter().position(|p| p.node == node)
    }

    /// Placement of `node`.
    pub fn placement_of(&self, node: NodeId) -> Option<&Placement<C>> {
        self.index_of(node).map(|i| &self.placements[i])
    }

    /// Placements drawn individually: not hidden and not a span anchor.
    pub fn single_placements(&self) -> impl Iterator<Item = &Placement<C>> + '_ {
        self.placements
            .iter()
            .filter(|p| !p.is_hidden() && p.span.is_none())
    }

    /// Span anchors paired with the last placement folded into them.
    pub fn spans(&self) -> impl Iterator<Item = (&Placement<C>, &Placement<C>)> + '_ {
        self.placements
            .iter()
            .filter_map(|p| p.span.map(|end| (p, &self.placements[end])))
    }

    /// Edges into span anchors; drawn as a fan towards the whole span.
    pub fn grouped_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges
            .iter()
            .copied()
            .filter(|e| self.placements[e.to].span.is_some())
    }

    /// Edges drawn as plain lines: the target is neither hidden nor a span anchor.
    pub fn line_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().copied().filter(|e| {
            let to = &self.placements[e.to];
            !to.is_hidden() && to.span.is_none()
        })
    }

    /// Endpoints of an edge.
    pub fn edge_line(&self, edge: Edge) -> Line {
        Line::new(self.placements[edge.from].center, self.placements[edge.to].center)
    }

    /// Union of the bounding boxes of all visible placements.
    pub fn bounds(&self) -> Option<Rect> {
        self.placements
            .iter()
            .filter(|p| !p.is_hidden())
            .map(|p| Rect::from_center_size(p.center, (2.0 * p.radius, 2.0 * p.radius)))
            .reduce(|acc, r| acc.union(r))
    }

    /// The node drawn at `point`, if any.
    ///
    /// Later placements are drawn on top and win. A span anchor covers the capsule
    /// from its center to the center of the last folded placement, with its own
    /// radius as half-width. Hidden placements never hit.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.placements
            .iter()
            .rev()
            .filter(|p| !p.is_hidden())
            .find(|p| {
                let end = p.span.map_or(p.center, |i| self.placements[i].center);
                segment_distance_squared(p.center, end, point) <= p.radius * p.radius
            })
            .map(|p| p.node)
    }
}

/// Squared distance from `pt` to the segment `p0`–`p1`.
fn segment_distance_squared(p0: Point, p1: Point, pt: Point) -> f64 {
    let v = p1 - p0;
    let w = pt - p0;
    let len2 = v.hypot2();
    let t = if len2 > 0.0 {
        (w.dot(v) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (pt - (p0 + v * t)).hypot2()
}
