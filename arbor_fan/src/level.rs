// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement of a single depth level along its arc.

use kurbo::{Point, Rect, Size, Vec2};

use crate::config::FanConfig;

/// Fraction of the full fan extent used by `level`.
///
/// Increases with depth and saturates towards 1, so deep trees keep spreading
/// out with shrinking gaps between levels.
pub fn depth_fraction(level: usize) -> f64 {
    1.0 - 3.0 / (level as f64 + 3.0)
}

/// The arc shared by all nodes of one depth level.
///
/// The fan grows from the top-left corner of the usable area. Level `l` lies on
/// the segment from `(x_max, 0)` to `(0, slope * x_max)` in usable-area
/// coordinates, where `x_max` is the usable width scaled by
/// `depth_fraction(l) / depth_fraction(max_level)`. The deepest level spans the
/// full diagonal.
///
/// This is a pure function of its inputs; it is cheap to rebuild every draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelArc {
    /// Depth of the level below the diagram root.
    pub level: usize,
    /// Number of nodes on the arc.
    pub count: usize,
    /// `depth_fraction(level)`.
    pub frac: f64,
    /// `depth_fraction(max_level)`.
    pub max_frac: f64,
    /// Height over width of the usable area.
    pub slope: f64,
    /// Horizontal extent of the arc.
    pub x_max: f64,
    /// Length of the arc segment.
    pub length: f64,
    /// Radius of every node on this level.
    pub radius: f64,
    /// Whether nodes on this level carry labels.
    pub labeled: bool,
    /// Label font size for this level.
    pub label_size: f64,
    origin: Point,
    usable: Size,
}

/// Where one node of a level goes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slot {
    /// Center of the node in area coordinates.
    pub center: Point,
    /// Direction from the fan origin, in radians from the +x axis (y down).
    pub angle: f64,
}

impl LevelArc {
    /// Lay out `count` nodes of `level` inside `area`.
    ///
    /// `max_level` is the deepest level of the diagram. Margins come from
    /// `config`; a usable area that collapses to nothing yields a zero-length arc
    /// rather than NaNs.
    pub fn new(area: Rect, level: usize, count: usize, max_level: usize, config: &FanConfig) -> Self {
        let inner = area - config.margins;
        let usable = Size::new(inner.width().max(0.0), inner.height().max(0.0));
        let origin = Point::new(area.x0 + config.margins.x0, area.y0 + config.margins.y0);

        let frac = depth_fraction(level);
        let max_frac = depth_fraction(max_level);
        let ratio = if max_frac > 0.0 { frac / max_frac } else { 0.0 };
        let slope = if usable.width > 0.0 {
            usable.height / usable.width
        } else {
            0.0
        };
        let x_max = usable.width * ratio;
        // x_max / cos(atan(slope))
        let length = Vec2::new(x_max, slope * x_max).hypot();
        let radius = config.max_radius / (level as f64 + 1.0);

        let sparse = count > 0
            && length / (radius * count as f64) > config.sparse_label_ratio
            && radius > config.sparse_label_min_radius;
        let labeled = radius > config.min_label_radius || sparse;

        Self {
            level,
            count,
            frac,
            max_frac,
            slope,
            x_max,
            length,
            radius,
            labeled,
            label_size: config.label_size(radius),
            origin,
            usable,
        }
    }

    /// Position of the node at `index` among the level's nodes.
    ///
    /// Nodes are spread evenly: node `i` sits at `x_max * (i + 0.5) / count`.
    /// Centers are inset by the radius so each circle stays inside the usable
    /// area.
    pub fn slot(&self, index: usize) -> Slot {
        let count = self.count.max(1) as f64;
        let x = self.x_max * (index as f64 + 0.5) / count;
        let y = self.slope * (self.x_max - x);
        let r = self.radius;
        let sx = inset_scale(self.usable.width, r);
        let sy = inset_scale(self.usable.height, r);
        Slot {
            center: Point::new(self.origin.x + r + x * sx, self.origin.y + r + y * sy),
            angle: Vec2::new(x, y).atan2(),
        }
    }

    /// Slots for every node, left to right.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        (0..self.count).map(|i| self.slot(i))
    }

    /// Sum of node diameters.
    pub fn breadth(&self) -> f64 {
        2.0 * self.radius * self.count as f64
    }

    /// Whether the nodes need more room than the arc offers plus `slack`.
    pub fn overflows(&self, slack: f64) -> bool {
        self.breadth() > self.length + slack
    }
}

/// Scale mapping `[0, extent]` onto `[0, extent - 2r]`.
fn inset_scale(extent: f64, radius: f64) -> f64 {
    if extent > 0.0 {
        ((extent - 2.0 * radius) / extent).max(0.0)
    } else {
        0.0
    }
}
