// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout tuning parameters.

use kurbo::Insets;

/// Parameters shared by [`LevelArc`](crate::LevelArc) and
/// [`assemble`](crate::assemble).
///
/// All lengths are in the caller's logical units (typically pixels).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FanConfig {
    /// Space kept clear inside the diagram area on each side.
    pub margins: Insets,
    /// Node radius at level 0. Level `l` uses `max_radius / (l + 1)`.
    pub max_radius: f64,
    /// Nodes with a radius above this are always labeled.
    pub min_label_radius: f64,
    /// Smaller nodes are labeled when `arc length / (radius * count)` exceeds this…
    pub sparse_label_ratio: f64,
    /// …and their radius exceeds this.
    pub sparse_label_min_radius: f64,
    /// Label font size per unit of radius.
    pub label_scale: f64,
    /// Upper bound for label font sizes.
    pub max_label_size: f64,
    /// Extra breadth a level may use beyond its arc length before siblings are
    /// collapsed into spans.
    pub overflow_slack: f64,
    /// Radius of breadcrumb nodes.
    pub breadcrumb_radius: f64,
    /// Center-to-center distance between breadcrumb nodes; also the height of the
    /// breadcrumb row. Never less than one breadcrumb diameter. A row too wide
    /// for the area shrinks radius and spacing together, so crumbs never overlap.
    pub breadcrumb_spacing: f64,
}

impl Default for FanConfig {
    fn default() -> Self {
        Self {
            margins: Insets::uniform(20.0),
            max_radius: 20.0,
            min_label_radius: 6.0,
            sparse_label_ratio: 3.0,
            sparse_label_min_radius: 3.0,
            label_scale: 1.5,
            max_label_size: 12.0,
            overflow_slack: 100.0,
            breadcrumb_radius: 6.0,
            breadcrumb_spacing: 24.0,
        }
    }
}

impl FanConfig {
    /// Replace the margins.
    #[must_use]
    pub fn with_margins(mut self, margins: Insets) -> Self {
        self.margins = margins;
        self
    }

    /// Replace the level-0 node radius.
    #[must_use]
    pub fn with_max_radius(mut self, max_radius: f64) -> Self {
        self.max_radius = max_radius;
        self
    }

    /// Replace the overflow slack.
    #[must_use]
    pub fn with_overflow_slack(mut self, slack: f64) -> Self {
        self.overflow_slack = slack;
        self
    }

    /// Replace the breadcrumb radius and spacing.
    #[must_use]
    pub fn with_breadcrumbs(mut self, radius: f64, spacing: f64) -> Self {
        self.breadcrumb_radius = radius;
        self.breadcrumb_spacing = spacing;
        self
    }

    /// Font size for a node of the given radius.
    pub fn label_size(&self, radius: f64) -> f64 {
        (radius * self.label_scale).min(self.max_label_size)
    }

    /// Height reserved above the fan when breadcrumbs are shown.
    pub fn breadcrumb_row_height(&self) -> f64 {
        self.breadcrumb_spacing.max(2.0 * self.breadcrumb_radius)
    }
}
