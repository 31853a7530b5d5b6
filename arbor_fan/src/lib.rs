// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Fan: a radial "fan" diagram for filtered hierarchy trees.
//!
//! Arbor Fan turns an [`arbor_tree::Tree`] into positioned circles and links
//! that a host renders however it likes. It does no drawing itself; the output
//! is a plain [`Diagram`] in the caller's coordinate space.
//!
//! ## Layout
//!
//! The fan grows from the top-left corner of the diagram area. Every depth level
//! below the chosen root is laid out on its own [`LevelArc`], a diagonal segment
//! that moves outwards with depth and saturates as levels accumulate (see
//! [`depth_fraction`]). Node radii shrink with depth and labels are dropped on
//! crowded levels.
//!
//! When a level needs far more room than its arc offers, adjacent siblings that
//! share a parent and a style class are folded into a single span (see
//! [`collapse_overflow`]). Span anchors keep a reference to the last folded
//! placement so renderers can draw the span as one stroke.
//!
//! Viewing a subtree adds a breadcrumb row of the root's ancestors above the fan.
//!
//! ## Styling
//!
//! Classification, labels, and detail fields are supplied by a [`NodeStyle`]
//! implementation. [`DefaultStyle`] classifies nodes by one data key.
//!
//! ## Interaction
//!
//! [`Explorer`] keeps the current root and focus between frames and reacts to
//! [`Activation`]s and searches.
//!
//! ```rust
//! use arbor_fan::{Activation, DefaultStyle, Explorer};
//! use arbor_tree::{NodeInfo, Tree};
//! use kurbo::Rect;
//!
//! let mut tree = Tree::new();
//! let ceo = tree.insert(NodeInfo::new("ceo").with_data("team", "board")).unwrap();
//! let cto = tree
//!     .insert_child(ceo, NodeInfo::new("cto").with_data("team", "tech"))
//!     .unwrap();
//! tree.insert_child(cto, NodeInfo::new("dev").with_data("team", "tech"))
//!     .unwrap();
//!
//! let style = DefaultStyle::by_data_key("team");
//! let mut explorer = Explorer::new(ceo, Rect::new(0.0, 0.0, 800.0, 600.0));
//! assert_eq!(explorer.diagram(&tree, &style).unwrap().placements().len(), 3);
//!
//! // Re-rooting at the CTO shows the CEO as a breadcrumb.
//! explorer.handle(&tree, Activation::Secondary(cto)).unwrap();
//! let diagram = explorer.diagram(&tree, &style).unwrap();
//! assert!(diagram.placements()[0].is_breadcrumb());
//! assert_eq!(diagram.edges().len(), 2);
//! ```
//!
//! ## Features
//!
//! - `std` (default): use the standard library float functions through kurbo.
//! - `libm`: use `libm` instead, for `no_std` targets.
//! - `serde`: derive `Serialize`/`Deserialize` for [`FanConfig`].
//! - `tracing`: emit spans and events during assembly and navigation.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod assemble;
mod config;
mod diagram;
mod explorer;
mod level;
mod style;

pub use assemble::{assemble, collapse_overflow};
pub use config::FanConfig;
pub use diagram::{Diagram, Edge, Placement, PlacementFlags};
pub use explorer::{Activation, Explorer};
pub use level::{LevelArc, Slot, depth_fraction};
pub use style::{DefaultStyle, Detail, NodeStyle};
