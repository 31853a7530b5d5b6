// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Level-by-level diagram assembly.

use alloc::vec::Vec;

use arbor_tree::{NodeId, Tree, TreeError};
use hashbrown::HashMap;
use kurbo::{Point, Rect};

use crate::config::FanConfig;
use crate::diagram::{Diagram, Edge, Placement, PlacementFlags};
use crate::level::LevelArc;
use crate::style::NodeStyle;

/// Build the diagram for the subtree under `root`.
///
/// Levels are taken breadth-first from `root`: level `l` holds the included
/// nodes `l` hops below it. Each level is laid out on its own [`LevelArc`], every
/// node whose parent is already placed gets an edge from it, and a level whose
/// nodes need more room than the arc offers is collapsed with
/// [`collapse_overflow`]. When `root` has ancestors, they are placed in a
/// breadcrumb row above the fan and chained down to the root placement.
///
/// The diagram is empty when `root` is not included. `focus`, when placed,
/// carries [`PlacementFlags::FOCUSED`].
pub fn assemble<S: NodeStyle + ?Sized>(
    tree: &Tree,
    root: NodeId,
    focus: Option<NodeId>,
    style: &S,
    area: Rect,
    config: &FanConfig,
) -> Result<Diagram<S::Class>, TreeError> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("assemble", ?root, ?focus);
    #[cfg(feature = "tracing")]
    let _guard = _span.enter();

    if !tree.is_alive(root) {
        return Err(TreeError::UnknownNode(root));
    }

    let ancestors = tree.ancestors(root);
    let mut fan_area = area;
    if !ancestors.is_empty() {
        fan_area.y0 += config.breadcrumb_row_height();
    }

    let max_level = tree.max_depth(root);
    let mut placements: Vec<Placement<S::Class>> = Vec::new();
    let mut edges = Vec::new();
    // Scoped to this call; never stored on the tree.
    let mut placed: HashMap<NodeId, usize> = HashMap::new();

    let mut level_nodes = tree.level_nodes(root, Some(root))?;
    let mut level = 0;
    while !level_nodes.is_empty() {
        let arc = LevelArc::new(fan_area, level, level_nodes.len(), max_level, config);
        #[cfg(feature = "tracing")]
        tracing::trace!(level, nodes = level_nodes.len(), length = arc.length, "level");

        let start = placements.len();
        let mut first_child = None;
        for (i, &node) in level_nodes.iter().enumerate() {
            let slot = arc.slot(i);
            let mut flags = PlacementFlags::empty();
            flags.set(PlacementFlags::LABELED, arc.labeled);
            flags.set(PlacementFlags::FOCUSED, focus == Some(node));

            let index = placements.len();
            placements.push(Placement {
                node,
                center: slot.center,
                radius: arc.radius,
                angle: slot.angle,
                label_size: arc.label_size,
                label: style.label(tree, node),
                level,
                class: style.classify(tree, node),
                flags,
                span: None,
            });
            placed.insert(node, index);

            if node != root
                && let Some(parent) = tree.parent_of(node)
                && let Some(&from) = placed.get(&parent)
            {
                edges.push(Edge { from, to: index });
            }
            if first_child.is_none() {
                first_child = tree.children(node).first().copied();
            }
        }

        if arc.overflows(config.overflow_slack) {
            let _hidden = collapse_overflow(
                &mut placements[start..],
                start,
                arc.length,
                config.overflow_slack,
                |node| tree.parent_of(node),
            );
            #[cfg(feature = "tracing")]
            tracing::debug!(level, hidden = _hidden, "collapsed overflowing level");
        }

        level_nodes = match first_child {
            Some(child) => tree.level_nodes(child, Some(root))?,
            None => break,
        };
        level += 1;
    }

    let mut diagram = Diagram { placements, edges };
    if !ancestors.is_empty() && !diagram.is_empty() {
        prepend_breadcrumbs(&mut diagram, tree, &ancestors, focus, style, area, config);
    }
    Ok(diagram)
}

/// Fold adjacent same-parent, same-class placements of one level into spans
/// when their total breadth exceeds `arc_length + slack`.
///
/// `level` is the level's slice of the diagram's placements and `offset` the
/// index of its first element, so `span` indices point into the whole list.
/// Scanning left to right, a placement whose parent and class match the last
/// visible placement is marked [`PlacementFlags::HIDDEN`] and becomes that
/// anchor's `span` end. Runs are never reordered. Returns the number of
/// placements hidden.
pub fn collapse_overflow<C: PartialEq>(
    level: &mut [Placement<C>],
    offset: usize,
    arc_length: f64,
    slack: f64,
    parent_of: impl Fn(NodeId) -> Option<NodeId>,
) -> usize {
    let breadth: f64 = level.iter().map(|p| 2.0 * p.radius).sum();
    if breadth <= arc_length + slack {
        return 0;
    }
    let mut hidden = 0;
    let mut anchor = 0;
    for i in 1..level.len() {
        let same_group = parent_of(level[i].node) == parent_of(level[anchor].node)
            && level[i].class == level[anchor].class;
        if same_group {
            level[i].flags.insert(PlacementFlags::HIDDEN);
            level[anchor].span = Some(offset + i);
            hidden += 1;
        } else {
            anchor = i;
        }
    }
    hidden
}

/// Put the ancestors of the root in a row above the fan and link them down to
/// the root placement.
fn prepend_breadcrumbs<S: NodeStyle + ?Sized>(
    diagram: &mut Diagram<S::Class>,
    tree: &Tree,
    ancestors: &[NodeId],
    focus: Option<NodeId>,
    style: &S,
    area: Rect,
    config: &FanConfig,
) {
    let count = ancestors.len();
    let mut r = config.breadcrumb_radius;
    let mut pitch = config.breadcrumb_spacing.max(2.0 * r);
    let available = (area.width() - config.margins.x0 - config.margins.x1).max(0.0);
    let needed = pitch * (count - 1) as f64 + 2.0 * r;
    if needed > available {
        // Shrink radius and pitch together; pitch stays at least one diameter.
        let scale = available / needed;
        r *= scale;
        pitch *= scale;
    }
    let left = area.x0 + config.margins.x0 + r;
    let y = area.y0 + config.margins.y0 + r;

    let mut crumbs: Vec<Placement<S::Class>> = ancestors
        .iter()
        .enumerate()
        .map(|(i, &node)| {
            let mut flags = PlacementFlags::BREADCRUMB | PlacementFlags::LABELED;
            flags.set(PlacementFlags::FOCUSED, focus == Some(node));
            Placement {
                node,
                center: Point::new(left + pitch * i as f64, y),
                radius: r,
                angle: 0.0,
                label_size: config.label_size(r),
                label: style.label(tree, node),
                level: i,
                class: style.classify(tree, node),
                flags,
                span: None,
            }
        })
        .collect();

    for placement in &mut diagram.placements {
        if let Some(end) = placement.span.as_mut() {
            *end += count;
        }
    }
    for edge in &mut diagram.edges {
        edge.from += count;
        edge.to += count;
    }
    // ancestor → ancestor → … → root, where the root is the first fan placement.
    let chain = (0..count).map(|i| Edge { from: i, to: i + 1 });

    crumbs.append(&mut diagram.placements);
    diagram.placements = crumbs;
    let mut edges: Vec<Edge> = chain.collect();
    edges.append(&mut diagram.edges);
    diagram.edges = edges;
}
