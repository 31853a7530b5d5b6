// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for level placement, overflow collapsing, and assembly.

use arbor_fan::{
    DefaultStyle, FanConfig, LevelArc, Placement, PlacementFlags, assemble, collapse_overflow,
};
use arbor_tree::{NodeId, NodeInfo, Tree};
use kurbo::{Point, Rect};
use proptest::prelude::*;

const EPSILON: f64 = 1e-9;

fn placement(node: NodeId, radius: f64, class: u8) -> Placement<u8> {
    Placement {
        node,
        center: Point::ORIGIN,
        radius,
        angle: 0.0,
        label_size: 0.0,
        label: String::new(),
        level: 1,
        class,
        flags: PlacementFlags::empty(),
        span: None,
    }
}

/// A root with `count` children, returned in insertion order.
fn star(count: usize) -> (Tree, Vec<NodeId>) {
    let mut tree = Tree::new();
    let root = tree.insert(NodeInfo::new("root")).unwrap();
    let kids = (0..count)
        .map(|i| tree.insert_child(root, NodeInfo::new(format!("k{i}"))).unwrap())
        .collect();
    (tree, kids)
}

proptest! {
    #[test]
    fn circles_stay_inside_the_margins(
        x0 in -200.0..200.0_f64,
        y0 in -200.0..200.0_f64,
        width in 100.0..1200.0_f64,
        height in 100.0..1200.0_f64,
        max_level in 0_usize..8,
        level_pick in 0_usize..8,
        count in 1_usize..200,
    ) {
        let config = FanConfig::default();
        let area = Rect::new(x0, y0, x0 + width, y0 + height);
        let inner = area - config.margins;
        let level = level_pick.min(max_level);
        let arc = LevelArc::new(area, level, count, max_level, &config);

        for slot in arc.slots() {
            let r = arc.radius;
            prop_assert!(slot.center.x - r >= inner.x0 - EPSILON);
            prop_assert!(slot.center.x + r <= inner.x1 + EPSILON);
            prop_assert!(slot.center.y - r >= inner.y0 - EPSILON);
            prop_assert!(slot.center.y + r <= inner.y1 + EPSILON);
            prop_assert!(slot.angle.is_finite());
        }
    }

    #[test]
    fn overflowing_run_collapses_to_one_anchor(
        count in 2_usize..40,
        radius in 1.0..30.0_f64,
        slack in 0.0..200.0_f64,
        offset in 0_usize..50,
    ) {
        let (tree, kids) = star(count);
        let mut level: Vec<Placement<u8>> = kids.iter().map(|&k| placement(k, radius, 0)).collect();
        let breadth = 2.0 * radius * count as f64;
        // Pick an arc that is just too short.
        let arc_length = (breadth - slack - 1.0).max(0.0);
        prop_assume!(breadth > arc_length + slack);

        let hidden = collapse_overflow(&mut level, offset, arc_length, slack, |n| tree.parent_of(n));
        prop_assert_eq!(hidden, count - 1);
        prop_assert_eq!(level[0].span, Some(offset + count - 1));
        prop_assert!(!level[0].is_hidden());
        for p in &level[1..] {
            prop_assert!(p.is_hidden());
            prop_assert_eq!(p.span, None);
        }
    }

    #[test]
    fn collapsing_keeps_class_boundaries(
        classes in prop::collection::vec(0_u8..3, 2..40),
    ) {
        let (tree, kids) = star(classes.len());
        let mut level: Vec<Placement<u8>> = kids
            .iter()
            .zip(&classes)
            .map(|(&k, &c)| placement(k, 10.0, c))
            .collect();
        collapse_overflow(&mut level, 0, 0.0, 0.0, |n| tree.parent_of(n));

        // Nothing is reordered and every hidden placement belongs to the
        // nearest visible anchor on its left, which has the same class.
        let mut anchor = 0;
        for (i, p) in level.iter().enumerate() {
            prop_assert_eq!(p.node, kids[i]);
            if p.is_hidden() {
                prop_assert!(i > 0);
                prop_assert_eq!(p.class, level[anchor].class);
                prop_assert!(level[anchor].span.is_some_and(|end| end >= i));
            } else {
                if i > 0 {
                    prop_assert_ne!(p.class, level[i - 1].class);
                }
                anchor = i;
            }
        }
    }

    #[test]
    fn assembled_edges_follow_parents(
        parents in prop::collection::vec(any::<prop::sample::Index>(), 0..60),
        width in 200.0..1200.0_f64,
        height in 200.0..1200.0_f64,
    ) {
        let mut tree = Tree::new();
        let mut ids = vec![tree.insert(NodeInfo::new("n0")).unwrap()];
        for (i, pick) in parents.iter().enumerate() {
            let parent = ids[pick.index(ids.len())];
            ids.push(tree.insert_child(parent, NodeInfo::new(format!("n{}", i + 1))).unwrap());
        }
        let area = Rect::new(0.0, 0.0, width, height);
        let diagram =
            assemble(&tree, ids[0], None, &DefaultStyle::new(), area, &FanConfig::default()).unwrap();

        prop_assert_eq!(diagram.placements().len(), ids.len());
        prop_assert_eq!(diagram.edges().len(), ids.len() - 1);
        for edge in diagram.edges() {
            prop_assert!(edge.from < edge.to);
            let from = &diagram.placements()[edge.from];
            let to = &diagram.placements()[edge.to];
            prop_assert_eq!(tree.parent_of(to.node), Some(from.node));
            prop_assert_eq!(from.level + 1, to.level);
        }
        for (i, p) in diagram.placements().iter().enumerate() {
            if let Some(end) = p.span {
                prop_assert!(end > i);
                prop_assert!(diagram.placements()[i + 1..=end].iter().all(Placement::is_hidden));
            }
        }
    }
}
