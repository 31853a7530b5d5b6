// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Org chart exploration: filters, re-rooting, search, and span collapsing.
//!
//! This example builds a small company, lays it out as a fan, then walks
//! through the interactions a host UI would forward:
//! - a click focuses a node found by hit testing,
//! - a secondary activation re-roots at a department,
//! - a search jumps to a matching employee,
//! - a filter hides a whole department.
//!
//! Run:
//! - `cargo run -p arbor_demos --example org_chart`

use arbor_fan::{Activation, DefaultStyle, Diagram, Explorer, FanConfig};
use arbor_tree::{Filter, NodeId, NodeInfo, Tree, TreeError};
use kurbo::Rect;

fn build() -> Result<(Tree, NodeId), TreeError> {
    let mut tree = Tree::new();
    let ceo = tree.insert(
        NodeInfo::new("ceo")
            .with_name("Grace")
            .with_data("team", "exec")
            .with_data("site", "Zurich"),
    )?;
    for (dept, head, site) in [("eng", "Linus", "Berlin"), ("ops", "Margaret", "Lisbon")] {
        let d = tree.insert_child(
            ceo,
            NodeInfo::new(dept)
                .with_name(head)
                .with_data("team", dept)
                .with_data("site", site),
        )?;
        // Enough reports to overflow the outer arc in a small window.
        for i in 0..40 {
            tree.insert_child(
                d,
                NodeInfo::new(format!("{dept}-{i}"))
                    .with_data("team", dept)
                    .with_data("site", if i == 17 { "Nairobi" } else { site }),
            )?;
        }
    }
    Ok((tree, ceo))
}

fn summarize(title: &str, diagram: &Diagram<Option<String>>) {
    println!("== {title}");
    println!(
        "   {} placements, {} single, {} spans, {} line edges, {} grouped edges",
        diagram.placements().len(),
        diagram.single_placements().count(),
        diagram.spans().count(),
        diagram.line_edges().count(),
        diagram.grouped_edges().count(),
    );
    for p in diagram.placements().iter().filter(|p| p.is_breadcrumb()) {
        println!("   crumb {:<10} at ({:.0}, {:.0})", p.label, p.center.x, p.center.y);
    }
    for (anchor, end) in diagram.spans() {
        println!("   span  {} .. {} ({:?})", anchor.label, end.label, anchor.class);
    }
}

fn main() -> Result<(), TreeError> {
    let (mut tree, ceo) = build()?;
    let style = DefaultStyle::by_data_key("team");
    let mut explorer = Explorer::new(ceo, Rect::new(0.0, 0.0, 480.0, 320.0))
        .with_config(FanConfig::default().with_overflow_slack(40.0));

    let diagram = explorer.diagram(&tree, &style)?;
    summarize("full company", &diagram);

    // Click on the first department.
    if let Some(eng) = tree.find("eng")
        && let Some(p) = diagram.placement_of(eng)
        && let Some(hit) = diagram.hit_test(p.center)
    {
        explorer.handle(&tree, Activation::Primary(hit))?;
        if let Some(detail) = explorer.detail(&tree, &style) {
            println!("focus: {} {:?}", detail.label, detail.fields);
        }
        explorer.handle(&tree, Activation::Secondary(hit))?;
        summarize("engineering", &explorer.diagram(&tree, &style)?);
    }

    // Searching jumps back out to the whole company when needed.
    if let Some(found) = explorer.search(&tree, "nairobi", Some(&["site"]))? {
        let label = tree.info(found).map(|info| info.label().to_owned());
        println!("search hit: {label:?}, root is now {:?}", explorer.root());
    }

    tree.set_filters(ceo, [Filter::exclude_key("ops")])?;
    summarize("ops hidden", &explorer.diagram(&tree, &style)?);
    Ok(())
}
