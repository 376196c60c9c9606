// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest-point picking session.
//!
//! Simulates a canvas: resize (clear + reconfigure), scatter points, then pick
//! the nearest point for a series of cursor positions. Each pick is compared with
//! a linear scan, and the leaves the search touched are reported as Kurbo rects.
//!
//! Run:
//! - `cargo run -p understory_demos --example point_tree_picking`

use kurbo::Rect;
use understory_demos::{Canvas, scatter};
use understory_point_tree::Point2D;

fn main() {
    let mut canvas = Canvas::new();
    canvas.resize(640, 480);
    for p in scatter(0x00DD_BA11, 400, 640, 480) {
        canvas.add_point(p);
    }
    println!(
        "{} points, {} nodes, depth {}",
        canvas.tree.len(),
        canvas.tree.node_count(),
        canvas.tree.depth()
    );

    let mut exact = 0;
    let cursors = scatter(0xFEED_FACE, 20, 640, 480);
    for cursor in &cursors {
        let Some(pick) = canvas.pick(*cursor) else {
            println!("{:?}: nothing nearby", cursor);
            continue;
        };
        if pick.distance == pick.exact_distance {
            exact += 1;
        }
        let scanned: Vec<Rect> = canvas
            .tree
            .nodes()
            .filter(|n| n.visited)
            .map(|n| n.bounds.into())
            .collect();
        let area: f64 = scanned.iter().map(|r| r.area()).sum();
        println!(
            "{:?}: picked {:?} ({:.1}), exact {:?} ({:.1}), scanned {} leaves / {:.0} px^2",
            cursor,
            pick.picked,
            pick.distance,
            pick.exact,
            pick.exact_distance,
            scanned.len(),
            area
        );
    }
    println!("{}/{} picks matched the linear scan", exact, cursors.len());

    canvas.resize(320, 240);
    assert!(canvas.pick(Point2D::new(10, 10)).is_none(), "resize clears");
}
