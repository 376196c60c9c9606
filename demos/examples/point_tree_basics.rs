// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point tree basics.
//!
//! Configure a region, insert points until a leaf splits, query the nearest point,
//! and list the nodes the way a renderer would walk them.
//!
//! Run:
//! - `cargo run -p understory_demos --example point_tree_basics`

use understory_point_tree::{Bounds2D, Point2D, PointTree};

fn main() {
    let mut tree = PointTree::new(Bounds2D::new(0, 0, 200, 200));
    for p in [(0, 0), (1, 1), (100, 100), (150, 20), (30, 170)] {
        tree.insert(p.into());
    }
    println!("{:?}", tree);

    tree.reset_visited_marks();
    let query = Point2D::new(2, 2);
    let found = tree.search(query).expect("tree is not empty");
    println!(
        "nearest to {:?}: {:?} at {:.2} (search window {:?})",
        query, found.point, found.distance, found.search_bounds
    );
    assert_eq!(found.point, Point2D::new(1, 1));

    for node in tree.nodes() {
        let indent = "  ".repeat(node.level as usize);
        let marker = if node.visited { "*" } else { " " };
        println!(
            "{}{}{} {:?} points={:?}",
            indent, marker, node.id, node.bounds, node.points
        );
    }
}
