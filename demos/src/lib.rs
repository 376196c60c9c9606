// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Understory demos.
//!
//! [`Canvas`] plays the part of an interactive drawing surface: it owns a
//! [`PointTree`], clears and reconfigures it on resize, and keeps a flat copy of
//! accepted points so picks can be checked against a linear scan.

use understory_point_tree::{Bounds2D, Point2D, PointTree, closest_in_slice};

/// Offset of the drawing area inside the window.
pub const LEFT_OFFSET: i32 = 0;
/// Offset of the drawing area inside the window.
pub const TOP_OFFSET: i32 = 0;

/// A drawing surface backed by a point tree.
#[derive(Debug, Default)]
pub struct Canvas {
    /// The spatial index.
    pub tree: PointTree,
    /// Every point the tree accepted, in insertion order.
    pub points: Vec<Point2D>,
}

/// Outcome of a pick.
#[derive(Copy, Clone, Debug)]
pub struct Pick {
    /// Point chosen by the tree search.
    pub picked: Point2D,
    /// Distance from the cursor to [`picked`](Self::picked).
    pub distance: f64,
    /// Closest point found by a linear scan.
    pub exact: Point2D,
    /// Distance from the cursor to [`exact`](Self::exact).
    pub exact_distance: f64,
}

impl Canvas {
    /// Create an empty canvas with no area.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all points and cover `width` × `height`.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.points.clear();
        self.tree.clear();
        self.tree.set_bounds(Bounds2D::new(LEFT_OFFSET, TOP_OFFSET, width, height));
    }

    /// Add a point; points the tree does not keep are not recorded either.
    pub fn add_point(&mut self, p: Point2D) {
        let before = self.tree.len();
        self.tree.insert(p);
        if self.tree.len() > before {
            self.points.push(p);
        }
    }

    /// Pick the point nearest to `cursor`, or `None` when nothing is drawn.
    pub fn pick(&mut self, cursor: Point2D) -> Option<Pick> {
        if self.tree.is_empty() {
            return None;
        }
        self.tree.reset_visited_marks();
        let found = self.tree.search(cursor)?;
        let (i, exact_distance) = closest_in_slice(cursor, &self.points)?;
        Some(Pick {
            picked: found.point,
            distance: found.distance,
            exact: self.points[i],
            exact_distance,
        })
    }
}

/// Deterministic xorshift scatter of `count` points over `width` × `height`.
pub fn scatter(seed: u64, count: usize, width: i32, height: i32) -> Vec<Point2D> {
    let mut state = seed.max(1);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    (0..count)
        .map(|_| {
            let x = (next() % width.max(1) as u64) as i32;
            let y = (next() % height.max(1) as u64) as i32;
            Point2D::new(LEFT_OFFSET + x, TOP_OFFSET + y)
        })
        .collect()
}
