// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_point_tree --heading-base-level=0

//! Understory Point Tree: a region-partitioning tree over 2D points with a localized nearest-point search.
//!
//! Understory Point Tree is a reusable building block for picking the stored point nearest to a cursor.
//!
//! - Insert integer points into a bounded region; leaves split into four quadrants when they overflow.
//! - Query the closest stored point with a search that starts at the leaf under the query and
//!   backtracks through its ancestors.
//! - Enumerate node bounds, visit marks, and points in pre-order to draw the structure.
//!
//! It has no knowledge of windows, input, or rendering. A caller configures the region,
//! feeds points in, issues queries, and reads the nodes back for display.
//!
//! # Example
//!
//! ```rust
//! use understory_point_tree::{Bounds2D, Point2D, PointTree};
//!
//! let mut tree = PointTree::new(Bounds2D::new(0, 0, 200, 200));
//! tree.insert(Point2D::new(0, 0));
//! tree.insert(Point2D::new(1, 1));
//! tree.insert(Point2D::new(100, 100));
//!
//! // Visit marks persist between queries; reset them before each one.
//! tree.reset_visited_marks();
//! assert_eq!(tree.closest_point(Point2D::new(2, 2)), Some(Point2D::new(1, 1)));
//! ```
//!
//! ## Query contract
//!
//! - Each query marks the leaves it scanned. Call [`PointTree::reset_visited_marks`] before
//!   every query; the marks stay readable through [`PointTree::nodes`] until then.
//! - [`PointTree::closest_point`] returns `None` when there is no candidate (for example, an
//!   empty tree). [`PointTree::closest_point_or_query`] returns the query point instead, which
//!   is ambiguous with a stored point at the same spot; check [`PointTree::is_empty`] first.
//! - The search is a bounded, expanding search. It prunes leaves with four axis-aligned probes
//!   rather than a true circle test, so it can return a close point that is not the closest.
//!   Use [`closest_in_slice`] when an exact answer over a small set is needed.
//!
//! ```rust
//! use understory_point_tree::{Bounds2D, Point2D, PointTree};
//!
//! let mut tree = PointTree::new(Bounds2D::new(0, 0, 100, 100));
//! tree.reset_visited_marks();
//! assert_eq!(tree.closest_point(Point2D::new(10, 10)), None);
//! assert_eq!(tree.closest_point_or_query(Point2D::new(10, 10)), Point2D::new(10, 10));
//! ```
//!
//! ## Drawing the structure
//!
//! ```rust
//! use understory_point_tree::{Bounds2D, Point2D, PointTree};
//!
//! let mut tree = PointTree::new(Bounds2D::new(0, 0, 100, 100));
//! for i in 1..=5 {
//!     tree.insert(Point2D::new(i, i));
//! }
//!
//! for node in tree.nodes() {
//!     let rect: kurbo::Rect = node.bounds.into();
//!     let _fill = if node.visited { "dark" } else { "light" };
//!     for p in node.points {
//!         let _marker: kurbo::Point = (*p).into();
//!     }
//!     assert!(rect.area() >= 0.0);
//! }
//! ```
//!
//! ## Configuration
//!
//! [`TreeConfig`] sets the leaf capacity (default 4) and the search rectangle margin (default 5).
//! Changing the region with [`PointTree::set_bounds`] does not move existing points;
//! pair it with [`PointTree::clear`].
//!
//! This crate is `no_std` and uses `alloc`. Enable the `libm` feature instead of `std`
//! for `no_std` targets.

#![no_std]

extern crate alloc;

pub mod config;
pub mod search;
pub mod tree;
pub mod types;
pub mod view;

pub use config::TreeConfig;
pub use search::{Nearest, closest_in_slice};
pub use tree::PointTree;
pub use types::{Bounds2D, NodeFlags, NodeId, Point2D};
pub use view::{NodeView, Nodes};
