// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest-point query: locate the leaf under the query, then backtrack through ancestors.
//!
//! ## Algorithm
//!
//! 1. Descend from the root to the leaf containing the query point.
//! 2. Scan that leaf, mark it visited, and form the search rectangle from its
//!    bounds grown by [`TreeConfig::search_margin`](crate::TreeConfig::search_margin).
//! 3. Walk back up. At every ancestor, visit all descendant leaves that are
//!    unvisited, hold points, and intersect the search rectangle, scanning those
//!    that pass the probe test below.
//!
//! ## Probe test
//!
//! Once a candidate at distance `d` exists, a leaf is only scanned if one of the
//! four points `query ± (d, 0)` and `query ± (0, d)` (truncated toward zero) lies
//! inside it. This approximates "the circle of radius `d` reaches this leaf" and
//! is not exact: a leaf touched only by the circle's diagonal is skipped, and a
//! leaf hit by a probe is scanned even when none of its points can win. The
//! result is therefore a close point, not always the closest one.

use crate::tree::{NodeKind, PointTree};
use crate::types::{Bounds2D, NodeFlags, NodeId, Point2D};

/// Result of [`PointTree::search`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Nearest {
    /// The point found.
    pub point: Point2D,
    /// Euclidean distance from the query to [`point`](Self::point).
    pub distance: f64,
    /// Search rectangle used while backtracking: the query leaf's bounds plus the margin.
    pub search_bounds: Bounds2D,
}

/// Index and distance of the point in `points` closest to `query`.
///
/// Ties go to the lowest index. Returns `None` for an empty slice.
pub fn closest_in_slice(query: Point2D, points: &[Point2D]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in points.iter().enumerate() {
        let d = p.distance(query);
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best
}

#[derive(Copy, Clone, Debug)]
struct Candidate {
    point: Point2D,
    distance: f64,
}

/// What the descent does at a node, decided before any mutation.
enum Step {
    Scan(Candidate),
    EmptyLeaf,
    Descend([NodeId; 4]),
}

impl PointTree {
    /// Closest stored point to `query`, or `None` if the search found no candidate.
    ///
    /// Call [`reset_visited_marks`](Self::reset_visited_marks) first; leaves
    /// visited by an earlier query are skipped. `None` is returned for an empty
    /// tree, and also when the query lies outside the root bounds or in an empty
    /// region whose neighborhood holds no points.
    pub fn closest_point(&mut self, query: Point2D) -> Option<Point2D> {
        self.search(query).map(|n| n.point)
    }

    /// Like [`closest_point`](Self::closest_point), but returns `query` itself when
    /// nothing is found.
    ///
    /// The returned point is indistinguishable from a stored point at the same
    /// location, so check [`is_empty`](Self::is_empty) before relying on it.
    pub fn closest_point_or_query(&mut self, query: Point2D) -> Point2D {
        self.closest_point(query).unwrap_or(query)
    }

    /// Run a nearest-point query and report the point, its distance, and the search rectangle.
    pub fn search(&mut self, query: Point2D) -> Option<Nearest> {
        let mut search_bounds = Bounds2D::ZERO;
        let found = self.descend(NodeId::ROOT, query, &mut search_bounds)?;
        Some(Nearest {
            point: found.point,
            distance: found.distance,
            search_bounds,
        })
    }

    fn descend(
        &mut self,
        id: NodeId,
        query: Point2D,
        search_bounds: &mut Bounds2D,
    ) -> Option<Candidate> {
        let (parent, bounds, step) = {
            let node = self.node(id);
            if node.is_visited() || !node.bounds.contains(query) {
                return None;
            }
            let step = match &node.kind {
                NodeKind::Internal(children) => Step::Descend(*children),
                NodeKind::Leaf(points) => match closest_in_slice(query, points) {
                    Some((i, distance)) => Step::Scan(Candidate {
                        point: points[i],
                        distance,
                    }),
                    None => Step::EmptyLeaf,
                },
            };
            (node.parent, node.bounds, step)
        };

        match step {
            Step::Scan(seed) => {
                self.mark_visited(id);
                *search_bounds = bounds.inflate(self.config.search_margin);
                match parent {
                    Some(parent) => {
                        self.search_subtree(parent, query, *search_bounds, Some(seed))
                    }
                    // A root leaf already holds every point.
                    None => Some(seed),
                }
            }
            Step::EmptyLeaf => {
                self.mark_visited(id);
                *search_bounds = bounds.inflate(self.config.search_margin);
                self.search_subtree(parent?, query, *search_bounds, None)
            }
            Step::Descend(children) => {
                for child in children {
                    let Some(found) = self.descend(child, query, search_bounds) else {
                        continue;
                    };
                    return match parent {
                        Some(parent) => {
                            let seed = Candidate {
                                point: found.point,
                                distance: query.distance(found.point),
                            };
                            self.search_subtree(parent, query, *search_bounds, Some(seed))
                        }
                        None => Some(found),
                    };
                }
                None
            }
        }
    }

    /// Scan every eligible leaf below `id`, improving on `best`.
    fn search_subtree(
        &mut self,
        id: NodeId,
        query: Point2D,
        window: Bounds2D,
        mut best: Option<Candidate>,
    ) -> Option<Candidate> {
        let NodeKind::Internal(children) = &self.node(id).kind else {
            return best;
        };
        for child in *children {
            if self.node(child).is_leaf() {
                self.scan_leaf(child, query, window, &mut best);
            } else {
                best = self.search_subtree(child, query, window, best);
            }
        }
        best
    }

    fn scan_leaf(
        &mut self,
        id: NodeId,
        query: Point2D,
        window: Bounds2D,
        best: &mut Option<Candidate>,
    ) {
        let found = {
            let node = self.node(id);
            let NodeKind::Leaf(points) = &node.kind else {
                return;
            };
            if node.is_visited() || points.is_empty() || !node.bounds.intersects(&window) {
                return;
            }
            if let Some(current) = *best
                && !probe_hits(&node.bounds, query, current.distance)
            {
                return;
            }
            closest_in_slice(query, points).map(|(i, distance)| Candidate {
                point: points[i],
                distance,
            })
        };
        self.mark_visited(id);
        if let Some(found) = found
            && best.is_none_or(|b| found.distance < b.distance)
        {
            *best = Some(found);
        }
    }

    fn mark_visited(&mut self, id: NodeId) {
        self.node_mut(id).flags.insert(NodeFlags::VISITED);
    }
}

/// Whether any of the four axis probes at `distance` from `query` lands in `bounds`.
fn probe_hits(bounds: &Bounds2D, query: Point2D, distance: f64) -> bool {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Probes snap to the integer grid by truncation."
    )]
    let offset = |v: i32, d: f64| (f64::from(v) + d) as i32;
    [
        Point2D::new(offset(query.x, distance), query.y),
        Point2D::new(offset(query.x, -distance), query.y),
        Point2D::new(query.x, offset(query.y, distance)),
        Point2D::new(query.x, offset(query.y, -distance)),
    ]
    .into_iter()
    .any(|p| bounds.contains(p))
}
