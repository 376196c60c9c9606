// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: arena, insertion, subdivision, and reset operations.

use alloc::vec::Vec;

use crate::config::TreeConfig;
use crate::types::{Bounds2D, NodeFlags, NodeId, Point2D};

/// Leaf-or-internal payload of a node.
///
/// A node either holds points or owns exactly four children, never both.
/// Subdivision turns a leaf into an internal node; nothing turns it back.
#[derive(Clone, Debug)]
pub(crate) enum NodeKind {
    Leaf(Vec<Point2D>),
    /// Children in top-left, top-right, bottom-left, bottom-right order.
    Internal([NodeId; 4]),
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) level: u32,
    pub(crate) bounds: Bounds2D,
    pub(crate) flags: NodeFlags,
    pub(crate) kind: NodeKind,
}

impl Node {
    fn leaf(parent: Option<NodeId>, level: u32, bounds: Bounds2D, capacity: usize) -> Self {
        Self {
            parent,
            level,
            bounds,
            flags: NodeFlags::empty(),
            kind: NodeKind::Leaf(Vec::with_capacity(capacity)),
        }
    }

    #[inline]
    pub(crate) fn is_visited(&self) -> bool {
        self.flags.contains(NodeFlags::VISITED)
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }
}

/// Region-partitioning point tree.
///
/// The root covers the configured bounds. Leaves hold up to
/// [`TreeConfig::max_points`] points; inserting one more splits the leaf into
/// four quadrant children and redistributes its points.
///
/// Nodes live in an arena owned by the tree and refer to their parent by
/// [`NodeId`], which the nearest-point search uses to walk back up.
///
/// All operations need exclusive access. Queries mutate per-node visit marks, so
/// they take `&mut self` as well.
#[derive(Clone)]
pub struct PointTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) config: TreeConfig,
    len: usize,
}

impl core::fmt::Debug for PointTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let leaves = self.nodes.iter().filter(|n| n.is_leaf()).count();
        f.debug_struct("PointTree")
            .field("bounds", &self.bounds())
            .field("points", &self.len)
            .field("nodes_total", &self.nodes.len())
            .field("leaves", &leaves)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for PointTree {
    fn default() -> Self {
        Self::new(Bounds2D::ZERO)
    }
}

impl PointTree {
    /// Create an empty tree covering `bounds` with the default configuration.
    pub fn new(bounds: Bounds2D) -> Self {
        Self::with_config(bounds, TreeConfig::default())
    }

    /// Create an empty tree covering `bounds`.
    pub fn with_config(bounds: Bounds2D, config: TreeConfig) -> Self {
        let nodes = alloc::vec![Node::leaf(None, 0, bounds, config.capacity())];
        Self {
            nodes,
            config,
            len: 0,
        }
    }

    /// The configuration this tree was built with.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Bounds of the root node.
    pub fn bounds(&self) -> Bounds2D {
        self.root().bounds
    }

    /// Replace the root's addressable region.
    ///
    /// Existing content is not reorganized. Call [`clear`](Self::clear) together
    /// with this when the tree already holds points; otherwise the stored points
    /// keep living under node bounds that no longer match the root.
    pub fn set_bounds(&mut self, bounds: Bounds2D) {
        self.root_mut().bounds = bounds;
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no points are stored.
    ///
    /// Check this before trusting the result of
    /// [`closest_point_or_query`](Self::closest_point_or_query).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of live nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Deepest level reached by any node; the root is level `0`.
    pub fn depth(&self) -> u32 {
        self.nodes.iter().map(|n| n.level).max().unwrap_or(0)
    }

    /// Insert a point.
    ///
    /// Points outside the root bounds are ignored. A point that lands in the
    /// truncated remainder of an odd-sized node during subdivision is ignored
    /// the same way, since no child contains it. The same applies to more than
    /// [`TreeConfig::max_points`] identical points: they keep splitting until
    /// the cells have no area and are then dropped.
    pub fn insert(&mut self, point: Point2D) {
        let _ = self.insert_at(NodeId::ROOT, point);
    }

    /// Discard every point and every node below the root.
    ///
    /// The root keeps its bounds and becomes an empty leaf.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        let capacity = self.config.capacity();
        let root = self.root_mut();
        root.kind = NodeKind::Leaf(Vec::with_capacity(capacity));
        root.flags = NodeFlags::empty();
        self.len = 0;
    }

    /// Reset the visit mark of every node.
    ///
    /// Call this before each nearest-point query. Marks left over from an earlier
    /// query make the search skip the leaves it already scanned.
    pub fn reset_visited_marks(&mut self) {
        for node in &mut self.nodes {
            node.flags.remove(NodeFlags::VISITED);
        }
    }

    // --- internals ---

    fn root(&self) -> &Node {
        &self.nodes[NodeId::ROOT.idx()]
    }

    fn root_mut(&mut self) -> &mut Node {
        &mut self.nodes[NodeId::ROOT.idx()]
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.idx()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.idx()]
    }

    /// Insert below `id`. Returns `true` if some leaf accepted the point.
    fn insert_at(&mut self, id: NodeId, point: Point2D) -> bool {
        if !self.node(id).bounds.contains(point) {
            return false;
        }
        let capacity = self.config.capacity();
        match &mut self.nodes[id.idx()].kind {
            NodeKind::Internal(children) => {
                let children = *children;
                self.insert_into_children(children, point)
            }
            NodeKind::Leaf(points) => {
                if points.len() < capacity {
                    points.push(point);
                    self.len += 1;
                    return true;
                }
                let children = self.subdivide(id);
                self.insert_into_children(children, point)
            }
        }
    }

    /// Offer `point` to each child in order; the first one containing it takes it.
    fn insert_into_children(&mut self, children: [NodeId; 4], point: Point2D) -> bool {
        children.into_iter().any(|child| self.insert_at(child, point))
    }

    /// Turn the leaf `id` into an internal node and push its points down.
    fn subdivide(&mut self, id: NodeId) -> [NodeId; 4] {
        let (bounds, level) = {
            let n = self.node(id);
            (n.bounds, n.level)
        };
        let capacity = self.config.capacity();
        let first = self.nodes.len();
        for quadrant in bounds.quadrants() {
            self.nodes.push(Node::leaf(Some(id), level + 1, quadrant, capacity));
        }
        let children = [
            NodeId::new(first),
            NodeId::new(first + 1),
            NodeId::new(first + 2),
            NodeId::new(first + 3),
        ];
        let old = core::mem::replace(&mut self.node_mut(id).kind, NodeKind::Internal(children));
        if let NodeKind::Leaf(points) = old {
            self.len -= points.len();
            for p in points {
                let _ = self.insert_into_children(children, p);
            }
        }
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn leaf_points(tree: &PointTree) -> Vec<Point2D> {
        let mut out = Vec::new();
        for n in &tree.nodes {
            if let NodeKind::Leaf(points) = &n.kind {
                out.extend_from_slice(points);
            }
        }
        out.sort_by_key(|p| (p.x, p.y));
        out
    }

    #[test]
    fn out_of_bounds_points_are_ignored() {
        let mut tree = PointTree::new(Bounds2D::new(0, 0, 100, 100));
        tree.insert(Point2D::new(100, 10));
        tree.insert(Point2D::new(-1, 10));
        tree.insert(Point2D::new(10, 100));
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn fifth_point_splits_the_leaf() {
        let mut tree = PointTree::new(Bounds2D::new(0, 0, 100, 100));
        for p in [(10, 10), (60, 10), (10, 60), (60, 60)] {
            tree.insert(p.into());
        }
        assert!(tree.root().is_leaf(), "four points fit in one leaf");
        tree.insert(Point2D::new(70, 70));
        let NodeKind::Internal(children) = &tree.root().kind else {
            panic!("root must have subdivided");
        };
        assert_eq!(tree.len(), 5);
        let [tl, tr, bl, br] = *children;
        for (child, expected) in [(tl, 1), (tr, 1), (bl, 1), (br, 2)] {
            let NodeKind::Leaf(points) = &tree.node(child).kind else {
                panic!("children start as leaves");
            };
            assert_eq!(points.len(), expected);
            assert_eq!(tree.node(child).parent, Some(NodeId::ROOT));
            assert_eq!(tree.node(child).level, 1);
        }
    }

    #[test]
    fn crowded_quadrant_splits_repeatedly() {
        let mut tree = PointTree::new(Bounds2D::new(0, 0, 100, 100));
        for i in 1..=5 {
            tree.insert(Point2D::new(i, i));
        }
        assert_eq!(tree.len(), 5);
        assert!(tree.depth() >= 2, "all points share a quadrant, so it splits again");
        for n in &tree.nodes {
            if let NodeKind::Leaf(points) = &n.kind {
                assert!(points.len() <= TreeConfig::MAX_POINTS);
                assert!(points.iter().all(|p| n.bounds.contains(*p)));
            }
        }
    }

    #[test]
    fn duplicates_up_to_capacity_share_a_leaf() {
        let mut tree = PointTree::new(Bounds2D::new(0, 0, 64, 64));
        for _ in 0..4 {
            tree.insert(Point2D::new(3, 3));
        }
        assert_eq!(leaf_points(&tree), vec![Point2D::new(3, 3); 4]);
    }

    #[test]
    fn overfull_duplicates_split_into_empty_cells() {
        // Identical points can never be separated. Splitting continues until the
        // cells have zero size and contain nothing, so all copies are lost.
        let mut tree = PointTree::new(Bounds2D::new(0, 0, 64, 64));
        for _ in 0..5 {
            tree.insert(Point2D::new(3, 3));
        }
        assert!(tree.is_empty());
        assert!(leaf_points(&tree).is_empty());
        assert_eq!(tree.depth(), 7, "64 halves down to 0 in seven steps");
    }

    #[test]
    fn remainder_strip_drops_points() {
        // Width 5 splits into two columns of width 2; x = 4 belongs to no child.
        let mut tree = PointTree::new(Bounds2D::new(0, 0, 5, 4));
        for p in [(0, 0), (1, 1), (2, 2), (3, 3)] {
            tree.insert(p.into());
        }
        tree.insert(Point2D::new(4, 0));
        assert_eq!(tree.len(), 4, "the fifth point falls in the remainder");
        assert_eq!(
            leaf_points(&tree),
            vec![
                Point2D::new(0, 0),
                Point2D::new(1, 1),
                Point2D::new(2, 2),
                Point2D::new(3, 3)
            ]
        );
    }

    #[test]
    fn clear_resets_to_empty_root() {
        let mut tree = PointTree::new(Bounds2D::new(0, 0, 100, 100));
        for i in 0..40 {
            tree.insert(Point2D::new(i * 2, 99 - i * 2));
        }
        assert!(tree.node_count() > 1);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.bounds(), Bounds2D::new(0, 0, 100, 100));
        tree.insert(Point2D::new(5, 5));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn set_bounds_keeps_content() {
        let mut tree = PointTree::default();
        tree.insert(Point2D::new(1, 1));
        assert!(tree.is_empty(), "zero bounds accept nothing");
        tree.set_bounds(Bounds2D::new(0, 0, 10, 10));
        tree.insert(Point2D::new(1, 1));
        tree.set_bounds(Bounds2D::new(50, 50, 10, 10));
        assert_eq!(tree.len(), 1, "reconfiguring does not drop points");
    }

    #[test]
    fn reset_visited_marks_clears_all() {
        let mut tree = PointTree::new(Bounds2D::new(0, 0, 16, 16));
        for i in 0..10 {
            tree.insert(Point2D::new(i, i));
        }
        for n in &mut tree.nodes {
            n.flags.insert(NodeFlags::VISITED);
        }
        tree.reset_visited_marks();
        assert!(tree.nodes.iter().all(|n| !n.is_visited()));
    }

    #[test]
    fn custom_capacity() {
        let config = TreeConfig::default().with_max_points(1);
        let mut tree = PointTree::with_config(Bounds2D::new(0, 0, 8, 8), config);
        tree.insert(Point2D::new(0, 0));
        tree.insert(Point2D::new(7, 7));
        assert_eq!(tree.node_count(), 5, "second point forces one split");
        assert_eq!(tree.len(), 2);
    }
}
