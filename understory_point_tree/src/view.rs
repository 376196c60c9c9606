// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only enumeration of nodes for display and inspection.

use alloc::vec::Vec;

use crate::tree::{Node, NodeKind, PointTree};
use crate::types::{Bounds2D, NodeId, Point2D};

/// Borrowed snapshot of one node.
#[derive(Copy, Clone, Debug)]
pub struct NodeView<'a> {
    /// Handle of this node.
    pub id: NodeId,
    /// Parent handle; `None` for the root.
    pub parent: Option<NodeId>,
    /// Depth below the root (root is `0`).
    pub level: u32,
    /// Region covered by the node.
    pub bounds: Bounds2D,
    /// Whether the last query pass scanned this node.
    pub visited: bool,
    /// Points held directly by the node. Always empty for internal nodes.
    pub points: &'a [Point2D],
    /// Children in top-left, top-right, bottom-left, bottom-right order; `None` for leaves.
    pub children: Option<[NodeId; 4]>,
}

impl NodeView<'_> {
    /// True if the node holds points rather than children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

impl<'a> NodeView<'a> {
    fn new(id: NodeId, node: &'a Node) -> Self {
        let (points, children): (&'a [Point2D], Option<[NodeId; 4]>) = match &node.kind {
            NodeKind::Leaf(points) => (points.as_slice(), None),
            NodeKind::Internal(children) => (&[][..], Some(*children)),
        };
        Self {
            id,
            parent: node.parent,
            level: node.level,
            bounds: node.bounds,
            visited: node.is_visited(),
            points,
            children,
        }
    }
}

/// Pre-order iterator over the nodes of a [`PointTree`]; see [`PointTree::nodes`].
#[derive(Debug)]
pub struct Nodes<'a> {
    tree: &'a PointTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = NodeView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let view = NodeView::new(id, self.tree.node(id));
        if let Some(children) = view.children {
            // Reversed so the top-left child comes out first.
            self.stack.extend(children.into_iter().rev());
        }
        Some(view)
    }
}

impl PointTree {
    /// Iterate all nodes, each before its children, children in quadrant order.
    ///
    /// This does not touch visit marks, so it can be used to draw which leaves
    /// the last query scanned.
    pub fn nodes(&self) -> Nodes<'_> {
        let mut stack = Vec::with_capacity(16);
        stack.push(NodeId::ROOT);
        Nodes { tree: self, stack }
    }

    /// Snapshot of a single node, or `None` if `id` is not live.
    pub fn node_view(&self, id: NodeId) -> Option<NodeView<'_>> {
        self.nodes.get(id.idx()).map(|node| NodeView::new(id, node))
    }

    /// Iterate every stored point, in pre-order of the leaves that hold them.
    pub fn points(&self) -> impl Iterator<Item = Point2D> + '_ {
        self.nodes().flat_map(|n| n.points.iter().copied())
    }
}
