// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and handles: points, half-open bounds, node ids, and flags.

use core::fmt;

/// Integer point in 2D.
///
/// Points are stored by value; the tree never hands out mutable access to them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point2D {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate (grows downward in screen space).
    pub y: i32,
}

impl Point2D {
    /// The origin.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        kurbo::Point::from(self).distance(kurbo::Point::from(other))
    }
}

impl From<(i32, i32)> for Point2D {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point2D> for kurbo::Point {
    fn from(p: Point2D) -> Self {
        Self::new(f64::from(p.x), f64::from(p.y))
    }
}

/// Axis-aligned rectangle given by origin and size.
///
/// Containment is half-open: `(px, py)` is inside iff
/// `x <= px < x + width` and `y <= py < y + height`.
/// A rectangle with a non-positive width or height contains nothing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bounds2D {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width; the right edge `x + width` is exclusive.
    pub width: i32,
    /// Height; the bottom edge `y + height` is exclusive.
    pub height: i32,
}

impl Bounds2D {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create bounds from origin and size.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// True if the rectangle has no area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether `p` lies inside, using half-open edges.
    #[inline]
    pub const fn contains(&self, p: Point2D) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.right() && p.y < self.bottom()
    }

    /// Whether the two rectangles share any area. Empty rectangles intersect nothing.
    pub const fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Grow by `margin` on all four sides.
    #[must_use]
    pub const fn inflate(&self, margin: i32) -> Self {
        Self {
            x: self.x.saturating_sub(margin),
            y: self.y.saturating_sub(margin),
            width: self.width.saturating_add(margin.saturating_mul(2)),
            height: self.height.saturating_add(margin.saturating_mul(2)),
        }
    }

    /// Split into four quadrants ordered top-left, top-right, bottom-left, bottom-right.
    ///
    /// Child sizes use truncating division, so for odd widths or heights the
    /// last column or row is not covered by any quadrant.
    pub const fn quadrants(&self) -> [Self; 4] {
        let w = self.width / 2;
        let h = self.height / 2;
        let mid_x = self.x.saturating_add(w);
        let mid_y = self.y.saturating_add(h);
        [
            Self::new(self.x, self.y, w, h),
            Self::new(mid_x, self.y, w, h),
            Self::new(self.x, mid_y, w, h),
            Self::new(mid_x, mid_y, w, h),
        ]
    }
}

impl From<Bounds2D> for kurbo::Rect {
    fn from(b: Bounds2D) -> Self {
        Self::new(
            f64::from(b.x),
            f64::from(b.y),
            f64::from(b.right()),
            f64::from(b.bottom()),
        )
    }
}

/// Handle of a node inside a [`PointTree`](crate::PointTree) arena.
///
/// Handles are plain slot indices. The root is always slot `0`.
/// [`PointTree::clear`](crate::PointTree::clear) discards every node except the root,
/// so handles obtained before a clear must not be reused afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: Self = Self(0);

    #[allow(
        clippy::cast_possible_truncation,
        reason = "NodeId uses 32-bit indices by design."
    )]
    pub(crate) const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags::bitflags! {
    /// Transient per-node state used by the nearest-point search.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// The node's points were scanned during the current query pass.
        const VISITED = 0b0000_0001;
    }
}
