// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning knobs for [`PointTree`](crate::PointTree).

/// Per-tree configuration.
///
/// The defaults match the classic behavior: leaves split when a fifth point
/// arrives, and the backtracking window is a leaf's bounds grown by five units.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TreeConfig {
    /// Maximum number of points a leaf holds before it subdivides. Clamped to at least `1`.
    pub max_points: usize,
    /// Margin added on every side of the query leaf to form the search rectangle.
    pub search_margin: i32,
}

impl TreeConfig {
    /// Default leaf capacity.
    pub const MAX_POINTS: usize = 4;
    /// Default search rectangle margin.
    pub const SEARCH_RECT_INCREASE: i32 = 5;

    /// Set the leaf capacity.
    #[must_use]
    pub const fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    /// Set the search rectangle margin.
    #[must_use]
    pub const fn with_search_margin(mut self, search_margin: i32) -> Self {
        self.search_margin = search_margin;
        self
    }

    pub(crate) const fn capacity(&self) -> usize {
        if self.max_points == 0 {
            1
        } else {
            self.max_points
        }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_points: Self::MAX_POINTS,
            search_margin: Self::SEARCH_RECT_INCREASE,
        }
    }
}
