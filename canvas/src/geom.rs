//! Plain geometry value types shared by the document, hit-tester, and renderer.
//!
//! Positions and sizes are stored as `f64`. Bounding rectangles and handles
//! are snapped to the integer grid (`IRect`) because hit-testing and the
//! selection overlay operate in whole pixels.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height of a shape. Either component may go negative while the
/// user drags a corner past the opposite edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Grow by a pointer delta: `(width + dx, height + dy)`.
    #[must_use]
    pub fn grown_by(self, delta: Point) -> Self {
        Self::new(self.width + delta.x, self.height + delta.y)
    }
}

/// Floating-point rectangle used for drawing calls.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Integer-grid rectangle: `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl IRect {
    #[must_use]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Closed containment: both edges count as inside.
    ///
    /// A rect with a negative extent contains nothing.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        let left = f64::from(self.x);
        let top = f64::from(self.y);
        let right = left + f64::from(self.width);
        let bottom = top + f64::from(self.height);
        left <= pt.x && pt.x <= right && top <= pt.y && pt.y <= bottom
    }

    /// Whether a 2×2 probe centred on `pt` overlaps this rect's interior.
    #[must_use]
    pub fn intersects_probe(&self, pt: Point) -> bool {
        let left = f64::from(self.x);
        let top = f64::from(self.y);
        let right = left + f64::from(self.width);
        let bottom = top + f64::from(self.height);
        pt.x - 1.0 < right && pt.x + 1.0 > left && pt.y - 1.0 < bottom && pt.y + 1.0 > top
    }

    #[must_use]
    pub fn to_rect_f(self) -> RectF {
        RectF::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.width),
            f64::from(self.height),
        )
    }
}

/// Snap a coordinate to the grid, rounding toward negative infinity.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn snap(v: f64) -> i32 {
    v.floor() as i32
}
