//! Screen-to-canvas mapping for pointer input.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::geom::Point;

/// Pan and scale the host applies to the canvas.
///
/// The core reads it for every pointer event and never changes it, so an
/// untouched camera is the identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Screen position of the canvas origin.
    pub pan: Point,
    /// Screen pixels per canvas unit.
    pub zoom: f64,
}

impl Camera {
    pub const IDENTITY: Camera = Camera { pan: Point { x: 0.0, y: 0.0 }, zoom: 1.0 };

    /// Canvas point under screen point `screen`.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        let local = screen - self.pan;
        Point::new(local.x / self.zoom, local.y / self.zoom)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::IDENTITY
    }
}
