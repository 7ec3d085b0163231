//! Hit-testing: which shape is under a point, and which of the selected
//! shape's corner handles.
//!
//! Both tests read the shapes' cached bounds, which the document keeps fresh
//! on every geometry change.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::doc::{DocStore, Shape, ShapeId};
use crate::geom::Point;

/// One of the four corner grips on a selected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Handle {
    /// All handles in probe priority order.
    pub const ALL: [Handle; 4] = [Self::TopLeft, Self::TopRight, Self::BottomLeft, Self::BottomRight];

    /// Position within [`Handle::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomLeft => 2,
            Self::BottomRight => 3,
        }
    }
}

/// Pointer shape hint for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    #[default]
    Default,
    /// Diagonal resize, top-left to bottom-right.
    NwseResize,
    /// Diagonal resize, top-right to bottom-left.
    NeswResize,
}

impl Cursor {
    /// CSS `cursor` keyword.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::NwseResize => "nwse-resize",
            Self::NeswResize => "nesw-resize",
        }
    }
}

/// Cursor shown while hovering `handle`.
#[must_use]
pub fn cursor_for(handle: Option<Handle>) -> Cursor {
    match handle {
        Some(Handle::TopLeft | Handle::BottomRight) => Cursor::NwseResize,
        Some(Handle::TopRight | Handle::BottomLeft) => Cursor::NeswResize,
        None => Cursor::Default,
    }
}

/// First shape, in insertion order, whose bounding rect contains `pt`.
///
/// Earlier shapes win over later ones where they overlap.
#[must_use]
pub fn find_shape_at(doc: &DocStore, pt: Point) -> Option<ShapeId> {
    doc.iter()
        .find(|shape| shape.bounding_rect().contains(pt))
        .map(Shape::id)
}

/// First handle of `shape`, in [`Handle::ALL`] order, that a 2×2 probe at
/// `pt` overlaps.
#[must_use]
pub fn find_handle_at(shape: &Shape, pt: Point) -> Option<Handle> {
    Handle::ALL
        .into_iter()
        .find(|&h| shape.handle_rect(h).intersects_probe(pt))
}
