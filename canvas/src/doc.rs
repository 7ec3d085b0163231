//! Document model: shapes, their appearance, and the in-memory registry.
//!
//! This module defines what is on the canvas (`Shape`, `ShapeKind`), the
//! data-less tag the UI uses to pick what to add next (`ShapeType`), fill
//! colors (`Color`), and the insertion-ordered store that owns every live
//! shape (`DocStore`).
//!
//! Each shape caches its integer bounding rect and four corner handles. The
//! cache is refreshed by every geometry setter before it returns, so readers
//! never see bounds that lag behind `position`/`size`.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{DEFAULT_EXTENT, HANDLE_OFFSET, HANDLE_SIZE};
use crate::error::EditorError;
use crate::geom::{IRect, Point, RectF, Size, snap};
use crate::hit::Handle;
use crate::render::SurfaceError;
use crate::text::{FontSpec, TextMeasure};

/// Unique identifier for a shape.
pub type ShapeId = Uuid;

// =============================================================
// Color
// =============================================================

/// RGBA fill color, each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const GREEN: Color = Color { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const OVERLAY_BLUE: Color = Color { r: 64.0 / 255.0, g: 143.0 / 255.0, b: 240.0 / 255.0, a: 1.0 };

    /// Build a color, clamping every channel into `[0, 1]`.
    #[must_use]
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r: r.clamp(0.0, 1.0), g: g.clamp(0.0, 1.0), b: b.clamp(0.0, 1.0), a: a.clamp(0.0, 1.0) }
    }

    /// Opaque color from 8-bit channels, as returned by a color picker.
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r: f32::from(r) / 255.0, g: f32::from(g) / 255.0, b: f32::from(b) / 255.0, a: 1.0 }
    }

    /// Quantize to 8-bit RGBA.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// CSS `rgba(...)` string for the browser backend.
    #[must_use]
    pub fn css(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("rgba({r}, {g}, {b}, {})", self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::GREEN
    }
}

// =============================================================
// Shape kinds
// =============================================================

/// Which kind of shape to create. Selected in the UI before placing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShapeType {
    #[default]
    Rectangle,
    Triangle,
    Ellipse,
    Text,
    Image,
}

impl ShapeType {
    pub const ALL: [ShapeType; 5] = [Self::Rectangle, Self::Triangle, Self::Ellipse, Self::Text, Self::Image];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Triangle => "triangle",
            Self::Ellipse => "ellipse",
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeType {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangle" | "rect" => Ok(Self::Rectangle),
            "triangle" => Ok(Self::Triangle),
            "ellipse" => Ok(Self::Ellipse),
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            _ => Err(EditorError::UnknownShapeType(s.to_owned())),
        }
    }
}

/// Variant-specific state of a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// Rounded rectangle filling the bounding box.
    Rectangle,
    /// Triangle with vertices at top-center, bottom-left, bottom-right.
    Triangle,
    /// Oval inscribed in the bounding box.
    Ellipse,
    /// A string whose size follows its measured ink bounds.
    Text { content: String, font: FontSpec },
    /// A bitmap stretched over the bounding box.
    Image { source: String },
}

impl ShapeKind {
    /// Default state for a freshly placed shape of `ty`.
    #[must_use]
    pub fn default_for(ty: ShapeType, font: &FontSpec, text: &str, image_path: &str) -> Self {
        match ty {
            ShapeType::Rectangle => Self::Rectangle,
            ShapeType::Triangle => Self::Triangle,
            ShapeType::Ellipse => Self::Ellipse,
            ShapeType::Text => Self::Text { content: text.to_owned(), font: font.clone() },
            ShapeType::Image => Self::Image { source: image_path.to_owned() },
        }
    }

    #[must_use]
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Self::Rectangle => ShapeType::Rectangle,
            Self::Triangle => ShapeType::Triangle,
            Self::Ellipse => ShapeType::Ellipse,
            Self::Text { .. } => ShapeType::Text,
            Self::Image { .. } => ShapeType::Image,
        }
    }
}

// =============================================================
// Shape
// =============================================================

/// Cached integer bounds and corner handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub rect: IRect,
    /// Handle squares in [`Handle::ALL`] order.
    pub handles: [IRect; 4],
}

impl Bounds {
    /// Derive bounds from position and size.
    #[must_use]
    pub fn compute(position: Point, size: Size) -> Self {
        let rect = IRect::new(snap(position.x), snap(position.y), snap(size.width), snap(size.height));
        let square = |x: f64, y: f64| IRect::new(snap(x - HANDLE_OFFSET), snap(y - HANDLE_OFFSET), HANDLE_SIZE, HANDLE_SIZE);
        let left = position.x;
        let top = position.y;
        let right = position.x + size.width;
        let bottom = position.y + size.height;
        Self {
            rect,
            handles: [square(left, top), square(right, top), square(left, bottom), square(right, bottom)],
        }
    }

    #[must_use]
    pub fn handle(&self, handle: Handle) -> IRect {
        self.handles[handle.index()]
    }
}

/// One drawable entity on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    kind: ShapeKind,
    position: Point,
    size: Size,
    rotation: f64,
    fill: Color,
    bounds: Bounds,
}

impl Shape {
    /// Create a shape with a fresh id, unit size, no rotation, and the default fill.
    #[must_use]
    pub fn new(kind: ShapeKind, position: Point) -> Self {
        Self::with_id(Uuid::new_v4(), kind, position)
    }

    /// Create a shape with a caller-chosen id.
    #[must_use]
    pub fn with_id(id: ShapeId, kind: ShapeKind, position: Point) -> Self {
        let size = Size::new(DEFAULT_EXTENT, DEFAULT_EXTENT);
        Self {
            id,
            kind,
            position,
            size,
            rotation: 0.0,
            fill: Color::default(),
            bounds: Bounds::compute(position, size),
        }
    }

    /// Builder-style size override.
    #[must_use]
    pub fn sized(mut self, size: Size) -> Self {
        self.set_size(size);
        self
    }

    /// Builder-style fill override.
    #[must_use]
    pub fn filled(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    // --- Accessors ---

    #[must_use]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    #[must_use]
    pub fn shape_type(&self) -> ShapeType {
        self.kind.shape_type()
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Rotation in degrees about the center. Applied at draw time only.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[must_use]
    pub fn fill(&self) -> Color {
        self.fill
    }

    #[must_use]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[must_use]
    pub fn bounding_rect(&self) -> IRect {
        self.bounds.rect
    }

    #[must_use]
    pub fn handle_rect(&self, handle: Handle) -> IRect {
        self.bounds.handle(handle)
    }

    /// Unsnapped drawing rect.
    #[must_use]
    pub fn frame(&self) -> RectF {
        RectF::from_origin_size(self.position, self.size)
    }

    /// Rotation pivot: `position + size / 2`.
    #[must_use]
    pub fn center(&self) -> Point {
        self.frame().center()
    }

    // --- Geometry ---

    /// Refresh the cached bounding rect and handles from position and size.
    pub fn recompute_bounds(&mut self) {
        self.bounds = Bounds::compute(self.position, self.size);
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        self.recompute_bounds();
    }

    /// Move by a pointer delta.
    pub fn translate(&mut self, delta: Point) {
        self.set_position(self.position + delta);
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.recompute_bounds();
    }

    /// Resize by a pointer delta; position is untouched.
    pub fn grow(&mut self, delta: Point) {
        self.set_size(self.size.grown_by(delta));
    }

    // --- Appearance ---

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
    }

    pub fn set_fill(&mut self, fill: Color) {
        self.fill = fill;
    }

    // --- Text ---

    /// Re-measure a text shape's content and adopt the ink size, then refresh
    /// bounds. No-op for other kinds.
    ///
    /// # Errors
    ///
    /// Returns the metrics error; size and bounds are left unchanged.
    pub fn measure(&mut self, metrics: &dyn TextMeasure) -> Result<(), SurfaceError> {
        let ShapeKind::Text { content, font } = &self.kind else {
            return Ok(());
        };
        let ink = metrics.measure(content, font)?;
        self.set_size(Size::new(ink.width, ink.height));
        Ok(())
    }

    /// Replace the content of a text shape and re-measure.
    ///
    /// Returns `false` (and changes nothing) for non-text shapes.
    pub fn set_text(&mut self, text: &str, metrics: &dyn TextMeasure) -> bool {
        let ShapeKind::Text { content, .. } = &mut self.kind else {
            return false;
        };
        text.clone_into(content);
        self.remeasure(metrics);
        true
    }

    /// Change the point size of a text shape and re-measure.
    ///
    /// Returns `false` (and changes nothing) for non-text shapes.
    pub fn set_font_size(&mut self, size: f64, metrics: &dyn TextMeasure) -> bool {
        let ShapeKind::Text { font, .. } = &mut self.kind else {
            return false;
        };
        font.size = size;
        self.remeasure(metrics);
        true
    }

    fn remeasure(&mut self, metrics: &dyn TextMeasure) {
        if let Err(e) = self.measure(metrics) {
            tracing::warn!(id = %self.id, error = %e, "text measurement failed; keeping previous size");
        }
    }
}

// =============================================================
// DocStore
// =============================================================

/// Insertion-ordered registry of shapes.
///
/// Iteration order is creation order, which is both paint order (first drawn
/// at the bottom) and hit-test priority (first match wins).
#[derive(Debug, Clone, Default)]
pub struct DocStore {
    shapes: IndexMap<ShapeId, Shape>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { shapes: IndexMap::new() }
    }

    /// Append a shape. A shape whose id is already present replaces the old
    /// one in place.
    pub fn insert(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.shapes.insert(id, shape);
        id
    }

    /// Remove a shape by id, keeping the order of the rest.
    pub fn remove(&mut self, id: &ShapeId) -> Option<Shape> {
        self.shapes.shift_remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    pub fn get_mut(&mut self, id: &ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &ShapeId) -> bool {
        self.shapes.contains_key(id)
    }

    /// Shapes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.shapes.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
