//! Rendering: draws the scene onto an abstract [`Surface`].
//!
//! The core never owns a graphics context. A backend (the browser's Canvas 2D
//! in [`crate::web`], or the native rasterizer in the `vectorsk` binary)
//! implements [`Surface`], and this module walks the registry in paint order
//! and issues primitive calls. Nothing here mutates document state.
//!
//! Backend failures propagate as `SurfaceError`. A shape whose bitmap cannot
//! be loaded, or whose font cannot be resolved, draws nothing; that is not an
//! error and the rest of the frame is still painted.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::ops::{Deref, DerefMut};

use crate::asset::{Bitmap, ImageCache};
use crate::config::EditorConfig;
use crate::doc::{Color, DocStore, Shape, ShapeKind};
use crate::geom::{Point, RectF};
use crate::hit::Handle;
use crate::input::UiState;
use crate::text::{Align, FontSpec, TextMeasure};

/// Failure reported by a drawing backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("surface backend error: {0}")]
    Backend(String),
    #[error("no font available for family {0:?}")]
    MissingFont(String),
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// Drawing primitives the renderer needs from a backend.
///
/// `save`/`restore` bracket transform changes; prefer [`SavedState`] over
/// calling them directly.
pub trait Surface: TextMeasure {
    /// Reset the transform and fill the whole surface.
    ///
    /// # Errors
    ///
    /// Backend failure.
    fn clear(&mut self, color: Color) -> Result<(), SurfaceError>;

    /// Push the current transform.
    fn save(&mut self);

    /// Pop the transform pushed by the matching `save`.
    fn restore(&mut self);

    /// Rotate subsequent drawing by `degrees` clockwise about `pivot`.
    ///
    /// # Errors
    ///
    /// Backend failure.
    fn rotate_about(&mut self, degrees: f64, pivot: Point) -> Result<(), SurfaceError>;

    /// # Errors
    ///
    /// Backend failure.
    fn fill_rect(&mut self, rect: RectF, color: Color) -> Result<(), SurfaceError>;

    /// # Errors
    ///
    /// Backend failure.
    fn stroke_rect(&mut self, rect: RectF, color: Color, width: f64) -> Result<(), SurfaceError>;

    /// # Errors
    ///
    /// Backend failure.
    fn fill_round_rect(&mut self, rect: RectF, radius: f64, color: Color) -> Result<(), SurfaceError>;

    /// Fill the oval inscribed in `rect`.
    ///
    /// # Errors
    ///
    /// Backend failure.
    fn fill_oval(&mut self, rect: RectF, color: Color) -> Result<(), SurfaceError>;

    /// # Errors
    ///
    /// Backend failure.
    fn fill_triangle(&mut self, points: [Point; 3], color: Color) -> Result<(), SurfaceError>;

    /// Draw `text` with its baseline origin at `origin`.
    ///
    /// # Errors
    ///
    /// Backend failure or unresolvable font.
    fn draw_text(&mut self, text: &str, origin: Point, font: &FontSpec, color: Color) -> Result<(), SurfaceError>;

    /// Stretch `bitmap` over `rect`.
    ///
    /// # Errors
    ///
    /// Backend failure.
    fn draw_image(&mut self, bitmap: &Bitmap, rect: RectF) -> Result<(), SurfaceError>;
}

/// Scoped transform state: saves on construction, restores on drop.
///
/// Restoration happens on every exit path, including `?` returns and panics
/// unwinding through the drawing code.
pub struct SavedState<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: Surface + ?Sized> SavedState<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: Surface + ?Sized> Deref for SavedState<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for SavedState<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for SavedState<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

/// Draw the full scene: background, shapes in registry order, then the
/// selection overlay.
///
/// # Errors
///
/// Returns the first backend error; the surface transform is left balanced.
pub fn draw_scene(
    surface: &mut dyn Surface,
    doc: &DocStore,
    ui: &UiState,
    images: &mut ImageCache,
    config: &EditorConfig,
) -> Result<(), SurfaceError> {
    surface.clear(config.background)?;

    for shape in doc.iter() {
        draw_shape(surface, shape, images, config)?;
    }

    if let Some(shape) = ui.selected_id.and_then(|id| doc.get(&id)) {
        draw_selection(surface, shape, config)?;
    }

    Ok(())
}

/// Draw one shape, rotated about its center when it has a rotation.
///
/// # Errors
///
/// Backend failure.
#[allow(clippy::float_cmp)]
pub fn draw_shape(
    surface: &mut dyn Surface,
    shape: &Shape,
    images: &mut ImageCache,
    config: &EditorConfig,
) -> Result<(), SurfaceError> {
    if shape.rotation() == 0.0 {
        return draw_fill(surface, shape, images, config);
    }
    let mut scoped = SavedState::new(surface);
    scoped.rotate_about(shape.rotation(), shape.center())?;
    draw_fill(&mut *scoped, shape, images, config)
}

// =============================================================
// Shape dispatch
// =============================================================

fn draw_fill(
    surface: &mut dyn Surface,
    shape: &Shape,
    images: &mut ImageCache,
    config: &EditorConfig,
) -> Result<(), SurfaceError> {
    let frame = shape.frame();
    let color = shape.fill();

    match shape.kind() {
        ShapeKind::Rectangle => surface.fill_round_rect(frame, config.corner_radius, color),
        ShapeKind::Triangle => surface.fill_triangle(triangle_vertices(frame), color),
        ShapeKind::Ellipse => surface.fill_oval(frame, color),
        ShapeKind::Text { content, font } => match draw_label(surface, shape.position(), content, font, color) {
            // The backend reports an unresolvable family once; the shape is skipped.
            Err(SurfaceError::MissingFont(family)) => {
                tracing::debug!(id = %shape.id(), family = %family, "text shape skipped");
                Ok(())
            }
            drawn => drawn,
        },
        ShapeKind::Image { source } => match images.get(source) {
            Some(bitmap) => surface.draw_image(&bitmap, frame),
            None => Ok(()),
        },
    }
}

fn draw_label(
    surface: &mut dyn Surface,
    anchor: Point,
    content: &str,
    font: &FontSpec,
    color: Color,
) -> Result<(), SurfaceError> {
    let ink = surface.measure(content, font)?;
    let origin = Align::EDITOR.origin(anchor, &ink);
    surface.draw_text(content, origin, font, color)
}

/// Top-center, bottom-left, bottom-right of `frame`.
#[must_use]
pub fn triangle_vertices(frame: RectF) -> [Point; 3] {
    [
        Point::new(frame.x + frame.width / 2.0, frame.y),
        Point::new(frame.x, frame.y + frame.height),
        Point::new(frame.x + frame.width, frame.y + frame.height),
    ]
}

// =============================================================
// Selection UI
// =============================================================

fn draw_selection(surface: &mut dyn Surface, shape: &Shape, config: &EditorConfig) -> Result<(), SurfaceError> {
    surface.stroke_rect(
        shape.bounding_rect().to_rect_f(),
        config.overlay_color,
        config.overlay_stroke_width,
    )?;

    for handle in Handle::ALL {
        let rect = shape.handle_rect(handle).to_rect_f();
        surface.fill_rect(rect, config.handle_fill)?;
        surface.stroke_rect(rect, config.overlay_color, config.overlay_stroke_width)?;
    }
    Ok(())
}
