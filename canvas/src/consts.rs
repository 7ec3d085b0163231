//! Shared numeric constants for the canvas crate.

// ── Handles ─────────────────────────────────────────────────────

/// Side length of a resize handle square, in canvas pixels.
pub const HANDLE_SIZE: i32 = 10;

/// Distance from a bounding-box corner to its handle's top-left, per axis.
pub const HANDLE_OFFSET: f64 = 6.0;

// ── Shapes ──────────────────────────────────────────────────────

/// Corner radius for rectangle fills.
pub const CORNER_RADIUS: f64 = 12.0;

/// Width and height given to a freshly placed shape before it is dragged out.
pub const DEFAULT_EXTENT: f64 = 1.0;

/// Point size of a new text shape.
pub const DEFAULT_FONT_SIZE: f64 = 50.0;

/// Typeface family of a new text shape.
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

/// Content of a new text shape.
pub const DEFAULT_TEXT: &str = "Text";

// ── Overlay ─────────────────────────────────────────────────────

/// Stroke width of the selection rectangle.
pub const OVERLAY_STROKE_WIDTH: f64 = 1.0;
