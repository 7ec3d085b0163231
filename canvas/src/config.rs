//! Editor defaults. `EditorConfig::default()` reproduces the stock editor.

use crate::consts::{CORNER_RADIUS, DEFAULT_EXTENT, DEFAULT_TEXT, OVERLAY_STROKE_WIDTH};
use crate::doc::Color;
use crate::geom::Size;
use crate::text::FontSpec;

/// Tunables for newly placed shapes and the selection overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Size given to non-text shapes when placed.
    pub default_size: Size,
    /// Fill given to new shapes.
    pub default_fill: Color,
    /// Content of new text shapes.
    pub default_text: String,
    /// Font of new text shapes.
    pub default_font: FontSpec,
    /// Bitmap referenced by new image shapes.
    pub default_image_path: String,
    /// Corner radius of rectangle fills.
    pub corner_radius: f64,
    /// Canvas clear color.
    pub background: Color,
    /// Stroke color of the selection rectangle and handle outlines.
    pub overlay_color: Color,
    pub overlay_stroke_width: f64,
    /// Fill of the handle squares.
    pub handle_fill: Color,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_size: Size::new(DEFAULT_EXTENT, DEFAULT_EXTENT),
            default_fill: Color::default(),
            default_text: DEFAULT_TEXT.to_owned(),
            default_font: FontSpec::default(),
            default_image_path: "img.jpg".to_owned(),
            corner_radius: CORNER_RADIUS,
            background: Color::WHITE,
            overlay_color: Color::OVERLAY_BLUE,
            overlay_stroke_width: OVERLAY_STROKE_WIDTH,
            handle_fill: Color::WHITE,
        }
    }
}
