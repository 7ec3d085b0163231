//! Text metrics and alignment.
//!
//! Text shapes size themselves from the measured ink bounds of their content,
//! so the core needs a metrics service even when nothing is being drawn.
//! [`TextMeasure`] is that seam: the browser backend answers from
//! `CanvasRenderingContext2d::measure_text`, the native rasterizer from font
//! outlines, and [`MonospaceMetrics`] gives a deterministic estimate when no
//! real font is at hand.

#[cfg(test)]
#[path = "text_test.rs"]
mod text_test;

use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE};
use crate::geom::Point;
use crate::render::SurfaceError;

/// Typeface family and point size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
}

impl FontSpec {
    #[must_use]
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self { family: family.into(), size }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE)
    }
}

/// Ink bounds of a string relative to its drawing origin on the baseline.
///
/// `y` is negative when glyphs rise above the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Text metrics service.
pub trait TextMeasure {
    /// Measure the ink bounds of `text` set in `font`.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the backend cannot resolve the font or measure.
    fn measure(&self, text: &str, font: &FontSpec) -> Result<TextBounds, SurfaceError>;
}

/// Fixed-advance estimate: every char is `advance` ems wide and the ink box
/// spans `ascent` ems above the baseline and `descent` ems below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub advance: f64,
    pub ascent: f64,
    pub descent: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self { advance: 0.6, ascent: 0.72, descent: 0.0 }
    }
}

impl TextMeasure for MonospaceMetrics {
    #[allow(clippy::cast_precision_loss)]
    fn measure(&self, text: &str, font: &FontSpec) -> Result<TextBounds, SurfaceError> {
        let chars = text.chars().count() as f64;
        Ok(TextBounds {
            x: 0.0,
            y: -self.ascent * font.size,
            width: chars * self.advance * font.size,
            height: (self.ascent + self.descent) * font.size,
        })
    }
}

/// Alignment flags for anchoring a string at a point.
///
/// Within each axis the first flag set wins, in declaration order, so
/// `TOP | MIDDLE` behaves as `TOP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Align(u8);

impl Align {
    pub const LEFT: Align = Align(1 << 0);
    pub const CENTER: Align = Align(1 << 1);
    pub const RIGHT: Align = Align(1 << 2);
    pub const TOP: Align = Align(1 << 3);
    pub const MIDDLE: Align = Align(1 << 4);
    pub const BOTTOM: Align = Align(1 << 5);
    pub const BASELINE: Align = Align(1 << 6);

    /// Flags used by the editor for text shapes.
    pub const EDITOR: Align = Align(Self::TOP.0 | Self::MIDDLE.0);

    #[must_use]
    pub fn contains(self, other: Align) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    /// Offset to subtract from the anchor point to get the baseline origin.
    #[must_use]
    pub fn offset(self, bounds: &TextBounds) -> Point {
        let px = if self.contains(Self::LEFT) {
            bounds.x
        } else if self.contains(Self::CENTER) {
            bounds.width / 2.0
        } else if self.contains(Self::RIGHT) {
            bounds.width
        } else {
            0.0
        };

        let py = if self.contains(Self::TOP) {
            bounds.y
        } else if self.contains(Self::MIDDLE) {
            -bounds.height / 2.0
        } else {
            // BOTTOM and BASELINE both leave the baseline at the anchor.
            0.0
        };

        Point::new(px, py)
    }

    /// Baseline origin for drawing `bounds`-sized text anchored at `anchor`.
    #[must_use]
    pub fn origin(self, anchor: Point, bounds: &TextBounds) -> Point {
        anchor - self.offset(bounds)
    }
}

impl BitOr for Align {
    type Output = Align;

    fn bitor(self, rhs: Align) -> Align {
        Align(self.0 | rhs.0)
    }
}
