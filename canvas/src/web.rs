//! Browser backend: [`Surface`] over a `CanvasRenderingContext2d`.

use std::f64::consts::PI;

use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use crate::asset::Bitmap;
use crate::doc::Color;
use crate::geom::{Point, RectF};
use crate::render::{Surface, SurfaceError};
use crate::text::{FontSpec, TextBounds, TextMeasure};

impl From<JsValue> for SurfaceError {
    fn from(value: JsValue) -> Self {
        Self::Backend(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// Fetch the 2D context of `canvas`.
///
/// # Errors
///
/// Returns `Err` if the element has no 2D context.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

fn font_css(font: &FontSpec) -> String {
    format!("{}px {}", font.size, font.family)
}

fn scratch_canvas(width: u32, height: u32) -> Result<HtmlCanvasElement, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document.create_element("canvas")?.dyn_into::<HtmlCanvasElement>()?;
    canvas.set_width(width);
    canvas.set_height(height);
    Ok(canvas)
}

impl TextMeasure for CanvasRenderingContext2d {
    fn measure(&self, text: &str, font: &FontSpec) -> Result<TextBounds, SurfaceError> {
        self.set_font(&font_css(font));
        self.set_text_align("left");
        self.set_text_baseline("alphabetic");
        let m = self.measure_text(text)?;
        let left = m.actual_bounding_box_left();
        let ascent = m.actual_bounding_box_ascent();
        Ok(TextBounds {
            x: -left,
            y: -ascent,
            width: left + m.actual_bounding_box_right(),
            height: ascent + m.actual_bounding_box_descent(),
        })
    }
}

impl Surface for CanvasRenderingContext2d {
    fn clear(&mut self, color: Color) -> Result<(), SurfaceError> {
        self.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        let Some(canvas) = self.canvas() else {
            return Err(SurfaceError::Backend("context is detached from its canvas".to_owned()));
        };
        self.set_fill_style_str(&color.css());
        CanvasRenderingContext2d::fill_rect(self, 0.0, 0.0, f64::from(canvas.width()), f64::from(canvas.height()));
        Ok(())
    }

    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn rotate_about(&mut self, degrees: f64, pivot: Point) -> Result<(), SurfaceError> {
        self.translate(pivot.x, pivot.y)?;
        self.rotate(degrees.to_radians())?;
        self.translate(-pivot.x, -pivot.y)?;
        Ok(())
    }

    fn fill_rect(&mut self, rect: RectF, color: Color) -> Result<(), SurfaceError> {
        self.set_fill_style_str(&color.css());
        CanvasRenderingContext2d::fill_rect(self, rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn stroke_rect(&mut self, rect: RectF, color: Color, width: f64) -> Result<(), SurfaceError> {
        self.set_stroke_style_str(&color.css());
        self.set_line_width(width);
        CanvasRenderingContext2d::stroke_rect(self, rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn fill_round_rect(&mut self, rect: RectF, radius: f64, color: Color) -> Result<(), SurfaceError> {
        let r = radius.min(rect.width.abs() / 2.0).min(rect.height.abs() / 2.0);
        let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
        self.begin_path();
        self.move_to(x + r, y);
        self.arc_to(x + w, y, x + w, y + h, r)?;
        self.arc_to(x + w, y + h, x, y + h, r)?;
        self.arc_to(x, y + h, x, y, r)?;
        self.arc_to(x, y, x + w, y, r)?;
        self.close_path();
        self.set_fill_style_str(&color.css());
        self.fill();
        Ok(())
    }

    fn fill_oval(&mut self, rect: RectF, color: Color) -> Result<(), SurfaceError> {
        let c = rect.center();
        self.begin_path();
        self.ellipse(c.x, c.y, rect.width.abs() / 2.0, rect.height.abs() / 2.0, 0.0, 0.0, 2.0 * PI)?;
        self.set_fill_style_str(&color.css());
        self.fill();
        Ok(())
    }

    fn fill_triangle(&mut self, points: [Point; 3], color: Color) -> Result<(), SurfaceError> {
        let [a, b, c] = points;
        self.begin_path();
        self.move_to(a.x, a.y);
        self.line_to(b.x, b.y);
        self.line_to(c.x, c.y);
        self.close_path();
        self.set_fill_style_str(&color.css());
        self.fill();
        Ok(())
    }

    fn draw_text(&mut self, text: &str, origin: Point, font: &FontSpec, color: Color) -> Result<(), SurfaceError> {
        self.set_font(&font_css(font));
        self.set_text_align("left");
        self.set_text_baseline("alphabetic");
        self.set_fill_style_str(&color.css());
        self.fill_text(text, origin.x, origin.y)?;
        Ok(())
    }

    fn draw_image(&mut self, bitmap: &Bitmap, rect: RectF) -> Result<(), SurfaceError> {
        // Canvas2D cannot scale ImageData directly; go through a scratch canvas.
        let data =
            ImageData::new_with_u8_clamped_array_and_sh(Clamped(bitmap.rgba.as_slice()), bitmap.width, bitmap.height)?;
        let scratch = scratch_canvas(bitmap.width, bitmap.height)?;
        context_2d(&scratch)?.put_image_data(&data, 0.0, 0.0)?;
        self.draw_image_with_html_canvas_element_and_dw_and_dh(&scratch, rect.x, rect.y, rect.width, rect.height)?;
        Ok(())
    }
}
