use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::asset::ImageCache;
use crate::camera::Camera;
use crate::config::EditorConfig;
use crate::doc::{Color, DocStore, Shape, ShapeId, ShapeKind, ShapeType};
use crate::error::EditorError;
use crate::geom::Point;
use crate::hit::{self, Cursor};
use crate::input::{Button, Buttons, InputState, Mode, UiState};
use crate::render;
use crate::text::{MonospaceMetrics, TextMeasure};
use crate::web;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Advisory shown to the user when a command cannot apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A command needs a selected shape and there is none.
    NoSelection,
}

impl Notice {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::NoSelection => "Please select an object first",
        }
    }
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    ShapeCreated { id: ShapeId },
    ShapeDeleted { id: ShapeId },
    SelectionChanged(Option<ShapeId>),
    SetCursor(Cursor),
    Notice(Notice),
    /// Secondary press: the host should open its context menu at this screen point.
    ContextMenuRequested(Point),
    RenderNeeded,
}

/// Core engine state: the logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub doc: DocStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub config: EditorConfig,
    metrics: Box<dyn TextMeasure>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_metrics(EditorConfig::default(), Box::new(MonospaceMetrics::default()))
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a core that sizes text shapes with `metrics`.
    #[must_use]
    pub fn with_metrics(config: EditorConfig, metrics: Box<dyn TextMeasure>) -> Self {
        Self {
            doc: DocStore::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            config,
            metrics,
        }
    }

    // --- Mode / type ---

    pub fn set_mode(&mut self, mode: Mode) {
        tracing::debug!(?mode, "mode changed");
        self.ui.mode = mode;
    }

    /// Parse and set the mode from a UI label.
    ///
    /// # Errors
    ///
    /// `EditorError::UnknownMode`; the mode is left unchanged.
    pub fn set_mode_named(&mut self, name: &str) -> Result<(), EditorError> {
        let mode = name.parse::<Mode>().inspect_err(|e| tracing::warn!(error = %e, "mode change rejected"))?;
        self.set_mode(mode);
        Ok(())
    }

    pub fn set_shape_type(&mut self, shape_type: ShapeType) {
        tracing::debug!(%shape_type, "shape type changed");
        self.ui.shape_type = shape_type;
    }

    /// Parse and set the shape type from a UI label.
    ///
    /// # Errors
    ///
    /// `EditorError::UnknownShapeType`; the type is left unchanged.
    pub fn set_shape_type_named(&mut self, name: &str) -> Result<(), EditorError> {
        let shape_type = name
            .parse::<ShapeType>()
            .inspect_err(|e| tracing::warn!(error = %e, "shape type change rejected"))?;
        self.set_shape_type(shape_type);
        Ok(())
    }

    // --- Commands ---

    /// Place a new shape of `shape_type` at canvas point `at` and select it.
    pub fn add_shape(&mut self, shape_type: ShapeType, at: Point) -> Vec<Action> {
        let kind = ShapeKind::default_for(
            shape_type,
            &self.config.default_font,
            &self.config.default_text,
            &self.config.default_image_path,
        );
        let mut shape = Shape::new(kind, at)
            .sized(self.config.default_size)
            .filled(self.config.default_fill);
        if let Err(e) = shape.measure(self.metrics.as_ref()) {
            tracing::warn!(error = %e, "text measurement failed; using default size");
        }

        let id = self.doc.insert(shape);
        tracing::debug!(%id, %shape_type, x = at.x, y = at.y, "shape added");

        self.ui.selected_id = Some(id);
        self.ui.active_handle = None;
        vec![Action::ShapeCreated { id }, Action::SelectionChanged(Some(id)), Action::RenderNeeded]
    }

    /// Like [`EngineCore::add_shape`], with the type given by name.
    ///
    /// # Errors
    ///
    /// `EditorError::UnknownShapeType`; no shape is created.
    pub fn add_shape_named(&mut self, name: &str, at: Point) -> Result<Vec<Action>, EditorError> {
        let shape_type = name
            .parse::<ShapeType>()
            .inspect_err(|e| tracing::warn!(error = %e, "add rejected"))?;
        Ok(self.add_shape(shape_type, at))
    }

    /// Select the first shape under canvas point `at`, or clear the selection.
    /// Captures the handle under the point for the next drag.
    pub fn select_at(&mut self, at: Point) -> Vec<Action> {
        let hit = hit::find_shape_at(&self.doc, at);
        let previous = self.ui.selected_id;
        self.ui.selected_id = hit;
        self.ui.active_handle = hit
            .and_then(|id| self.doc.get(&id))
            .and_then(|shape| hit::find_handle_at(shape, at));
        tracing::debug!(selected = ?hit, handle = ?self.ui.active_handle, "select");

        let mut actions = Vec::new();
        if previous != hit {
            actions.push(Action::SelectionChanged(hit));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Remove the selected shape. No-op when nothing is selected.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        let Some(id) = self.ui.selected_id.take() else {
            tracing::debug!("delete with empty selection ignored");
            return Vec::new();
        };
        self.ui.active_handle = None;
        self.ui.hover_handle = None;

        let mut actions = Vec::new();
        if self.doc.remove(&id).is_some() {
            tracing::debug!(%id, "shape deleted");
            actions.push(Action::ShapeDeleted { id });
        }
        actions.push(Action::SelectionChanged(None));
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn set_fill_color(&mut self, color: Color) -> Vec<Action> {
        self.update_selected("set fill color", |shape, _| {
            shape.set_fill(color);
            true
        })
    }

    pub fn set_rotation(&mut self, degrees: f64) -> Vec<Action> {
        self.update_selected("set rotation", |shape, _| {
            shape.set_rotation(degrees);
            true
        })
    }

    /// Replace the content of the selected text shape.
    pub fn set_text(&mut self, content: &str) -> Vec<Action> {
        self.update_selected("set text", |shape, metrics| shape.set_text(content, metrics))
    }

    /// Change the point size of the selected text shape.
    pub fn set_font_size(&mut self, size: f64) -> Vec<Action> {
        self.update_selected("set font size", |shape, metrics| shape.set_font_size(size, metrics))
    }

    /// Apply `f` to the selected shape. `f` returns whether it changed anything.
    fn update_selected<F>(&mut self, command: &'static str, f: F) -> Vec<Action>
    where
        F: FnOnce(&mut Shape, &dyn TextMeasure) -> bool,
    {
        let metrics = self.metrics.as_ref();
        let Some(shape) = self.ui.selected_id.and_then(|id| self.doc.get_mut(&id)) else {
            tracing::info!(command, "{}", Notice::NoSelection.message());
            return vec![Action::Notice(Notice::NoSelection)];
        };
        if f(shape, metrics) {
            vec![Action::RenderNeeded]
        } else {
            tracing::info!(command, shape_type = %shape.shape_type(), "command does not apply to selected shape");
            vec![Action::None]
        }
    }

    // --- Pointer input ---

    /// Primary press: add in Add mode, select in Edit mode. Secondary press
    /// asks the host for the context menu.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        match button {
            Button::Primary => {}
            Button::Secondary => return vec![Action::ContextMenuRequested(screen_pt)],
            Button::Middle => return Vec::new(),
        }

        let pt = self.camera.screen_to_world(screen_pt);
        self.input = InputState::Pressed;
        let actions = match self.ui.mode {
            Mode::Add => self.add_shape(self.ui.shape_type, pt),
            Mode::Edit => self.select_at(pt),
        };
        self.ui.last_pointer = Some(pt);
        actions
    }

    /// Drag the selection (grow in Add mode; resize or move in Edit mode) and
    /// refresh the cursor hint.
    pub fn on_pointer_move(&mut self, screen_pt: Point, buttons: Buttons) -> Vec<Action> {
        let pt = self.camera.screen_to_world(screen_pt);
        let mut actions = Vec::new();

        let dragging = self.input == InputState::Pressed && buttons.primary;
        if dragging
            && let Some(last) = self.ui.last_pointer
            && self.drag_selected(pt - last)
        {
            actions.push(Action::RenderNeeded);
        }
        self.ui.last_pointer = Some(pt);

        if self.ui.mode == Mode::Edit {
            self.update_hover(pt, &mut actions);
        }
        actions
    }

    /// End the gesture. Selection and captured handle persist.
    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        self.input = InputState::Idle;
        self.ui.last_pointer = Some(self.camera.screen_to_world(screen_pt));
        Vec::new()
    }

    fn drag_selected(&mut self, delta: Point) -> bool {
        let mode = self.ui.mode;
        let resizing = self.ui.active_handle.is_some();
        let Some(shape) = self.ui.selected_id.and_then(|id| self.doc.get_mut(&id)) else {
            return false;
        };
        match mode {
            Mode::Add => shape.grow(delta),
            Mode::Edit if resizing => shape.grow(delta),
            Mode::Edit => shape.translate(delta),
        }
        true
    }

    fn update_hover(&mut self, pt: Point, actions: &mut Vec<Action>) {
        let hover = self
            .selected_shape()
            .and_then(|shape| hit::find_handle_at(shape, pt));
        self.ui.hover_handle = hover;

        let cursor = hit::cursor_for(hover);
        if cursor != self.ui.cursor {
            self.ui.cursor = cursor;
            actions.push(Action::SetCursor(cursor));
        }
    }

    // --- Queries ---

    /// The currently selected shape id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ShapeId> {
        self.ui.selected_id
    }

    #[must_use]
    pub fn selected_shape(&self) -> Option<&Shape> {
        self.ui.selected_id.and_then(|id| self.doc.get(&id))
    }

    /// Look up a shape by id.
    #[must_use]
    pub fn object(&self, id: &ShapeId) -> Option<&Shape> {
        self.doc.get(id)
    }

    /// The metrics service used to size text shapes.
    #[must_use]
    pub fn metrics(&self) -> &dyn TextMeasure {
        self.metrics.as_ref()
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    ctx: CanvasRenderingContext2d,
    images: ImageCache,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the element has no 2D context.
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = web::context_2d(canvas)?;
        let core = EngineCore::with_metrics(EditorConfig::default(), Box::new(ctx.clone()));
        Ok(Self { ctx, images: ImageCache::default(), core })
    }

    /// Register encoded image bytes for an image source path.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the bytes do not decode.
    pub fn preload_image(&mut self, source: &str, bytes: &[u8]) -> Result<(), JsValue> {
        self.images
            .insert_encoded(source, bytes)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    // --- Delegated commands ---

    pub fn set_mode(&mut self, mode: Mode) {
        self.core.set_mode(mode);
    }

    /// # Errors
    ///
    /// `EditorError::UnknownMode`.
    pub fn set_mode_named(&mut self, name: &str) -> Result<(), EditorError> {
        self.core.set_mode_named(name)
    }

    pub fn set_shape_type(&mut self, shape_type: ShapeType) {
        self.core.set_shape_type(shape_type);
    }

    /// # Errors
    ///
    /// `EditorError::UnknownShapeType`.
    pub fn set_shape_type_named(&mut self, name: &str) -> Result<(), EditorError> {
        self.core.set_shape_type_named(name)
    }

    pub fn add_shape(&mut self, shape_type: ShapeType, at: Point) -> Vec<Action> {
        self.core.add_shape(shape_type, at)
    }

    /// # Errors
    ///
    /// `EditorError::UnknownShapeType`.
    pub fn add_shape_named(&mut self, name: &str, at: Point) -> Result<Vec<Action>, EditorError> {
        self.core.add_shape_named(name, at)
    }

    pub fn select_at(&mut self, at: Point) -> Vec<Action> {
        self.core.select_at(at)
    }

    pub fn delete_selected(&mut self) -> Vec<Action> {
        self.core.delete_selected()
    }

    pub fn set_fill_color(&mut self, color: Color) -> Vec<Action> {
        self.core.set_fill_color(color)
    }

    pub fn set_rotation(&mut self, degrees: f64) -> Vec<Action> {
        self.core.set_rotation(degrees)
    }

    pub fn set_text(&mut self, content: &str) -> Vec<Action> {
        self.core.set_text(content)
    }

    pub fn set_font_size(&mut self, size: f64) -> Vec<Action> {
        self.core.set_font_size(size)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, buttons: Buttons) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, buttons)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render(&mut self) -> Result<(), JsValue> {
        render::draw_scene(&mut self.ctx, &self.core.doc, &self.core.ui, &mut self.images, &self.core.config)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ShapeId> {
        self.core.selection()
    }

    #[must_use]
    pub fn object(&self, id: &ShapeId) -> Option<&Shape> {
        self.core.object(id)
    }
}
