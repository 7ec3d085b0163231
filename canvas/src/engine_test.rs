#![allow(clippy::float_cmp)]

use super::*;
use crate::geom::Size;
use crate::hit::Handle;
use crate::text::FontSpec;

// =============================================================
// Helpers
// =============================================================

/// Core with the start-up rectangle at (100, 100), 200x200, in Edit mode.
fn core_with_rect() -> (EngineCore, ShapeId) {
    let mut core = EngineCore::new();
    let shape = Shape::new(ShapeKind::Rectangle, Point::new(100.0, 100.0)).sized(Size::new(200.0, 200.0));
    let id = core.doc.insert(shape);
    (core, id)
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn press(core: &mut EngineCore, x: f64, y: f64) -> Vec<Action> {
    core.on_pointer_down(pt(x, y), Button::Primary)
}

fn drag_to(core: &mut EngineCore, x: f64, y: f64) -> Vec<Action> {
    core.on_pointer_move(pt(x, y), Buttons::PRIMARY)
}

fn hover(core: &mut EngineCore, x: f64, y: f64) -> Vec<Action> {
    core.on_pointer_move(pt(x, y), Buttons::NONE)
}

fn release(core: &mut EngineCore, x: f64, y: f64) -> Vec<Action> {
    core.on_pointer_up(pt(x, y), Button::Primary)
}

fn shape(core: &EngineCore, id: ShapeId) -> &Shape {
    core.object(&id).unwrap()
}

// =============================================================
// Mode and type
// =============================================================

#[test]
fn new_core_is_empty_edit_mode() {
    let core = EngineCore::new();
    assert!(core.doc.is_empty());
    assert_eq!(core.ui.mode, Mode::Edit);
    assert_eq!(core.input, InputState::Idle);
    assert!(core.selection().is_none());
}

#[test]
fn named_mode_and_type() {
    let mut core = EngineCore::new();
    core.set_mode_named("add").unwrap();
    core.set_shape_type_named("Triangle").unwrap();
    assert_eq!(core.ui.mode, Mode::Add);
    assert_eq!(core.ui.shape_type, ShapeType::Triangle);
}

#[test]
fn unknown_names_leave_state_unchanged() {
    let mut core = EngineCore::new();
    assert_eq!(core.set_mode_named("paint"), Err(EditorError::UnknownMode("paint".to_owned())));
    assert_eq!(
        core.set_shape_type_named("star"),
        Err(EditorError::UnknownShapeType("star".to_owned()))
    );
    assert_eq!(core.ui.mode, Mode::Edit);
    assert_eq!(core.ui.shape_type, ShapeType::Rectangle);
}

// =============================================================
// Commands
// =============================================================

#[test]
fn add_shape_inserts_and_selects() {
    let mut core = EngineCore::new();
    let actions = core.add_shape(ShapeType::Ellipse, pt(10.0, 20.0));
    let id = core.selection().unwrap();
    assert_eq!(
        actions,
        vec![Action::ShapeCreated { id }, Action::SelectionChanged(Some(id)), Action::RenderNeeded]
    );
    let s = shape(&core, id);
    assert_eq!(s.shape_type(), ShapeType::Ellipse);
    assert_eq!(s.position(), pt(10.0, 20.0));
    assert_eq!(s.size(), Size::new(1.0, 1.0));
    assert_eq!(s.fill(), Color::GREEN);
}

#[test]
fn add_text_shape_is_sized_by_metrics() {
    let mut core = EngineCore::new();
    core.add_shape(ShapeType::Text, pt(0.0, 0.0));
    let s = core.selected_shape().unwrap();
    assert!((s.size().width - 120.0).abs() < 1e-9);
    assert!((s.size().height - 36.0).abs() < 1e-9);
    assert_eq!(
        s.kind(),
        &ShapeKind::Text { content: "Text".to_owned(), font: FontSpec::default() }
    );
}

#[test]
fn add_image_shape_references_default_path() {
    let mut core = EngineCore::new();
    core.add_shape(ShapeType::Image, pt(0.0, 0.0));
    assert_eq!(
        core.selected_shape().map(Shape::kind),
        Some(&ShapeKind::Image { source: "img.jpg".to_owned() })
    );
}

#[test]
fn add_shape_named_rejects_unknown_type() {
    let mut core = EngineCore::new();
    assert!(core.add_shape_named("blob", pt(0.0, 0.0)).is_err());
    assert!(core.doc.is_empty());
    assert!(core.add_shape_named("rectangle", pt(0.0, 0.0)).is_ok());
    assert_eq!(core.doc.len(), 1);
}

#[test]
fn add_uses_configured_defaults() {
    let mut config = EditorConfig::default();
    config.default_size = Size::new(40.0, 30.0);
    config.default_fill = Color::WHITE;
    let mut core = EngineCore::with_metrics(config, Box::new(MonospaceMetrics::default()));
    core.add_shape(ShapeType::Rectangle, pt(0.0, 0.0));
    let s = core.selected_shape().unwrap();
    assert_eq!(s.size(), Size::new(40.0, 30.0));
    assert_eq!(s.fill(), Color::WHITE);
}

#[test]
fn select_inside_and_outside() {
    let (mut core, id) = core_with_rect();
    assert_eq!(core.select_at(pt(150.0, 150.0)), vec![Action::SelectionChanged(Some(id)), Action::RenderNeeded]);
    assert_eq!(core.selection(), Some(id));
    assert_eq!(core.select_at(pt(50.0, 50.0)), vec![Action::SelectionChanged(None), Action::RenderNeeded]);
    assert_eq!(core.selection(), None);
}

#[test]
fn reselecting_same_shape_only_renders() {
    let (mut core, _) = core_with_rect();
    core.select_at(pt(150.0, 150.0));
    assert_eq!(core.select_at(pt(160.0, 160.0)), vec![Action::RenderNeeded]);
}

#[test]
fn delete_selected_removes_shape() {
    let (mut core, id) = core_with_rect();
    core.select_at(pt(150.0, 150.0));
    let actions = core.delete_selected();
    assert_eq!(
        actions,
        vec![Action::ShapeDeleted { id }, Action::SelectionChanged(None), Action::RenderNeeded]
    );
    assert!(core.doc.is_empty());
    assert!(core.selection().is_none());
}

#[test]
fn delete_without_selection_is_noop() {
    let (mut core, _) = core_with_rect();
    assert!(core.delete_selected().is_empty());
    assert_eq!(core.doc.len(), 1);
}

#[test]
fn fill_without_selection_notifies() {
    let (mut core, id) = core_with_rect();
    assert_eq!(core.set_fill_color(Color::WHITE), vec![Action::Notice(Notice::NoSelection)]);
    assert_eq!(shape(&core, id).fill(), Color::GREEN);
    assert_eq!(Notice::NoSelection.message(), "Please select an object first");
}

#[test]
fn fill_and_rotation_apply_to_selection() {
    let (mut core, id) = core_with_rect();
    core.select_at(pt(150.0, 150.0));
    let red = Color::from_rgb8(255, 0, 0);
    assert_eq!(core.set_fill_color(red), vec![Action::RenderNeeded]);
    assert_eq!(core.set_rotation(30.0), vec![Action::RenderNeeded]);
    assert_eq!(shape(&core, id).fill(), red);
    assert_eq!(shape(&core, id).rotation(), 30.0);
}

#[test]
fn rotation_without_selection_notifies() {
    let (mut core, id) = core_with_rect();
    assert_eq!(core.set_rotation(90.0), vec![Action::Notice(Notice::NoSelection)]);
    assert_eq!(shape(&core, id).rotation(), 0.0);
}

#[test]
fn text_commands_on_text_shape() {
    let mut core = EngineCore::new();
    core.add_shape(ShapeType::Text, pt(0.0, 0.0));
    assert_eq!(core.set_text("Hi"), vec![Action::RenderNeeded]);
    assert!((core.selected_shape().unwrap().size().width - 60.0).abs() < 1e-9);
    assert_eq!(core.set_font_size(10.0), vec![Action::RenderNeeded]);
    assert!((core.selected_shape().unwrap().size().width - 12.0).abs() < 1e-9);
}

#[test]
fn text_commands_ignore_non_text() {
    let (mut core, id) = core_with_rect();
    core.select_at(pt(150.0, 150.0));
    assert_eq!(core.set_text("nope"), vec![Action::None]);
    assert_eq!(shape(&core, id).kind(), &ShapeKind::Rectangle);
}

#[test]
fn stale_selection_counts_as_none() {
    let (mut core, id) = core_with_rect();
    core.select_at(pt(150.0, 150.0));
    core.doc.remove(&id);
    assert_eq!(core.set_fill_color(Color::WHITE), vec![Action::Notice(Notice::NoSelection)]);
    assert!(core.selected_shape().is_none());
}

// =============================================================
// Pointer: Edit mode
// =============================================================

#[test]
fn press_inside_selects() {
    let (mut core, id) = core_with_rect();
    press(&mut core, 150.0, 150.0);
    assert_eq!(core.selection(), Some(id));
    assert_eq!(core.input, InputState::Pressed);
    assert_eq!(core.ui.active_handle, None);
    assert_eq!(core.ui.last_pointer, Some(pt(150.0, 150.0)));
}

#[test]
fn press_outside_clears_selection() {
    let (mut core, _) = core_with_rect();
    press(&mut core, 150.0, 150.0);
    release(&mut core, 150.0, 150.0);
    press(&mut core, 50.0, 50.0);
    assert_eq!(core.selection(), None);
}

#[test]
fn drag_body_moves_shape() {
    let (mut core, id) = core_with_rect();
    press(&mut core, 150.0, 150.0);
    assert_eq!(drag_to(&mut core, 170.0, 160.0), vec![Action::RenderNeeded]);
    drag_to(&mut core, 180.0, 180.0);
    let s = shape(&core, id);
    assert_eq!(s.position(), pt(130.0, 130.0));
    assert_eq!(s.size(), Size::new(200.0, 200.0));
}

#[test]
fn drag_bottom_right_handle_resizes() {
    let (mut core, id) = core_with_rect();
    press(&mut core, 299.0, 299.0);
    assert_eq!(core.selection(), Some(id));
    assert_eq!(core.ui.active_handle, Some(Handle::BottomRight));
    drag_to(&mut core, 319.0, 319.0);
    let s = shape(&core, id);
    assert_eq!(s.position(), pt(100.0, 100.0));
    assert_eq!(s.size(), Size::new(220.0, 220.0));
}

#[test]
fn every_handle_grows_by_pointer_delta() {
    let (mut core, id) = core_with_rect();
    press(&mut core, 100.0, 100.0);
    assert_eq!(core.ui.active_handle, Some(Handle::TopLeft));
    drag_to(&mut core, 90.0, 95.0);
    let s = shape(&core, id);
    assert_eq!(s.position(), pt(100.0, 100.0));
    assert_eq!(s.size(), Size::new(190.0, 195.0));
}

#[test]
fn move_without_press_does_not_drag() {
    let (mut core, id) = core_with_rect();
    press(&mut core, 150.0, 150.0);
    release(&mut core, 150.0, 150.0);
    hover(&mut core, 200.0, 200.0);
    drag_to(&mut core, 220.0, 220.0);
    assert_eq!(shape(&core, id).position(), pt(100.0, 100.0));
    assert_eq!(core.ui.last_pointer, Some(pt(220.0, 220.0)));
}

#[test]
fn release_returns_to_idle_and_keeps_selection() {
    let (mut core, id) = core_with_rect();
    press(&mut core, 150.0, 150.0);
    assert!(release(&mut core, 160.0, 160.0).is_empty());
    assert_eq!(core.input, InputState::Idle);
    assert_eq!(core.selection(), Some(id));
    assert_eq!(core.ui.last_pointer, Some(pt(160.0, 160.0)));
}

#[test]
fn hover_over_handle_sets_cursor_once() {
    let (mut core, _) = core_with_rect();
    press(&mut core, 150.0, 150.0);
    release(&mut core, 150.0, 150.0);
    assert_eq!(hover(&mut core, 99.0, 99.0), vec![Action::SetCursor(Cursor::NwseResize)]);
    assert_eq!(core.ui.hover_handle, Some(Handle::TopLeft));
    assert!(hover(&mut core, 100.0, 100.0).is_empty());
    assert_eq!(hover(&mut core, 299.0, 99.0), vec![Action::SetCursor(Cursor::NeswResize)]);
    assert_eq!(hover(&mut core, 200.0, 200.0), vec![Action::SetCursor(Cursor::Default)]);
    assert_eq!(core.ui.hover_handle, None);
}

#[test]
fn hover_without_selection_keeps_default_cursor() {
    let (mut core, _) = core_with_rect();
    assert!(hover(&mut core, 99.0, 99.0).is_empty());
    assert_eq!(core.ui.cursor, Cursor::Default);
}

#[test]
fn secondary_press_requests_context_menu() {
    let (mut core, id) = core_with_rect();
    press(&mut core, 150.0, 150.0);
    release(&mut core, 150.0, 150.0);
    let actions = core.on_pointer_down(pt(20.0, 30.0), Button::Secondary);
    assert_eq!(actions, vec![Action::ContextMenuRequested(pt(20.0, 30.0))]);
    assert_eq!(core.selection(), Some(id));
    assert_eq!(core.input, InputState::Idle);
}

#[test]
fn context_menu_delete_flow() {
    let (mut core, _) = core_with_rect();
    press(&mut core, 150.0, 150.0);
    release(&mut core, 150.0, 150.0);
    core.on_pointer_down(pt(150.0, 150.0), Button::Secondary);
    core.delete_selected();
    assert!(core.doc.is_empty());
}

#[test]
fn middle_press_is_ignored() {
    let (mut core, _) = core_with_rect();
    assert!(core.on_pointer_down(pt(150.0, 150.0), Button::Middle).is_empty());
    assert_eq!(core.input, InputState::Idle);
    assert!(core.selection().is_none());
}

#[test]
fn camera_pan_maps_pointer_to_canvas() {
    let (mut core, id) = core_with_rect();
    core.camera.pan = Point::new(100.0, 0.0);
    press(&mut core, 160.0, 150.0);
    assert_eq!(core.selection(), None);
    press(&mut core, 250.0, 150.0);
    assert_eq!(core.selection(), Some(id));
    assert_eq!(core.ui.last_pointer, Some(pt(150.0, 150.0)));
}

// =============================================================
// Pointer: Add mode
// =============================================================

#[test]
fn add_mode_press_places_and_drag_grows() {
    let mut core = EngineCore::new();
    core.set_mode(Mode::Add);
    core.set_shape_type(ShapeType::Triangle);
    let actions = press(&mut core, 10.0, 10.0);
    let id = core.selection().unwrap();
    assert!(actions.contains(&Action::ShapeCreated { id }));

    drag_to(&mut core, 60.0, 40.0);
    let s = shape(&core, id);
    assert_eq!(s.shape_type(), ShapeType::Triangle);
    assert_eq!(s.position(), pt(10.0, 10.0));
    assert_eq!(s.size(), Size::new(51.0, 31.0));
}

#[test]
fn add_mode_every_press_adds() {
    let mut core = EngineCore::new();
    core.set_mode(Mode::Add);
    press(&mut core, 10.0, 10.0);
    release(&mut core, 10.0, 10.0);
    press(&mut core, 10.0, 10.0);
    release(&mut core, 10.0, 10.0);
    assert_eq!(core.doc.len(), 2);
}

#[test]
fn add_mode_hover_does_not_touch_cursor() {
    let mut core = EngineCore::new();
    core.set_mode(Mode::Add);
    press(&mut core, 100.0, 100.0);
    drag_to(&mut core, 300.0, 300.0);
    release(&mut core, 300.0, 300.0);
    assert!(hover(&mut core, 95.0, 95.0).is_empty());
    assert_eq!(core.ui.cursor, Cursor::Default);
}

#[test]
fn switching_mode_keeps_selection() {
    let mut core = EngineCore::new();
    core.set_mode(Mode::Add);
    press(&mut core, 100.0, 100.0);
    drag_to(&mut core, 200.0, 200.0);
    release(&mut core, 200.0, 200.0);
    let id = core.selection().unwrap();
    core.set_mode(Mode::Edit);
    assert_eq!(core.selection(), Some(id));
    press(&mut core, 150.0, 150.0);
    drag_to(&mut core, 160.0, 150.0);
    assert_eq!(shape(&core, id).position(), pt(110.0, 100.0));
}

#[test]
fn press_on_handle_outside_rect_deselects() {
    // The top-left handle square pokes outside the shape; a press there misses.
    let (mut core, _) = core_with_rect();
    press(&mut core, 150.0, 150.0);
    release(&mut core, 150.0, 150.0);
    press(&mut core, 96.0, 96.0);
    assert_eq!(core.selection(), None);
    assert_eq!(core.ui.active_handle, None);
}
