//! Editing core for a small 2D vector editor.
//!
//! The crate owns the shape registry, selection, hit-testing, and the
//! pointer-driven add/select/move/resize state machine. Drawing goes through
//! the [`render::Surface`] trait so the same scene can be painted into a
//! browser canvas (compiled to WebAssembly, see [`web`]) or into a native
//! raster. The host is responsible only for wiring input events to the engine
//! and reacting to the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Shapes, colors, and the insertion-ordered registry |
//! | [`geom`] | Points, sizes, float and integer rects |
//! | [`camera`] | Screen-to-canvas coordinate mapping |
//! | [`input`] | Mode, buttons, UI state, and the gesture state machine |
//! | [`hit`] | Shape and handle hit-testing, cursor hints |
//! | [`text`] | Font spec, text metrics, alignment |
//! | [`render`] | `Surface` trait and scene drawing |
//! | [`asset`] | Bitmap decoding and the image cache |
//! | [`web`] | `Surface` for `CanvasRenderingContext2d` |
//! | [`config`] | Editor defaults |
//! | [`consts`] | Shared numeric constants (handle size, corner radius, etc.) |
//! | [`error`] | Command-boundary errors |

pub mod asset;
pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod geom;
pub mod hit;
pub mod input;
pub mod render;
pub mod text;
pub mod web;
