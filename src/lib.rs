//! boxpoly - bounding box and polygon image annotation editor core.
//!
//! The [`Editor`] owns loaded images, per-image annotation sets, labels and
//! the transient drawing state. Hosts feed it [`EditorEvent`]s through
//! [`Editor::update`], paint [`render::Frame`]s, and export annotations as
//! YOLO text, COCO JSON or binary mask PNGs through [`format`].

mod app;
pub mod color_utils;
pub mod config;
pub mod constants;
pub mod data;
pub mod format;
pub mod geometry;
mod handlers;
pub mod keybindings;
pub mod message;
pub mod model;
pub mod render;
pub mod session;
pub mod state;

pub use app::Editor;
pub use message::{Advisory, EditorEvent, Key, Modifiers, Response};
