//! User interface components.
//!
//! This module provides the Dioxus-based UI for the call panel:
//!
//! - [`app`] - Main application entry point
//! - [`components`] - Title, call buttons, mute button and toasts
//! - [`members`] - Members list with per-member mute toggles
//! - [`boxes`] - Invite, leave and settings boxes
//! - [`view`] - Snapshot of the panel shared with the components

mod app;
mod boxes;
mod components;
mod members;
mod view;

pub use app::App;
pub use view::PanelHandle;
