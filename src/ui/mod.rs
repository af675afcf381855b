//! UI rendering for the desktop window

mod components;
mod picker_view;

pub use components::{render_about_dialog, render_notice_dialog};
pub use picker_view::render_picker;
