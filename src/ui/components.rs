//! Dialogs shared by the desktop window

use eframe::egui::{self, RichText};

use crate::app::RouletteApp;
use crate::state::PickerState;

/// Render the blocking notice (e.g. nothing selected).
///
/// The modal dims the window and swallows clicks behind it until acknowledged.
pub fn render_notice_dialog(state: &mut PickerState, ctx: &egui::Context) {
    let Some(message) = state.notice.clone() else {
        return;
    };

    let mut acknowledged = false;
    let response = egui::Modal::new(egui::Id::new("picker_notice")).show(ctx, |ui| {
        ui.set_width(280.0);
        ui.vertical_centered(|ui| {
            ui.heading("Notice");
            ui.add_space(8.0);
            ui.label(message);
            ui.add_space(12.0);
            if ui.button("OK").clicked() {
                acknowledged = true;
            }
            ui.add_space(4.0);
        });
    });

    if acknowledged || response.should_close() {
        state.acknowledge_notice();
    }
}

/// Render the About dialog
pub fn render_about_dialog(app: &mut RouletteApp, ctx: &egui::Context) {
    if !app.show_about_dialog {
        return;
    }

    egui::Window::new("About Archive Roulette")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 200.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);

                ui.label(RichText::new("Archive Roulette").size(24.0).strong());

                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION"))).weak(),
                );

                ui.add_space(12.0);
                ui.label("Random texts, videos, audio, images and software");
                ui.label("from the Internet Archive.");

                ui.add_space(12.0);
                if ui.link("archive.org").clicked() {
                    app.open_in_browser("https://archive.org/");
                }

                ui.add_space(12.0);
                if ui.button("Close").clicked() {
                    app.show_about_dialog = false;
                }

                ui.add_space(8.0);
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::{Picker, PickerError};

    fn run_frame(state: &mut PickerState, ctx: &egui::Context) {
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            render_notice_dialog(state, ctx);
        });
    }

    #[test]
    fn test_notice_stays_until_acknowledged() {
        let mut state = PickerState::new(Picker::default());
        let ctx = egui::Context::default();

        state.notice = Some(PickerError::NoSelection.to_string());
        assert!(!state.accepts_input());

        run_frame(&mut state, &ctx);
        run_frame(&mut state, &ctx);
        assert_eq!(state.notice.as_deref(), Some("Please select at least one media type."));
        assert!(!state.accepts_input());

        state.acknowledge_notice();
        run_frame(&mut state, &ctx);
        assert!(state.accepts_input());
    }

    #[test]
    fn test_no_notice_draws_nothing() {
        let mut state = PickerState::new(Picker::default());
        let ctx = egui::Context::default();
        run_frame(&mut state, &ctx);
        assert!(state.notice.is_none());
    }
}
