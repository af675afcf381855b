use eframe::egui;
use egui_commonmark::CommonMarkCache;

use crate::archive::ArchiveClient;
use crate::config::Config;
use crate::picker::Picker;
use crate::state::{PickerState, StateEvent};
use crate::ui;

/// Main application state
pub struct RouletteApp {
    /// Application configuration
    pub config: Config,
    /// Archive search client
    pub client: ArchiveClient,
    /// Category selection and the current fetch
    pub picker: PickerState,
    /// Status message for the status bar
    pub status_message: String,
    /// Cache for rendering item descriptions
    pub markdown_cache: CommonMarkCache,
    /// Whether to show the About dialog
    pub show_about_dialog: bool,
}

impl RouletteApp {
    /// Create a new application instance
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config, client: ArchiveClient) -> Self {
        let picker = Picker::new(&config.archive)
            .with_selection(config.picker.default_categories.iter().copied());

        Self {
            config,
            client,
            picker: PickerState::new(picker),
            status_message: "Ready".to_string(),
            markdown_cache: CommonMarkCache::default(),
            show_about_dialog: false,
        }
    }

    /// Start fetching a random item for the current selection
    pub fn fetch_random_media(&mut self) {
        let event = self.picker.fetch(&self.client);
        self.handle_event(event);
    }

    /// Open a detail page in the system browser
    pub fn open_in_browser(&mut self, url: &str) {
        if let Err(e) = open::that(url) {
            tracing::error!("Failed to open {}: {}", url, e);
            self.status_message = format!("Could not open browser: {}", e);
        }
    }

    fn handle_event(&mut self, event: StateEvent) {
        match event {
            StateEvent::StatusMessage(msg) => self.status_message = msg,
            StateEvent::ResultReady { title, url } => {
                tracing::info!("Showing {} ({})", title, url);
                if self.config.picker.open_in_browser {
                    self.open_in_browser(&url);
                }
            }
        }
    }
}

impl eframe::App for RouletteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async tasks
        for event in self.picker.poll(ctx) {
            self.handle_event(event);
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Discover Random Media from the Internet Archive");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("About").clicked() {
                        self.show_about_dialog = true;
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.picker.is_loading() {
                    ui.spinner();
                }
                ui.label(&self.status_message);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui::render_picker(self, ui);
        });

        ui::render_notice_dialog(&mut self.picker, ctx);
        ui::render_about_dialog(self, ctx);
    }
}
