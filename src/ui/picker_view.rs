//! Category checkboxes, action button and viewer panel

use std::sync::LazyLock;

use eframe::egui::{self, RichText};
use egui_commonmark::{CommonMarkCache, CommonMarkViewer};
use regex::Regex;

use crate::app::RouletteApp;
use crate::archive::MediaItem;
use crate::category::Category;
use crate::picker::{self, Content};

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>|</p\s*>|</div\s*>").expect("valid regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// What the user did this frame
#[derive(Default)]
struct Interaction {
    toggled: Vec<Category>,
    show_clicked: bool,
    open_url: Option<String>,
}

/// Render the picker: checkboxes, button and content area
pub fn render_picker(app: &mut RouletteApp, ui: &mut egui::Ui) {
    let interaction = {
        let view = picker::render(&app.picker.picker);
        let cache = &mut app.markdown_cache;
        let accepts_input = app.picker.accepts_input();
        let mut interaction = Interaction::default();

        // Controls stay inert while the notice is up
        ui.add_enabled_ui(accepts_input, |ui| {
            ui.add_space(8.0);
            ui.horizontal_wrapped(|ui| {
                for toggle in &view.categories {
                    let mut checked = toggle.checked;
                    if ui.checkbox(&mut checked, toggle.label).changed() {
                        interaction.toggled.push(toggle.category);
                    }
                    ui.add_space(8.0);
                }
            });

            ui.add_space(8.0);
            interaction.show_clicked = ui
                .add_enabled(view.button.enabled, egui::Button::new(view.button.label))
                .clicked();

            ui.add_space(12.0);
            egui::Frame::group(ui.style())
                .inner_margin(12.0)
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    match &view.content {
                        Content::Placeholder(text) => {
                            ui.label(RichText::new(*text).italics());
                        }
                        Content::Error(text) => {
                            ui.colored_label(ui.visuals().error_fg_color, *text);
                        }
                        Content::Frame { url, item } => {
                            if render_item(ui, item, url, cache) {
                                interaction.open_url = Some(url.clone());
                            }
                        }
                    }
                });
        });

        interaction
    };

    for category in interaction.toggled {
        app.picker.toggle(category);
    }
    if interaction.show_clicked {
        app.fetch_random_media();
    }
    if let Some(url) = interaction.open_url {
        app.open_in_browser(&url);
    }
}

/// Draw the viewer for one item. Returns true if "Open in browser" was clicked.
fn render_item(
    ui: &mut egui::Ui,
    item: &MediaItem,
    url: &str,
    cache: &mut CommonMarkCache,
) -> bool {
    ui.label(RichText::new(item.display_title()).size(18.0).strong());

    ui.horizontal(|ui| {
        if let Some(mediatype) = &item.mediatype {
            ui.weak("Type:");
            ui.label(mediatype);
            ui.add_space(16.0);
        }
        if !item.format.is_empty() {
            ui.weak("Format:");
            ui.label(item.format.join(", "));
        }
    });

    ui.add_space(4.0);
    let open_clicked = ui
        .horizontal(|ui| {
            ui.hyperlink_to(url, url);
            ui.button("Open in browser").clicked()
        })
        .inner;

    if let Some(description) = item.description_text() {
        ui.add_space(8.0);
        ui.separator();
        egui::ScrollArea::vertical()
            .max_height(ui.available_height())
            .show(ui, |ui| {
                CommonMarkViewer::new().show(ui, cache, &strip_html(&description));
            });
    }

    open_clicked
}

/// Reduce an HTML description to plain text paragraphs
fn strip_html(html: &str) -> String {
    let text = LINE_BREAK.replace_all(html, "\n\n");
    let text = TAG.replace_all(&text, "");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    BLANK_LINES.replace_all(text.trim(), "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html_plain_text_untouched() {
        assert_eq!(strip_html("Just a description."), "Just a description.");
    }

    #[test]
    fn test_strip_html_tags_and_breaks() {
        assert_eq!(
            strip_html("<p>First <b>bold</b> line</p><p>Second<br/>Third</p>"),
            "First bold line\n\nSecond\n\nThird"
        );
    }

    #[test]
    fn test_strip_html_entities() {
        assert_eq!(
            strip_html("Tom &amp; Jerry &lt;1940&gt;&nbsp;&quot;cartoon&quot;"),
            "Tom & Jerry <1940> \"cartoon\""
        );
    }

    #[test]
    fn test_strip_html_collapses_blank_runs() {
        assert_eq!(strip_html("a<br><br><br>b"), "a\n\nb");
    }
}
