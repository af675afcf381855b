//! Media picker: category selection, fetch lifecycle and what to show.
//!
//! A fetch is split into `begin_fetch` and `complete_fetch` so the desktop UI
//! can run the HTTP round trip on a tokio task and feed the outcome back from
//! its frame loop. `fetch_random_media` chains the two for callers that can
//! simply await.
//!
//! Randomisation happens in three stages: a category out of the selection,
//! a page out of `1..=max_page`, then one document out of the returned page.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::IndexedRandom;
use thiserror::Error;

use crate::archive::{self, FetchError, MediaItem, SearchBackend, SearchRequest};
use crate::category::Category;
use crate::config::ArchiveConfig;

/// Shown before anything has been fetched
pub const PLACEHOLDER_MESSAGE: &str = "This tool pulls random media selections using the Internet Archive API. \
Narrow down your search using the buttons above to specify media type. \
I hope you discover something neat today!";

/// Shown for empty pages and failed requests alike
pub const NO_MEDIA_MESSAGE: &str = "No media found for the selected type. Please try again.";

pub const SHOW_LABEL: &str = "Show Me Random Media";
pub const LOADING_LABEL: &str = "Loading...";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerError {
    #[error("Please select at least one media type.")]
    NoSelection,
}

/// What the picker is currently displaying
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewStatus {
    #[default]
    Idle,
    Loading,
    Showing(MediaItem),
    Failed,
}

/// Selection plus fetch status for one picker view
#[derive(Debug, Clone)]
pub struct Picker {
    selection: BTreeSet<Category>,
    status: ViewStatus,
    rows: u32,
    max_page: u32,
    details_url: String,
}

impl Default for Picker {
    fn default() -> Self {
        Self::new(&ArchiveConfig::default())
    }
}

impl Picker {
    pub fn new(config: &ArchiveConfig) -> Self {
        Self {
            selection: BTreeSet::new(),
            status: ViewStatus::Idle,
            rows: config.rows,
            max_page: config.max_page.max(1),
            details_url: config.details_url.clone(),
        }
    }

    /// Start with the given categories checked
    pub fn with_selection(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.selection.extend(categories);
        self
    }

    /// Flip whether a category is part of the selection
    pub fn toggle_category(&mut self, category: Category) {
        if !self.selection.remove(&category) {
            self.selection.insert(category);
        }
    }

    pub fn is_selected(&self, category: Category) -> bool {
        self.selection.contains(&category)
    }

    pub fn selection(&self) -> impl Iterator<Item = Category> + '_ {
        self.selection.iter().copied()
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == ViewStatus::Loading
    }

    /// Currently displayed item, if any
    pub fn current_item(&self) -> Option<&MediaItem> {
        match &self.status {
            ViewStatus::Showing(item) => Some(item),
            _ => None,
        }
    }

    /// Detail page of the displayed item
    pub fn detail_url(&self) -> Option<String> {
        self.current_item()
            .map(|item| archive::detail_url(&self.details_url, &item.identifier))
    }

    /// Validate the selection and build the next request.
    ///
    /// On success the picker is `Loading` and any previous result or error is
    /// gone. With nothing selected the status is left untouched.
    pub fn begin_fetch<R: Rng>(&mut self, rng: &mut R) -> Result<SearchRequest, PickerError> {
        let candidates: Vec<Category> = self.selection.iter().copied().collect();
        let category = *candidates.choose(rng).ok_or(PickerError::NoSelection)?;

        let request = SearchRequest {
            category,
            page: rng.random_range(1..=self.max_page),
            rows: self.rows,
        };

        self.status = ViewStatus::Loading;
        tracing::debug!(
            category = %request.category,
            page = request.page,
            "Starting random media fetch"
        );
        Ok(request)
    }

    /// Apply the outcome of a request started with `begin_fetch`
    pub fn complete_fetch<R: Rng>(
        &mut self,
        outcome: Result<Vec<MediaItem>, FetchError>,
        rng: &mut R,
    ) {
        self.status = match outcome {
            Ok(docs) => match docs.choose(rng) {
                Some(item) => {
                    tracing::info!("Picked {} out of {} results", item.identifier, docs.len());
                    ViewStatus::Showing(item.clone())
                }
                None => {
                    tracing::info!("Search returned no documents");
                    ViewStatus::Failed
                }
            },
            Err(e) => {
                tracing::warn!("Failed to fetch media: {}", e);
                ViewStatus::Failed
            }
        };
    }

    /// Pick a category, fetch a random page of it and show one random result
    pub async fn fetch_random_media<B, R>(
        &mut self,
        backend: &B,
        rng: &mut R,
    ) -> Result<(), PickerError>
    where
        B: SearchBackend + ?Sized,
        R: Rng,
    {
        let request = self.begin_fetch(rng)?;
        let outcome = backend.search(&request).await;
        self.complete_fetch(outcome, rng);
        Ok(())
    }
}

/// One checkbox in the category list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryToggle {
    pub category: Category,
    pub label: &'static str,
    pub checked: bool,
}

/// The action button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonView {
    pub label: &'static str,
    pub enabled: bool,
}

/// Main content area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content<'a> {
    Placeholder(&'static str),
    Error(&'static str),
    Frame { url: String, item: &'a MediaItem },
}

/// Everything needed to draw the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerView<'a> {
    pub categories: Vec<CategoryToggle>,
    pub button: ButtonView,
    pub content: Content<'a>,
}

/// Describe what the picker should look like in its current state
pub fn render(picker: &Picker) -> PickerView<'_> {
    let categories = Category::all()
        .iter()
        .map(|&category| CategoryToggle {
            category,
            label: category.label(),
            checked: picker.is_selected(category),
        })
        .collect();

    let button = if picker.is_loading() {
        ButtonView { label: LOADING_LABEL, enabled: false }
    } else {
        ButtonView { label: SHOW_LABEL, enabled: true }
    };

    let content = match &picker.status {
        ViewStatus::Idle | ViewStatus::Loading => Content::Placeholder(PLACEHOLDER_MESSAGE),
        ViewStatus::Failed => Content::Error(NO_MEDIA_MESSAGE),
        ViewStatus::Showing(item) => Content::Frame {
            url: archive::detail_url(&picker.details_url, &item.identifier),
            item,
        },
    };

    PickerView { categories, button, content }
}
