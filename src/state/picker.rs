//! Picker state for the desktop window

use eframe::egui;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::task::JoinHandle;

use crate::archive::{FetchError, MediaItem, SearchBackend};
use crate::category::Category;
use crate::picker::{Picker, ViewStatus};
use crate::state::StateEvent;
use crate::task::{PollResult, poll_task};

/// Picker plus the task running its current request
pub struct PickerState {
    pub picker: Picker,
    /// Notice waiting to be acknowledged
    pub notice: Option<String>,
    task: Option<JoinHandle<Result<Vec<MediaItem>, FetchError>>>,
    rng: StdRng,
}

impl PickerState {
    pub fn new(picker: Picker) -> Self {
        Self::with_rng(picker, StdRng::from_os_rng())
    }

    pub fn with_rng(picker: Picker, rng: StdRng) -> Self {
        Self {
            picker,
            notice: None,
            task: None,
            rng,
        }
    }

    pub fn toggle(&mut self, category: Category) {
        self.picker.toggle_category(category);
    }

    pub fn is_loading(&self) -> bool {
        self.picker.is_loading()
    }

    /// Checkboxes and the button only take input while no notice is up
    pub fn accepts_input(&self) -> bool {
        self.notice.is_none()
    }

    pub fn acknowledge_notice(&mut self) {
        self.notice = None;
    }

    /// Start a random fetch on the tokio runtime.
    ///
    /// A task still pending from an earlier click is detached and its result
    /// dropped.
    pub fn fetch<B>(&mut self, backend: &B) -> StateEvent
    where
        B: SearchBackend + Clone + Send + Sync + 'static,
    {
        let request = match self.picker.begin_fetch(&mut self.rng) {
            Ok(request) => request,
            Err(e) => {
                self.notice = Some(e.to_string());
                return StateEvent::StatusMessage(e.to_string());
            }
        };

        let backend = backend.clone();
        self.task = Some(tokio::spawn(async move { backend.search(&request).await }));

        StateEvent::StatusMessage(format!("Searching {}...", request.category.label()))
    }

    /// Poll the running request for completion
    pub fn poll(&mut self, ctx: &egui::Context) -> Vec<StateEvent> {
        let mut events = Vec::new();

        let outcome = match poll_task(&mut self.task) {
            PollResult::Complete(Ok(outcome)) => outcome,
            PollResult::Complete(Err(e)) => {
                tracing::error!("Search task panicked: {}", e);
                Err(FetchError::Task(e.to_string()))
            }
            PollResult::Pending => {
                ctx.request_repaint();
                return events;
            }
            PollResult::NoTask => return events,
        };

        self.picker.complete_fetch(outcome, &mut self.rng);

        match self.picker.status() {
            ViewStatus::Showing(item) => {
                let title = item.display_title().to_string();
                events.push(StateEvent::StatusMessage(format!("Showing {}", title)));
                if let Some(url) = self.picker.detail_url() {
                    events.push(StateEvent::ResultReady { title, url });
                }
            }
            _ => events.push(StateEvent::StatusMessage("No media found".to_string())),
        }

        events
    }
}
