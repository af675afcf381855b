//! Desktop application state
//!
//! State structs own their async tasks and expose poll methods that report
//! back through `StateEvent` instead of mutating the app directly.

mod picker;

pub use picker::PickerState;

/// Events that state poll methods can return
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    /// Update the status bar
    StatusMessage(String),

    /// A new item is on display
    ResultReady { title: String, url: String },
}
