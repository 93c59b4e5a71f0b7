use crate::table::controller::{FetchTicket, MutationTicket};
use crate::table::error::TableError;
use crossterm::event::Event as CrosstermEvent;
use serde_json::Value;

/// Index of a tab in [`AppState::tabs`](crate::app::state::AppState).
pub type TabId = usize;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// A list request finished. Records are still raw JSON; the tab decodes
    /// them into its own record type.
    FetchCompleted {
        tab: TabId,
        ticket: FetchTicket,
        result: Result<Vec<Value>, TableError>,
    },

    /// A remote add/update/delete finished.
    MutationCompleted {
        tab: TabId,
        ticket: MutationTicket,
        result: Result<(), TableError>,
    },

    /// Tick for UI refresh
    Tick,
}
