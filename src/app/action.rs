use crate::app::event::TabId;
use crate::table::controller::{FetchTicket, MutationTicket, RemoteRequest};

/// Side effects requested by the handler and carried out by the main loop.
#[derive(Debug)]
pub enum Action {
    Fetch { tab: TabId, ticket: FetchTicket },
    Submit {
        tab: TabId,
        ticket: MutationTicket,
        request: RemoteRequest,
    },
    Quit,
}
