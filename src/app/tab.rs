//! Tabs and the type-erased view the UI and handler drive.
//!
//! Each tab owns a `ListController` over its own record type. The rest of the
//! application only sees [`TableView`], so products and leads can sit side by
//! side in one `Vec`.

use crate::config::{AppConfig, RecordKind, SourceConfig, TableConfig};
use crate::table::column::Cell;
use crate::table::controller::{Backing, Completed, FetchTicket, LoadState, MutationTicket, Outcome};
use crate::table::dialog::{Dialog, DialogMode};
use crate::table::error::TableError;
use crate::table::form::Form;
use crate::table::lead::Lead;
use crate::table::paginator::{PageWindow, Showing};
use crate::table::product::Product;
use crate::table::record::{RecordId, TableRecord};
use crate::table::seed;
use crate::table::ListController;
use serde_json::Value;

/// One rendered row of the current page.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: RecordId,
    pub cells: Vec<Cell>,
}

pub trait TableView: Send {
    fn noun(&self) -> &'static str;
    /// Column headers with their preferred widths.
    fn headers(&self) -> Vec<(&'static str, u16)>;
    fn page_rows(&self) -> Vec<RowView>;
    fn record_count(&self) -> usize;
    fn filtered_count(&self) -> usize;

    fn search_term(&self) -> &str;
    fn set_search_term(&mut self, term: String);

    fn current_page(&self) -> usize;
    fn total_pages(&self) -> usize;
    fn page_window(&self) -> PageWindow;
    fn showing(&self) -> Showing;
    fn set_page(&mut self, page: usize) -> bool;
    fn next_page(&mut self) -> bool;
    fn prev_page(&mut self) -> bool;
    fn first_page(&mut self) -> bool;
    fn last_page(&mut self) -> bool;

    fn dialog(&self) -> &Dialog;
    fn open_dialog(&mut self, mode: DialogMode, target: Option<RecordId>) -> Result<(), TableError>;
    fn close_dialog(&mut self);
    fn form_mut(&mut self) -> Option<&mut Form>;
    fn submit(&mut self) -> Result<Outcome, TableError>;

    fn is_remote(&self) -> bool;
    fn is_read_only(&self) -> bool;
    fn load_state(&self) -> &LoadState;
    fn begin_fetch(&mut self) -> FetchTicket;
    /// Decode raw records and hand them to the controller. Returns `false`
    /// for a stale ticket.
    fn complete_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Value>, TableError>) -> bool;
    /// `None` when `ticket` is not the mutation in flight.
    fn complete_mutation(
        &mut self,
        ticket: MutationTicket,
        result: Result<(), TableError>,
    ) -> Option<Result<Completed, TableError>>;
}

impl<R: TableRecord> TableView for ListController<R> {
    fn noun(&self) -> &'static str {
        R::NOUN
    }

    fn headers(&self) -> Vec<(&'static str, u16)> {
        R::columns().iter().map(|c| (c.header, c.width)).collect()
    }

    fn page_rows(&self) -> Vec<RowView> {
        let columns = R::columns();
        self.current_page_records()
            .into_iter()
            .map(|record| RowView {
                id: record.id(),
                cells: columns.iter().map(|c| c.cell(record)).collect(),
            })
            .collect()
    }

    fn record_count(&self) -> usize {
        self.records().len()
    }

    fn filtered_count(&self) -> usize {
        self.filtered_records().len()
    }

    fn search_term(&self) -> &str {
        ListController::search_term(self)
    }

    fn set_search_term(&mut self, term: String) {
        ListController::set_search_term(self, term)
    }

    fn current_page(&self) -> usize {
        ListController::current_page(self)
    }

    fn total_pages(&self) -> usize {
        ListController::total_pages(self)
    }

    fn page_window(&self) -> PageWindow {
        ListController::page_window(self)
    }

    fn showing(&self) -> Showing {
        ListController::showing(self)
    }

    fn set_page(&mut self, page: usize) -> bool {
        ListController::set_page(self, page)
    }

    fn next_page(&mut self) -> bool {
        ListController::next_page(self)
    }

    fn prev_page(&mut self) -> bool {
        ListController::prev_page(self)
    }

    fn first_page(&mut self) -> bool {
        ListController::first_page(self)
    }

    fn last_page(&mut self) -> bool {
        ListController::last_page(self)
    }

    fn dialog(&self) -> &Dialog {
        ListController::dialog(self)
    }

    fn open_dialog(&mut self, mode: DialogMode, target: Option<RecordId>) -> Result<(), TableError> {
        ListController::open_dialog(self, mode, target)
    }

    fn close_dialog(&mut self) {
        ListController::close_dialog(self)
    }

    fn form_mut(&mut self) -> Option<&mut Form> {
        ListController::form_mut(self)
    }

    fn submit(&mut self) -> Result<Outcome, TableError> {
        ListController::submit(self)
    }

    fn is_remote(&self) -> bool {
        self.backing() == Backing::Remote
    }

    fn is_read_only(&self) -> bool {
        ListController::is_read_only(self)
    }

    fn load_state(&self) -> &LoadState {
        ListController::load_state(self)
    }

    fn begin_fetch(&mut self) -> FetchTicket {
        ListController::begin_fetch(self)
    }

    fn complete_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Value>, TableError>) -> bool {
        let decoded = result.and_then(|items| {
            items
                .into_iter()
                .map(|item| {
                    serde_json::from_value::<R>(item)
                        .map_err(|e| TableError::Transport(format!("bad record: {}", e)))
                })
                .collect::<Result<Vec<R>, TableError>>()
        });
        ListController::complete_fetch(self, ticket, decoded)
    }

    fn complete_mutation(
        &mut self,
        ticket: MutationTicket,
        result: Result<(), TableError>,
    ) -> Option<Result<Completed, TableError>> {
        ListController::complete_mutation(self, ticket, result)
    }
}

pub struct Tab {
    pub name: String,
    pub title: String,
    pub description: String,
    pub view: Box<dyn TableView>,
    /// Highlighted row within the current page.
    pub selected: usize,
}

impl Tab {
    pub fn new(config: &TableConfig, view: Box<dyn TableView>) -> Self {
        Self {
            name: config.name.clone(),
            title: config.display_title().to_string(),
            description: config.description.clone(),
            view,
            selected: 0,
        }
    }

    pub fn selected_id(&self) -> Option<RecordId> {
        self.view.page_rows().get(self.selected).map(|row| row.id)
    }

    /// Keep the highlight on an existing row after the page changed.
    pub fn clamp_selection(&mut self) {
        let len = self.view.page_rows().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

fn make_view<R: TableRecord>(config: &TableConfig, actor: &str, records: Option<Vec<R>>) -> Box<dyn TableView> {
    let controller = match (&config.source, records) {
        (SourceConfig::Seed { .. }, Some(records)) => ListController::local(records, config.page_size),
        (SourceConfig::Seed { .. }, None) => ListController::local(Vec::new(), config.page_size),
        (SourceConfig::Remote(_), _) => ListController::remote(config.page_size),
    };
    Box::new(controller.with_actor(actor).with_read_only(config.read_only))
}

/// Build one tab per configured table, in config order.
pub fn build_tabs(config: &AppConfig) -> Vec<Tab> {
    let actor = config.session.actor.as_str();
    config
        .tables
        .iter()
        .map(|table| {
            let dataset = match &table.source {
                SourceConfig::Seed { dataset } => Some(*dataset),
                SourceConfig::Remote(_) => None,
            };
            let view = match table.kind {
                RecordKind::Product => {
                    make_view::<Product>(table, actor, dataset.and_then(seed::products))
                }
                RecordKind::Lead => make_view::<Lead>(table, actor, dataset.and_then(seed::leads)),
            };
            Tab::new(table, view)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_tabs() {
        let tabs = build_tabs(&AppConfig::default());
        assert_eq!(tabs.len(), 4);
        assert_eq!(tabs[0].view.record_count(), 6);
        assert_eq!(tabs[0].view.noun(), "Item");
        assert_eq!(tabs[0].view.page_rows().len(), 5);
        assert!(tabs[2].view.is_read_only());
        assert!(tabs[3].view.is_remote());
        assert_eq!(tabs[3].view.record_count(), 0);
        assert_eq!(tabs[3].view.noun(), "Lead");
    }

    #[test]
    fn test_tabs_do_not_share_records() {
        let mut tabs = build_tabs(&AppConfig::default());
        tabs[0].view.open_dialog(DialogMode::Delete, Some(1)).unwrap();
        tabs[0].view.submit().unwrap();
        assert_eq!(tabs[0].view.record_count(), 5);
        assert_eq!(tabs[1].view.record_count(), 6);
    }

    #[test]
    fn test_complete_fetch_decodes_json() {
        let mut tabs = build_tabs(&AppConfig::default());
        let leads = &mut tabs[3].view;
        let ticket = leads.begin_fetch();
        let applied = leads.complete_fetch(
            ticket,
            Ok(vec![json!({"id": 9, "leadName": "Ada", "status": "New"})]),
        );
        assert!(applied);
        assert_eq!(leads.record_count(), 1);
        assert_eq!(leads.page_rows()[0].id, 9);
        assert_eq!(leads.headers()[1].0, "Name");
    }

    #[test]
    fn test_undecodable_fetch_keeps_records() {
        let mut tabs = build_tabs(&AppConfig::default());
        let leads = &mut tabs[3].view;
        let ticket = leads.begin_fetch();
        leads.complete_fetch(ticket, Ok(vec![json!({"id": 1})]));
        let ticket = leads.begin_fetch();
        leads.complete_fetch(ticket, Ok(vec![json!({"id": "not a number"})]));
        assert_eq!(leads.record_count(), 1);
        assert!(leads.load_state().error.is_some());
    }

    #[test]
    fn test_selection_clamps_to_page() {
        let mut tabs = build_tabs(&AppConfig::default());
        let tab = &mut tabs[0];
        tab.selected = 4;
        tab.view.next_page();
        tab.clamp_selection();
        assert_eq!(tab.selected, 0);
        assert_eq!(tab.selected_id(), Some(6));
    }
}
