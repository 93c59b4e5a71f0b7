//! List controller: the state behind one table view.
//!
//! Owns the record collection, the search term, the current page, and the
//! dialog. Local tables apply mutations in place. Remote tables hand back a
//! [`RemoteRequest`] for the caller to perform and learn the result through
//! [`ListController::complete_mutation`] / [`ListController::complete_fetch`];
//! the collection only ever changes wholesale from a fetch.
//!
//! Every operation either applies fully or leaves collection, page, and
//! dialog untouched (apart from recording an inline error on the dialog).

use crate::table::dialog::{Dialog, DialogMode, SubmitStatus};
use crate::table::error::TableError;
use crate::table::form::Form;
use crate::table::paginator::{self, PageWindow, Showing};
use crate::table::record::{Clock, RecordId, Stamp, SystemClock, TableRecord};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_ACTOR: &str = "Current User";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backing {
    Local,
    Remote,
}

/// Identifies one fetch. Only the most recently issued ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket(u64);

/// Identifies one remote mutation. A reply is applied only when its ticket
/// matches the request still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MutationTicket(u64);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadState {
    pub loading: bool,
    /// Message from the last failed fetch; cleared by the next success.
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Add,
    Edit,
    Delete,
}

impl MutationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MutationKind::Add => "add",
            MutationKind::Edit => "edit",
            MutationKind::Delete => "delete",
        }
    }
}

/// A change that reached the collection (or the server).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub kind: MutationKind,
    /// `None` for a remote add; the server picks the id.
    pub id: Option<RecordId>,
    pub label: String,
    pub actor: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RemoteRequest {
    /// Record payload without `id`.
    Create(Value),
    Update(Value),
    Delete(RecordId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Collection changed locally; dialog closed.
    Applied(Mutation),
    /// Caller must perform the request, then report back with the ticket.
    Remote {
        ticket: MutationTicket,
        request: RemoteRequest,
    },
    /// Nothing to submit (view dialog); dialog closed.
    Closed,
}

/// A remote mutation the server accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed {
    pub mutation: Option<Mutation>,
    pub refetch: FetchTicket,
}

pub struct ListController<R: TableRecord> {
    records: Vec<R>,
    search: String,
    current_page: usize,
    page_size: usize,
    dialog: Dialog,
    backing: Backing,
    read_only: bool,
    load: LoadState,
    generation: u64,
    mutation_seq: u64,
    in_flight: Option<(MutationTicket, Mutation)>,
    actor: String,
    clock: Arc<dyn Clock>,
}

impl<R: TableRecord> ListController<R> {
    /// Controller over a fixed starting collection.
    pub fn local(seed: Vec<R>, page_size: usize) -> Self {
        Self::with_backing(seed, page_size, Backing::Local)
    }

    /// Controller whose collection comes from fetches. Starts empty.
    pub fn remote(page_size: usize) -> Self {
        Self::with_backing(Vec::new(), page_size, Backing::Remote)
    }

    fn with_backing(records: Vec<R>, page_size: usize, backing: Backing) -> Self {
        Self {
            records,
            search: String::new(),
            current_page: 1,
            page_size: page_size.max(1),
            dialog: Dialog::Closed,
            backing,
            read_only: false,
            load: LoadState::default(),
            generation: 0,
            mutation_seq: 0,
            in_flight: None,
            actor: DEFAULT_ACTOR.to_string(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn backing(&self) -> Backing {
        self.backing
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// A remote mutation is waiting on the server.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn find(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Records matching the search term, in collection order.
    pub fn filtered_records(&self) -> Vec<&R> {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return self.records.iter().collect();
        }
        self.records.iter().filter(|r| r.matches(&needle)).collect()
    }

    pub fn total_pages(&self) -> usize {
        paginator::total_pages(self.filtered_records().len(), self.page_size)
    }

    pub fn current_page_records(&self) -> Vec<&R> {
        let page = self.current_page.min(self.total_pages());
        self.filtered_records()
            .into_iter()
            .skip((page - 1) * self.page_size)
            .take(self.page_size)
            .collect()
    }

    pub fn page_window(&self) -> PageWindow {
        PageWindow::new(self.current_page, self.total_pages())
    }

    pub fn showing(&self) -> Showing {
        Showing::new(
            self.current_page,
            self.page_size,
            self.filtered_records().len(),
        )
    }

    /// Replace the search term and go back to the first page.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.current_page = 1;
    }

    /// Jump to `page` if it exists. Returns whether the page changed.
    pub fn set_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page(self.current_page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.set_page(self.current_page.saturating_sub(1))
    }

    pub fn first_page(&mut self) -> bool {
        self.set_page(1)
    }

    pub fn last_page(&mut self) -> bool {
        self.set_page(self.total_pages())
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.clamp_page();
    }

    /// Pull the current page back in range after the filtered set shrank.
    fn clamp_page(&mut self) {
        let total = self.total_pages();
        if self.current_page > total {
            debug!(from = self.current_page, to = total, "clamping current page");
            self.current_page = total;
        }
        self.current_page = self.current_page.max(1);
    }

    fn stamp(&self) -> Stamp {
        Stamp {
            actor: self.actor.clone(),
            at: self.clock.now(),
        }
    }

    fn ensure_writable(&self) -> Result<(), TableError> {
        if self.read_only {
            return Err(TableError::ReadOnly);
        }
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), TableError> {
        if self.in_flight.is_some() {
            return Err(TableError::Busy);
        }
        Ok(())
    }

    /// Open the dialog for `mode`. Edit, view, and delete need a target that
    /// is still in the collection; add ignores `target`. Nothing opens while
    /// a remote mutation is in flight.
    pub fn open_dialog(&mut self, mode: DialogMode, target: Option<RecordId>) -> Result<(), TableError> {
        self.ensure_idle()?;
        if mode != DialogMode::View {
            self.ensure_writable()?;
        }
        if mode == DialogMode::Add {
            self.dialog = Dialog::Add {
                form: R::blank_form(),
                status: SubmitStatus::default(),
            };
            return Ok(());
        }

        let id = target.ok_or(TableError::NoTarget(mode.verb()))?;
        let record = self.find(id).ok_or(TableError::NotFound(id))?;
        self.dialog = match mode {
            DialogMode::Edit => Dialog::Edit {
                target: id,
                form: record.to_form(),
                status: SubmitStatus::default(),
            },
            DialogMode::View => Dialog::View {
                target: id,
                form: record.to_form(),
            },
            _ => Dialog::Delete {
                target: id,
                label: record.label().to_string(),
                status: SubmitStatus::default(),
            },
        };
        Ok(())
    }

    /// Close the dialog, dropping any unsaved form edits. A request already
    /// sent stays in flight and is still completed by its reply.
    pub fn close_dialog(&mut self) {
        self.dialog = Dialog::Closed;
    }

    pub fn form_mut(&mut self) -> Option<&mut Form> {
        self.dialog.form_mut()
    }

    /// Submit whatever the open dialog holds.
    pub fn submit(&mut self) -> Result<Outcome, TableError> {
        match &self.dialog {
            Dialog::Add { form, .. } => {
                let form = form.clone();
                self.submit_add(form)
            }
            Dialog::Edit { form, .. } => {
                let form = form.clone();
                self.submit_edit(form)
            }
            Dialog::Delete { .. } => self.confirm_delete(),
            Dialog::View { .. } => {
                self.close_dialog();
                Ok(Outcome::Closed)
            }
            Dialog::Closed => Err(TableError::NoTarget("submit")),
        }
    }

    /// Create a record from `form`. Locally the new id is one past the
    /// largest existing id (1 for an empty collection).
    pub fn submit_add(&mut self, form: Form) -> Result<Outcome, TableError> {
        self.ensure_writable()?;
        let Dialog::Add { .. } = self.dialog else {
            return Err(TableError::NoTarget("add"));
        };
        self.ensure_idle()?;
        self.validate(&form)?;
        let stamp = self.stamp();

        match self.backing {
            Backing::Local => {
                let id = self.records.iter().map(|r| r.id()).max().unwrap_or(0) + 1;
                let record = R::create(id, &form, &stamp);
                let mutation = self.mutation(MutationKind::Add, Some(id), record.label());
                self.records.push(record);
                self.close_dialog();
                info!(id, "record added");
                Ok(Outcome::Applied(mutation))
            }
            Backing::Remote => {
                let record = R::create(0, &form, &stamp);
                let mut payload = self.payload(&record)?;
                if let Value::Object(map) = &mut payload {
                    map.remove("id");
                }
                let ticket = self.begin_remote(self.mutation(MutationKind::Add, None, record.label()));
                Ok(Outcome::Remote {
                    ticket,
                    request: RemoteRequest::Create(payload),
                })
            }
        }
    }

    /// Overwrite the record targeted by the edit dialog.
    pub fn submit_edit(&mut self, form: Form) -> Result<Outcome, TableError> {
        self.ensure_writable()?;
        let Dialog::Edit { target, .. } = self.dialog else {
            return Err(TableError::NoTarget("edit"));
        };
        self.ensure_idle()?;
        self.validate(&form)?;
        let index = self
            .records
            .iter()
            .position(|r| r.id() == target)
            .ok_or(TableError::NotFound(target))?;
        let stamp = self.stamp();

        match self.backing {
            Backing::Local => {
                let record = &mut self.records[index];
                record.apply(&form, &stamp);
                let mutation = self.mutation(MutationKind::Edit, Some(target), self.records[index].label());
                self.close_dialog();
                self.clamp_page();
                info!(id = target, "record updated");
                Ok(Outcome::Applied(mutation))
            }
            Backing::Remote => {
                let mut record = self.records[index].clone();
                record.apply(&form, &stamp);
                let payload = self.payload(&record)?;
                let ticket = self.begin_remote(self.mutation(MutationKind::Edit, Some(target), record.label()));
                Ok(Outcome::Remote {
                    ticket,
                    request: RemoteRequest::Update(payload),
                })
            }
        }
    }

    /// Remove the record targeted by the delete dialog. The open delete
    /// dialog is the confirmation gate; without it nothing is removed.
    pub fn confirm_delete(&mut self) -> Result<Outcome, TableError> {
        self.ensure_writable()?;
        let Dialog::Delete { target, .. } = self.dialog else {
            return Err(TableError::NoTarget("delete"));
        };
        self.ensure_idle()?;
        let index = self
            .records
            .iter()
            .position(|r| r.id() == target)
            .ok_or(TableError::NotFound(target))?;

        match self.backing {
            Backing::Local => {
                let record = self.records.remove(index);
                let mutation = self.mutation(MutationKind::Delete, Some(target), record.label());
                self.close_dialog();
                self.clamp_page();
                info!(id = target, "record deleted");
                Ok(Outcome::Applied(mutation))
            }
            Backing::Remote => {
                let label = self.records[index].label().to_string();
                let ticket = self.begin_remote(self.mutation(MutationKind::Delete, Some(target), &label));
                Ok(Outcome::Remote {
                    ticket,
                    request: RemoteRequest::Delete(target),
                })
            }
        }
    }

    /// Start a full refresh. Any earlier ticket becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.load.loading = true;
        FetchTicket(self.generation)
    }

    /// Apply a fetch result. Returns `false` when the ticket is stale and the
    /// result was dropped. A failed fetch keeps the previous collection.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<R>, TableError>) -> bool {
        if ticket.0 != self.generation {
            debug!(ticket = ticket.0, latest = self.generation, "dropping stale fetch result");
            return false;
        }
        self.load.loading = false;
        match result {
            Ok(records) => {
                debug!(count = records.len(), "collection refreshed");
                self.records = records;
                self.load.error = None;
                self.clamp_page();
            }
            Err(e) => {
                warn!(error = %e, "fetch failed; keeping previous collection");
                self.load.error = Some(e.to_string());
            }
        }
        true
    }

    /// Report how the server answered the mutation behind `ticket`. Success
    /// closes the dialog and starts a refetch; failure keeps the dialog open
    /// with the error shown inline. Returns `None` when `ticket` is not the
    /// request in flight; the reply is dropped.
    pub fn complete_mutation(
        &mut self,
        ticket: MutationTicket,
        result: Result<(), TableError>,
    ) -> Option<Result<Completed, TableError>> {
        match &self.in_flight {
            Some((pending, _)) if *pending == ticket => {}
            _ => {
                debug!(ticket = ticket.0, "dropping reply for a mutation not in flight");
                return None;
            }
        }
        let mutation = self.in_flight.take().map(|(_, m)| m);
        match result {
            Ok(()) => {
                self.close_dialog();
                Some(Ok(Completed {
                    mutation,
                    refetch: self.begin_fetch(),
                }))
            }
            Err(e) => {
                warn!(error = %e, "remote mutation failed");
                self.dialog.set_error(e.to_string());
                Some(Err(e))
            }
        }
    }

    fn validate(&mut self, form: &Form) -> Result<(), TableError> {
        if let Err(e) = form.validate() {
            self.dialog.set_error(e.to_string());
            return Err(e);
        }
        Ok(())
    }

    fn payload(&self, record: &R) -> Result<Value, TableError> {
        serde_json::to_value(record).map_err(|e| TableError::Transport(e.to_string()))
    }

    fn begin_remote(&mut self, mutation: Mutation) -> MutationTicket {
        self.mutation_seq += 1;
        let ticket = MutationTicket(self.mutation_seq);
        self.dialog.set_pending();
        self.in_flight = Some((ticket, mutation));
        ticket
    }

    fn mutation(&self, kind: MutationKind, id: Option<RecordId>, label: &str) -> Mutation {
        Mutation {
            kind,
            id,
            label: label.to_string(),
            actor: self.actor.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::lead::Lead;
    use crate::table::product::Product;
    use crate::table::record::FixedClock;
    use crate::table::seed::{self, SeedDataset};
    use chrono::{NaiveDate, NaiveDateTime};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn products() -> ListController<Product> {
        ListController::local(seed::products(SeedDataset::Products).unwrap(), 5)
            .with_clock(Arc::new(FixedClock(now())))
    }

    fn product(id: RecordId, name: &str, price: &str, creator: &str) -> Product {
        Product {
            id,
            name: name.into(),
            price: price.into(),
            created_at: None,
            created_by: creator.into(),
            updated_at: None,
            updated_by: creator.into(),
            is_active: true,
        }
    }

    fn mixed() -> ListController<Product> {
        ListController::local(
            vec![
                product(1, "Desk", "120", "Admin"),
                product(2, "Chair", "45", "User"),
                product(3, "Lamp", "12", "admin"),
                product(4, "DESK MAT", "9", "Sam"),
                product(5, "Shelf", "80", "Adminson"),
            ],
            2,
        )
    }

    fn add_form(name: &str, price: &str) -> Form {
        Product::blank_form().with_text("name", name).with_text("price", price)
    }

    fn ids(records: &[&Product]) -> Vec<RecordId> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_filter_is_ordered_case_insensitive_subsequence() {
        let mut c = mixed();
        c.set_search_term("DESK");
        assert_eq!(ids(&c.filtered_records()), vec![1, 4]);

        c.set_search_term("admin");
        assert_eq!(ids(&c.filtered_records()), vec![1, 3, 5]);

        c.set_search_term("12");
        assert_eq!(ids(&c.filtered_records()), vec![1, 3]);

        c.set_search_term("nothing");
        assert!(c.filtered_records().is_empty());
        assert_eq!(c.total_pages(), 1);
        assert!(c.current_page_records().is_empty());
    }

    #[test]
    fn test_blank_search_means_no_filter() {
        let mut c = mixed();
        c.set_search_term("   ");
        assert_eq!(c.filtered_records().len(), 5);
        c.set_search_term("");
        assert_eq!(c.filtered_records().len(), 5);
    }

    #[test]
    fn test_search_resets_page() {
        let mut c = mixed();
        assert!(c.last_page());
        assert_eq!(c.current_page(), 3);
        c.set_search_term("d");
        assert_eq!(c.current_page(), 1);
    }

    #[test]
    fn test_page_slices_and_navigation() {
        let mut c = mixed();
        assert_eq!(c.total_pages(), 3);
        assert_eq!(ids(&c.current_page_records()), vec![1, 2]);
        assert!(!c.prev_page());
        assert!(c.next_page());
        assert_eq!(ids(&c.current_page_records()), vec![3, 4]);
        assert!(c.last_page());
        assert_eq!(ids(&c.current_page_records()), vec![5]);
        assert!(!c.next_page());
        assert!(!c.set_page(0));
        assert!(!c.set_page(4));
        assert!(c.first_page());
        assert_eq!(c.showing(), Showing { first: 1, last: 2, total: 5 });
    }

    #[test]
    fn test_delete_on_last_page_clamps_page() {
        let mut c = mixed();
        c.last_page();
        c.open_dialog(DialogMode::Delete, Some(5)).unwrap();
        c.confirm_delete().unwrap();
        assert_eq!(c.total_pages(), 2);
        assert_eq!(c.current_page(), 2);
        assert_eq!(ids(&c.current_page_records()), vec![3, 4]);
    }

    #[test]
    fn test_page_size_change_clamps_page() {
        let mut c = mixed();
        c.last_page();
        c.set_page_size(10);
        assert_eq!(c.current_page(), 1);
        assert_eq!(c.current_page_records().len(), 5);
        c.set_page_size(0);
        assert_eq!(c.page_size(), 1);
    }

    #[test]
    fn test_close_dialog_is_idempotent() {
        let mut c = products();
        c.open_dialog(DialogMode::Edit, Some(2)).unwrap();
        c.form_mut().unwrap().set_text("name", "Changed");
        c.close_dialog();
        let once = c.dialog().clone();
        c.close_dialog();
        assert_eq!(c.dialog(), &once);
        assert_eq!(c.dialog(), &Dialog::Closed);
        assert_eq!(c.find(2).unwrap().name, "Demo");
    }

    #[test]
    fn test_add_assigns_next_id() {
        let mut c = products();
        c.open_dialog(DialogMode::Add, None).unwrap();
        let outcome = c.submit_add(add_form("X", "10")).unwrap();
        assert_eq!(c.records().len(), 7);
        let added = c.records().last().unwrap();
        assert_eq!(added.id, 7);
        assert_eq!(added.created_by, DEFAULT_ACTOR);
        assert_eq!(added.updated_at, Some(now()));
        assert!(!c.dialog().is_open());
        match outcome {
            Outcome::Applied(m) => {
                assert_eq!(m.kind, MutationKind::Add);
                assert_eq!(m.id, Some(7));
                assert_eq!(m.label, "X");
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_add_to_empty_collection_starts_at_one() {
        let mut c: ListController<Product> = ListController::local(Vec::new(), 5);
        c.open_dialog(DialogMode::Add, None).unwrap();
        c.submit_add(add_form("First", "1")).unwrap();
        assert_eq!(c.records()[0].id, 1);
    }

    #[test]
    fn test_add_validation_leaves_collection_alone() {
        let mut c = products();
        c.open_dialog(DialogMode::Add, None).unwrap();
        let err = c.submit_add(add_form("", "10")).unwrap_err();
        assert_eq!(err, TableError::Validation { field: "Name" });
        assert_eq!(c.records().len(), 6);
        assert!(c.dialog().is_open());
        assert_eq!(
            c.dialog().status().and_then(|s| s.error.as_deref()),
            Some("Name is required")
        );
    }

    #[test]
    fn test_add_requires_add_dialog() {
        let mut c = products();
        assert_eq!(c.submit_add(add_form("X", "1")), Err(TableError::NoTarget("add")));
        c.open_dialog(DialogMode::Edit, Some(2)).unwrap();
        assert_eq!(c.submit_add(add_form("X", "1")), Err(TableError::NoTarget("add")));
        assert_eq!(c.records().len(), 6);
        assert_eq!(c.dialog().mode(), Some(DialogMode::Edit));
    }

    #[test]
    fn test_edit_preserves_identity_and_stamps_update() {
        let mut c = products().with_actor("Editor");
        let before = c.find(3).unwrap().clone();
        c.open_dialog(DialogMode::Edit, Some(3)).unwrap();
        assert_eq!(c.dialog().form().unwrap().text("price"), "999");
        let form = c.dialog().form().unwrap().clone().with_text("price", "1299");
        c.submit_edit(form).unwrap();

        let after = c.find(3).unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.created_by, before.created_by);
        assert_ne!(after.updated_at, before.updated_at);
        assert_eq!(after.updated_by, "Editor");
        assert_eq!(after.price, "1299");
        assert_eq!(c.records().iter().position(|r| r.id == 3), Some(2));
    }

    #[test]
    fn test_edit_requires_edit_dialog() {
        let mut c = products();
        assert_eq!(c.submit_edit(add_form("a", "b")), Err(TableError::NoTarget("edit")));
    }

    #[test]
    fn test_edit_of_vanished_record_is_noop() {
        let mut c = products();
        c.open_dialog(DialogMode::Edit, Some(6)).unwrap();
        c.records.retain(|r| r.id != 6);
        let err = c.submit_edit(add_form("Gone", "1")).unwrap_err();
        assert_eq!(err, TableError::NotFound(6));
        assert_eq!(c.records().len(), 5);
    }

    #[test]
    fn test_delete_is_exact() {
        let mut c = products();
        c.open_dialog(DialogMode::Delete, Some(4)).unwrap();
        assert!(matches!(c.dialog(), Dialog::Delete { label, .. } if label == "Demo"));
        c.confirm_delete().unwrap();
        let remaining: Vec<_> = c.records().iter().map(|r| r.id).collect();
        assert_eq!(remaining, vec![1, 2, 3, 5, 6]);
        assert!(!c.dialog().is_open());
    }

    #[test]
    fn test_delete_requires_confirmation_dialog() {
        let mut c = products();
        assert_eq!(c.confirm_delete(), Err(TableError::NoTarget("delete")));
        c.open_dialog(DialogMode::Edit, Some(4)).unwrap();
        assert_eq!(c.confirm_delete(), Err(TableError::NoTarget("delete")));
        assert_eq!(c.records().len(), 6);
    }

    #[test]
    fn test_open_dialog_targets() {
        let mut c = products();
        assert_eq!(c.open_dialog(DialogMode::Edit, None), Err(TableError::NoTarget("edit")));
        assert_eq!(c.open_dialog(DialogMode::View, Some(99)), Err(TableError::NotFound(99)));
        c.open_dialog(DialogMode::View, Some(1)).unwrap();
        assert_eq!(c.dialog().target(), Some(1));
        assert!(c.form_mut().is_none());
        assert_eq!(c.submit(), Ok(Outcome::Closed));
        assert!(!c.dialog().is_open());
    }

    #[test]
    fn test_read_only_allows_view_only() {
        let mut c = products().with_read_only(true);
        assert_eq!(c.open_dialog(DialogMode::Add, None), Err(TableError::ReadOnly));
        assert_eq!(c.open_dialog(DialogMode::Delete, Some(1)), Err(TableError::ReadOnly));
        assert_eq!(c.submit_add(add_form("x", "1")), Err(TableError::ReadOnly));
        assert!(c.open_dialog(DialogMode::View, Some(1)).is_ok());
    }

    fn leads_remote() -> ListController<Lead> {
        let mut c = ListController::remote(10).with_clock(Arc::new(FixedClock(now())));
        let ticket = c.begin_fetch();
        assert!(c.complete_fetch(ticket, Ok(seed::leads(SeedDataset::Leads).unwrap())));
        c
    }

    fn lead_form() -> Form {
        Lead::blank_form()
            .with_text("leadName", "New Person")
            .with_text("status", "New")
    }

    #[test]
    fn test_remote_add_defers_to_server() {
        let mut c = leads_remote();
        c.open_dialog(DialogMode::Add, None).unwrap();
        let outcome = c.submit_add(lead_form()).unwrap();
        let Outcome::Remote {
            ticket,
            request: RemoteRequest::Create(payload),
        } = outcome
        else {
            panic!("expected create request");
        };
        assert!(payload.get("id").is_none());
        assert_eq!(payload["leadName"], "New Person");
        assert_eq!(c.records().len(), 12);
        assert!(c.dialog().is_pending());

        let done = c.complete_mutation(ticket, Ok(())).unwrap().unwrap();
        assert_eq!(done.mutation.map(|m| m.kind), Some(MutationKind::Add));
        assert!(!c.dialog().is_open());
        assert!(c.load_state().loading);

        let mut refreshed = seed::leads(SeedDataset::Leads).unwrap();
        refreshed.push(Lead::create(40, &lead_form(), &c.stamp()));
        assert!(c.complete_fetch(done.refetch, Ok(refreshed)));
        assert_eq!(c.records().last().map(|l| l.id), Some(40));
    }

    #[test]
    fn test_remote_failure_keeps_dialog_open() {
        let mut c = leads_remote();
        c.open_dialog(DialogMode::Delete, Some(3)).unwrap();
        let Ok(Outcome::Remote { ticket, request }) = c.confirm_delete() else {
            panic!("expected delete request");
        };
        assert_eq!(request, RemoteRequest::Delete(3));
        let err = c
            .complete_mutation(ticket, Err(TableError::Transport("500".into())))
            .unwrap()
            .unwrap_err();
        assert_eq!(err, TableError::Transport("500".into()));
        assert!(c.dialog().is_open());
        assert!(!c.dialog().is_pending());
        assert!(!c.is_busy());
        assert_eq!(c.records().len(), 12);
    }

    #[test]
    fn test_no_second_dialog_while_request_in_flight() {
        let mut c = leads_remote();
        c.open_dialog(DialogMode::Delete, Some(3)).unwrap();
        let Ok(Outcome::Remote { ticket, .. }) = c.confirm_delete() else {
            panic!("expected delete request");
        };
        assert_eq!(c.confirm_delete(), Err(TableError::Busy));

        c.close_dialog();
        assert!(c.is_busy());
        assert_eq!(c.open_dialog(DialogMode::Edit, Some(5)), Err(TableError::Busy));
        assert_eq!(c.dialog(), &Dialog::Closed);

        let done = c.complete_mutation(ticket, Ok(())).unwrap().unwrap();
        let mutation = done.mutation.unwrap();
        assert_eq!(mutation.kind, MutationKind::Delete);
        assert_eq!(mutation.id, Some(3));
        assert!(!c.is_busy());
        assert!(c.open_dialog(DialogMode::Edit, Some(5)).is_ok());
    }

    #[test]
    fn test_reply_for_other_ticket_is_dropped() {
        let mut c = leads_remote();
        c.open_dialog(DialogMode::Delete, Some(3)).unwrap();
        let Ok(Outcome::Remote { ticket: first, .. }) = c.confirm_delete() else {
            panic!("expected delete request");
        };
        assert!(c.complete_mutation(first, Err(TableError::Transport("500".into()))).is_some());

        c.open_dialog(DialogMode::Edit, Some(5)).unwrap();
        let form = c.dialog().form().unwrap().clone();
        let Ok(Outcome::Remote { ticket: second, .. }) = c.submit_edit(form) else {
            panic!("expected update request");
        };
        assert_ne!(first, second);

        assert_eq!(c.complete_mutation(first, Ok(())), None);
        assert_eq!(c.dialog().mode(), Some(DialogMode::Edit));
        assert!(c.dialog().is_pending());

        let err = c
            .complete_mutation(second, Err(TableError::Transport("500".into())))
            .unwrap()
            .unwrap_err();
        assert_eq!(err, TableError::Transport("500".into()));
        assert_eq!(
            c.dialog().status().and_then(|s| s.error.as_deref()),
            Some("request failed: 500")
        );
    }

    #[test]
    fn test_remote_update_carries_full_record() {
        let mut c = leads_remote();
        c.open_dialog(DialogMode::Edit, Some(2)).unwrap();
        let form = c.dialog().form().unwrap().clone().with_text("status", "Qualified");
        let Outcome::Remote {
            request: RemoteRequest::Update(payload),
            ..
        } = c.submit_edit(form).unwrap()
        else {
            panic!("expected update request");
        };
        assert_eq!(payload["id"], 2);
        assert_eq!(payload["status"], "Qualified");
        assert_eq!(c.find(2).unwrap().status, "Contacted");
    }

    #[test]
    fn test_stale_fetch_is_dropped() {
        let mut c: ListController<Lead> = ListController::remote(10);
        let first = c.begin_fetch();
        let second = c.begin_fetch();
        assert!(c.complete_fetch(second, Ok(seed::leads(SeedDataset::Leads).unwrap())));
        assert!(!c.complete_fetch(first, Ok(Vec::new())));
        assert_eq!(c.records().len(), 12);
        assert!(!c.load_state().loading);
    }

    #[test]
    fn test_failed_fetch_keeps_last_good_collection() {
        let mut c = leads_remote();
        c.set_page(2);
        let ticket = c.begin_fetch();
        assert!(c.complete_fetch(ticket, Err(TableError::Transport("connection refused".into()))));
        assert_eq!(c.records().len(), 12);
        assert_eq!(c.current_page(), 2);
        assert_eq!(
            c.load_state().error.as_deref(),
            Some("request failed: connection refused")
        );

        let ticket = c.begin_fetch();
        c.complete_fetch(ticket, Ok(Vec::new()));
        assert_eq!(c.load_state().error, None);
        assert_eq!(c.current_page(), 1);
    }
}
