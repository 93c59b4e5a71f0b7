use crate::table::column::Column;
use crate::table::form::Form;
use chrono::{Local, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

pub type RecordId = u64;

/// Who made a change and when. Applied to creation/update metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub actor: String,
    pub at: NaiveDateTime,
}

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// One row type of a table view.
///
/// Implementors describe their searchable fields, their columns, and how
/// they convert to and from the dialog [`Form`]. `id` is assigned once and
/// never changed by [`TableRecord::apply`].
pub trait TableRecord: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + 'static {
    /// Singular noun used in dialog titles ("Add Item", "Edit Lead").
    const NOUN: &'static str;

    fn id(&self) -> RecordId;

    /// Identifying label shown in the delete confirmation.
    fn label(&self) -> &str;

    /// Fields matched by the search box, in display form.
    fn searchable(&self) -> Vec<&str>;

    fn columns() -> Vec<Column<Self>>;

    /// Form with every field at its default value, for the add dialog.
    fn blank_form() -> Form;

    fn to_form(&self) -> Form;

    fn create(id: RecordId, form: &Form, stamp: &Stamp) -> Self;

    /// Overwrite editable fields from `form` and stamp the update metadata.
    /// Identity and creation metadata are left alone.
    fn apply(&mut self, form: &Form, stamp: &Stamp);

    /// Case-insensitive OR match across [`TableRecord::searchable`].
    /// `needle` is expected lowercased and non-empty.
    fn matches(&self, needle: &str) -> bool {
        self.searchable()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}
