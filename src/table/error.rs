use crate::table::record::RecordId;
use thiserror::Error;

/// Failures reported by a [`ListController`](crate::table::controller::ListController).
///
/// None of these leave the collection partially updated: the operation that
/// returned the error did not apply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A required form field was left empty.
    #[error("{field} is required")]
    Validation { field: &'static str },

    /// A remote call failed or returned a non-success status.
    #[error("request failed: {0}")]
    Transport(String),

    /// The edit/view/delete target is no longer in the collection.
    #[error("record #{0} no longer exists")]
    NotFound(RecordId),

    #[error("this table is read-only")]
    ReadOnly,

    /// A remote add/update/delete is still waiting on the server.
    #[error("a request is still in flight")]
    Busy,

    /// A submit or confirm arrived while no matching dialog was open.
    #[error("no {0} dialog is open")]
    NoTarget(&'static str),
}

impl TableError {
    pub fn is_validation(&self) -> bool {
        matches!(self, TableError::Validation { .. })
    }
}
