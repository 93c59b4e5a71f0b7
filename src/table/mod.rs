//! Record tables: the data types, the list controller, and everything the
//! UI needs to render one page of a table.

pub mod column;
pub mod controller;
pub mod dialog;
pub mod error;
pub mod form;
pub mod lead;
pub mod paginator;
pub mod product;
pub mod record;
pub mod seed;
pub mod timestamp;

pub use controller::ListController;
pub use error::TableError;
pub use record::TableRecord;
