use crate::table::column::{Cell, Column};
use crate::table::form::{Form, FormField};
use crate::table::record::{RecordId, Stamp, TableRecord};
use crate::table::timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Catalog item shown by the product, dummy, and common tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: RecordId,
    pub name: String,
    /// Kept as entered; searched as text.
    pub price: String,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default, with = "timestamp")]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_by: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl TableRecord for Product {
    const NOUN: &'static str = "Item";

    fn id(&self) -> RecordId {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn searchable(&self) -> Vec<&str> {
        vec![&self.name, &self.price, &self.created_by]
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Id", 4, |p: &Product| Cell::text(p.id.to_string())),
            Column::new("Name", 18, |p: &Product| Cell::text(p.name.clone())),
            Column::new("Price", 8, |p: &Product| Cell::text(p.price.clone())),
            Column::new("Created By", 12, |p: &Product| Cell::text(p.created_by.clone())),
            Column::new("Updated At", 13, |p: &Product| Cell::Date(p.updated_at)),
            Column::new("Updated By", 12, |p: &Product| Cell::text(p.updated_by.clone())),
            Column::new("Status", 9, |p: &Product| Cell::Boolean(p.is_active)),
        ]
    }

    fn blank_form() -> Form {
        Form::new(vec![
            FormField::text("name", "Name").required(),
            FormField::text("price", "Price").required(),
            FormField::toggle("isActive", "Active", true),
        ])
    }

    fn to_form(&self) -> Form {
        Self::blank_form()
            .with_text("name", self.name.clone())
            .with_text("price", self.price.clone())
            .with_flag("isActive", self.is_active)
    }

    fn create(id: RecordId, form: &Form, stamp: &Stamp) -> Self {
        Self {
            id,
            name: form.text("name").trim().to_string(),
            price: form.text("price").trim().to_string(),
            created_at: Some(stamp.at),
            created_by: stamp.actor.clone(),
            updated_at: Some(stamp.at),
            updated_by: stamp.actor.clone(),
            is_active: form.flag("isActive"),
        }
    }

    fn apply(&mut self, form: &Form, stamp: &Stamp) {
        self.name = form.text("name").trim().to_string();
        self.price = form.text("price").trim().to_string();
        self.is_active = form.flag("isActive");
        self.updated_at = Some(stamp.at);
        self.updated_by = stamp.actor.clone();
    }
}
