use crate::table::column::{status_tone, Cell, Column};
use crate::table::form::{Form, FormField};
use crate::table::record::{RecordId, Stamp, TableRecord};
use crate::table::timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const LEAD_STATUSES: &[&str] = &["New", "Contacted", "Qualified", "Lost", "Converted"];

/// Sales lead, as served by the lead API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub lead_name: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "timestamp")]
    pub updated_at: Option<NaiveDateTime>,
}

impl TableRecord for Lead {
    const NOUN: &'static str = "Lead";

    fn id(&self) -> RecordId {
        self.id
    }

    fn label(&self) -> &str {
        &self.lead_name
    }

    fn searchable(&self) -> Vec<&str> {
        vec![
            &self.lead_name,
            &self.company_name,
            &self.email,
            &self.phone,
            &self.status,
            &self.source,
        ]
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("#", 4, |l: &Lead| Cell::text(l.id.to_string())),
            Column::new("Name", 16, |l: &Lead| Cell::text(l.lead_name.clone())),
            Column::new("Company", 14, |l: &Lead| Cell::text(l.company_name.clone())),
            Column::new("Email", 22, |l: &Lead| Cell::text(l.email.clone())),
            Column::new("Phone", 13, |l: &Lead| Cell::text(l.phone.clone())),
            Column::new("Status", 10, |l: &Lead| Cell::Badge {
                label: l.status.clone(),
                tone: status_tone(&l.status),
            }),
            Column::new("Source", 10, |l: &Lead| Cell::text(l.source.clone())),
            Column::new("Active", 8, |l: &Lead| Cell::Boolean(l.is_active)),
            Column::new("Created", 12, |l: &Lead| Cell::Date(l.created_at)),
            Column::new("Updated", 12, |l: &Lead| Cell::Date(l.updated_at)),
        ]
    }

    fn blank_form() -> Form {
        Form::new(vec![
            FormField::text("leadName", "Lead Name").required(),
            FormField::text("companyName", "Company"),
            FormField::text("email", "Email"),
            FormField::text("phone", "Phone"),
            FormField::choice("status", "Status", LEAD_STATUSES).required(),
            FormField::text("source", "Source"),
            FormField::text("assignedTo", "Assigned To"),
            FormField::toggle("isActive", "Active", true),
        ])
    }

    fn to_form(&self) -> Form {
        Self::blank_form()
            .with_text("leadName", self.lead_name.clone())
            .with_text("companyName", self.company_name.clone())
            .with_text("email", self.email.clone())
            .with_text("phone", self.phone.clone())
            .with_text("status", self.status.clone())
            .with_text("source", self.source.clone())
            .with_text("assignedTo", self.assigned_to.clone())
            .with_flag("isActive", self.is_active)
    }

    fn create(id: RecordId, form: &Form, stamp: &Stamp) -> Self {
        let mut lead = Self {
            id,
            lead_name: String::new(),
            company_name: String::new(),
            email: String::new(),
            phone: String::new(),
            status: String::new(),
            source: String::new(),
            assigned_to: String::new(),
            is_active: true,
            created_at: Some(stamp.at),
            updated_at: None,
        };
        lead.apply(form, stamp);
        lead
    }

    fn apply(&mut self, form: &Form, stamp: &Stamp) {
        self.lead_name = form.text("leadName").trim().to_string();
        self.company_name = form.text("companyName").trim().to_string();
        self.email = form.text("email").trim().to_string();
        self.phone = form.text("phone").trim().to_string();
        self.status = form.text("status").to_string();
        self.source = form.text("source").trim().to_string();
        self.assigned_to = form.text("assignedTo").trim().to_string();
        self.is_active = form.flag("isActive");
        self.updated_at = Some(stamp.at);
    }
}
