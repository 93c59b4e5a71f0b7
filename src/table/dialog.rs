//! Modal dialog state.
//!
//! One variant per mode, each carrying only what that mode needs: the add
//! form has no target, a delete confirmation has no form.

use crate::table::form::Form;
use crate::table::record::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Add,
    Edit,
    View,
    Delete,
}

impl DialogMode {
    pub fn verb(self) -> &'static str {
        match self {
            DialogMode::Add => "add",
            DialogMode::Edit => "edit",
            DialogMode::View => "view",
            DialogMode::Delete => "delete",
        }
    }
}

/// Progress of a submit that may be waiting on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitStatus {
    pub error: Option<String>,
    pub pending: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Dialog {
    #[default]
    Closed,
    Add {
        form: Form,
        status: SubmitStatus,
    },
    Edit {
        target: RecordId,
        form: Form,
        status: SubmitStatus,
    },
    View {
        target: RecordId,
        form: Form,
    },
    Delete {
        target: RecordId,
        label: String,
        status: SubmitStatus,
    },
}

impl Dialog {
    pub fn mode(&self) -> Option<DialogMode> {
        match self {
            Dialog::Closed => None,
            Dialog::Add { .. } => Some(DialogMode::Add),
            Dialog::Edit { .. } => Some(DialogMode::Edit),
            Dialog::View { .. } => Some(DialogMode::View),
            Dialog::Delete { .. } => Some(DialogMode::Delete),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Dialog::Closed)
    }

    pub fn target(&self) -> Option<RecordId> {
        match self {
            Dialog::Edit { target, .. } | Dialog::View { target, .. } | Dialog::Delete { target, .. } => {
                Some(*target)
            }
            _ => None,
        }
    }

    pub fn form(&self) -> Option<&Form> {
        match self {
            Dialog::Add { form, .. } | Dialog::Edit { form, .. } | Dialog::View { form, .. } => Some(form),
            _ => None,
        }
    }

    /// Editable form, if the dialog has one. View forms are read-only.
    pub fn form_mut(&mut self) -> Option<&mut Form> {
        match self {
            Dialog::Add { form, .. } | Dialog::Edit { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<&SubmitStatus> {
        match self {
            Dialog::Add { status, .. } | Dialog::Edit { status, .. } | Dialog::Delete { status, .. } => {
                Some(status)
            }
            _ => None,
        }
    }

    fn status_mut(&mut self) -> Option<&mut SubmitStatus> {
        match self {
            Dialog::Add { status, .. } | Dialog::Edit { status, .. } | Dialog::Delete { status, .. } => {
                Some(status)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status().is_some_and(|s| s.pending)
    }

    pub fn set_pending(&mut self) {
        if let Some(status) = self.status_mut() {
            status.pending = true;
            status.error = None;
        }
    }

    /// Record a failed submit. Clears the pending flag.
    pub fn set_error(&mut self, message: String) {
        if let Some(status) = self.status_mut() {
            status.pending = false;
            status.error = Some(message);
        }
    }

    pub fn title(&self, noun: &str) -> String {
        match self.mode() {
            Some(DialogMode::Add) => format!("Add {}", noun),
            Some(DialogMode::Edit) => format!("Edit {}", noun),
            Some(DialogMode::View) => format!("View {}", noun),
            Some(DialogMode::Delete) => format!("Delete {}", noun),
            None => String::new(),
        }
    }
}
