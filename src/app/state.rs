use crate::app::event::TabId;
use crate::app::tab::{build_tabs, Tab};
use crate::config::AppConfig;
use crate::table::controller::Mutation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPanel {
    Table,
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

pub struct AppState {
    pub config: AppConfig,
    pub tabs: Vec<Tab>,
    pub active_tab: TabId,
    pub focus: FocusPanel,
    pub should_quit: bool,
    pub dirty: bool,
    pub status_message: Option<StatusMessage>,
    pub tick_count: u64,
    /// Applied mutations waiting to be written to the audit log.
    pub new_mutations: Vec<(String, Mutation)>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let tabs = build_tabs(&config);
        Self {
            config,
            tabs,
            active_tab: 0,
            focus: FocusPanel::Table,
            should_quit: false,
            dirty: true,
            status_message: None,
            tick_count: 0,
            new_mutations: Vec::new(),
        }
    }

    pub fn active(&self) -> Option<&Tab> {
        self.tabs.get(self.active_tab)
    }

    pub fn active_mut(&mut self) -> Option<&mut Tab> {
        self.tabs.get_mut(self.active_tab)
    }

    pub fn select_next_tab(&mut self) {
        if self.tabs.is_empty() {
            return;
        }
        self.active_tab = (self.active_tab + 1) % self.tabs.len();
        self.focus = FocusPanel::Table;
        self.dirty = true;
    }

    pub fn select_prev_tab(&mut self) {
        if self.tabs.is_empty() {
            return;
        }
        self.active_tab = (self.active_tab + self.tabs.len() - 1) % self.tabs.len();
        self.focus = FocusPanel::Table;
        self.dirty = true;
    }

    pub fn system_message(&mut self, text: String) {
        self.status_message = Some(StatusMessage { text, is_error: false });
        self.dirty = true;
    }

    pub fn error_message(&mut self, text: String) {
        self.status_message = Some(StatusMessage { text, is_error: true });
        self.dirty = true;
    }

    pub fn status_line(&self) -> String {
        if let Some(ref msg) = self.status_message {
            return msg.text.clone();
        }
        match self.active() {
            Some(tab) => {
                let view = &tab.view;
                let mut s = format!(
                    "{}: {} records | page {}/{}",
                    tab.title,
                    view.record_count(),
                    view.current_page(),
                    view.total_pages()
                );
                if !view.search_term().trim().is_empty() {
                    s.push_str(&format!(" | {} matching", view.filtered_count()));
                }
                if view.is_read_only() {
                    s.push_str(" | read-only");
                }
                s
            }
            None => "No tables configured".to_string(),
        }
    }

    /// Whether any tab is waiting on a fetch.
    pub fn any_loading(&self) -> bool {
        self.tabs.iter().any(|t| t.view.load_state().loading)
    }
}
