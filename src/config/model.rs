//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use crate::table::seed::SeedDataset;
use serde::{Deserialize, Serialize};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default = "default_tables")]
    pub tables: Vec<TableConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            ui: UiConfig::default(),
            logging: LoggingConfig::default(),
            tables: default_tables(),
        }
    }
}

fn default_tables() -> Vec<TableConfig> {
    vec![
        TableConfig {
            name: "products".into(),
            title: "Product Table".into(),
            description: "Manage products with add, edit, view and delete.".into(),
            kind: RecordKind::Product,
            page_size: 5,
            read_only: false,
            source: SourceConfig::Seed {
                dataset: SeedDataset::Products,
            },
        },
        TableConfig {
            name: "dummy".into(),
            title: "Dummy Table".into(),
            description: "Sample items for trying out the table controls.".into(),
            kind: RecordKind::Product,
            page_size: 5,
            read_only: false,
            source: SourceConfig::Seed {
                dataset: SeedDataset::Dummy,
            },
        },
        TableConfig {
            name: "common".into(),
            title: "Common Table".into(),
            description: "Shared reference items. Read-only.".into(),
            kind: RecordKind::Product,
            page_size: 5,
            read_only: true,
            source: SourceConfig::Seed {
                dataset: SeedDataset::Common,
            },
        },
        TableConfig {
            name: "leads".into(),
            title: "Leads".into(),
            description: "Sales leads served by the lead API.".into(),
            kind: RecordKind::Lead,
            page_size: 10,
            read_only: false,
            source: SourceConfig::Remote(RemoteConfig::default()),
        },
    ]
}

/// Who the dashboard acts as when stamping created/updated metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_actor")]
    pub actor: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            actor: default_actor(),
        }
    }
}

/// UI appearance and behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// chrono format string for date cells.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            date_format: default_date_format(),
        }
    }
}

/// Diagnostic tracing and mutation audit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write diagnostics to `<log_dir>/tabledeck.log`.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    /// Append every applied mutation to `<log_dir>/<table>_<date>.log`.
    #[serde(default)]
    pub audit: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: default_level(),
            log_dir: default_log_dir(),
            audit: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Product,
    Lead,
}

/// One tab of the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Unique key, also used for audit file names.
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub kind: RecordKind,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub read_only: bool,
    pub source: SourceConfig,
}

impl TableConfig {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceConfig {
    Seed { dataset: SeedDataset },
    Remote(RemoteConfig),
}

/// REST endpoint settings for a server-backed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Development servers commonly run with self-signed certificates.
    #[serde(default = "default_true")]
    pub accept_invalid_certs: bool,
    /// Per-request timeout. Unset means wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub endpoints: EndpointConfig,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            accept_invalid_certs: true,
            timeout_secs: None,
            endpoints: EndpointConfig::default(),
        }
    }
}

/// Paths relative to `base_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_list_endpoint")]
    pub list: String,
    #[serde(default = "default_add_endpoint")]
    pub add: String,
    #[serde(default = "default_update_endpoint")]
    pub update: String,
    #[serde(default = "default_delete_endpoint")]
    pub delete: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            list: default_list_endpoint(),
            add: default_add_endpoint(),
            update: default_update_endpoint(),
            delete: default_delete_endpoint(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_actor() -> String {
    crate::table::controller::DEFAULT_ACTOR.to_string()
}
fn default_tick_rate() -> u64 {
    250
}
fn default_date_format() -> String {
    crate::table::column::DEFAULT_DATE_FORMAT.to_string()
}
fn default_level() -> String {
    "info".to_string()
}
fn default_log_dir() -> String {
    "~/.local/share/tabledeck/logs".to_string()
}
fn default_page_size() -> usize {
    10
}
fn default_base_url() -> String {
    "https://localhost:44302/api".to_string()
}
fn default_list_endpoint() -> String {
    "Lead/GetAll".to_string()
}
fn default_add_endpoint() -> String {
    "Lead/Add".to_string()
}
fn default_update_endpoint() -> String {
    "Lead/Update".to_string()
}
fn default_delete_endpoint() -> String {
    "Lead/Delete".to_string()
}
