pub mod model;

use crate::table::column;
use crate::table::seed::{self, SeedDataset};
use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::path::PathBuf;

pub use model::{AppConfig, LoggingConfig, RecordKind, RemoteConfig, SourceConfig, TableConfig};

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tabledeck")
        .join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    let path = config_path();
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config = parse_config(&contents)
        .with_context(|| format!("Invalid config in {}", path.display()))?;
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Reject configurations the dashboard cannot build tabs from.
pub fn validate(config: &AppConfig) -> Result<()> {
    if !column::is_valid_date_format(&config.ui.date_format) {
        bail!("ui.date_format '{}' cannot format a date", config.ui.date_format);
    }
    if config.tables.is_empty() {
        bail!("at least one [[tables]] entry is required");
    }
    let mut names = HashSet::new();
    for table in &config.tables {
        if table.name.trim().is_empty() {
            bail!("table name must not be empty");
        }
        if !names.insert(table.name.as_str()) {
            bail!("duplicate table name '{}'", table.name);
        }
        if table.page_size == 0 {
            bail!("table '{}': page_size must be at least 1", table.name);
        }
        if let SourceConfig::Seed { dataset } = &table.source {
            if !dataset_fits(*dataset, table.kind) {
                bail!(
                    "table '{}': dataset {:?} does not hold {:?} records",
                    table.name,
                    dataset,
                    table.kind
                );
            }
        }
    }
    Ok(())
}

fn dataset_fits(dataset: SeedDataset, kind: RecordKind) -> bool {
    match kind {
        RecordKind::Product => seed::products(dataset).is_some(),
        RecordKind::Lead => seed::leads(dataset).is_some(),
    }
}
