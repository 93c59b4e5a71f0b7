//! Diagnostic tracing and the mutation audit log.
//!
//! The terminal owns stdout, so tracing output goes to
//! `<log_dir>/tabledeck.log` when enabled. Applied mutations can also be
//! written to daily per-table audit files named `<table>_<date>.log`
//! (default directory: `~/.local/share/tabledeck/logs/`).

use crate::config::LoggingConfig;
use crate::table::controller::Mutation;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;

pub const TRACE_FILE: &str = "tabledeck.log";

/// Expand a leading `~` to the home directory.
pub fn expand_dir(dir: &str) -> PathBuf {
    if let Some(rest) = dir.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(dir)
}

/// Install the global tracing subscriber. No-op when logging is disabled.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }
    let level: LevelFilter = config
        .level
        .parse()
        .with_context(|| format!("Invalid log level '{}'", config.level))?;
    let log_dir = expand_dir(&config.log_dir);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let path = log_dir.join(TRACE_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;
    Ok(())
}

/// Writes applied mutations to per-table daily audit files.
///
/// File handles are cached for the lifetime of the logger to avoid repeated
/// opens. A file that cannot be opened is skipped.
pub struct AuditLogger {
    enabled: bool,
    log_dir: PathBuf,
    file_handles: HashMap<String, fs::File>,
}

impl AuditLogger {
    pub fn new(config: &LoggingConfig) -> Self {
        Self {
            enabled: config.audit,
            log_dir: expand_dir(&config.log_dir),
            file_handles: HashMap::new(),
        }
    }

    pub fn format_line(timestamp: &str, mutation: &Mutation) -> String {
        let id = match mutation.id {
            Some(id) => format!("#{}", id),
            None => "#new".to_string(),
        };
        format!(
            "[{}] {} {} {} {}",
            timestamp,
            mutation.actor,
            mutation.kind.as_str(),
            id,
            mutation.label
        )
    }

    /// Append `mutation` to today's file for `table`. No-op if auditing is
    /// disabled.
    pub fn record(&mut self, table: &str, mutation: &Mutation) {
        if !self.enabled {
            return;
        }

        // Sanitize table name for filename
        let safe_table: String = table
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();

        let now = chrono::Local::now();
        let filename = format!("{}_{}.log", safe_table, now.format("%Y-%m-%d"));
        let line = Self::format_line(&now.format("%Y-%m-%d %H:%M:%S").to_string(), mutation);

        if !self.file_handles.contains_key(&filename) {
            let _ = fs::create_dir_all(&self.log_dir);
            match OpenOptions::new()
                .create(true)
                .append(true)
                .open(self.log_dir.join(&filename))
            {
                Ok(file) => {
                    self.file_handles.insert(filename.clone(), file);
                }
                Err(e) => {
                    tracing::warn!(%filename, error = %e, "cannot open audit log");
                    return;
                }
            }
        }

        if let Some(handle) = self.file_handles.get_mut(&filename) {
            let _ = writeln!(handle, "{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::controller::MutationKind;

    fn mutation(id: Option<u64>) -> Mutation {
        Mutation {
            kind: MutationKind::Edit,
            id,
            label: "Demo".into(),
            actor: "Admin".into(),
        }
    }

    #[test]
    fn test_line_format() {
        assert_eq!(
            AuditLogger::format_line("2026-10-17 12:00:00", &mutation(Some(3))),
            "[2026-10-17 12:00:00] Admin edit #3 Demo"
        );
        assert!(AuditLogger::format_line("t", &mutation(None)).contains("#new"));
    }

    #[test]
    fn test_expand_dir() {
        assert_eq!(expand_dir("/var/log/x"), PathBuf::from("/var/log/x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_dir("~/logs"), home.join("logs"));
        }
    }

    #[test]
    fn test_record_appends_to_daily_file() {
        let dir = std::env::temp_dir().join(format!("tabledeck-audit-{}", std::process::id()));
        let config = LoggingConfig {
            audit: true,
            log_dir: dir.display().to_string(),
            ..LoggingConfig::default()
        };
        let mut logger = AuditLogger::new(&config);
        logger.record("my table", &mutation(Some(1)));
        logger.record("my table", &mutation(Some(2)));
        drop(logger);

        let date = chrono::Local::now().format("%Y-%m-%d");
        let contents = fs::read_to_string(dir.join(format!("my_table_{}.log", date))).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.lines().nth(1).unwrap().ends_with("edit #2 Demo"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_disabled_writes_nothing() {
        let dir = std::env::temp_dir().join(format!("tabledeck-off-{}", std::process::id()));
        let mut logger = AuditLogger::new(&LoggingConfig {
            log_dir: dir.display().to_string(),
            ..LoggingConfig::default()
        });
        logger.record("products", &mutation(Some(1)));
        assert!(!dir.exists());
    }
}
