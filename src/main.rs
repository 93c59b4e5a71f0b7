mod app;
mod config;
mod logging;
mod remote;
mod table;
mod ui;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::*;
use crate::config::SourceConfig;
use crate::logging::AuditLogger;
use crate::remote::manager::RemoteManager;
use anyhow::Result;
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Load config
    let cfg = config::load_config()?;
    logging::init_tracing(&cfg.logging)?;
    info!(tables = cfg.tables.len(), "starting tabledeck");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, cfg).await;

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        error!(error = %e, "exiting with error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let mut state = AppState::new(cfg.clone());
    let mut remote_manager = RemoteManager::new(event_tx.clone());
    let mut audit_logger = AuditLogger::new(&cfg.logging);

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(_)) => break,
                None => break,
            }
        }
    });

    // Spawn tick task
    let tick_tx = event_tx.clone();
    let tick_rate = std::time::Duration::from_millis(cfg.ui.tick_rate_ms.max(10));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_rate);
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    // Register server-backed tables and start their first fetch
    for (tab_id, table_cfg) in cfg.tables.iter().enumerate() {
        let SourceConfig::Remote(remote_cfg) = &table_cfg.source else {
            continue;
        };
        if let Err(e) = remote_manager.register(tab_id, remote_cfg) {
            state.error_message(format!("{}: {}", table_cfg.display_title(), e));
            continue;
        }
        if let Some(tab) = state.tabs.get_mut(tab_id) {
            let ticket = tab.view.begin_fetch();
            remote_manager.fetch(tab_id, ticket);
        }
    }

    // Initial render
    terminal.draw(|f| ui::render(f, &state))?;

    // Main event loop
    loop {
        let event = event_rx.recv().await;
        let Some(event) = event else { break };

        let actions = handler::handle_event(&mut state, event);

        // Drain applied mutations into the audit log
        for (table, mutation) in state.new_mutations.drain(..) {
            audit_logger.record(&table, &mutation);
        }

        // Process actions
        for action in actions {
            match action {
                Action::Fetch { tab, ticket } => remote_manager.fetch(tab, ticket),
                Action::Submit { tab, ticket, request } => remote_manager.submit(tab, ticket, request),
                Action::Quit => state.should_quit = true,
            }
        }

        if state.should_quit {
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }
    }

    Ok(())
}
