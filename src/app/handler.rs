use crate::app::action::Action;
use crate::app::event::{AppEvent, TabId};
use crate::app::state::*;
use crate::table::controller::{FetchTicket, MutationKind, MutationTicket, Outcome};
use crate::table::dialog::DialogMode;
use crate::table::error::TableError;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde_json::Value;

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent)
        }
        AppEvent::FetchCompleted { tab, ticket, result } => {
            handle_fetch_completed(state, tab, ticket, result);
            vec![]
        }
        AppEvent::MutationCompleted { tab, ticket, result } => {
            handle_mutation_completed(state, tab, ticket, result)
        }
        AppEvent::Tick => handle_tick(state),
    }
}

fn handle_tick(state: &mut AppState) -> Vec<Action> {
    state.tick_count = state.tick_count.wrapping_add(1);
    // Loading spinner
    if state.any_loading() {
        state.dirty = true;
    }
    vec![]
}

fn handle_fetch_completed(
    state: &mut AppState,
    tab_id: TabId,
    ticket: FetchTicket,
    result: Result<Vec<Value>, TableError>,
) {
    let Some(tab) = state.tabs.get_mut(tab_id) else {
        return;
    };
    if !tab.view.complete_fetch(ticket, result) {
        return;
    }
    tab.clamp_selection();
    let failure = tab
        .view
        .load_state()
        .error
        .as_ref()
        .map(|e| format!("{}: {}", tab.title, e));
    if let Some(text) = failure {
        state.error_message(text);
    }
    state.dirty = true;
}

fn handle_mutation_completed(
    state: &mut AppState,
    tab_id: TabId,
    ticket: MutationTicket,
    result: Result<(), TableError>,
) -> Vec<Action> {
    let Some(tab) = state.tabs.get_mut(tab_id) else {
        return vec![];
    };
    let name = tab.name.clone();
    let noun = tab.view.noun();
    let Some(outcome) = tab.view.complete_mutation(ticket, result) else {
        return vec![];
    };
    state.dirty = true;
    match outcome {
        Ok(done) => {
            if let Some(mutation) = done.mutation {
                state.system_message(format!("{} {}", noun, past_tense(mutation.kind)));
                state.new_mutations.push((name, mutation));
            }
            vec![Action::Fetch {
                tab: tab_id,
                ticket: done.refetch,
            }]
        }
        Err(e) => {
            state.error_message(e.to_string());
            vec![]
        }
    }
}

fn past_tense(kind: MutationKind) -> &'static str {
    match kind {
        MutationKind::Add => "added",
        MutationKind::Edit => "updated",
        MutationKind::Delete => "deleted",
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, key),
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }

    let Some(tab) = state.active() else {
        return match key.code {
            KeyCode::Char('q') => vec![Action::Quit],
            _ => vec![],
        };
    };

    // An open dialog captures all input
    if tab.view.dialog().is_open() {
        return handle_dialog_key(state, key);
    }

    match state.focus {
        FocusPanel::Search => handle_search_key(state, key),
        FocusPanel::Table => handle_table_key(state, key),
    }
}

fn handle_search_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let Some(tab) = state.active_mut() else {
        return vec![];
    };
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            state.focus = FocusPanel::Table;
        }
        KeyCode::Backspace => {
            let mut term = tab.view.search_term().to_string();
            term.pop();
            tab.view.set_search_term(term);
            tab.selected = 0;
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut term = tab.view.search_term().to_string();
            term.push(c);
            tab.view.set_search_term(term);
            tab.selected = 0;
        }
        _ => {}
    }
    vec![]
}

fn handle_table_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let tab_id = state.active_tab;

    // Ctrl+R to refetch a server-backed table
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
        let Some(tab) = state.active_mut() else {
            return vec![];
        };
        if !tab.view.is_remote() {
            return vec![];
        }
        let ticket = tab.view.begin_fetch();
        return vec![Action::Fetch { tab: tab_id, ticket }];
    }

    match key.code {
        KeyCode::Char('q') => return vec![Action::Quit],
        KeyCode::Tab => {
            state.select_next_tab();
            return vec![];
        }
        KeyCode::BackTab => {
            state.select_prev_tab();
            return vec![];
        }
        KeyCode::Char('/') => {
            state.focus = FocusPanel::Search;
            return vec![];
        }
        _ => {}
    }

    let Some(tab) = state.active_mut() else {
        return vec![];
    };
    let opened = match key.code {
        KeyCode::Up => {
            tab.selected = tab.selected.saturating_sub(1);
            Ok(())
        }
        KeyCode::Down => {
            let len = tab.view.page_rows().len();
            if tab.selected + 1 < len {
                tab.selected += 1;
            }
            Ok(())
        }
        KeyCode::Left | KeyCode::PageUp => {
            if tab.view.prev_page() {
                tab.selected = 0;
            }
            Ok(())
        }
        KeyCode::Right | KeyCode::PageDown => {
            if tab.view.next_page() {
                tab.selected = 0;
            }
            Ok(())
        }
        KeyCode::Home => {
            if tab.view.first_page() {
                tab.selected = 0;
            }
            Ok(())
        }
        KeyCode::End => {
            if tab.view.last_page() {
                tab.selected = 0;
            }
            Ok(())
        }
        KeyCode::Char(c @ '1'..='9') => {
            let page = c as usize - '0' as usize;
            if tab.view.page_window().reachable().contains(&page) && tab.view.set_page(page) {
                tab.selected = 0;
            }
            Ok(())
        }
        KeyCode::Char('a') => tab.view.open_dialog(DialogMode::Add, None),
        KeyCode::Char('e') | KeyCode::Enter => {
            let target = tab.selected_id();
            tab.view.open_dialog(DialogMode::Edit, target)
        }
        KeyCode::Char('v') => {
            let target = tab.selected_id();
            tab.view.open_dialog(DialogMode::View, target)
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            let target = tab.selected_id();
            tab.view.open_dialog(DialogMode::Delete, target)
        }
        _ => Ok(()),
    };

    if let Err(e) = opened {
        state.error_message(e.to_string());
    }
    vec![]
}

fn handle_dialog_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let Some(tab) = state.active_mut() else {
        return vec![];
    };
    let mode = tab.view.dialog().mode();

    match mode {
        Some(DialogMode::Delete) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter if tab.view.dialog().is_pending() => {
                vec![]
            }
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => submit_dialog(state),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                tab.view.close_dialog();
                vec![]
            }
            _ => vec![],
        },
        Some(DialogMode::View) => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                tab.view.close_dialog();
                vec![]
            }
            _ => vec![],
        },
        _ => {
            match key.code {
                KeyCode::Esc => {
                    tab.view.close_dialog();
                    return vec![];
                }
                // One request at a time per dialog
                KeyCode::Enter if tab.view.dialog().is_pending() => return vec![],
                KeyCode::Enter => return submit_dialog(state),
                _ => {}
            }
            if let Some(form) = tab.view.form_mut() {
                match key.code {
                    KeyCode::Tab | KeyCode::Down => form.focus_next(),
                    KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
                    KeyCode::Left => form.cycle_focused(false),
                    KeyCode::Right => form.cycle_focused(true),
                    KeyCode::Backspace => form.delete_back(),
                    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        form.insert_char(c)
                    }
                    _ => {}
                }
            }
            vec![]
        }
    }
}

fn submit_dialog(state: &mut AppState) -> Vec<Action> {
    let tab_id = state.active_tab;
    let Some(tab) = state.tabs.get_mut(tab_id) else {
        return vec![];
    };
    let name = tab.name.clone();
    let noun = tab.view.noun();
    let result = tab.view.submit();

    match result {
        Ok(Outcome::Applied(mutation)) => {
            tab.clamp_selection();
            state.system_message(format!("{} {}", noun, past_tense(mutation.kind)));
            state.new_mutations.push((name, mutation));
            vec![]
        }
        Ok(Outcome::Remote { ticket, request }) => {
            state.system_message(format!("Saving {}...", noun.to_lowercase()));
            vec![Action::Submit {
                tab: tab_id,
                ticket,
                request,
            }]
        }
        Ok(Outcome::Closed) => vec![],
        // Shown inline in the dialog
        Err(e) if e.is_validation() => vec![],
        Err(e) => {
            if matches!(e, TableError::NotFound(_)) {
                tab.view.close_dialog();
                tab.clamp_selection();
            }
            state.error_message(e.to_string());
            vec![]
        }
    }
}
