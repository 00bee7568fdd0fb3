use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::cli::{open_workspace, ListKind};
use crate::db::{Content, Database, Website};
use crate::listing::{DataSource, Mutator, Record};

use super::state::AppState;
use super::ui::render;

type Term = Terminal<CrosstermBackend<std::io::Stdout>>;

/// Run the interactive list view, starting on `kind`
#[instrument(skip_all, fields(workspace = %workspace.display(), kind = %kind))]
pub fn run_tui(workspace: &Path, kind: ListKind) -> Result<()> {
    let mut db = open_workspace(workspace)?;
    info!("starting TUI");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_lists(&mut terminal, &mut db, workspace, kind);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Alternate between the two lists until the user quits. Switching drops the
/// old view, so each list starts with default filters and no selection.
fn run_lists(terminal: &mut Term, db: &mut Database, workspace: &Path, mut kind: ListKind) -> Result<()> {
    loop {
        let action = match kind {
            ListKind::Content => run_app::<Content>(terminal, db, workspace, kind)?,
            ListKind::Websites => run_app::<Website>(terminal, db, workspace, kind)?,
        };
        match action {
            KeyAction::Quit => return Ok(()),
            KeyAction::SwitchList => {
                kind = kind.toggle();
                debug!(%kind, "switching list");
            }
            KeyAction::Continue => {}
        }
    }
}

fn run_app<R: Record>(terminal: &mut Term, db: &mut Database, workspace: &Path, kind: ListKind) -> Result<KeyAction>
where
    Database: DataSource<R> + Mutator<R>,
{
    let mut state = AppState::<R>::new(kind, workspace.to_path_buf(), &*db)?;
    info!(records = state.view.records().len(), "loaded list");

    loop {
        terminal.draw(|frame| render(frame, &mut state))?;

        if event::poll(Duration::from_secs(1))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match handle_key(key.code, &mut state, &mut *db) {
                        KeyAction::Continue => {}
                        action => return Ok(action),
                    }
                }
            }
        }
    }
}

enum KeyAction {
    Quit,
    Continue,
    SwitchList,
}

/// Handle a key press. Returns KeyAction indicating what to do next.
fn handle_key<R: Record, S: DataSource<R> + Mutator<R>>(
    code: KeyCode,
    state: &mut AppState<R>,
    store: &mut S,
) -> KeyAction {
    // Search input gets every key while active
    if state.search.active {
        match code {
            KeyCode::Esc => state.cancel_search(),
            KeyCode::Enter => state.accept_search(),
            KeyCode::Backspace => state.search_backspace(),
            KeyCode::Char(c) => state.search_char(c),
            _ => {}
        }
        return KeyAction::Continue;
    }

    if state.confirm_delete.is_some() {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => state.confirm_delete(store),
            KeyCode::Char('n') | KeyCode::Esc => state.cancel_delete(),
            _ => {}
        }
        return KeyAction::Continue;
    }

    if state.status_menu.is_some() {
        match code {
            KeyCode::Esc | KeyCode::Char('s') => state.close_status_menu(),
            KeyCode::Up | KeyCode::Char('k') => state.status_menu_up(),
            KeyCode::Down | KeyCode::Char('j') => state.status_menu_down(),
            KeyCode::Enter => state.status_menu_select(store),
            _ => {}
        }
        return KeyAction::Continue;
    }

    if state.filter_dialog.is_some() {
        match code {
            KeyCode::Esc | KeyCode::Char('f') | KeyCode::Enter => state.close_filter_dialog(),
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => state.filter_dialog_up(),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => state.filter_dialog_down(),
            KeyCode::Left | KeyCode::Char('h') => state.filter_dialog_cycle(false),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => state.filter_dialog_cycle(true),
            KeyCode::Char('0') => state.clear_filters(),
            _ => {}
        }
        return KeyAction::Continue;
    }

    // Help overlay eats all keys except ? and Esc which close it
    if state.show_help {
        if matches!(code, KeyCode::Char('?') | KeyCode::Esc) {
            state.show_help = false;
        }
        return KeyAction::Continue;
    }

    // Clear status message on any key
    state.clear_status_message();

    match code {
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Tab => return KeyAction::SwitchList,
        KeyCode::Char('j') | KeyCode::Down => state.move_down(),
        KeyCode::Char('k') | KeyCode::Up => state.move_up(),
        KeyCode::Char(' ') => state.toggle_current(),
        KeyCode::Char('a') => state.toggle_all(),
        KeyCode::Char('/') => state.start_search(),
        KeyCode::Char('f') => state.open_filter_dialog(),
        KeyCode::Char('x') => state.clear_filters(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(n) = c.to_digit(10) {
                state.remove_chip(n as usize);
            }
        }
        KeyCode::Char('s') => state.open_status_menu(),
        KeyCode::Char('D') => state.request_delete(),
        KeyCode::Char('e') => state.export(store),
        KeyCode::Char('?') => state.toggle_help(),
        _ => {}
    }
    KeyAction::Continue
}
