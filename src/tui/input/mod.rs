mod confirm;
mod edit;
mod navigate;
mod search;

use std::time::Instant;

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::view::Tab;

use super::app::{App, Dialog, Mode, TextInput};

use confirm::{apply_confirm, route_comment};
use edit::{apply_dialog, route_dialog, route_field};
use navigate::{apply_navigate, route_navigate};
use search::{apply_search, route_search};

/// One edit to a single-line text buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Clear,
}

/// Everything a key can ask the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleHelp,
    // List navigation
    FocusDown,
    FocusUp,
    FocusFirst,
    FocusLast,
    /// Open the dialog for the focused row
    Activate,
    NextTab,
    PrevTab,
    ToggleSortField,
    FlipSortOrder,
    ResetSorting,
    LoadMore,
    // Search
    StartSearch,
    SearchEdit(TextEdit),
    SubmitSearch,
    /// Leave search and clear the query
    ClearSearch,
    // Dialog
    /// Step the selection by ±1 and re-target the dialog
    Retarget(isize),
    NextField,
    PrevField,
    /// Space: edit a text field, or cycle a choice field forward
    FieldPrimary,
    BeginFieldEdit,
    CycleValue(isize),
    QuickStatus(Tab),
    Save,
    CloseDialog,
    // Field editing
    FieldEdit(TextEdit),
    CommitField,
    CancelField,
    // Comment gate
    CommentEdit(TextEdit),
    ConfirmComment,
    CancelComment,
}

/// Map a key to an action for the given mode. Pure: depends on nothing but
/// its arguments.
pub fn route_key(mode: Mode, key: KeyEvent) -> Option<Action> {
    let key = normalize_key(key);
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    match mode {
        Mode::Navigate => route_navigate(key),
        Mode::Search => route_search(key),
        Mode::Dialog => route_dialog(key),
        Mode::Field => route_field(key),
        Mode::Comment => route_comment(key),
    }
}

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant, clock: DateTime<Utc>) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Help overlay intercepts everything but its own toggles and quit
    if app.show_help {
        match route_key(app.mode, key) {
            Some(Action::Quit) => app.should_quit = true,
            Some(Action::ToggleHelp) => app.show_help = false,
            _ if key.code == KeyCode::Esc => app.show_help = false,
            _ => {}
        }
        return;
    }

    if let Some(action) = route_key(app.mode, key) {
        apply(app, action, now, clock);
    }
}

/// Apply an action to the app
pub fn apply(app: &mut App, action: Action, now: Instant, clock: DateTime<Utc>) {
    // A new action replaces the last transient message
    app.status_message = None;
    app.status_is_error = false;

    match action {
        Action::Quit => app.should_quit = true,
        Action::ToggleHelp => app.show_help = !app.show_help,
        Action::StartSearch | Action::SearchEdit(_) | Action::SubmitSearch | Action::ClearSearch => {
            apply_search(app, action)
        }
        Action::Retarget(_)
        | Action::NextField
        | Action::PrevField
        | Action::FieldPrimary
        | Action::BeginFieldEdit
        | Action::CycleValue(_)
        | Action::QuickStatus(_)
        | Action::Save
        | Action::CloseDialog
        | Action::FieldEdit(_)
        | Action::CommitField
        | Action::CancelField => apply_dialog(app, action, now, clock),
        Action::CommentEdit(_) | Action::ConfirmComment | Action::CancelComment => {
            apply_confirm(app, action, clock)
        }
        _ => apply_navigate(app, action, now),
    }
}

/// Mouse click: focus the row under the pointer and open the dialog
pub fn handle_click(app: &mut App, column: u16, row: u16, now: Instant) {
    if app.mode != Mode::Navigate || app.show_help {
        return;
    }
    let Some(area) = app.rows_area else {
        return;
    };
    if column < area.x
        || column >= area.x + area.width
        || row < area.y
        || row >= area.y + area.height
    {
        return;
    }
    let index = app.scroll_offset + (row - area.y) as usize;
    let len = app.filtered_len();
    if app.selection.focus(index, len).is_some() {
        focus_moved(app, now);
        open_dialog(app);
    }
}

/// Mouse wheel: scroll the list without moving focus
pub fn handle_scroll(app: &mut App, delta: isize, now: Instant) {
    if app.mode != Mode::Navigate || app.show_help {
        return;
    }
    let len = app.filtered_len();
    let height = app.rows_area.map_or(1, |a| a.height.max(1) as usize);
    let max_offset = len.saturating_sub(height);
    app.scroll_offset = app.scroll_offset.saturating_add_signed(delta).min(max_offset);
    if app.scroll_offset + height >= len {
        app.request_load_more(now);
    }
}

/// Focus landed on a new row: center it on the next draw, and fetch the
/// next page when it is the last row shown
fn focus_moved(app: &mut App, now: Instant) {
    app.scroll_to_focus = true;
    let len = app.filtered_len();
    if app.selection.focused().is_some_and(|i| i + 1 == len) {
        app.request_load_more(now);
    }
}

/// Open the edit dialog on the focused row with a fresh snapshot
fn open_dialog(app: &mut App) -> bool {
    let Some(task) = app.focused_task() else {
        return false;
    };
    app.dialog = Some(Dialog::open(task));
    app.mode = Mode::Dialog;
    true
}

fn apply_text_edit(input: &mut TextInput, edit: TextEdit) {
    match edit {
        TextEdit::Insert(c) => input.insert(c),
        TextEdit::Backspace => input.backspace(),
        TextEdit::Delete => input.delete(),
        TextEdit::Left => input.left(),
        TextEdit::Right => input.right(),
        TextEdit::Home => input.home(),
        TextEdit::End => input.end(),
        TextEdit::Clear => input.clear(),
    }
}

/// Keys shared by every text-entry mode. Enter and Esc are left to the caller.
fn route_text(key: KeyEvent) -> Option<TextEdit> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('u') if ctrl => Some(TextEdit::Clear),
        KeyCode::Char('a') if ctrl => Some(TextEdit::Home),
        KeyCode::Char('e') if ctrl => Some(TextEdit::End),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(TextEdit::Insert(c)),
        KeyCode::Backspace => Some(TextEdit::Backspace),
        KeyCode::Delete => Some(TextEdit::Delete),
        KeyCode::Left => Some(TextEdit::Left),
        KeyCode::Right => Some(TextEdit::Right),
        KeyCode::Home => Some(TextEdit::Home),
        KeyCode::End => Some(TextEdit::End),
        _ => None,
    }
}

/// Shift+letter arrives as lowercase on some terminals
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}
