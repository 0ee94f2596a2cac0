use std::time::Instant;

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent};

use crate::model::task::Task;
use crate::ops::edit::{SaveOutcome, format_due_date};
use crate::tui::app::{App, Dialog, DialogField, Mode, TextInput};

use super::*;

pub(super) fn route_dialog(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Esc => Action::CloseDialog,
        KeyCode::Enter => Action::Save,
        KeyCode::Left => Action::Retarget(-1),
        KeyCode::Right => Action::Retarget(1),
        KeyCode::Down | KeyCode::Tab => Action::NextField,
        KeyCode::Up | KeyCode::BackTab => Action::PrevField,
        KeyCode::Char(' ') => Action::FieldPrimary,
        KeyCode::Char('e') => Action::BeginFieldEdit,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::CycleValue(1),
        KeyCode::Char('-') => Action::CycleValue(-1),
        KeyCode::Char('1') => Action::QuickStatus(Tab::Open),
        KeyCode::Char('2') => Action::QuickStatus(Tab::InProgress),
        KeyCode::Char('3') => Action::QuickStatus(Tab::Closed),
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => return None,
    };
    Some(action)
}

pub(super) fn route_field(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => Some(Action::CommitField),
        KeyCode::Esc => Some(Action::CancelField),
        _ => route_text(key).map(Action::FieldEdit),
    }
}

pub(super) fn apply_dialog(app: &mut App, action: Action, now: Instant, clock: DateTime<Utc>) {
    if app.dialog.is_none() {
        app.mode = Mode::Navigate;
        return;
    }
    match action {
        Action::Retarget(delta) => retarget(app, delta, now),
        Action::NextField => {
            if let Some(dialog) = &mut app.dialog {
                dialog.field = dialog.field.next();
            }
        }
        Action::PrevField => {
            if let Some(dialog) = &mut app.dialog {
                dialog.field = dialog.field.prev();
            }
        }
        Action::FieldPrimary => {
            let is_text = app.dialog.as_ref().is_some_and(|d| d.field.is_text());
            if is_text {
                begin_field_edit(app);
            } else {
                cycle_value(app, 1);
            }
        }
        Action::BeginFieldEdit => begin_field_edit(app),
        Action::CycleValue(delta) => cycle_value(app, delta),
        Action::QuickStatus(tab) => {
            if let Some(dialog) = &mut app.dialog {
                dialog.session.set_status(tab.status());
            }
            save(app, clock);
        }
        Action::Save => save(app, clock),
        Action::CloseDialog => {
            app.dialog = None;
            app.mode = Mode::Navigate;
        }
        Action::FieldEdit(edit) => {
            if let Some(dialog) = &mut app.dialog {
                apply_text_edit(&mut dialog.input, edit);
            }
        }
        Action::CommitField => commit_field(app),
        Action::CancelField => {
            if let Some(dialog) = &mut app.dialog {
                dialog.input.clear();
            }
            app.mode = Mode::Dialog;
        }
        _ => {}
    }
}

/// Step to the neighbouring row and point the dialog at it. Unsaved edits
/// on the previous task are dropped.
fn retarget(app: &mut App, delta: isize, now: Instant) {
    let len = app.filtered_len();
    if app.selection.step(delta, len).is_none() {
        return;
    }
    let field = app.dialog.as_ref().map_or(DialogField::Name, |d| d.field);
    if let Some(task) = app.focused_task() {
        let mut dialog = Dialog::open(task);
        dialog.field = field;
        app.dialog = Some(dialog);
    }
    focus_moved(app, now);
}

/// Current value of a text field, as the user edits it
fn field_text(task: &Task, field: DialogField) -> String {
    match field {
        DialogField::Name => task.name.clone(),
        DialogField::Labels => task.labels.join(", "),
        DialogField::Assignee => task.assignee.clone(),
        DialogField::DueDate => format_due_date(task.due_date.as_ref()),
        DialogField::Status => task.status.to_string(),
        DialogField::Priority => task.priority.to_string(),
    }
}

fn begin_field_edit(app: &mut App) {
    let Some(dialog) = &mut app.dialog else {
        return;
    };
    if !dialog.field.is_text() {
        return;
    }
    dialog.input = TextInput::new(&field_text(dialog.session.snapshot(), dialog.field));
    app.mode = Mode::Field;
}

fn cycle_value(app: &mut App, delta: isize) {
    let Some(dialog) = &mut app.dialog else {
        return;
    };
    let snapshot = dialog.session.snapshot();
    match dialog.field {
        DialogField::Status => {
            let status = if delta >= 0 {
                snapshot.status.next()
            } else {
                snapshot.status.prev()
            };
            dialog.session.set_status(status);
        }
        DialogField::Priority => {
            let priority = if delta >= 0 {
                snapshot.priority.next()
            } else {
                snapshot.priority.prev()
            };
            dialog.session.set_priority(priority);
        }
        _ => {}
    }
}

fn commit_field(app: &mut App) {
    let Some(dialog) = &mut app.dialog else {
        return;
    };
    let text = dialog.input.buffer.clone();
    match dialog.field {
        DialogField::Name => dialog.session.set_name(&text),
        DialogField::Labels => dialog.session.set_labels(&text),
        DialogField::Assignee => dialog.session.set_assignee(&text),
        DialogField::DueDate => {
            if let Err(e) = dialog.session.set_due_date(&text) {
                app.set_error(e.to_string());
                return;
            }
        }
        DialogField::Status | DialogField::Priority => {}
    }
    dialog.input.clear();
    app.mode = Mode::Dialog;
}

fn save(app: &mut App, clock: DateTime<Utc>) {
    let Some(dialog) = &mut app.dialog else {
        return;
    };
    match dialog.session.request_save(clock) {
        SaveOutcome::NeedsComment => {
            dialog.input = TextInput::new(dialog.session.comment());
            app.mode = Mode::Comment;
        }
        SaveOutcome::Commit(task) => commit(app, task),
    }
}

/// Write a committed task back to the store and close the dialog
pub(super) fn commit(app: &mut App, task: Task) {
    let id = task.id;
    let saved = app.store.update(task);
    app.dialog = None;
    app.mode = Mode::Navigate;
    if !app.refocus_task(id) {
        app.reconcile_selection();
    }
    app.persist();
    if saved {
        tracing::info!(id, "task updated");
        app.set_status(format!("Saved #{}", id));
    }
}
