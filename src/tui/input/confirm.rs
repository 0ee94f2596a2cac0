use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::edit::commit;
use super::*;

pub(super) fn route_comment(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => Some(Action::ConfirmComment),
        KeyCode::Esc => Some(Action::CancelComment),
        _ => route_text(key).map(Action::CommentEdit),
    }
}

/// The comment prompt shown after a status change. Confirm stays disabled
/// until the comment has some non-blank text.
pub(super) fn apply_confirm(app: &mut App, action: Action, clock: DateTime<Utc>) {
    let Some(dialog) = &mut app.dialog else {
        app.mode = Mode::Navigate;
        return;
    };
    match action {
        Action::CommentEdit(edit) => {
            apply_text_edit(&mut dialog.input, edit);
            dialog.session.comment_input(&dialog.input.buffer);
        }
        Action::ConfirmComment => match dialog.session.confirm(clock) {
            Some(task) => commit(app, task),
            None => app.set_error("A comment is required to change the status"),
        },
        Action::CancelComment => {
            dialog.session.cancel_confirm();
            dialog.input.clear();
            app.mode = Mode::Dialog;
        }
        _ => {}
    }
}
