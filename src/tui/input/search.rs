use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode, TextInput};

use super::*;

pub(super) fn route_search(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => Some(Action::SubmitSearch),
        KeyCode::Esc => Some(Action::ClearSearch),
        _ => route_text(key).map(Action::SearchEdit),
    }
}

/// Search filters live: every edit re-derives the list
pub(super) fn apply_search(app: &mut App, action: Action) {
    match action {
        Action::StartSearch => {
            app.search_input = TextInput::new(&app.view.search_query);
            app.mode = Mode::Search;
        }
        Action::SearchEdit(edit) => {
            apply_text_edit(&mut app.search_input, edit);
            if app.search_input.buffer != app.view.search_query {
                app.view.search_query = app.search_input.buffer.clone();
                app.reset_list_position();
                app.persist();
            }
        }
        Action::SubmitSearch => {
            app.mode = Mode::Navigate;
        }
        Action::ClearSearch => {
            app.mode = Mode::Navigate;
            app.search_input.clear();
            if !app.view.search_query.is_empty() {
                app.view.search_query.clear();
                app.reset_list_position();
                app.persist();
            }
        }
        _ => {}
    }
}
