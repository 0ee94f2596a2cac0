use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

use super::*;

pub(super) fn route_navigate(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Down | KeyCode::Char('j') => Action::FocusDown,
        KeyCode::Up | KeyCode::Char('k') => Action::FocusUp,
        KeyCode::Home | KeyCode::Char('g') => Action::FocusFirst,
        KeyCode::End | KeyCode::Char('G') => Action::FocusLast,
        KeyCode::Enter => Action::Activate,
        KeyCode::Tab => Action::NextTab,
        KeyCode::BackTab => Action::PrevTab,
        KeyCode::Char('/') => Action::StartSearch,
        KeyCode::Esc => Action::ClearSearch,
        KeyCode::Char('s') => Action::ToggleSortField,
        KeyCode::Char('o') => Action::FlipSortOrder,
        KeyCode::Char('r') => Action::ResetSorting,
        KeyCode::Char('m') => Action::LoadMore,
        _ => return None,
    };
    Some(action)
}

pub(super) fn apply_navigate(app: &mut App, action: Action, now: Instant) {
    match action {
        Action::FocusDown => {
            let len = app.filtered_len();
            if app.selection.down(len).is_some() {
                focus_moved(app, now);
            }
        }
        Action::FocusUp => {
            let len = app.filtered_len();
            if app.selection.up(len).is_some() {
                focus_moved(app, now);
            }
        }
        Action::FocusFirst => {
            let len = app.filtered_len();
            if app.selection.first(len).is_some() {
                focus_moved(app, now);
            }
        }
        Action::FocusLast => {
            let len = app.filtered_len();
            if app.selection.last(len).is_some() {
                focus_moved(app, now);
            }
        }
        Action::Activate => {
            open_dialog(app);
        }
        Action::NextTab => {
            let tab = app.view.tab.next();
            switch_tab(app, tab);
        }
        Action::PrevTab => {
            let tab = app.view.tab.prev();
            switch_tab(app, tab);
        }
        Action::ToggleSortField => {
            app.view.sort_field = app.view.sort_field.toggle();
            sorting_changed(app);
        }
        Action::FlipSortOrder => {
            app.view.sort_order = app.view.sort_order.flip();
            sorting_changed(app);
        }
        Action::ResetSorting => {
            app.view.reset_sorting();
            sorting_changed(app);
        }
        Action::LoadMore => {
            if app.store.is_loading() {
                return;
            }
            if app.store.has_more() {
                app.request_load_more(now);
            } else {
                app.set_status("All tasks loaded");
            }
        }
        _ => {}
    }
}

fn switch_tab(app: &mut App, tab: crate::model::view::Tab) {
    app.view.tab = tab;
    app.reset_list_position();
    app.persist();
}

fn sorting_changed(app: &mut App) {
    app.reset_list_position();
    app.persist();
    app.set_status(format!(
        "sorted by {} {}",
        app.view.sort_field.label(),
        app.view.sort_order.arrow()
    ));
}
