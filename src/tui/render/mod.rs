pub mod comment_popup;
pub mod edit_dialog;
pub mod help_overlay;
pub mod helpers;
pub mod status_row;
pub mod tab_bar;
pub mod task_table;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use super::app::{App, Mode};

/// Draw the whole screen, overlays last
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar (2 rows) | task table | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tab bar + separator
            Constraint::Min(1),    // task table
            Constraint::Length(1), // status row
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);
    task_table::render_task_table(frame, app, chunks[1]);

    if app.dialog.is_some() {
        edit_dialog::render_edit_dialog(frame, app, area);
        if app.mode == Mode::Comment {
            comment_popup::render_comment_popup(frame, app, area);
        }
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[m.start()..m.end()].to_string(),
            highlight_style,
        ));
        last_end = m.end();
    }
    if last_end < text.len() || text.is_empty() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}
