use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

use super::helpers::spans_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let mut spans: Vec<Span> = Vec::new();
    let hint: String = match app.mode {
        Mode::Search => {
            // Search prompt: /pattern▌
            spans.push(Span::styled(
                format!("/{}", app.search_input.buffer),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ));
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.theme.highlight).bg(bg),
            ));
            "Enter done  Esc clear".into()
        }
        Mode::Field => "Enter apply  Esc cancel".into(),
        Mode::Comment => "Enter confirm  Esc back".into(),
        Mode::Dialog => "\u{2190}\u{2192} task  \u{2191}\u{2193} field  Enter save".into(),
        Mode::Navigate => page_indicator(app),
    };

    if let Some(msg) = &app.status_message {
        let color = if app.status_is_error {
            app.theme.red
        } else {
            app.theme.green
        };
        spans.push(Span::styled(
            format!(" {}", msg),
            Style::default().fg(color).bg(bg),
        ));
    } else if app.mode == Mode::Navigate && app.show_key_hints {
        spans.push(Span::styled(" ? help  / search  s sort  q quit", dim));
    }

    let content_width = spans_width(&spans);
    let hint_width = crate::util::unicode::display_width(&hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        let hint_style = if app.store.is_loading() && app.mode == Mode::Navigate {
            Style::default().fg(app.theme.purple).bg(bg)
        } else {
            dim
        };
        spans.push(Span::styled(hint, hint_style));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// `Loading…`, or how much of the collection has been paged in
fn page_indicator(app: &App) -> String {
    let store = &app.store;
    if store.is_loading() {
        return "Loading\u{2026} ".into();
    }
    if store.total_pages() == 0 {
        return String::new();
    }
    format!(
        "page {}/{}  {}/{} ",
        store.current_page(),
        store.total_pages(),
        store.visible().len(),
        store.all().len()
    )
}
