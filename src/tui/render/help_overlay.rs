use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, Mode};

use super::helpers::centered_rect;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered_rect(60, 80, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    // Context-sensitive help
    let bindings: &[(&str, &str)] = match app.mode {
        Mode::Dialog | Mode::Field | Mode::Comment => &[
            (" \u{2190}\u{2192}", "Previous / next task"),
            (" \u{2191}\u{2193} Tab", "Move between fields"),
            (" e Space", "Edit text field"),
            (" Space +/-", "Cycle status / priority"),
            (" 1 2 3", "Set status and save"),
            (" Enter", "Save"),
            (" Esc", "Close without saving"),
        ],
        Mode::Navigate | Mode::Search => &[
            (" \u{2191}\u{2193}/jk", "Move focus up/down"),
            (" g/G", "Jump to first/last row"),
            (" Enter", "Edit focused task"),
            (" Tab/S-Tab", "Next / previous status tab"),
            (" /", "Search task names"),
            (" s", "Sort by created / priority"),
            (" o", "Flip sort order"),
            (" r", "Reset sorting"),
            (" m", "Load more tasks"),
            (" q", "Quit"),
        ],
    };
    for (key, desc) in bindings {
        add_binding(&mut lines, key, desc, key_style, desc_style);
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " ? or Esc to close",
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.purple).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    lines.push(Line::from(vec![
        Span::styled(format!("{:<14}", key), key_style),
        Span::styled(desc, desc_style),
    ]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn navigate_help() {
        let app = app_with_tasks(Vec::new());
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_help_overlay(frame, &app, area)
        });
        assert!(output.contains("Key Bindings"));
        assert!(output.contains("Search task names"));
    }

    #[test]
    fn dialog_help() {
        let mut app = app_with_tasks(Vec::new());
        app.mode = Mode::Dialog;
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_help_overlay(frame, &app, area)
        });
        assert!(output.contains("Move between fields"));
        assert!(!output.contains("Search task names"));
    }
}
