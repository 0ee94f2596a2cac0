use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::app::App;

use super::helpers::centered_fixed;

/// Render the comment prompt that gates a status change
pub fn render_comment_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(dialog) = &app.dialog else {
        return;
    };
    let theme = &app.theme;
    let bg = theme.background;
    let popup = centered_fixed(56, 8, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Comment required ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.yellow).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let session = &dialog.session;
    let (before, after) = dialog.input.buffer.split_at(dialog.input.cursor);
    let text_style = Style::default().fg(theme.text_bright).bg(bg);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(" Status ", Style::default().fg(theme.dim).bg(bg)),
            Span::styled(
                session.original_status().to_string(),
                Style::default().fg(theme.status_color(session.original_status())).bg(bg),
            ),
            Span::styled(" \u{2192} ", Style::default().fg(theme.dim).bg(bg)),
            Span::styled(
                session.snapshot().status.to_string(),
                Style::default()
                    .fg(theme.status_color(&session.snapshot().status))
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" > ", Style::default().fg(theme.highlight).bg(bg)),
            Span::styled(before.to_string(), text_style),
            Span::styled("\u{258C}", Style::default().fg(theme.highlight).bg(bg)),
            Span::styled(after.to_string(), text_style),
        ]),
        Line::from(""),
    ];

    let hint = if session.can_confirm() {
        Span::styled(
            " Enter confirm  Esc back",
            Style::default().fg(theme.dim).bg(bg),
        )
    } else {
        Span::styled(
            " Type a comment to confirm  Esc back",
            Style::default().fg(theme.red).bg(bg),
        )
    };
    lines.push(Line::from(hint));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
