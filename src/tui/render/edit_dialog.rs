use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::task::Task;
use crate::ops::edit::format_due_date;
use crate::tui::app::{App, Dialog, DialogField, Mode};

use super::helpers::{centered_fixed, pad_to, priority_style};

const LABEL_W: usize = 12;

/// Render the edit dialog for the focused task
pub fn render_edit_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let Some(dialog) = &app.dialog else {
        return;
    };
    let bg = app.theme.background;
    let popup = centered_fixed(64, 12, area);
    frame.render_widget(Clear, popup);

    let session = &dialog.session;
    let mut title = format!(" Edit #{} ", session.task_id());
    if session.is_dirty() {
        title.push_str("[modified] ");
    }
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let width = inner.width as usize;
    let mut lines: Vec<Line> = DialogField::ALL
        .iter()
        .map(|field| field_line(app, dialog, *field, width))
        .collect();

    lines.push(Line::from(""));
    let hint = if session.status_changed() {
        format!(
            " {} \u{2192} {}: a comment will be required",
            session.original_status(),
            session.snapshot().status
        )
    } else {
        " 1/2/3 set status  Enter save  Esc close".to_string()
    };
    lines.push(Line::from(Span::styled(
        hint,
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn field_value(task: &Task, field: DialogField) -> String {
    match field {
        DialogField::Name => task.name.clone(),
        DialogField::Labels => task.labels.join(", "),
        DialogField::Status => task.status.label().to_string(),
        DialogField::Priority => task.priority.to_string(),
        DialogField::Assignee => task.assignee.clone(),
        DialogField::DueDate => format_due_date(task.due_date.as_ref()),
    }
}

fn field_line(app: &App, dialog: &Dialog, field: DialogField, width: usize) -> Line<'static> {
    let theme = &app.theme;
    let is_current = dialog.field == field;
    let bg = if is_current {
        theme.selection_bg
    } else {
        theme.background
    };
    let label_style = Style::default().fg(theme.dim).bg(bg);
    let value_style = Style::default().fg(theme.text_bright).bg(bg);
    let task = dialog.session.snapshot();

    let mut spans: Vec<Span<'static>> = vec![Span::styled(
        format!(" {:<w$}", field.label(), w = LABEL_W),
        label_style,
    )];

    let editing = is_current && app.mode == Mode::Field;
    if editing {
        // Buffer with a block cursor at the edit position
        let (before, after) = dialog.input.buffer.split_at(dialog.input.cursor);
        spans.push(Span::styled(before.to_string(), value_style));
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(theme.highlight).bg(bg),
        ));
        spans.push(Span::styled(after.to_string(), value_style));
    } else {
        match field {
            DialogField::Status => {
                spans.push(Span::styled(
                    field_value(task, field),
                    Style::default()
                        .fg(theme.status_color(&task.status))
                        .bg(bg)
                        .add_modifier(Modifier::BOLD),
                ));
                if is_current {
                    spans.push(Span::styled("  \u{2190}Space\u{2192}", label_style));
                }
            }
            DialogField::Priority => {
                let style = priority_style(theme, &task.priority, bg);
                spans.push(Span::styled(field_value(task, field), style));
                if is_current {
                    spans.push(Span::styled("  +/-", label_style));
                }
            }
            DialogField::Labels => {
                for (i, label) in task.labels.iter().enumerate() {
                    if i > 0 {
                        spans.push(Span::styled(", ", value_style));
                    }
                    spans.push(Span::styled(
                        label.clone(),
                        Style::default().fg(theme.label_color(label)).bg(bg),
                    ));
                }
            }
            _ => {
                let value = field_value(task, field);
                if value.is_empty() {
                    spans.push(Span::styled("-", label_style));
                } else {
                    spans.push(Span::styled(value, value_style));
                }
            }
        }
    }

    pad_to(&mut spans, width, Style::default().bg(bg));
    Line::from(spans)
}
