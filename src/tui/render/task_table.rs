use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::Task;
use crate::tui::app::App;
use crate::util::unicode::{self, fit_to_width as fit_width};

use super::helpers::{pad_to, priority_style, spans_width};
use super::push_highlighted_spans;

const ID_W: usize = 6;
const PRIORITY_W: usize = 10;
const ASSIGNEE_W: usize = 24;
const DATE_W: usize = 12;

/// Which optional columns fit at this width
#[derive(Debug, Clone, Copy)]
struct Columns {
    assignee: bool,
    due: bool,
    name: usize,
}

impl Columns {
    fn for_width(width: usize) -> Self {
        let assignee = width >= 80;
        let due = width >= 100;
        let fixed = 2
            + ID_W
            + PRIORITY_W
            + DATE_W
            + if assignee { ASSIGNEE_W } else { 0 }
            + if due { DATE_W } else { 0 };
        Columns {
            assignee,
            due,
            name: width.saturating_sub(fixed).max(8),
        }
    }
}

/// Render the task list for the current tab
pub fn render_task_table(frame: &mut Frame, app: &mut App, area: Rect) {
    if area.height == 0 {
        app.rows_area = None;
        return;
    }
    let width = area.width as usize;
    let cols = Columns::for_width(width);
    let bg = app.theme.background;

    let header_area = Rect { height: 1, ..area };
    let rows_area = Rect {
        y: area.y + 1,
        height: area.height - 1,
        ..area
    };
    app.rows_area = Some(rows_area);

    let header = header_line(app, cols, width);
    frame.render_widget(Paragraph::new(header), header_area);

    let len = app.filtered_len();
    let height = rows_area.height as usize;
    update_scroll(app, len, height);

    if len == 0 {
        let mut lines = vec![Line::from(Span::styled(
            "  No tasks",
            Style::default().fg(app.theme.dim).bg(bg),
        ))];
        if !app.view.search_query.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  nothing matches \"{}\"", app.view.search_query),
                Style::default().fg(app.theme.dim).bg(bg),
            )));
        }
        frame.render_widget(Paragraph::new(lines), rows_area);
        return;
    }

    let search_re = app.search_re();
    let focused = app.selection.focused();
    let tasks = app.filtered();
    let mut lines: Vec<Line> = tasks
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
        .map(|(i, task)| task_line(app, task, focused == Some(i), cols, width, search_re.as_ref()))
        .collect();

    if app.store.is_loading() && lines.len() < height {
        lines.push(Line::from(Span::styled(
            "  Loading more\u{2026}",
            Style::default().fg(app.theme.purple).bg(bg),
        )));
    }

    frame.render_widget(Paragraph::new(lines), rows_area);
}

/// Keep the focused row on screen. A freshly focused row is centered once.
fn update_scroll(app: &mut App, len: usize, height: usize) {
    let max_offset = len.saturating_sub(height.max(1));
    if let Some(focused) = app.selection.focused() {
        let off_screen = focused < app.scroll_offset || focused >= app.scroll_offset + height;
        if app.scroll_to_focus || off_screen {
            app.scroll_offset = focused.saturating_sub(height / 2);
        }
    }
    app.scroll_to_focus = false;
    app.scroll_offset = app.scroll_offset.min(max_offset);
}

fn header_line(app: &App, cols: Columns, width: usize) -> Line<'static> {
    let style = Style::default()
        .fg(app.theme.dim)
        .bg(app.theme.background)
        .add_modifier(Modifier::BOLD);
    let mut text = format!(
        "  {}{}{}",
        fit_width("#", ID_W),
        fit_width("Name", cols.name),
        fit_width("Priority", PRIORITY_W)
    );
    if cols.assignee {
        text.push_str(&fit_width("Assignee", ASSIGNEE_W));
    }
    text.push_str(&fit_width("Created", DATE_W));
    if cols.due {
        text.push_str(&fit_width("Due", DATE_W));
    }
    let mut spans = vec![Span::styled(text, style)];
    pad_to(&mut spans, width, Style::default().bg(app.theme.background));
    Line::from(spans)
}

fn task_line(
    app: &App,
    task: &Task,
    is_focused: bool,
    cols: Columns,
    width: usize,
    search_re: Option<&regex::Regex>,
) -> Line<'static> {
    let theme = &app.theme;
    let bg = if is_focused {
        theme.selection_bg
    } else {
        theme.background
    };
    let text_style = Style::default().fg(theme.text).bg(bg);
    let name_style = if is_focused {
        Style::default()
            .fg(theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_bright).bg(bg)
    };
    let dim_style = Style::default().fg(theme.dim).bg(bg);
    let match_style = Style::default()
        .fg(theme.search_match_fg)
        .bg(theme.search_match_bg);

    let mut spans: Vec<Span<'static>> = Vec::new();
    if is_focused {
        spans.push(Span::styled(
            "\u{258E} ",
            Style::default().fg(theme.selection_border).bg(bg),
        ));
    } else {
        spans.push(Span::styled("  ", text_style));
    }
    spans.push(Span::styled(
        fit_width(&format!("#{}", task.id), ID_W),
        dim_style,
    ));

    // Name, then labels, clipped together to the name column
    let mut name_spans: Vec<Span<'static>> = Vec::new();
    let name = unicode::truncate_to_width(&task.name, cols.name.saturating_sub(1));
    push_highlighted_spans(&mut name_spans, &name, name_style, match_style, search_re);
    for label in &task.labels {
        let tag = format!(" #{}", label);
        if spans_width(&name_spans) + unicode::display_width(&tag) >= cols.name {
            break;
        }
        name_spans.push(Span::styled(
            tag,
            Style::default().fg(theme.label_color(label)).bg(bg),
        ));
    }
    let used = spans_width(&name_spans);
    spans.extend(name_spans);
    if used < cols.name {
        spans.push(Span::styled(" ".repeat(cols.name - used), text_style));
    }

    let badge = fit_width(task.priority.as_str(), PRIORITY_W);
    let badge_style = priority_style(theme, &task.priority, bg);
    spans.push(Span::styled(badge, badge_style));

    if cols.assignee {
        spans.push(Span::styled(
            fit_width(&task.assignee, ASSIGNEE_W),
            text_style,
        ));
    }
    spans.push(Span::styled(
        fit_width(&task.created_at.format("%Y-%m-%d").to_string(), DATE_W),
        dim_style,
    ));
    if cols.due {
        let due = task
            .due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        spans.push(Span::styled(fit_width(&due, DATE_W), dim_style));
    }

    pad_to(&mut spans, width, Style::default().bg(bg));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Priority;
    use crate::model::view::Tab;
    use crate::tui::render::test_helpers::*;

    fn render(app: &mut App, w: u16, h: u16) -> String {
        render_to_string(w, h, |frame, area| render_task_table(frame, app, area))
    }

    #[test]
    fn header_and_rows() {
        let mut app = app_with_tasks(generated_tasks(9));
        let output = render(&mut app, TERM_W, 10);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].contains("Name"));
        assert!(lines[0].contains("Priority"));
        assert!(lines[1].contains("#1"));
        assert!(lines[1].contains("Task 1"));
        assert!(lines[1].contains("LOW"));
        assert!(lines[2].contains("Task 4"));
        assert!(lines[3].contains("Task 7"));
    }

    #[test]
    fn empty_tab_renders_no_tasks() {
        let mut app = app_with_tasks(Vec::new());
        let output = render(&mut app, TERM_W, 10);
        assert!(output.contains("No tasks"));
        assert_eq!(app.rows_area.unwrap().height, 9);
    }

    #[test]
    fn empty_search_result_mentions_query() {
        let mut app = app_with_tasks(generated_tasks(9));
        app.view.search_query = "zzz".into();
        let output = render(&mut app, TERM_W, 10);
        assert!(output.contains("No tasks"));
        assert!(output.contains("nothing matches \"zzz\""));
    }

    #[test]
    fn focused_row_has_marker() {
        let mut app = app_with_tasks(generated_tasks(9));
        app.selection.down(app.filtered_len());
        app.selection.down(app.filtered_len());
        let output = render(&mut app, TERM_W, 10);
        let line = output.lines().find(|l| l.contains("Task 4")).unwrap();
        assert!(line.starts_with('\u{258E}'));
    }

    #[test]
    fn focused_row_is_centered() {
        let mut app = app_with_tasks(generated_tasks(90));
        app.view.tab = Tab::Open;
        let len = app.filtered_len();
        assert_eq!(len, 10);
        app.selection.focus(8, len);
        app.scroll_to_focus = true;
        render(&mut app, TERM_W, 5);
        // 4 visible rows, row 8 centered and clamped to the end of the list
        assert_eq!(app.scroll_offset, 6);
        assert!(!app.scroll_to_focus);
    }

    #[test]
    fn unknown_priority_renders_verbatim() {
        let mut tasks = generated_tasks(3);
        tasks[0].priority = Priority::Other("SOMEDAY".into());
        let mut app = app_with_tasks(tasks);
        let output = render(&mut app, TERM_W, 5);
        assert!(output.contains("SOMEDAY"));
    }

    #[test]
    fn loading_row_shown_while_loading() {
        let mut app = app_with_tasks(generated_tasks(90));
        app.request_load_more(std::time::Instant::now());
        let output = render(&mut app, TERM_W, 20);
        assert!(output.contains("Loading more"));
    }

    #[test]
    fn wide_terminal_shows_assignee_and_due_columns() {
        let mut app = app_with_tasks(generated_tasks(3));
        let output = render(&mut app, 120, 5);
        assert!(output.contains("Assignee"));
        assert!(output.contains("Due"));
        assert!(output.contains("assignee1@company.com"));

        let output = render(&mut app, 60, 5);
        assert!(!output.contains("Assignee"));
    }
}
