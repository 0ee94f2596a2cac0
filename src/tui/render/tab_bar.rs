use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::filter::tab_counts;
use crate::tui::app::App;

use super::helpers::spans_width;

/// Render the status tabs with their counts, with a separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Render tabs and return the column positions of each separator character.
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) -> Vec<usize> {
    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let mut spans: Vec<Span> = Vec::new();
    let mut sep_cols: Vec<usize> = Vec::new();
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    spans.push(Span::styled(" ", bg_style));
    spans.push(Span::styled(
        "\u{25B6}",
        Style::default().fg(app.theme.purple).bg(bg),
    ));
    spans.push(Span::styled(" ", bg_style));

    for (tab, count) in tab_counts(app.store.visible(), &app.view) {
        let is_current = tab == app.view.tab;
        let tab_bg = if is_current { app.theme.selection_bg } else { bg };
        spans.push(Span::styled(
            format!(" {} ", tab.title()),
            tab_style(app, is_current),
        ));
        spans.push(Span::styled(
            format!("{} ", count),
            Style::default()
                .fg(app.theme.status_color(&tab.status()))
                .bg(tab_bg),
        ));
        sep_cols.push(spans_width(&spans));
        spans.push(sep.clone());
    }

    // Right side: sort and search indicator
    let mut right = format!(
        "{} {} ",
        app.view.sort_field.label(),
        app.view.sort_order.arrow()
    );
    if !app.view.search_query.is_empty() {
        right = format!("/{}  {}", app.view.search_query, right);
    }
    let width = area.width as usize;
    let used = spans_width(&spans);
    let right_w = crate::util::unicode::display_width(&right);
    if used + right_w < width {
        spans.push(Span::styled(" ".repeat(width - used - right_w), bg_style));
        spans.push(Span::styled(right, Style::default().fg(app.theme.dim).bg(bg)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
    sep_cols
}

fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}

/// Horizontal rule under the tabs, joined up with the tab separators
fn render_separator(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let line: String = (0..width)
        .map(|col| {
            if sep_cols.contains(&col) {
                '\u{2534}'
            } else {
                '\u{2500}'
            }
        })
        .collect();
    let style = Style::default().fg(app.theme.dim).bg(app.theme.background);
    frame.render_widget(Paragraph::new(Span::styled(line, style)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::view::{SortField, SortOrder, Tab};
    use crate::tui::render::test_helpers::*;

    fn render(app: &App) -> String {
        render_to_string(TERM_W, 2, |frame, area| render_tab_bar(frame, app, area))
    }

    #[test]
    fn tabs_show_counts() {
        let app = app_with_tasks(generated_tasks(9));
        let output = render(&app);
        let first = output.lines().next().unwrap();
        assert!(first.contains("Open 3"));
        assert!(first.contains("In Progress 3"));
        assert!(first.contains("Completed 3"));
        assert!(first.contains("created \u{2191}"));
    }

    #[test]
    fn counts_follow_search() {
        let mut app = app_with_tasks(generated_tasks(30));
        app.view.search_query = "Task 1".into();
        let output = render(&app);
        // Task 1, 10, 13, 16, 19 are open; 11, 14, 17 in progress; 12, 15, 18 closed
        assert!(output.contains("Open 5"));
        assert!(output.contains("In Progress 3"));
        assert!(output.contains("Completed 3"));
        assert!(output.contains("/Task 1"));
    }

    #[test]
    fn sort_indicator() {
        let mut app = app_with_tasks(generated_tasks(3));
        app.view.tab = Tab::Closed;
        app.view.sort_field = SortField::Priority;
        app.view.sort_order = SortOrder::Descending;
        let output = render(&app);
        assert!(output.contains("priority \u{2193}"));
    }

    #[test]
    fn separator_joins_tab_dividers() {
        let app = app_with_tasks(generated_tasks(3));
        let output = render(&app);
        let second = output.lines().nth(1).unwrap();
        assert!(second.contains('\u{2534}'));
        assert!(second.starts_with('\u{2500}'));
    }
}
