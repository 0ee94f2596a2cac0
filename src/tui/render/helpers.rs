use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::model::task::Priority;
use crate::tui::theme::Theme;
use crate::util::unicode;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Style for a priority badge. Unknown priorities get no color at all.
pub(super) fn priority_style(theme: &Theme, priority: &Priority, bg: ratatui::style::Color) -> Style {
    match theme.priority_color(priority) {
        Some(color) => Style::default()
            .fg(color)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
        None => Style::default(),
    }
}

/// Fill the rest of a row with background
pub(super) fn pad_to(spans: &mut Vec<Span<'_>>, width: usize, style: Style) {
    let used = spans_width(spans);
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), style));
    }
}

/// A rect of `width` x `height` centered in `area`, shrunk to fit
pub(super) fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Helper to create a centered rect using percentage of the available area
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_fixed_shrinks_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_fixed(20, 4, area), Rect::new(10, 3, 20, 4));
        assert_eq!(centered_fixed(100, 100, area), area);
    }

    #[test]
    fn unknown_priority_is_unstyled() {
        let theme = Theme::default();
        let style = priority_style(&theme, &Priority::Other("SOMEDAY".into()), theme.background);
        assert_eq!(style, Style::default());
        let style = priority_style(&theme, &Priority::Blocker, theme.background);
        assert!(style.fg.is_some());
    }
}
