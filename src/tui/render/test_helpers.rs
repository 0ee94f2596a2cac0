use chrono::{Duration, TimeZone, Utc};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::config::Config;
use crate::model::task::{Priority, Status, Task};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Tasks `1..=n` named "Task i". Statuses cycle OPEN, IN_PROGRESS, CLOSED;
/// priorities cycle through all seven; each task is an hour newer than the last.
pub fn generated_tasks(n: u64) -> Vec<Task> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let labels = ["frontend", "backend", "bug", "feature"];
    (1..=n)
        .map(|i| {
            let idx = (i - 1) as usize;
            let mut task = Task::new(
                i,
                format!("Task {}", i),
                Status::ALL[idx % 3].clone(),
                Priority::ALL[idx % 7].clone(),
                base + Duration::hours(i as i64),
            );
            task.assignee = format!("assignee{}@company.com", i);
            task.labels = vec![labels[idx % labels.len()].to_string()];
            task.comment = format!("Task {} description", i);
            task
        })
        .collect()
}

/// An App with default config, no persistence, and `tasks` loaded
pub fn app_with_tasks(tasks: Vec<Task>) -> App {
    let mut app = App::new(&Config::default());
    app.load_tasks(tasks);
    app
}
