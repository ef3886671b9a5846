use chrono::NaiveDate;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::model::board::Board;
use crate::model::config::{DashboardConfig, RecurringTask, Settings};
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

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

/// A board in `tmp` with buckets Health and Work and a daily "Stretch".
pub fn test_board(tmp: &TempDir) -> Board {
    Board {
        root: tmp.path().to_path_buf(),
        tasks_dir: tmp.path().join("tasks"),
        settings: Settings {
            buckets: vec!["Health".into(), "Work".into()],
            recurring_tasks: vec![RecurringTask {
                task: "Stretch".into(),
                bucket: "Health".into(),
            }],
        },
        quotes: vec!["Small steps every day.".into()],
        config: DashboardConfig::default(),
    }
}

/// App on 2024-03-15 with today's list:
/// Stretch (Health), Run (Health), Email (Work).
pub fn test_app(tmp: &TempDir) -> App {
    let mut app = App::new(test_board(tmp), test_date());
    app.dashboard.add_task("Run", "Health").unwrap();
    app.dashboard.add_task("Email", "Work").unwrap();
    app.reload();
    app
}
