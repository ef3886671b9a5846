use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ops::dashboard::BucketGroup;
use crate::tui::app::App;
use crate::util::unicode;

/// Render today's list as one bordered column per bucket, Holding Tank last
pub fn render_today_view(frame: &mut Frame, app: &App, area: Rect) {
    let columns = app.columns();
    if columns.is_empty() {
        return;
    }

    let n = columns.len() as u32;
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(columns.iter().map(|_| Constraint::Ratio(1, n)))
        .split(area);

    for (idx, (group, col_area)) in columns.iter().zip(areas.iter()).enumerate() {
        let cursor = (idx == app.cursor_bucket).then_some(app.cursor_pos);
        render_column(frame, app, group, cursor, *col_area);
    }
}

fn render_column(
    frame: &mut Frame,
    app: &App,
    group: &BucketGroup,
    cursor: Option<usize>,
    area: Rect,
) {
    let bg = app.theme.background;
    let color = app.theme.bucket_color(&group.bucket);
    let done = group.tasks.iter().filter(|(_, t)| t.completed).count();
    let focused = cursor.is_some();

    let title = Span::styled(
        format!(" {} {}/{} ", group.bucket, done, group.tasks.len()),
        Style::default()
            .fg(color)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    );
    let border_color = if focused { color } else { app.theme.dim };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border_color).bg(bg))
        .style(Style::default().bg(bg));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    if group.tasks.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            " (empty)",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
        frame.render_widget(empty, inner);
        return;
    }

    // Keep the cursor row on screen
    let height = inner.height as usize;
    let scroll = cursor.map_or(0, |c| (c + 1).saturating_sub(height));
    let width = inner.width as usize;

    let lines: Vec<Line> = group
        .tasks
        .iter()
        .enumerate()
        .skip(scroll)
        .take(height)
        .map(|(pos, (_, task))| {
            let selected = cursor == Some(pos);
            let row_bg = if selected { app.theme.selection_bg } else { bg };
            let (mark, mark_color) = if task.completed {
                ("[x]", app.theme.green)
            } else {
                ("[ ]", app.theme.dim)
            };
            let name_style = if task.completed {
                Style::default()
                    .fg(app.theme.dim)
                    .bg(row_bg)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else if selected {
                Style::default().fg(app.theme.text_bright).bg(row_bg)
            } else {
                Style::default().fg(app.theme.text).bg(row_bg)
            };
            let name = unicode::truncate_to_width(&task.name, width.saturating_sub(5));
            let name = unicode::pad_to_width(&name, width.saturating_sub(5));
            Line::from(vec![
                Span::styled(" ", Style::default().bg(row_bg)),
                Span::styled(mark, Style::default().fg(mark_color).bg(row_bg)),
                Span::styled(" ", Style::default().bg(row_bg)),
                Span::styled(name, name_style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use ratatui::Terminal;
    use insta::assert_snapshot;
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    #[test]
    fn today_columns_snapshot() {
        let tmp = TempDir::new().unwrap();
        let app = test_app(&tmp);
        let out = render_to_string(60, 4, |frame, area| render_today_view(frame, &app, area));
        assert_snapshot!(out, @r"
        ┌ Health 0/2 ──────┐┌ Work 0/1 ────────┐┌ Holding Tank 0/0 ┐
        │ [ ] Stretch      ││ [ ] Email        ││ (empty)          │
        │ [ ] Run          ││                  ││                  │
        └──────────────────┘└──────────────────┘└──────────────────┘
        ");
    }

    #[test]
    fn columns_with_counts() {
        let tmp = TempDir::new().unwrap();
        let app = test_app(&tmp);
        let out = render_to_string(90, 8, |frame, area| render_today_view(frame, &app, area));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains(" Health 0/2 "));
        assert!(lines[0].contains(" Work 0/1 "));
        assert!(lines[0].contains(" Holding Tank 0/0 "));
        assert!(lines[1].contains("[ ] Stretch"));
        assert!(lines[1].contains("[ ] Email"));
        assert!(lines[1].contains("(empty)"));
        assert!(lines[2].contains("[ ] Run"));
    }

    #[test]
    fn completed_tasks_are_marked() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(&tmp);
        app.toggle_selected();
        let out = render_to_string(90, 8, |frame, area| render_today_view(frame, &app, area));
        assert!(out.contains(" Health 1/2 "));
        assert!(out.contains("[x] Stretch"));
    }

    #[test]
    fn selected_row_is_highlighted() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(&tmp);
        app.cursor_pos = 1;

        let backend = TestBackend::new(90, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_today_view(frame, &app, frame.area()))
            .unwrap();
        let buf = terminal.backend().buffer();

        // Row 2 of the Health column holds "Run", row 1 holds "Stretch"
        assert_eq!(buf[(2, 2)].bg, app.theme.selection_bg);
        assert_eq!(buf[(2, 1)].bg, app.theme.background);
    }

    #[test]
    fn long_names_are_truncated() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(&tmp);
        app.dashboard
            .add_task("An extremely long task name that cannot fit", "Work")
            .unwrap();
        app.reload();
        let out = render_to_string(60, 6, |frame, area| render_today_view(frame, &app, area));
        assert!(out.contains('\u{2026}'));
    }
}
