use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, View};

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

    match app.view {
        View::Today => {
            lines.push(Line::from(Span::styled(" Today", header_style)));
            add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Move within a bucket", key_style, desc_style);
            add_binding(&mut lines, " \u{2190}\u{2192}/hl", "Move between buckets", key_style, desc_style);
            add_binding(&mut lines, " Space/x/Enter", "Toggle done", key_style, desc_style);
            add_binding(&mut lines, " K/J", "Move task up/down", key_style, desc_style);
            add_binding(&mut lines, " a", "Add a task", key_style, desc_style);
            lines.push(Line::from(""));
        }
        View::Trends => {
            lines.push(Line::from(Span::styled(" Trends", header_style)));
            add_binding(&mut lines, " g", "Day / week / month / year", key_style, desc_style);
            lines.push(Line::from(""));
        }
        View::Progress => {}
    }

    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " Tab", "Next view", key_style, desc_style);
    add_binding(&mut lines, " 1/2/3", "Today / progress / trends", key_style, desc_style);
    add_binding(&mut lines, " r", "Reload from disk", key_style, desc_style);
    add_binding(&mut lines, " ?", "Toggle help", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 16;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
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
    use crate::tui::render::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn today_help_lists_edit_keys() {
        let tmp = TempDir::new().unwrap();
        let app = test_app(&tmp);
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_help_overlay(frame, &app, area)
        });
        assert!(out.contains("Key Bindings"));
        assert!(out.contains("Move task up/down"));
        assert!(out.contains("Quit"));
    }

    #[test]
    fn trends_help_mentions_granularity() {
        let tmp = TempDir::new().unwrap();
        let mut app = test_app(&tmp);
        app.set_view(View::Trends);
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_help_overlay(frame, &app, area)
        });
        assert!(out.contains("Day / week / month / year"));
        assert!(!out.contains("Move task up/down"));
    }

    #[test]
    fn centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let r = centered_rect(60, 80, area);
        assert_eq!(r.width, 60);
        assert_eq!(r.x, 20);
        assert!(r.y > 0 && r.bottom() < area.bottom());
    }
}
