use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, View};
use crate::util::unicode;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::Add => {
            // Add prompt: Add to Work: text▌
            let prompt = &app.add;
            let (before, after) = prompt.buffer.split_at(prompt.cursor);
            let bucket = app.column_bucket(prompt.bucket);
            let spans = vec![
                Span::styled(
                    format!("Add to {}: ", bucket),
                    Style::default().fg(app.theme.bucket_color(bucket)).bg(bg),
                ),
                Span::styled(
                    before.to_string(),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
                Span::styled(
                    after.to_string(),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
            ];
            with_hint(app, spans, "Tab bucket  Enter add  Esc cancel", width)
        }
        Mode::Navigate => {
            if let Some(msg) = &app.message {
                Line::from(Span::styled(
                    unicode::truncate_to_width(msg, width),
                    Style::default().fg(app.theme.red).bg(bg),
                ))
            } else if app.board.config.ui.show_key_hints {
                with_hint(app, Vec::new(), view_hints(app.view), width)
            } else {
                with_hint(app, Vec::new(), "? help", width)
            }
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn view_hints(view: View) -> &'static str {
    match view {
        View::Today => "space done  K/J move  a add  Tab view  ? help",
        View::Progress => "Tab view  r reload  ? help",
        View::Trends => "g granularity  Tab view  ? help",
    }
}

/// Append a right-aligned dim hint if it fits after `spans`
fn with_hint<'a>(app: &App, mut spans: Vec<Span<'a>>, hint: &'a str, width: usize) -> Line<'a> {
    let bg = app.theme.background;
    let content_width: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
    let hint_width = unicode::display_width(hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }
    Line::from(spans)
}
