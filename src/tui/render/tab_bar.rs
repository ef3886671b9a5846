use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, View};
use crate::util::unicode;

/// Render the tab bar: view tabs and the date, with the quote line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // quote / separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_quote_line(frame, app, chunks[1], &sep_cols);
}

/// Render tabs and return the column positions of each separator character.
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) -> Vec<usize> {
    let bg = app.theme.background;
    let mut spans: Vec<Span> = Vec::new();
    let mut sep_cols: Vec<usize> = Vec::new();
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    spans.push(Span::styled(" ", Style::default().bg(bg)));
    spans.push(Span::styled(
        "\u{25B6}",
        Style::default().fg(app.theme.purple).bg(bg),
    ));
    spans.push(Span::styled(" ", Style::default().bg(bg)));

    for (i, view) in View::ALL.into_iter().enumerate() {
        let label = format!(" {} {} ", i + 1, view.label());
        spans.push(Span::styled(label, tab_style(app, app.view == view)));
        sep_cols.push(spans.iter().map(|s| unicode::display_width(&s.content)).sum());
        spans.push(sep.clone());
    }

    // Date, right-aligned
    let date = app.dashboard.today().format("%a %Y-%m-%d ").to_string();
    let used: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
    let width = area.width as usize;
    if used + date.len() < width {
        spans.push(Span::styled(
            " ".repeat(width - used - date.len()),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(date, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let tabs = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(tabs, area);
    sep_cols
}

/// Second row: the day's quote when there is one, otherwise a rule that
/// joins the tab separators.
fn render_quote_line(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let bg = app.theme.background;

    let line = match &app.quote {
        Some(quote) => {
            let text = unicode::truncate_to_width(&format!(" \u{201C}{quote}\u{201D}"), width);
            Line::from(Span::styled(
                text,
                Style::default()
                    .fg(app.theme.dim)
                    .bg(bg)
                    .add_modifier(Modifier::ITALIC),
            ))
        }
        None => {
            let rule: String = (0..width)
                .map(|col| {
                    if sep_cols.contains(&col) {
                        '\u{2534}'
                    } else {
                        '\u{2500}'
                    }
                })
                .collect();
            Line::from(Span::styled(rule, Style::default().fg(app.theme.dim).bg(bg)))
        }
    };

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
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
