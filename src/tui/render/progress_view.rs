use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders};

use crate::ops::progress::{Tally, bucket_tallies};
use crate::tui::app::App;

const MAX_BAR_WIDTH: u16 = 20;
const BAR_GAP: u16 = 2;

/// Render today's completion as one bar per bucket, scaled to 100%
pub fn render_progress_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let tallies = bucket_tallies(&app.tasks, &app.board.settings.buckets);

    let overall = tallies.values().fold(Tally::default(), |acc, t| Tally {
        completed: acc.completed + t.completed,
        total: acc.total + t.total,
    });
    let title = Span::styled(
        format!(
            " Progress {}/{} ({:.0}%) ",
            overall.completed,
            overall.total,
            overall.percent()
        ),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let bars: Vec<Bar> = tallies
        .iter()
        .map(|(bucket, tally)| {
            let color = app.theme.bucket_color(bucket);
            Bar::default()
                .value(tally.percent().round() as u64)
                .text_value(format!("{:.0}%", tally.percent()))
                .label(Line::from(bucket.clone()))
                .style(Style::default().fg(color).bg(bg))
                .value_style(Style::default().fg(bg).bg(color))
        })
        .collect();

    let n = bars.len().max(1) as u16;
    let inner_width = area.width.saturating_sub(2);
    let bar_width = (inner_width.saturating_sub(BAR_GAP * (n - 1)) / n).clamp(1, MAX_BAR_WIDTH);

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(BAR_GAP)
        .max(100)
        .label_style(Style::default().fg(app.theme.text).bg(bg));

    frame.render_widget(chart, area);
}
