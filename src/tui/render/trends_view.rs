use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use crate::model::progress::Trend;
use crate::tui::app::App;

/// Render completion history as one line per bucket
pub fn render_trends_view(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let title = Span::styled(
        format!(" Trends by {} (g to change) ", app.granularity.label()),
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

    let trend = match &app.trend {
        Some(trend) if !trend.is_empty() => trend,
        _ => {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No history yet",
                Style::default().fg(app.theme.dim).bg(bg),
            )))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(empty, area);
            return;
        }
    };

    let points = series_points(trend);
    let datasets: Vec<Dataset> = trend
        .series
        .iter()
        .zip(points.iter())
        .map(|(series, data)| {
            Dataset::default()
                .name(series.bucket.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(app.theme.bucket_color(&series.bucket)))
                .data(data)
        })
        .collect();

    let axis_style = Style::default().fg(app.theme.dim).bg(bg);
    let last = trend.periods.len().saturating_sub(1);
    let x_labels: Vec<Span> = if last == 0 {
        vec![Span::raw(trend.periods[0].clone())]
    } else {
        vec![
            Span::raw(trend.periods[0].clone()),
            Span::raw(trend.periods[last].clone()),
        ]
    };

    let chart = Chart::new(datasets)
        .block(block)
        .style(Style::default().bg(bg))
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, last.max(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, 100.0])
                .labels(["0%", "50%", "100%"]),
        );

    frame.render_widget(chart, area);
}

/// (period index, percent) pairs for each series, one entry per period
fn series_points(trend: &Trend) -> Vec<Vec<(f64, f64)>> {
    trend
        .series
        .iter()
        .map(|series| {
            series
                .points
                .iter()
                .filter_map(|p| {
                    let x = trend.periods.iter().position(|k| *k == p.period)?;
                    Some((x as f64, p.percent))
                })
                .collect()
        })
        .collect()
}
