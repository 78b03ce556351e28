//! Balance chart

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use crate::application::format::{currency, signed_currency};
use crate::application::visualizer::TuiDisplay;

use super::profit_color;

fn title(display: &TuiDisplay) -> Line<'static> {
    let mut spans = vec![Span::raw(" Balance ")];

    if let Some(balance) = display.latest_balance() {
        spans.push(Span::raw(format!("{} ", currency(balance))));
    }
    if let Some(change) = display.balance_change {
        let (text, style) = signed_currency(change);
        spans.push(Span::styled(
            format!("({}) ", text),
            Style::default().fg(profit_color(style)),
        ));
    }

    let stats = &display.stats;
    let (net, net_style) = signed_currency(stats.net_profit);
    spans.push(Span::raw(format!("| W {} L {} ", stats.wins, stats.losses)));
    if let Some(rate) = stats.win_rate() {
        spans.push(Span::raw(format!("({:.0}%) ", rate)));
    }
    spans.push(Span::raw("| Net "));
    spans.push(Span::styled(
        format!("{} ", net),
        Style::default().fg(profit_color(net_style)),
    ));

    Line::from(spans)
}

/// Draw the bounded balance series
pub fn draw(frame: &mut Frame, display: &TuiDisplay, area: Rect) {
    let [y_min, y_max] = display.balance_y_bounds();
    let x_labels = match (display.balance_labels.front(), display.balance_labels.back()) {
        (Some(first), Some(last)) => vec![Span::raw(first.clone()), Span::raw(last.clone())],
        _ => Vec::new(),
    };
    let y_labels = vec![
        Span::raw(format!("{:.2}", y_min)),
        Span::raw(format!("{:.2}", (y_min + y_max) / 2.0)),
        Span::raw(format!("{:.2}", y_max)),
    ];

    let points: Vec<(f64, f64)> = display.balance_points.iter().copied().collect();
    let datasets = vec![Dataset::default()
        .name("Balance")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(title(display)))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .labels(x_labels)
                .bounds(display.balance_x_bounds()),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .labels(y_labels)
                .bounds([y_min, y_max]),
        );

    frame.render_widget(chart, area);
}
