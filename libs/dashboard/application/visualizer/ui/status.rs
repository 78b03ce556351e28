//! Status panel and stake ladder

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use crate::application::visualizer::TuiDisplay;

fn field<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {:<12}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
    ])
}

/// Draw the labelled status values
pub fn draw(frame: &mut Frame, display: &TuiDisplay, area: Rect) {
    let status = &display.status;
    let lines = vec![
        field("Market", status.market.clone()),
        field("Authorized", status.authorized.clone()),
        field("Trading", status.trading.clone()),
        field("Round", status.round.to_string()),
        field("Stake", status.current_stake.clone()),
    ];

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Status "));

    frame.render_widget(panel, area);
}

/// Draw the round/stake ladder, highlighting the active round
pub fn draw_stakes(frame: &mut Frame, display: &TuiDisplay, area: Rect) {
    let rows: Vec<Row> = display
        .stakes
        .iter()
        .map(|cell| {
            let style = if cell.active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let marker = if cell.active { ">" } else { " " };
            Row::new(vec![
                format!("{} R{}", marker, cell.round),
                format!("${}", cell.amount),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(8), Constraint::Min(10)])
        .header(
            Row::new(vec!["  Round", "Stake"])
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(" Stakes "));

    frame.render_widget(table, area);
}
