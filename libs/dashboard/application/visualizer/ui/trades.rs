//! Trade history table

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::application::visualizer::TuiDisplay;

use super::{outcome_style, profit_color};

/// Draw the most-recent-first trade table
pub fn draw(frame: &mut Frame, display: &TuiDisplay, area: Rect) {
    let header = Row::new(vec!["Time", "Market", "Type", "Stake", "Outcome", "P/L"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = display
        .trades
        .iter()
        .map(|trade| {
            Row::new(vec![
                Cell::from(trade.time.clone()),
                Cell::from(trade.market.clone()),
                Cell::from(trade.contract_type.clone()),
                Cell::from(trade.stake.clone()),
                Cell::from(Span::styled(
                    trade.outcome.clone(),
                    outcome_style(trade.outcome_style),
                )),
                Cell::from(Span::styled(
                    trade.profit.clone(),
                    Style::default().fg(profit_color(trade.profit_style)),
                )),
            ])
        })
        .collect();

    let title = format!(" Trade History ({}/{}) ", display.trades.len(), display.stats.trades);

    let table = Table::new(
        rows,
        [
            Constraint::Length(9),
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Min(9),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}
