//! UI widgets for the dashboard

pub mod balance;
pub mod logs;
pub mod sequence;
pub mod status;
pub mod trades;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::display::{OutcomeStyle, ProfitStyle};
use crate::domain::Severity;

use super::App;

/// Draw the main UI layout
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_main(frame, app, chunks[1]);
    draw_footer(frame, app, chunks[2]);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let connected = app.display().connected;
    let (indicator, indicator_color) = if connected {
        ("● Connected", Color::Green)
    } else {
        ("● Disconnected", Color::Red)
    };

    let metrics = app.metrics();
    let line = Line::from(vec![
        Span::styled(
            format!(" {}", indicator),
            Style::default()
                .fg(indicator_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " | {} | Messages: {} | Dropped: {} | Reconnects: {}",
            app.server_url(),
            metrics.messages_received,
            metrics.messages_dropped,
            metrics.reconnect_count
        )),
    ]);

    let header = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).title(" Trading Bot Dashboard "));

    frame.render_widget(header, area);
}

fn draw_main(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(36), // Status, sequence, stakes
            Constraint::Min(0),     // Trades, balance, logs
        ])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Status
            Constraint::Length(4), // Sequence
            Constraint::Min(0),    // Stake ladder
        ])
        .split(columns[0]);

    status::draw(frame, app.display(), left[0]);
    sequence::draw(frame, app.display(), left[1]);
    status::draw_stakes(frame, app.display(), left[2]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40), // Trade history
            Constraint::Percentage(35), // Balance chart
            Constraint::Percentage(25), // Log feed
        ])
        .split(columns[1]);

    trades::draw(frame, app.display(), right[0]);
    balance::draw(frame, app.display(), right[1]);
    logs::draw(frame, app.display(), right[2]);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let footer_text = match app.status_message.as_deref() {
        Some(status) if !status.is_empty() => format!(" q=quit r=reconnect | {}", status),
        _ => " q/Esc=quit r=reconnect now (when disconnected)".to_string(),
    };

    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

pub(crate) fn profit_color(style: ProfitStyle) -> Color {
    match style {
        ProfitStyle::Profit => Color::Green,
        ProfitStyle::Loss => Color::Red,
    }
}

pub(crate) fn outcome_style(style: OutcomeStyle) -> Style {
    match style {
        OutcomeStyle::Won => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        OutcomeStyle::Lost => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        OutcomeStyle::Plain => Style::default(),
    }
}

pub(crate) fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Gray,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
        Severity::Success => Color::Green,
    }
}
