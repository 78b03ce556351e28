//! Win/loss sequence row

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::visualizer::TuiDisplay;
use crate::domain::SequenceTag;

/// Draw one coloured marker per tag; the current trade is bracketed
pub fn draw(frame: &mut Frame, display: &TuiDisplay, area: Rect) {
    let spans: Vec<Span> = display
        .sequence
        .iter()
        .map(|marker| {
            let mut style = match marker.tag {
                SequenceTag::Win => Style::default().fg(Color::Black).bg(Color::Green),
                SequenceTag::Loss => Style::default().fg(Color::Black).bg(Color::Red),
                SequenceTag::Other => Style::default(),
            };
            let text = if marker.active {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                format!("[{}]", marker.label)
            } else {
                format!(" {} ", marker.label)
            };
            Span::styled(text, style)
        })
        .collect();

    let row = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Sequence "));

    frame.render_widget(row, area);
}
