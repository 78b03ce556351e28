//! Log feed

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::application::visualizer::TuiDisplay;

use super::severity_color;

pub fn draw(frame: &mut Frame, display: &TuiDisplay, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = display
        .logs
        .iter()
        .take(visible)
        .map(|line| {
            ListItem::new(line.text.clone())
                .style(Style::default().fg(severity_color(line.severity)))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Log "));

    frame.render_widget(list, area);
}
