//! Members pane
//!
//! Lists the focused buffer's members in sorted order.

use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, List, ListItem},
};
use relaychat_app::App;
use relaychat_core::Environment;

/// Render the members pane.
pub fn render<E: Environment>(frame: &mut Frame, app: &App<E>, area: Rect) {
    let focused = app.focused_buffer();

    let title = focused.map_or_else(|| " Members ".to_string(), |b| {
        format!(" Members ({}) ", b.member_count())
    });
    let items: Vec<ListItem> = focused
        .into_iter()
        .flat_map(|buffer| buffer.members())
        .map(|nick| ListItem::new(Line::from(nick.to_string())))
        .collect();

    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(List::new(items).block(block), area);
}
