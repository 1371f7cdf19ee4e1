//! Activity indicator
//!
//! Displays buffers ranked by recency, most recently active first, as a row
//! of chips.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use relaychat_app::App;
use relaychat_core::Environment;

const CHIP_SEPARATOR: &str = " ";
const EMPTY_TEXT: &str = " no activity yet";

/// Render the activity indicator.
pub fn render<E: Environment>(frame: &mut Frame, app: &App<E>, area: Rect) {
    let ranked = app.ranked_buffers();

    let line = if ranked.is_empty() {
        Line::from(Span::styled(EMPTY_TEXT, Style::default().fg(Color::DarkGray)))
    } else {
        let most_recent =
            Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD);
        let older = Style::default().fg(Color::White).bg(Color::DarkGray);

        let mut spans = Vec::with_capacity(ranked.len() * 2);
        for (rank, name) in ranked.into_iter().enumerate() {
            if rank > 0 {
                spans.push(Span::raw(CHIP_SEPARATOR));
            }
            let style = if rank == 0 { most_recent } else { older };
            spans.push(Span::styled(format!(" {name} "), style));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line), area);
}
