//! Status bar
//!
//! Displays the transient status message, the focused buffer's position and
//! the number of dropped routing events.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use relaychat_app::App;
use relaychat_core::Environment;

const IDLE_STATUS: &str = "ready";

/// Render the status bar.
pub fn render<E: Environment>(frame: &mut Frame, app: &App<E>, area: Rect) {
    let status = app.status_message().map_or_else(
        || Span::raw(IDLE_STATUS),
        |message| Span::styled(message.to_string(), Style::default().fg(Color::Yellow)),
    );

    let position = match (app.focused_index(), app.focused_buffer()) {
        (Some(index), Some(buffer)) => {
            format!("[{}/{}] {}", index + 1, app.registry().len(), buffer.name())
        },
        _ => format!("[0/{}]", app.registry().len()),
    };

    let line = Line::from(vec![
        Span::raw(" "),
        status,
        Span::raw(format!(" | {position} | dropped: {}", app.dropped_events())),
    ]);

    let paragraph =
        Paragraph::new(line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
