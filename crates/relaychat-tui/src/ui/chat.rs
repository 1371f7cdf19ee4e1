//! Transcript area
//!
//! Displays the focused buffer's transcript under a header naming the
//! channel. Always scrolled to the newest line.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use relaychat_app::App;
use relaychat_core::{Environment, TranscriptLine};

const BORDER_SIZE: u16 = 2;

/// Render the transcript area.
pub fn render<E: Environment>(frame: &mut Frame, app: &App<E>, area: Rect) {
    let focused = app.focused_buffer();

    let title = focused.map_or_else(|| " no buffer ".to_string(), |b| format!(" {} ", b.name()));
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)));

    let items: Vec<ListItem> = focused.map_or_else(
        || {
            vec![ListItem::new(Line::from(Span::styled(
                "waiting for channels...",
                Style::default().fg(Color::DarkGray),
            )))]
        },
        |buffer| buffer.transcript().iter().map(transcript_item).collect(),
    );

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = items.len().saturating_sub(visible_height);
    let visible_items: Vec<_> = items.into_iter().skip(skip).collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

fn transcript_item(line: &TranscriptLine) -> ListItem<'static> {
    match line {
        TranscriptLine::Message { from, text } => ListItem::new(Line::from(vec![
            Span::styled(
                format!("<{from}>"),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::raw(text.clone()),
        ])),
        TranscriptLine::Join { .. } | TranscriptLine::Part { .. } => ListItem::new(Line::from(
            Span::styled(line.to_string(), Style::default().fg(Color::DarkGray)),
        )),
    }
}
