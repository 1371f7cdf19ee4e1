//! Input line
//!
//! Displays the focused buffer's input line with cursor, or a placeholder
//! when it is empty or no buffer is open.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use relaychat_app::InputLine;

const PROMPT: &str = "> ";
const PLACEHOLDER: &str = "type here...";
const PROMPT_WIDTH: u16 = 3; // border + "> "
const INPUT_LINE_OFFSET_Y: u16 = 1; // inside top border
const RIGHT_PADDING: u16 = 1; // inside right border

/// Render the input line.
pub fn render(frame: &mut Frame, input: Option<&InputLine>, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let (text, cursor) = input.map_or(("", 0), |input| (input.text(), input.cursor()));

    let line = if text.is_empty() {
        Line::from(vec![
            Span::raw(PROMPT),
            Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![Span::raw(PROMPT), Span::raw(text.to_string())])
    };
    let paragraph = Paragraph::new(line).style(Style::default().fg(Color::White)).block(block);

    frame.render_widget(paragraph, area);

    let available_width = area.width.saturating_sub(PROMPT_WIDTH + RIGHT_PADDING);
    let cursor_offset = (cursor as u16).min(available_width);

    let cursor_x = area.x.saturating_add(PROMPT_WIDTH).saturating_add(cursor_offset);
    let cursor_y = area.y.saturating_add(INPUT_LINE_OFFSET_Y);
    let max_x = area.x.saturating_add(area.width).saturating_sub(RIGHT_PADDING);
    let cursor_x = cursor_x.min(max_x);

    frame.set_cursor_position((cursor_x, cursor_y));
}
