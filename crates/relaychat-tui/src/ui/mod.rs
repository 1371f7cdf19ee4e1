//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! drawing into the frame.
//!
//! Layout, top to bottom: activity chips, transcript beside the members
//! pane, input line, status bar.

mod activity;
mod chat;
mod input;
mod members;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};
use relaychat_core::Environment;

use crate::App;

/// Render the entire UI.
pub fn render<E: Environment>(frame: &mut Frame, app: &App<E>) {
    const ACTIVITY_HEIGHT: u16 = 1;
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(ACTIVITY_HEIGHT),
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [activity_area, main_area, input_area, status_area] = chunks.as_ref() else {
        return;
    };

    activity::render(frame, app, *activity_area);
    render_main_area(frame, app, *main_area);
    input::render(frame, app.input(), *input_area);
    status::render(frame, app, *status_area);
}

/// Render the main area (transcript + members pane).
fn render_main_area<E: Environment>(frame: &mut Frame, app: &App<E>, area: Rect) {
    const CHAT_AREA_MIN_WIDTH: u16 = 20;
    const MEMBERS_WIDTH: u16 = 16;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(CHAT_AREA_MIN_WIDTH), Constraint::Length(MEMBERS_WIDTH)])
        .split(area);

    let [chat_area, members_area] = chunks.as_ref() else {
        return;
    };

    chat::render(frame, app, *chat_area);
    members::render(frame, app, *members_area);
}
