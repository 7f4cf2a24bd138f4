use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use super::app::App;
use super::widgets::{draw_action_list, draw_footer, draw_status_bar};

/// Draw the UI to the terminal
pub fn draw(f: &mut Frame, app: &mut App) {
    // Status line, quick actions, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title + status + border
            Constraint::Min(0),    // Quick actions
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    draw_status_bar(f, chunks[0], app);
    draw_action_list(f, chunks[1], app);
    draw_footer(f, chunks[2], app);
}
