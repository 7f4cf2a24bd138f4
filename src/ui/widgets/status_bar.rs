use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::ui::app::{App, StatusTone};

fn tone_style(tone: StatusTone) -> Style {
    match tone {
        StatusTone::Pending => Style::default().fg(Color::DarkGray),
        StatusTone::Normal => Style::default().fg(Color::White),
        StatusTone::Degraded => Style::default().fg(Color::Yellow),
        StatusTone::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

/// Draw the live status line under the title
pub fn draw_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![Span::styled(
        app.status_line.as_str(),
        tone_style(app.status_tone),
    )]);
    let paragraph = Paragraph::new(vec![line]).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .title(Span::styled(
                "Hybrid Desktop",
                Style::default().add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(paragraph, area);
}

/// Draw launch feedback and key hints at the bottom of the screen
pub fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::raw(app.footer.as_str()),
        Span::styled(
            "   \u{2191}/\u{2193} select  Enter launch  r refresh  q quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(vec![line]), area);
}
