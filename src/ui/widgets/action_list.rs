use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::catalog::QUICK_ACTIONS;
use crate::ui::app::App;

/// Draw one row per quick action, highlighting the selection
pub fn draw_action_list(f: &mut Frame, area: Rect, app: &mut App) {
    app.regions.action_regions.clear();

    let label_width = QUICK_ACTIONS.iter().map(|a| a.label.len()).max().unwrap_or(0);
    let mut lines = Vec::with_capacity(QUICK_ACTIONS.len());

    for (index, action) in QUICK_ACTIONS.iter().enumerate() {
        let row = area.y + index as u16;
        if row >= area.y + area.height {
            break;
        }
        app.regions
            .action_regions
            .push((index, Rect::new(area.x, row, area.width, 1)));

        let selected = index == app.selected;
        let marker = if selected { "> " } else { "  " };
        let label_style = if selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::raw(format!("{} ", action.icon)),
            Span::styled(format!("{:<label_width$}", action.label), label_style),
            Span::styled(
                format!("  {:<13}", action.category),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(action.description, Style::default().fg(Color::Gray)),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}
