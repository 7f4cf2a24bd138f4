use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::ui::App;

/// What the event loop should do after an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    None,
    Quit,
    /// Launch the quick action with this id
    Launch(&'static str),
    /// Request status outside the schedule
    Refresh,
}

pub struct EventHandler<'a> {
    app: &'a mut App,
}

impl<'a> EventHandler<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> UiCommand {
        if key.kind != KeyEventKind::Press {
            return UiCommand::None;
        }

        match key.code {
            // In raw mode, Ctrl+C arrives as a key event, not a signal
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.app.quit();
                UiCommand::Quit
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.app.quit();
                UiCommand::Quit
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.app.select_previous();
                UiCommand::None
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.app.select_next();
                UiCommand::None
            }
            KeyCode::Char(digit @ '1'..='9') => {
                let index = (digit as usize) - ('1' as usize);
                self.app.select(index);
                UiCommand::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => UiCommand::Launch(self.app.selected_action().id),
            KeyCode::Char('r') => UiCommand::Refresh,
            _ => UiCommand::None,
        }
    }

    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) -> UiCommand {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match self.app.regions.action_at(mouse.column, mouse.row) {
                    Some(index) => {
                        self.app.select(index);
                        UiCommand::Launch(self.app.selected_action().id)
                    }
                    None => UiCommand::None,
                }
            }
            MouseEventKind::ScrollUp => {
                self.app.select_previous();
                UiCommand::None
            }
            MouseEventKind::ScrollDown => {
                self.app.select_next();
                UiCommand::None
            }
            _ => UiCommand::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn enter_launches_selection() {
        let mut app = App::new();
        let mut handler = EventHandler::new(&mut app);
        assert_eq!(handler.handle_key_event(press(KeyCode::Down)), UiCommand::None);
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Enter)),
            UiCommand::Launch("files")
        );
    }

    #[test]
    fn digits_select_directly() {
        let mut app = App::new();
        let mut handler = EventHandler::new(&mut app);
        handler.handle_key_event(press(KeyCode::Char('4')));
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char(' '))),
            UiCommand::Launch("mail")
        );
    }

    #[test]
    fn quit_keys() {
        let mut app = App::new();
        assert_eq!(
            EventHandler::new(&mut app).handle_key_event(press(KeyCode::Char('q'))),
            UiCommand::Quit
        );
        assert!(app.should_quit);

        let mut app = App::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(EventHandler::new(&mut app).handle_key_event(ctrl_c), UiCommand::Quit);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = App::new();
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(EventHandler::new(&mut app).handle_key_event(release), UiCommand::None);
    }

    #[test]
    fn r_requests_refresh() {
        let mut app = App::new();
        assert_eq!(
            EventHandler::new(&mut app).handle_key_event(press(KeyCode::Char('r'))),
            UiCommand::Refresh
        );
    }

    #[test]
    fn clicking_a_row_launches_it() {
        let mut app = App::new();
        app.regions.action_regions = vec![
            (0, Rect::new(0, 3, 40, 1)),
            (1, Rect::new(0, 4, 40, 1)),
            (2, Rect::new(0, 5, 40, 1)),
        ];

        let mut handler = EventHandler::new(&mut app);
        assert_eq!(handler.handle_mouse_event(click(5, 5)), UiCommand::Launch("music"));
        assert_eq!(handler.handle_mouse_event(click(5, 0)), UiCommand::None);
        assert_eq!(app.selected, 2);
    }
}
