use crate::catalog::{QUICK_ACTIONS, QuickAction};
use crate::display::{CONNECTING_TEXT, DisplayEvent};
use crate::ipc::{DispatchOutcome, Unavailable};
use super::click_regions::ClickRegions;

/// Default footer before any launch
pub const IDLE_FOOTER: &str = "Select an app to launch";

/// How the status line should be styled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// Waiting for the first response
    Pending,
    /// Live status from the backend
    Normal,
    /// A status cycle failed, the schedule keeps going
    Degraded,
    /// The backend could not be reached at all
    Error,
}

/// Application state for the launcher surface
pub struct App {
    /// Text of the status line
    pub status_line: String,
    pub status_tone: StatusTone,
    /// Index into the quick-action catalog
    pub selected: usize,
    /// Feedback line at the bottom
    pub footer: String,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Layout areas from the last draw, for mouse clicks
    pub regions: ClickRegions,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            status_line: CONNECTING_TEXT.to_string(),
            status_tone: StatusTone::Pending,
            selected: 0,
            footer: IDLE_FOOTER.to_string(),
            should_quit: false,
            regions: ClickRegions::new(),
        }
    }

    pub fn apply_display_event(&mut self, event: DisplayEvent) {
        match event {
            DisplayEvent::Status(text) => {
                self.status_tone = if Unavailable::from_message(&text).is_some() {
                    StatusTone::Degraded
                } else {
                    StatusTone::Normal
                };
                self.status_line = text;
            }
            DisplayEvent::ConnectError(message) => {
                self.status_tone = StatusTone::Error;
                self.status_line = message;
            }
        }
    }

    pub fn selected_action(&self) -> &'static QuickAction {
        &QUICK_ACTIONS[self.selected % QUICK_ACTIONS.len()]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % QUICK_ACTIONS.len();
    }

    pub fn select_previous(&mut self) {
        self.selected = (self.selected + QUICK_ACTIONS.len() - 1) % QUICK_ACTIONS.len();
    }

    pub fn select(&mut self, index: usize) {
        if index < QUICK_ACTIONS.len() {
            self.selected = index;
        }
    }

    /// Update the footer after a launch attempt. Dropped launches leave it alone.
    pub fn record_launch(&mut self, action: &QuickAction, outcome: DispatchOutcome) {
        if outcome == DispatchOutcome::Sent {
            self.footer = format!("{} is launching...", action.label);
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
