// Boundary between the IPC core and whatever surface renders it.
// The core only pushes text; the surface decides how to show it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;

/// Text shown on the status line before the first response arrives
pub const CONNECTING_TEXT: &str = "Connecting to backend...";

/// Presentation surface the core publishes to
pub trait StatusDisplay: Send + Sync + 'static {
    /// Replace the status line with a formatted summary or a failure phrase
    fn publish_status(&self, text: &str);

    /// Show why the initial connection failed, in place of the status line
    fn publish_connect_error(&self, message: &str);

    /// Whether the surface still exists. Once false it never becomes true again.
    fn is_live(&self) -> bool;
}

/// Events delivered to a channel-backed surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    Status(String),
    ConnectError(String),
}

/// Display that forwards everything to an event loop through a channel.
///
/// The surface is live while the receiving side exists and has not been
/// marked destroyed.
#[derive(Debug, Clone)]
pub struct ChannelDisplay {
    tx: mpsc::UnboundedSender<DisplayEvent>,
    destroyed: Arc<AtomicBool>,
}

impl ChannelDisplay {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DisplayEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let display = Self {
            tx,
            destroyed: Arc::new(AtomicBool::new(false)),
        };
        (display, rx)
    }

    pub fn mark_destroyed(&self) {
        self.destroyed.store(true, Ordering::SeqCst);
    }

    fn push(&self, event: DisplayEvent) {
        if self.is_live() {
            // A send error means the receiver just went away, which is_live reports next time
            let _ = self.tx.send(event);
        }
    }
}

impl StatusDisplay for ChannelDisplay {
    fn publish_status(&self, text: &str) {
        self.push(DisplayEvent::Status(text.to_string()));
    }

    fn publish_connect_error(&self, message: &str) {
        self.push(DisplayEvent::ConnectError(message.to_string()));
    }

    fn is_live(&self) -> bool {
        !self.destroyed.load(Ordering::SeqCst) && !self.tx.is_closed()
    }
}
