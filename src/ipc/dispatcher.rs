use std::sync::Arc;

use super::connection::Connection;
use super::protocol::{OutboundMessage, encode};

/// What happened to a launch request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Written to the backend. No acknowledgment is expected.
    Sent,
    /// No action id was given, nothing was sent
    Skipped,
    /// The connection is gone or the write failed
    Dropped,
}

/// Turns quick-action selections into fire-and-forget `launch-app` commands
#[derive(Debug, Clone)]
pub struct ActionDispatcher {
    connection: Arc<Connection>,
    origin: String,
}

impl ActionDispatcher {
    pub fn new(connection: Arc<Connection>, origin: impl Into<String>) -> Self {
        Self {
            connection,
            origin: origin.into(),
        }
    }

    pub async fn dispatch(&self, action_id: Option<&str>) -> DispatchOutcome {
        let Some(app_id) = action_id.filter(|id| !id.is_empty()) else {
            return DispatchOutcome::Skipped;
        };

        let message = OutboundMessage::launch_app(app_id, self.origin.as_str());
        match self.connection.send(&encode(&message)).await {
            Ok(()) => {
                tracing::info!(app_id, "requested launch");
                DispatchOutcome::Sent
            }
            Err(err) => {
                tracing::warn!(app_id, error = %err, "launch request dropped");
                DispatchOutcome::Dropped
            }
        }
    }
}
