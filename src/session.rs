// Session: the explicit context object that ties one presentation surface
// to one backend connection, its poller and its dispatcher.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::constants::{
    BACKEND_SOCKET_PATH, FRONTEND_ID, RESPONSE_TIMEOUT, STATUS_POLL_INTERVAL,
};
use crate::display::StatusDisplay;
use crate::ipc::{
    ActionDispatcher, ConnectionManager, DispatchOutcome, OutboundMessage, PollerState,
    StatusPoller, encode,
};

/// Everything a session needs to know about its backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub endpoint: PathBuf,
    pub client_id: String,
    pub poll_interval: Duration,
    pub response_timeout: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            endpoint: PathBuf::from(BACKEND_SOCKET_PATH),
            client_id: FRONTEND_ID.to_string(),
            poll_interval: STATUS_POLL_INTERVAL,
            response_timeout: RESPONSE_TIMEOUT,
        }
    }
}

pub struct Session {
    manager: ConnectionManager,
    display: Arc<dyn StatusDisplay>,
    poller: Option<StatusPoller>,
    dispatcher: Option<ActionDispatcher>,
    destroyed: bool,
}

impl Session {
    /// Connect to the backend and start polling for the given surface.
    ///
    /// A failed connection is reported once through `publish_connect_error`;
    /// the session then stays inert (no poller, launches are dropped).
    pub async fn activate(options: SessionOptions, display: Arc<dyn StatusDisplay>) -> Self {
        let mut manager = ConnectionManager::new(options.endpoint.clone());

        let connection = match manager.connect().await {
            Ok(connection) => connection,
            Err(err) => {
                tracing::error!(
                    endpoint = %options.endpoint.display(),
                    error = %err.source,
                    "backend unreachable"
                );
                display.publish_connect_error(&err.to_string());
                return Self {
                    manager,
                    display,
                    poller: None,
                    dispatcher: None,
                    destroyed: false,
                };
            }
        };

        let hello = encode(&OutboundMessage::hello(options.client_id.as_str()));
        if let Err(err) = connection.send(&hello).await {
            tracing::warn!(error = %err, "hello was not delivered");
        }

        let dispatcher = ActionDispatcher::new(Arc::clone(&connection), options.client_id);
        let mut poller = StatusPoller::new(
            connection,
            Arc::clone(&display),
            options.poll_interval,
            options.response_timeout,
        );
        poller.start();

        Self {
            manager,
            display,
            poller: Some(poller),
            dispatcher: Some(dispatcher),
            destroyed: false,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.manager
            .current()
            .is_some_and(|connection| connection.is_connected())
    }

    pub fn poller_state(&self) -> Option<PollerState> {
        self.poller.as_ref().map(StatusPoller::state)
    }

    pub fn display(&self) -> &Arc<dyn StatusDisplay> {
        &self.display
    }

    /// Status refresh on demand, outside the schedule
    pub fn refresh(&mut self) {
        if let Some(poller) = self.poller.as_mut() {
            poller.refresh_now();
        }
    }

    /// Forward a quick-action click to the backend
    pub async fn on_action_selected(&self, action_id: Option<&str>) -> DispatchOutcome {
        match &self.dispatcher {
            Some(dispatcher) => dispatcher.dispatch(action_id).await,
            None if action_id.is_some_and(|id| !id.is_empty()) => DispatchOutcome::Dropped,
            None => DispatchOutcome::Skipped,
        }
    }

    /// Tear down the schedule and the connection. Later calls do nothing.
    pub async fn on_surface_destroyed(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        if let Some(poller) = self.poller.as_mut() {
            poller.stop();
        }
        self.dispatcher = None;
        self.manager.close().await;
        tracing::debug!("session torn down");
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("endpoint", &self.manager.endpoint())
            .field("connected", &self.is_connected())
            .field("poller", &self.poller_state())
            .field("destroyed", &self.destroyed)
            .finish()
    }
}
