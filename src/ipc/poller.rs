use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::{Instant, MissedTickBehavior};

use super::connection::Connection;
use super::error::Unavailable;
use super::protocol::{OutboundMessage, StatusSnapshot, decode, encode};
use crate::constants::RESPONSE_BUFFER_CAPACITY;
use crate::display::StatusDisplay;

/// Where the poller is in its request cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    /// Armed, no request in flight
    Idle,
    /// A status request was sent and its response is pending
    Awaiting,
    /// Terminal. No further requests are issued.
    Stopped,
}

/// Result of one status cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusUpdate {
    Snapshot(StatusSnapshot),
    Unavailable(Unavailable),
}

impl StatusUpdate {
    pub fn display_text(&self) -> String {
        match self {
            StatusUpdate::Snapshot(snapshot) => snapshot.display_text(),
            StatusUpdate::Unavailable(reason) => reason.message().to_string(),
        }
    }
}

/// Send one `get-status` request and decode the single read that answers it
pub async fn fetch_status(connection: &Connection, wait: Duration) -> StatusUpdate {
    let request = encode(&OutboundMessage::GetStatus);

    let bytes = match connection
        .request(&request, RESPONSE_BUFFER_CAPACITY, wait)
        .await
    {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, "status request failed");
            return StatusUpdate::Unavailable(Unavailable::from(&err));
        }
    };

    match decode(&bytes) {
        Ok(snapshot) => StatusUpdate::Snapshot(snapshot),
        Err(err) => {
            tracing::warn!(error = %err, "could not decode status response");
            StatusUpdate::Unavailable(Unavailable::from(&err))
        }
    }
}

/// Run one status cycle and publish its outcome to the display
pub async fn refresh_once(
    connection: &Connection,
    display: &dyn StatusDisplay,
    wait: Duration,
) -> StatusUpdate {
    let update = fetch_status(connection, wait).await;
    if display.is_live() {
        display.publish_status(&update.display_text());
    }
    update
}

struct PollShared {
    connection: Arc<Connection>,
    display: Arc<dyn StatusDisplay>,
    state: watch::Sender<PollerState>,
    in_flight: AtomicUsize,
    response_timeout: Duration,
}

impl PollShared {
    fn is_stopped(&self) -> bool {
        *self.state.borrow() == PollerState::Stopped
    }

    fn stop(&self) {
        self.state.send_replace(PollerState::Stopped);
    }

    /// Move between Idle and Awaiting without ever leaving Stopped
    fn transition(&self, next: PollerState) {
        self.state.send_if_modified(|state| {
            if *state == PollerState::Stopped || *state == next {
                return false;
            }
            *state = next;
            true
        });
    }

    async fn cycle(&self) {
        if self.is_stopped() {
            return;
        }
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.transition(PollerState::Awaiting);
        let update = fetch_status(&self.connection, self.response_timeout).await;
        if !self.is_stopped() && self.display.is_live() {
            tracing::debug!(status = %update.display_text(), "status refreshed");
            self.display.publish_status(&update.display_text());
        }
        // Idle only once no other cycle is still waiting on its response
        if self.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.transition(PollerState::Idle);
        }
    }
}

/// Periodic status requests bound to the lifetime of a display surface.
///
/// Dropping the poller aborts its timer and any cycle in flight.
pub struct StatusPoller {
    shared: Arc<PollShared>,
    interval: Duration,
    tasks: JoinSet<()>,
    started: bool,
}

impl StatusPoller {
    pub fn new(
        connection: Arc<Connection>,
        display: Arc<dyn StatusDisplay>,
        interval: Duration,
        response_timeout: Duration,
    ) -> Self {
        Self {
            shared: Arc::new(PollShared {
                connection,
                display,
                state: watch::Sender::new(PollerState::Idle),
                in_flight: AtomicUsize::new(0),
                response_timeout,
            }),
            interval,
            tasks: JoinSet::new(),
            started: false,
        }
    }

    pub fn state(&self) -> PollerState {
        *self.shared.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<PollerState> {
        self.shared.state.subscribe()
    }

    /// Request status now, then again every interval while the display is live
    pub fn start(&mut self) {
        if self.started || self.shared.is_stopped() {
            return;
        }
        self.started = true;

        let shared = Arc::clone(&self.shared);
        let interval = self.interval;
        self.tasks.spawn(async move {
            shared.cycle().await;

            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if shared.is_stopped() {
                    break;
                }
                if !shared.display.is_live() {
                    tracing::debug!("status surface is gone, stopping poller");
                    shared.stop();
                    break;
                }
                shared.cycle().await;
            }
        });
    }

    /// One status cycle outside the schedule
    pub fn refresh_now(&mut self) {
        while self.tasks.try_join_next().is_some() {}
        if self.shared.is_stopped() {
            return;
        }
        let shared = Arc::clone(&self.shared);
        self.tasks.spawn(async move { shared.cycle().await });
    }

    /// Cancel the schedule permanently
    pub fn stop(&mut self) {
        self.shared.stop();
        self.tasks.abort_all();
    }
}

impl std::fmt::Debug for StatusPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusPoller")
            .field("state", &self.state())
            .field("interval", &self.interval)
            .field("tasks", &self.tasks.len())
            .finish()
    }
}
