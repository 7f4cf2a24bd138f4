// Fixed identity and endpoint of the launcher frontend.
// Config can override the endpoint and timings for local setups.

use std::time::Duration;

/// Well-known local socket of the desktop backend
pub const BACKEND_SOCKET_PATH: &str = "/tmp/desktop-menu.sock";

/// Identifier sent in `hello` and as the `origin` of launch commands
pub const FRONTEND_ID: &str = "tui-frontend";

/// Seconds between periodic status requests
pub const STATUS_POLL_INTERVAL_SECS: u64 = 30;

/// Upper bound on a single status read
pub const RESPONSE_TIMEOUT_MS: u64 = 5_000;

/// Bytes requested per status read. Responses larger than this are not reassembled.
pub const RESPONSE_BUFFER_CAPACITY: usize = 1024;

pub const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(STATUS_POLL_INTERVAL_SECS);
pub const RESPONSE_TIMEOUT: Duration = Duration::from_millis(RESPONSE_TIMEOUT_MS);
