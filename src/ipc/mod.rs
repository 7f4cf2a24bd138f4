// IPC client core for the desktop backend
// One Unix socket connection, newline-delimited JSON in both directions

pub mod connection;
pub mod dispatcher;
pub mod error;
pub mod poller;
pub mod protocol;

pub use connection::{Connection, ConnectionManager, ConnectionState};
pub use dispatcher::{ActionDispatcher, DispatchOutcome};
pub use error::{ConnectError, DecodeError, IoError, Unavailable};
pub use poller::{PollerState, StatusPoller, StatusUpdate, fetch_status, refresh_once};
pub use protocol::{OutboundMessage, StatusSnapshot, decode, encode, parse_request_line};
