use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The backend could not be reached when the surface was activated.
///
/// Fatal to the session: no poller is armed and no commands are dispatched.
#[derive(Debug, Error)]
#[error("Unable to reach backend: {source}")]
pub struct ConnectError {
    pub endpoint: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Mid-session transport failure. Recoverable: surfaced as a degraded status line.
#[derive(Debug, Error)]
pub enum IoError {
    /// The connection never came up or has already been torn down
    #[error("no stream available")]
    NotConnected,
    /// The peer shut down its end (zero-length read)
    #[error("connection closed by backend")]
    Closed,
    /// The bounded read elapsed without any bytes
    #[error("timed out waiting for backend")]
    TimedOut,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A backend response or request line that could not be interpreted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("unknown message type: {0}")]
    UnknownType(String),
}

/// Reason a status cycle produced no snapshot, rendered as the short
/// phrase that replaces the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailable {
    NoStream,
    ConnectionClosed,
    InvalidResponse,
    NoResponse,
}

impl Unavailable {
    pub const ALL: [Unavailable; 4] = [
        Unavailable::NoStream,
        Unavailable::ConnectionClosed,
        Unavailable::InvalidResponse,
        Unavailable::NoResponse,
    ];

    /// Recognize a published failure phrase
    pub fn from_message(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|reason| reason.message() == text)
    }

    pub fn message(self) -> &'static str {
        match self {
            Unavailable::NoStream => "No IPC stream available",
            Unavailable::ConnectionClosed => "IPC connection closed",
            Unavailable::InvalidResponse => "Invalid response from backend",
            Unavailable::NoResponse => "Backend did not respond",
        }
    }
}

impl std::fmt::Display for Unavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<&IoError> for Unavailable {
    fn from(err: &IoError) -> Self {
        match err {
            IoError::NotConnected => Unavailable::NoStream,
            IoError::Closed | IoError::Io(_) => Unavailable::ConnectionClosed,
            IoError::TimedOut => Unavailable::NoResponse,
        }
    }
}

impl From<&DecodeError> for Unavailable {
    fn from(_: &DecodeError) -> Self {
        Unavailable::InvalidResponse
    }
}
