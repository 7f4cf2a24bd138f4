use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tokio::net::unix::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::{Mutex, watch};

use super::error::{ConnectError, IoError};

/// Lifecycle of the single backend connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
    Closed,
}

/// One stream-socket channel to the backend.
///
/// Each half sits behind its own FIFO mutex: writes never interleave, and a
/// request holds the read half until its response arrives. Closing wakes any
/// read in flight so teardown never waits on the backend.
#[derive(Debug)]
pub struct Connection {
    endpoint: PathBuf,
    state: watch::Sender<ConnectionState>,
    reader: Mutex<Option<OwnedReadHalf>>,
    writer: Mutex<Option<OwnedWriteHalf>>,
}

impl Connection {
    /// Connect to the backend socket at `endpoint`
    pub async fn open(endpoint: impl AsRef<Path>) -> Result<Self, ConnectError> {
        let endpoint = endpoint.as_ref().to_path_buf();
        let stream = UnixStream::connect(&endpoint)
            .await
            .map_err(|source| ConnectError {
                endpoint: endpoint.clone(),
                source,
            })?;
        let (reader, writer) = stream.into_split();

        tracing::info!(endpoint = %endpoint.display(), "connected to backend");

        Ok(Self {
            endpoint,
            state: watch::Sender::new(ConnectionState::Connected),
            reader: Mutex::new(Some(reader)),
            writer: Mutex::new(Some(writer)),
        })
    }

    /// A connection that was never established. Every operation on it
    /// reports `NotConnected`; closing it is allowed.
    pub fn disconnected(endpoint: impl AsRef<Path>) -> Self {
        Self {
            endpoint: endpoint.as_ref().to_path_buf(),
            state: watch::Sender::new(ConnectionState::Disconnected),
            reader: Mutex::new(None),
            writer: Mutex::new(None),
        }
    }

    pub fn endpoint(&self) -> &Path {
        &self.endpoint
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Write one whole message and flush it
    pub async fn send(&self, bytes: &[u8]) -> Result<(), IoError> {
        let mut writer = self.writer.lock().await;
        if !self.is_connected() {
            writer.take();
            return Err(IoError::NotConnected);
        }
        let Some(stream) = writer.as_mut() else {
            return Err(IoError::NotConnected);
        };

        let result = match stream.write_all(bytes).await {
            Ok(()) => stream.flush().await,
            Err(err) => Err(err),
        };

        if let Err(err) = result {
            writer.take();
            self.mark_lost("write failed");
            return Err(IoError::Io(err));
        }
        Ok(())
    }

    /// Perform a single read of at most `capacity` bytes.
    ///
    /// A zero-length read means the backend shut down and yields
    /// `IoError::Closed`, never an empty payload.
    pub async fn receive(&self, capacity: usize) -> Result<Vec<u8>, IoError> {
        let mut reader = self.reader.lock().await;
        self.read_locked(&mut reader, capacity, None).await
    }

    /// Send `bytes` and read one response while holding the read half, so
    /// overlapping requests cannot take each other's answers.
    ///
    /// Anything already buffered before the send belongs to an earlier
    /// request that gave up waiting, or was never asked for, and is dropped.
    pub async fn request(
        &self,
        bytes: &[u8],
        capacity: usize,
        wait: Duration,
    ) -> Result<Vec<u8>, IoError> {
        let mut reader = self.reader.lock().await;
        if self.is_connected() {
            self.discard_pending(&mut reader)?;
        }
        self.send(bytes).await?;
        self.read_locked(&mut reader, capacity, Some(wait)).await
    }

    fn discard_pending(&self, reader: &mut Option<OwnedReadHalf>) -> Result<(), IoError> {
        let Some(stream) = reader.as_mut() else {
            return Ok(());
        };

        let mut scratch = [0u8; 1024];
        let (err, reason) = loop {
            match stream.try_read(&mut scratch) {
                Ok(0) => break (IoError::Closed, "backend closed the connection"),
                Ok(n) => tracing::debug!(bytes = n, "discarded stale backend output"),
                Err(err) if err.kind() == io::ErrorKind::WouldBlock => return Ok(()),
                Err(err) => break (IoError::Io(err), "read failed"),
            }
        };

        reader.take();
        self.mark_lost(reason);
        Err(err)
    }

    async fn read_locked(
        &self,
        reader: &mut Option<OwnedReadHalf>,
        capacity: usize,
        wait: Option<Duration>,
    ) -> Result<Vec<u8>, IoError> {
        if !self.is_connected() {
            reader.take();
            return Err(IoError::NotConnected);
        }
        let Some(stream) = reader.as_mut() else {
            return Err(IoError::NotConnected);
        };

        let mut buf = vec![0u8; capacity];
        let mut closing = self.state.subscribe();
        let read = async {
            match wait {
                Some(wait) => match tokio::time::timeout(wait, stream.read(&mut buf)).await {
                    Ok(read) => read.map_err(IoError::Io),
                    Err(_) => Err(IoError::TimedOut),
                },
                None => stream.read(&mut buf).await.map_err(IoError::Io),
            }
        };

        let outcome = tokio::select! {
            outcome = read => outcome,
            _ = closing.wait_for(|state| *state != ConnectionState::Connected) => {
                Err(IoError::NotConnected)
            }
        };

        match outcome {
            Ok(0) => {
                reader.take();
                self.mark_lost("backend closed the connection");
                Err(IoError::Closed)
            }
            Ok(n) => {
                buf.truncate(n);
                Ok(buf)
            }
            Err(IoError::Io(err)) => {
                reader.take();
                self.mark_lost("read failed");
                Err(IoError::Io(err))
            }
            Err(IoError::NotConnected) => {
                reader.take();
                Err(IoError::NotConnected)
            }
            Err(other) => Err(other),
        }
    }

    /// Tear the connection down. Safe to call repeatedly and on a
    /// connection that never came up.
    pub async fn close(&self) {
        let previous = self.state.send_replace(ConnectionState::Closed);

        // The write half goes first so the backend sees EOF before the read half drops
        if let Some(mut writer) = self.writer.lock().await.take() {
            let _ = writer.shutdown().await;
        }
        self.reader.lock().await.take();

        if previous != ConnectionState::Closed {
            tracing::info!(endpoint = %self.endpoint.display(), "connection closed");
        }
    }

    fn mark_lost(&self, reason: &str) {
        let previous = self.state.send_replace(ConnectionState::Closed);
        if previous == ConnectionState::Connected {
            tracing::warn!(endpoint = %self.endpoint.display(), reason, "connection lost");
        }
    }
}

/// Owns the single live connection to the backend endpoint
#[derive(Debug)]
pub struct ConnectionManager {
    endpoint: PathBuf,
    current: Option<Arc<Connection>>,
}

impl ConnectionManager {
    pub fn new(endpoint: impl Into<PathBuf>) -> Self {
        Self {
            endpoint: endpoint.into(),
            current: None,
        }
    }

    pub fn endpoint(&self) -> &Path {
        &self.endpoint
    }

    /// Connect, tearing down any prior connection first
    pub async fn connect(&mut self) -> Result<Arc<Connection>, ConnectError> {
        self.close().await;
        let connection = Arc::new(Connection::open(&self.endpoint).await?);
        self.current = Some(Arc::clone(&connection));
        Ok(connection)
    }

    pub fn current(&self) -> Option<&Arc<Connection>> {
        self.current.as_ref()
    }

    pub async fn close(&mut self) {
        if let Some(connection) = self.current.take() {
            connection.close().await;
        }
    }
}
