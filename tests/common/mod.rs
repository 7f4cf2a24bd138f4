#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use hybrid_desk::display::{DisplayEvent, StatusDisplay};
use hybrid_desk::ipc::{OutboundMessage, parse_request_line};
use hybrid_desk::session::SessionOptions;
use tempfile::TempDir;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;
use tokio::task::JoinHandle;

/// How the fake backend answers `get-status`
#[derive(Debug, Clone)]
pub enum Reply {
    /// Write this text back (include the trailing newline yourself)
    Text(&'static str),
    /// Never answer
    Silent,
    /// Ignore the first `get-status`, answer the rest with this text
    SilentOnce(&'static str),
    /// Close the connection instead of answering
    Hangup,
}

/// Unix socket backend that records every request line it receives
pub struct FakeBackend {
    pub path: PathBuf,
    _dir: TempDir,
    lines: Arc<Mutex<Vec<String>>>,
    task: JoinHandle<()>,
}

impl FakeBackend {
    pub fn start(reply: Reply) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("desktop-menu.sock");
        let listener = UnixListener::bind(&path).unwrap();
        let lines = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&lines);
        let task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let recorded = Arc::clone(&recorded);
                let reply = reply.clone();
                tokio::spawn(async move {
                    let (read, mut write) = stream.into_split();
                    let mut reader = BufReader::new(read).lines();
                    let mut status_requests = 0;
                    while let Ok(Some(line)) = reader.next_line().await {
                        let is_status = line.contains("\"get-status\"");
                        recorded.lock().unwrap().push(line);
                        if !is_status {
                            continue;
                        }
                        status_requests += 1;
                        let text = match &reply {
                            Reply::Text(text) => *text,
                            Reply::SilentOnce(text) if status_requests > 1 => *text,
                            Reply::Silent | Reply::SilentOnce(_) => continue,
                            Reply::Hangup => break,
                        };
                        if write.write_all(text.as_bytes()).await.is_err() {
                            break;
                        }
                    }
                });
            }
        });

        Self {
            path,
            _dir: dir,
            lines,
            task,
        }
    }

    /// A socket path inside a temp dir with nothing listening
    pub fn missing() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("desktop-menu.sock");
        (dir, path)
    }

    pub fn options(&self) -> SessionOptions {
        SessionOptions {
            endpoint: self.path.clone(),
            ..SessionOptions::default()
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.lines()
            .iter()
            .map(|line| parse_request_line(line).unwrap())
            .collect()
    }

    pub fn count(&self, kind: &str) -> usize {
        self.messages().iter().filter(|m| m.kind() == kind).count()
    }

    pub async fn wait_for_count(&self, kind: &str, count: usize) {
        wait_until(|| self.count(kind) >= count).await;
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Display that records everything and can be torn down from the test
#[derive(Default)]
pub struct RecordingDisplay {
    events: Mutex<Vec<DisplayEvent>>,
    gone: AtomicBool,
}

impl RecordingDisplay {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<DisplayEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                DisplayEvent::Status(text) => Some(text),
                DisplayEvent::ConnectError(_) => None,
            })
            .collect()
    }

    pub fn connect_errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                DisplayEvent::ConnectError(message) => Some(message),
                DisplayEvent::Status(_) => None,
            })
            .collect()
    }

    pub fn destroy(&self) {
        self.gone.store(true, Ordering::SeqCst);
    }

    pub async fn wait_for_statuses(&self, count: usize) {
        wait_until(|| self.statuses().len() >= count).await;
    }
}

impl StatusDisplay for RecordingDisplay {
    fn publish_status(&self, text: &str) {
        self.events
            .lock()
            .unwrap()
            .push(DisplayEvent::Status(text.to_string()));
    }

    fn publish_connect_error(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(DisplayEvent::ConnectError(message.to_string()));
    }

    fn is_live(&self) -> bool {
        !self.gone.load(Ordering::SeqCst)
    }
}

/// Poll `condition` until it holds, failing the test after two seconds
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not met within 2s"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Jump the paused clock forward, then let real I/O run again
pub async fn advance_clock(by: Duration) {
    tokio::time::pause();
    tokio::time::advance(by).await;
    tokio::time::resume();
    tokio::time::sleep(Duration::from_millis(50)).await;
}
