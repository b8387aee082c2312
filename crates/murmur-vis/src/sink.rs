//! Sink transports
//!
//! Events leave the process through an [`EventSink`]. The production sink
//! speaks newline-delimited JSON over a persistent TCP connection; tests
//! use [`MemorySink`] to assert on the stream and [`NullSink`] when events
//! are irrelevant. Emission is fire-and-forget: a broken sink degrades to
//! dropped events, never to a crashed actor.

use crate::event::VisEvent;
use murmur_core::{Error, Result, SINK_EVENT_SIZE_BYTES_MAX};
use std::sync::Mutex;
use tokio::io::AsyncWriteExt;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Destination for visualizer events
pub trait EventSink: Send + Sync + std::fmt::Debug {
    /// Hand off one event; must not block and must not fail the caller
    fn emit(&self, event: VisEvent);
}

/// Newline-delimited JSON over TCP
///
/// All writes go through a single writer task fed by a channel, so the
/// order on the wire equals the order of `emit` calls.
#[derive(Debug)]
pub struct TcpSink {
    tx: mpsc::UnboundedSender<VisEvent>,
}

impl TcpSink {
    /// Connect to the visualizer endpoint and start the writer task
    pub async fn connect(endpoint: &str) -> Result<Self> {
        let stream = TcpStream::connect(endpoint)
            .await
            .map_err(|e| Error::SinkConnectFailed {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;
        let (_, writer) = stream.into_split();
        let (tx, rx) = mpsc::unbounded_channel();
        info!(endpoint, "Event sink connected");
        tokio::spawn(writer_task(writer, rx));
        Ok(Self { tx })
    }
}

impl EventSink for TcpSink {
    fn emit(&self, event: VisEvent) {
        if self.tx.send(event).is_err() {
            debug!("Event dropped, sink writer has shut down");
        }
    }
}

/// Drains the channel onto the socket until either side goes away.
async fn writer_task(mut writer: OwnedWriteHalf, mut rx: mpsc::UnboundedReceiver<VisEvent>) {
    while let Some(event) = rx.recv().await {
        let mut line = match serde_json::to_vec(&event) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "Skipping unserializable event");
                continue;
            }
        };
        if line.len() > SINK_EVENT_SIZE_BYTES_MAX {
            warn!(
                size = line.len(),
                limit = SINK_EVENT_SIZE_BYTES_MAX,
                kind = event.kind(),
                "Skipping oversized event"
            );
            continue;
        }
        line.push(b'\n');
        if let Err(e) = writer.write_all(&line).await {
            warn!(error = %e, "Sink connection lost, stopping writer");
            break;
        }
    }
}

/// Captures events in memory for assertions
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<VisEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far, in emission order
    pub fn events(&self) -> Vec<VisEvent> {
        self.lock().clone()
    }

    /// Drain and return the captured events
    pub fn take(&self) -> Vec<VisEvent> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<VisEvent>> {
        match self.events.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: VisEvent) {
        self.lock().push(event);
    }
}

/// Discards everything
#[derive(Debug, Default)]
pub struct NullSink;

impl NullSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for NullSink {
    fn emit(&self, _event: VisEvent) {}
}
