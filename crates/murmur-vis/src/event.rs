//! Wire events
//!
//! The visualizer consumes a flat stream of JSON objects tagged by an
//! `event` field. Four event kinds exist: node creation, node removal, a
//! message delivery edge, and a state snapshot. `time` is wall-clock
//! milliseconds, non-decreasing per process.

use serde::{Deserialize, Serialize};

/// One visualizer event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum VisEvent {
    /// A node appeared
    Spawn { name: String, time: u64 },
    /// A node went away
    DestroyNode { name: String, time: u64 },
    /// A message was delivered from one node to another
    Receive {
        label: String,
        from: String,
        to: String,
        time: u64,
    },
    /// A node reported a state snapshot
    SetState { time: u64, state: serde_json::Value },
}

impl VisEvent {
    /// The wire tag this event serializes under
    pub fn kind(&self) -> &'static str {
        match self {
            VisEvent::Spawn { .. } => "spawn",
            VisEvent::DestroyNode { .. } => "destroyNode",
            VisEvent::Receive { .. } => "receive",
            VisEvent::SetState { .. } => "setState",
        }
    }
}
