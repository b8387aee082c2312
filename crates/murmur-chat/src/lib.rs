//! Murmur Chat
//!
//! An observable chat service on the Murmur actor runtime. A room admits
//! clients under unique screen names, hands each one a session actor, and
//! fans posted messages out to every member; every spawn, termination,
//! delivery, and state snapshot streams to an external visualizer.
//!
//! # Topology
//!
//! ```text
//! guardian
//!   +-- chatroom -- session-client-1 ... session-client-N
//!   +-- client-1 ... client-N
//! ```
//!
//! Clients talk to the room only through their granted session; the room
//! reaches clients only through the same session. Sessions watch both
//! peers and disappear with either, and the room prunes terminated
//! sessions from its fan-out list.

pub mod client;
pub mod config;
pub mod guardian;
pub mod protocol;
pub mod room;
pub mod session;

pub use client::Client;
pub use config::{ChatConfig, ClientsConfig, RoomConfig, VisualizerConfig};
pub use guardian::{Guardian, GuardianCommand};
pub use protocol::{Posted, RoomCommand, SessionCommand, SessionEvent};
pub use room::ChatRoom;
pub use session::Session;
