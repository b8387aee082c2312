//! Chat protocol messages
//!
//! Three closed sum types, one per actor role. Every variant carries the
//! sender's key so each delivery can be attributed on the visualizer's
//! message edges; the key travels with the message because the mailbox
//! itself is sender-anonymous.

use murmur_core::ActorId;
use murmur_runtime::ActorRef;
use murmur_vis::Attributed;

/// Messages understood by the chat room
#[derive(Debug, Clone)]
pub enum RoomCommand {
    /// Request to join under `screen_name`; answered on `reply_to`
    GetSession {
        key: ActorId,
        screen_name: String,
        reply_to: ActorRef<SessionEvent>,
    },
    /// A session asks the room to broadcast a message
    PublishSessionMessage {
        key: ActorId,
        screen_name: String,
        message: String,
    },
    /// Periodic self-tick to report membership
    SyncState { key: ActorId },
}

impl Attributed for RoomCommand {
    fn sender_key(&self) -> ActorId {
        match self {
            RoomCommand::GetSession { key, .. }
            | RoomCommand::PublishSessionMessage { key, .. }
            | RoomCommand::SyncState { key } => *key,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            RoomCommand::GetSession { .. } => "GetSession",
            RoomCommand::PublishSessionMessage { .. } => "PublishSessionMessage",
            RoomCommand::SyncState { .. } => "SyncState",
        }
    }
}

/// Events delivered to a chat client
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Join succeeded; post through `handle` from now on
    SessionGranted {
        key: ActorId,
        handle: ActorRef<SessionCommand>,
    },
    /// Join refused
    SessionDenied { key: ActorId, reason: String },
    /// Someone posted to the room
    MessagePosted {
        key: ActorId,
        screen_name: String,
        message: String,
    },
    /// Periodic self-tick to post demo traffic
    PostTick { key: ActorId },
    /// Periodic self-tick to report state
    SyncState { key: ActorId },
}

impl Attributed for SessionEvent {
    fn sender_key(&self) -> ActorId {
        match self {
            SessionEvent::SessionGranted { key, .. }
            | SessionEvent::SessionDenied { key, .. }
            | SessionEvent::MessagePosted { key, .. }
            | SessionEvent::PostTick { key }
            | SessionEvent::SyncState { key } => *key,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SessionEvent::SessionGranted { .. } => "SessionGranted",
            SessionEvent::SessionDenied { .. } => "SessionDenied",
            SessionEvent::MessagePosted { .. } => "MessagePosted",
            SessionEvent::PostTick { .. } => "PostTick",
            SessionEvent::SyncState { .. } => "SyncState",
        }
    }
}

/// A message accepted by the room, ready to fan out
#[derive(Debug, Clone)]
pub struct Posted {
    pub screen_name: String,
    pub message: String,
}

/// Messages understood by a session
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// The client posts a message into the room
    PostMessage { key: ActorId, message: String },
    /// The room fans a posted message out to this session's client
    NotifyClient { key: ActorId, posted: Posted },
    /// Periodic self-tick to report state
    SyncState { key: ActorId },
}

impl Attributed for SessionCommand {
    fn sender_key(&self) -> ActorId {
        match self {
            SessionCommand::PostMessage { key, .. }
            | SessionCommand::NotifyClient { key, .. }
            | SessionCommand::SyncState { key } => *key,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SessionCommand::PostMessage { .. } => "PostMessage",
            SessionCommand::NotifyClient { .. } => "NotifyClient",
            SessionCommand::SyncState { .. } => "SyncState",
        }
    }
}
