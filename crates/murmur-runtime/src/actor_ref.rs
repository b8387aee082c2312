//! Actor references
//!
//! An [`ActorRef`] is the only way to reach an actor: an identifier plus the
//! capability to enqueue into its mailbox. Refs are cheap to clone, grant no
//! access to actor state, and may outlive the actor they point at — sending
//! to a stopped actor is a documented no-op, mirroring fire-and-forget
//! messaging.

use crate::mailbox::{Envelope, MailboxSender};
use murmur_core::ActorId;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Handle for sending messages to an actor
pub struct ActorRef<M> {
    id: ActorId,
    name: Arc<str>,
    tx: MailboxSender<M>,
}

impl<M> Clone for ActorRef<M> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            tx: self.tx.clone(),
        }
    }
}

impl<M> PartialEq for ActorRef<M> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<M> Eq for ActorRef<M> {}

impl<M> fmt::Debug for ActorRef<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorRef")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

impl<M: Send + 'static> ActorRef<M> {
    pub(crate) fn new(id: ActorId, name: Arc<str>, tx: MailboxSender<M>) -> Self {
        Self { id, name, tx }
    }

    /// Enqueue a message; never blocks
    ///
    /// If the actor has terminated, the message is silently dropped.
    pub fn tell(&self, msg: M) {
        if self.tx.send(Envelope::User(msg)).is_err() {
            trace!(target = %self.name, "Dropping message to terminated actor");
        }
    }

    /// The actor's stable identifier
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// The actor's registered display name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn sender(&self) -> MailboxSender<M> {
        self.tx.clone()
    }
}
