//! Per-actor execution context
//!
//! The context is handed exclusively to the actor's own handlers; it is the
//! actor's capability to spawn children, watch collaborators, and manage
//! its timers. It never leaves the actor's task.

use crate::actor::Actor;
use crate::actor_ref::ActorRef;
use crate::system::ActorSystem;
use crate::timer::Timers;
use murmur_core::{ActorId, Result};
use std::time::Duration;

/// Execution context for one actor
pub struct Context<M: Send + 'static> {
    system: ActorSystem,
    self_ref: ActorRef<M>,
    timers: Timers,
}

impl<M: Send + 'static> Context<M> {
    pub(crate) fn new(system: ActorSystem, self_ref: ActorRef<M>) -> Self {
        Self {
            system,
            self_ref,
            timers: Timers::new(),
        }
    }

    /// The actor system this actor runs in
    pub fn system(&self) -> &ActorSystem {
        &self.system
    }

    /// A ref to this actor itself
    pub fn self_ref(&self) -> &ActorRef<M> {
        &self.self_ref
    }

    /// This actor's identity
    pub fn self_id(&self) -> ActorId {
        self.self_ref.id()
    }

    /// This actor's registered name
    pub fn self_name(&self) -> &str {
        self.self_ref.name()
    }

    /// Spawn a child actor, parented to this one
    ///
    /// The returned ref is usable immediately, within the current message
    /// step. The child is stopped automatically when this actor stops.
    pub fn spawn<A: Actor>(&self, name: &str, actor: A) -> Result<ActorRef<A::Msg>> {
        self.system.spawn_child(Some(self.self_id()), name, actor)
    }

    /// Subscribe to `target`'s termination
    ///
    /// Delivered later as [`Signal::Terminated`](crate::Signal) through this
    /// actor's ordinary mailbox. Watching an already-terminated actor
    /// delivers the signal immediately.
    pub fn watch<T: Send + 'static>(&self, target: &ActorRef<T>) {
        self.system.watch(self.self_id(), target.id());
    }

    /// Start (or replace) a fixed-delay timer under `key`
    ///
    /// A clone of `msg` is enqueued to this actor every `period` until the
    /// key is cancelled or the actor stops.
    pub fn start_fixed_delay(
        &mut self,
        key: impl Into<String>,
        msg: M,
        period: Duration,
    ) -> Result<()>
    where
        M: Clone,
    {
        let owner = self.self_ref.name().to_string();
        self.timers
            .start_fixed_delay(&owner, self.self_ref.sender(), key.into(), msg, period)
    }

    /// Start (or replace) a one-shot timer under `key`
    pub fn start_once(&mut self, key: impl Into<String>, msg: M, delay: Duration) -> Result<()> {
        let owner = self.self_ref.name().to_string();
        self.timers
            .start_once(&owner, self.self_ref.sender(), key.into(), msg, delay)
    }

    /// Cancel the timer under `key`; unknown keys are a no-op
    pub fn cancel_timer(&mut self, key: &str) {
        self.timers.cancel(key);
    }

    pub(crate) fn cancel_all_timers(&mut self) {
        self.timers.cancel_all();
    }
}
