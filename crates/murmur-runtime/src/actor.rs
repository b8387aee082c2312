//! Actor behavior trait
//!
//! An actor is a unit of sequential computation: the runtime delivers one
//! message at a time to [`Actor::handle`], and nothing else ever touches the
//! actor's state. Protocol dispatch is an exhaustive match over the actor's
//! message enum, so an unhandled message kind is a compile error rather than
//! a runtime surprise.

use crate::context::Context;
use async_trait::async_trait;
use murmur_core::{ActorId, Result};

/// What the actor wants to happen after the current message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep processing the mailbox
    Continue,
    /// Stop gracefully: run `on_stop`, cancel timers, notify watchers
    Stop,
}

/// Lifecycle signal delivered through the ordinary mailbox
///
/// Signals interleave with user messages in mailbox order, so termination
/// handling composes with the actor's normal dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// A watched actor has terminated
    Terminated(ActorId),
}

/// The behavior of an actor
///
/// State transitions ("becoming" a new behavior) are expressed by mutating
/// `self`; the chat client storing its granted session handle is the
/// canonical example.
///
/// A handler returning `Err` terminates this actor only: watchers are
/// notified, siblings and the runtime are unaffected.
#[async_trait]
pub trait Actor: Send + 'static {
    /// The closed message set this actor understands
    type Msg: Send + 'static;

    /// Called once before the first message; the place to start timers
    /// and watch collaborators.
    async fn on_start(&mut self, _ctx: &mut Context<Self::Msg>) -> Result<()> {
        Ok(())
    }

    /// Process one message to completion
    async fn handle(&mut self, ctx: &mut Context<Self::Msg>, msg: Self::Msg) -> Result<Flow>;

    /// Process a lifecycle signal; defaults to ignoring it
    async fn on_signal(&mut self, _ctx: &mut Context<Self::Msg>, _sig: Signal) -> Result<Flow> {
        Ok(Flow::Continue)
    }

    /// Called once after the last message, before watchers are notified
    async fn on_stop(&mut self, _ctx: &mut Context<Self::Msg>) {}
}
