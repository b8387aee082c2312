//! Murmur Runtime
//!
//! Actor execution substrate for Murmur.
//!
//! # Overview
//!
//! The runtime provides:
//! - Typed actors with sequential per-actor message processing
//! - FIFO mailboxes with non-blocking, fire-and-forget sends
//! - Spawn/stop lifecycle with parent supervision
//! - Termination watch delivered as ordinary messages
//! - Timer-driven self-messaging that only ever enqueues
//!
//! Each actor runs on its own tokio task, so actors execute in parallel
//! with each other while each individual actor processes exactly one
//! message at a time. Behavior code therefore needs no locks of its own.

pub mod actor;
pub mod actor_ref;
pub mod context;
pub mod mailbox;
pub mod system;
pub mod timer;

pub use actor::{Actor, Flow, Signal};
pub use actor_ref::ActorRef;
pub use context::Context;
pub use mailbox::Envelope;
pub use system::ActorSystem;
