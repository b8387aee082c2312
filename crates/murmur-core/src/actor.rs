//! Actor identity and the lifecycle-observer seam
//!
//! The runtime never mints its own identities: every spawned actor is
//! registered with a [`LifecycleObserver`], which assigns the stable key
//! and is told again when the actor terminates. In production the observer
//! is the visualizer adapter's key registry; tests use [`NoopObserver`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for an actor
///
/// Assigned at registration time, strictly increasing for the lifetime of
/// the process, never reused while any reference to it may still be in
/// flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ActorId(u64);

impl ActorId {
    /// Create an ActorId from its raw key
    pub const fn from_raw(key: u64) -> Self {
        Self(key)
    }

    /// The raw key value
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Observer of actor lifecycle transitions
///
/// `register` is called exactly once per spawn, before the actor processes
/// any message, and returns the actor's identity. `unregister` is called
/// exactly once per termination, after the actor has processed its last
/// message. Implementations are shared process-wide and must be internally
/// synchronized.
pub trait LifecycleObserver: Send + Sync {
    /// Assign an identity to a newly spawned actor
    fn register(&self, name: &str) -> ActorId;

    /// Record that an actor has terminated
    fn unregister(&self, id: ActorId);
}

/// Observer that assigns keys from an atomic counter and reports nothing
///
/// Used by runtime tests and by systems running without a visualizer.
#[derive(Debug, Default)]
pub struct NoopObserver {
    next_key: AtomicU64,
}

impl NoopObserver {
    /// Create a new no-op observer
    pub fn new() -> Self {
        Self::default()
    }
}

impl LifecycleObserver for NoopObserver {
    fn register(&self, _name: &str) -> ActorId {
        ActorId::from_raw(self.next_key.fetch_add(1, Ordering::SeqCst))
    }

    fn unregister(&self, _id: ActorId) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_id_display() {
        assert_eq!(ActorId::from_raw(7).to_string(), "#7");
    }

    #[test]
    fn test_noop_observer_keys_strictly_increase() {
        let obs = NoopObserver::new();
        let a = obs.register("a");
        let b = obs.register("b");
        let c = obs.register("c");
        assert!(a < b && b < c);
    }
}
