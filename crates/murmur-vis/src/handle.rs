//! Visualizer handle
//!
//! [`VisHandle`] ties the key registry, a sink transport, and the monotonic
//! clock into the one object the rest of the system talks to. It implements
//! [`LifecycleObserver`], so plugging it into the actor system makes every
//! spawn and termination flow out as `spawn`/`destroyNode` events; actors
//! report deliveries and snapshots through [`notify_received`] and
//! [`set_state`].
//!
//! [`notify_received`]: VisHandle::notify_received
//! [`set_state`]: VisHandle::set_state

use crate::event::VisEvent;
use crate::registry::KeyRegistry;
use crate::sink::EventSink;
use murmur_core::{ActorId, LifecycleObserver, MonotonicClock};
use std::sync::Arc;
use tracing::error;

/// A protocol message the event sink can attribute
///
/// Every chat protocol message carries its sender's key, so the delivery
/// edge can be drawn from the right node with the right label.
pub trait Attributed {
    /// Key of the actor that sent this message
    fn sender_key(&self) -> ActorId;
    /// Short label shown on the delivery edge
    fn label(&self) -> &'static str;
}

/// Registry + sink + clock, shared across the whole system
#[derive(Debug)]
pub struct VisHandle {
    registry: KeyRegistry,
    sink: Arc<dyn EventSink>,
    clock: MonotonicClock,
}

impl VisHandle {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self::with_clock(sink, MonotonicClock::wall())
    }

    pub fn with_clock(sink: Arc<dyn EventSink>, clock: MonotonicClock) -> Self {
        Self {
            registry: KeyRegistry::new(),
            sink,
            clock,
        }
    }

    /// The underlying key registry
    pub fn registry(&self) -> &KeyRegistry {
        &self.registry
    }

    /// Report one delivered protocol message
    pub fn notify_received<M: Attributed>(&self, receiver: ActorId, msg: &M) {
        self.sink.emit(VisEvent::Receive {
            label: msg.label().to_string(),
            from: self.registry.name_of(msg.sender_key()),
            to: self.registry.name_of(receiver),
            time: self.clock.now_ms(),
        });
    }

    /// Report a state snapshot
    pub fn set_state(&self, state: serde_json::Value) {
        self.sink.emit(VisEvent::SetState {
            time: self.clock.now_ms(),
            state,
        });
    }
}

impl LifecycleObserver for VisHandle {
    fn register(&self, name: &str) -> ActorId {
        let id = match self.registry.register(name) {
            Ok(id) => id,
            Err(e) => {
                // Live names are unique upstream, so a rejection here means
                // registry state diverged; issue an unmapped key and keep going.
                error!(name, error = %e, "Registry rejected name, issuing unmapped key");
                self.registry.issue_key()
            }
        };
        self.sink.emit(VisEvent::Spawn {
            name: name.to_string(),
            time: self.clock.now_ms(),
        });
        id
    }

    fn unregister(&self, id: ActorId) {
        let name = self.registry.name_of(id);
        self.registry.unregister(id);
        self.sink.emit(VisEvent::DestroyNode {
            name,
            time: self.clock.now_ms(),
        });
    }
}
