//! Murmur Vis
//!
//! The visualizer adapter: stable numeric keys for actors, the JSON wire
//! events an external visualizer consumes, and the sink transports that
//! carry them.
//!
//! # Overview
//!
//! - [`KeyRegistry`] — bidirectional key <-> name mapping with monotonically
//!   increasing, never-reused keys
//! - [`VisEvent`] — the four wire events: `spawn`, `destroyNode`, `receive`,
//!   `setState`
//! - [`EventSink`] — transport seam; [`TcpSink`] for the real visualizer,
//!   [`MemorySink`] and [`NullSink`] for tests
//! - [`VisHandle`] — registry + sink + monotonic clock; implements
//!   [`LifecycleObserver`](murmur_core::LifecycleObserver) so the actor
//!   system streams lifecycle events without knowing the wire format

pub mod event;
pub mod handle;
pub mod registry;
pub mod sink;

pub use event::VisEvent;
pub use handle::{Attributed, VisHandle};
pub use registry::KeyRegistry;
pub use sink::{EventSink, MemorySink, NullSink, TcpSink};
