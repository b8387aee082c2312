//! Murmur Core
//!
//! Core types, errors, and constants for the Murmur actor system.
//!
//! # Overview
//!
//! Murmur is a single-process actor runtime whose every lifecycle event and
//! message delivery can be streamed to an external visualizer. This crate
//! holds the pieces shared by the runtime, the visualizer adapter, and the
//! chat protocol built on top:
//!
//! - Actor identity ([`ActorId`]) and the [`LifecycleObserver`] seam through
//!   which the runtime reports spawns and terminations
//! - Explicit error taxonomy ([`Error`], [`Result`])
//! - Explicit limits with units in the name ([`constants`])
//! - Clock abstraction with per-process monotonic timestamps ([`time`])
//! - Seedable lock-free RNG ([`rng`])
//! - Telemetry initialization ([`telemetry`])

pub mod actor;
pub mod constants;
pub mod error;
pub mod rng;
pub mod telemetry;
pub mod time;

pub use actor::{ActorId, LifecycleObserver, NoopObserver};
pub use constants::*;
pub use error::{Error, Result};
pub use rng::Rng;
pub use telemetry::{init_telemetry, TelemetryConfig, TelemetryGuard};
pub use time::{Clock, MonotonicClock, WallClock};
