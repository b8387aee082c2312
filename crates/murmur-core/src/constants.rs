//! Limits for Murmur
//!
//! All limits are explicit, use big-endian naming (most significant first),
//! and include units in the name.

// =============================================================================
// Actor Limits
// =============================================================================

/// Maximum length of an actor's registered name in bytes
pub const ACTOR_NAME_LENGTH_BYTES_MAX: usize = 256;

/// Maximum number of live actors in one system
pub const ACTOR_LIVE_COUNT_MAX: usize = 1_000_000;

// =============================================================================
// Timer Limits
// =============================================================================

/// Minimum period for a fixed-delay timer in milliseconds
///
/// Guards against accidental zero-period timers spinning a mailbox full.
pub const TIMER_PERIOD_MS_MIN: u64 = 1;

/// Maximum number of live timers per actor
pub const TIMER_PER_ACTOR_COUNT_MAX: usize = 64;

// =============================================================================
// Event Sink Limits
// =============================================================================

/// Maximum size of one serialized sink event in bytes (1 MB)
pub const SINK_EVENT_SIZE_BYTES_MAX: usize = 1024 * 1024;

// =============================================================================
// Chat Defaults
// =============================================================================

/// Default interval between room membership snapshots in milliseconds
pub const ROOM_STATE_SYNC_INTERVAL_MS_DEFAULT: u64 = 1000;

/// Default interval between client self-posts in milliseconds
pub const CLIENT_POST_INTERVAL_MS_DEFAULT: u64 = 2000;

/// Default interval between client state snapshots in milliseconds
pub const CLIENT_STATE_SYNC_INTERVAL_MS_DEFAULT: u64 = 1000;
