//! Key registry
//!
//! Assigns each registered name a stable numeric key and answers lookups in
//! both directions. Keys increase monotonically and are never reissued, so
//! two actors that reuse a display name over time still get distinct keys.
//! Forward and inverse maps are mutated together under one mutex, keeping
//! the pair consistent at every observable point.

use murmur_core::{ActorId, Error, Result};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::warn;

struct Maps {
    next_key: u64,
    by_key: HashMap<u64, String>,
    by_name: HashMap<String, u64>,
}

/// Bidirectional key <-> name registry
pub struct KeyRegistry {
    maps: Mutex<Maps>,
}

impl Default for KeyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self {
            maps: Mutex::new(Maps {
                next_key: 1,
                by_key: HashMap::new(),
                by_name: HashMap::new(),
            }),
        }
    }

    /// Assign the next key to `name`
    ///
    /// A name already registered and not yet unregistered is rejected, so
    /// the inverse map stays a bijection.
    pub fn register(&self, name: &str) -> Result<ActorId> {
        let mut maps = self.lock();
        if maps.by_name.contains_key(name) {
            return Err(Error::name_collision(name));
        }
        let key = maps.next_key;
        maps.next_key += 1;
        maps.by_key.insert(key, name.to_string());
        maps.by_name.insert(name.to_string(), key);
        Ok(ActorId::from_raw(key))
    }

    /// Consume a key without binding a name to it
    ///
    /// Fallback for callers that must produce an identity even when the
    /// name cannot be mapped; lookups on the key return the empty sentinel.
    pub fn issue_key(&self) -> ActorId {
        let mut maps = self.lock();
        let key = maps.next_key;
        maps.next_key += 1;
        ActorId::from_raw(key)
    }

    /// Remove both directions of the mapping for `id`
    ///
    /// Unknown ids are a logged no-op.
    pub fn unregister(&self, id: ActorId) {
        let mut maps = self.lock();
        match maps.by_key.remove(&id.raw()) {
            Some(name) => {
                maps.by_name.remove(&name);
            }
            None => {
                warn!(id = %id, "Unregister of unknown key ignored");
            }
        }
    }

    /// The name registered under `id`, or `""` if unknown
    ///
    /// The empty sentinel keeps event emission total: a message from an
    /// already-unregistered sender still produces a well-formed event.
    pub fn name_of(&self, id: ActorId) -> String {
        self.lock().by_key.get(&id.raw()).cloned().unwrap_or_default()
    }

    /// The key registered under `name`, if any
    pub fn key_of(&self, name: &str) -> Option<ActorId> {
        self.lock().by_name.get(name).copied().map(ActorId::from_raw)
    }

    /// Number of live registrations
    pub fn len(&self) -> usize {
        self.lock().by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Maps> {
        match self.maps.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl std::fmt::Debug for KeyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyRegistry")
            .field("live", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_strictly_increase() {
        let registry = KeyRegistry::new();
        let a = registry.register("a").unwrap();
        let b = registry.register("b").unwrap();
        let c = registry.register("c").unwrap();
        assert!(a.raw() < b.raw());
        assert!(b.raw() < c.raw());
    }

    #[test]
    fn test_lookup_both_directions() {
        let registry = KeyRegistry::new();
        let id = registry.register("chatroom").unwrap();
        assert_eq!(registry.name_of(id), "chatroom");
        assert_eq!(registry.key_of("chatroom"), Some(id));
    }

    #[test]
    fn test_duplicate_live_name_rejected() {
        let registry = KeyRegistry::new();
        registry.register("alice").unwrap();
        assert!(registry.register("alice").is_err());
    }

    #[test]
    fn test_name_reusable_after_unregister_with_fresh_key() {
        let registry = KeyRegistry::new();
        let first = registry.register("alice").unwrap();
        registry.unregister(first);

        let second = registry.register("alice").unwrap();
        assert_ne!(first, second);
        // The old key is gone for good.
        assert_eq!(registry.name_of(first), "");
        assert_eq!(registry.name_of(second), "alice");
    }

    #[test]
    fn test_unknown_lookups_are_total() {
        let registry = KeyRegistry::new();
        assert_eq!(registry.name_of(ActorId::from_raw(404)), "");
        assert_eq!(registry.key_of("nobody"), None);
    }

    #[test]
    fn test_unregister_unknown_is_noop() {
        let registry = KeyRegistry::new();
        registry.register("a").unwrap();
        registry.unregister(ActorId::from_raw(404));
        assert_eq!(registry.len(), 1);
    }
}
