//! Lock-free random number generator
//!
//! Xorshift64* behind an atomic, seedable for reproducible tests. Not
//! cryptographically secure; used for demo traffic and group assignment.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Seedable lock-free RNG
#[derive(Debug)]
pub struct Rng {
    state: AtomicU64,
}

impl Default for Rng {
    fn default() -> Self {
        Self::new()
    }
}

impl Rng {
    /// Create an RNG seeded from the system time
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
            | 1; // xorshift state must be non-zero

        Self {
            state: AtomicU64::new(seed),
        }
    }

    /// Create an RNG with a fixed seed (for tests)
    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: AtomicU64::new(seed | 1),
        }
    }

    /// Next random u64
    pub fn next_u64(&self) -> u64 {
        let mut state = self.state.load(Ordering::Relaxed);
        loop {
            let mut x = state;
            x ^= x >> 12;
            x ^= x << 25;
            x ^= x >> 27;

            match self.state.compare_exchange_weak(
                state,
                x,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return x.wrapping_mul(0x2545F4914F6CDD1D),
                Err(s) => state = s,
            }
        }
    }

    /// Random u64 in `[min, max)`
    pub fn gen_range(&self, min: u64, max: u64) -> u64 {
        assert!(min < max, "min must be less than max");
        min + (self.next_u64() % (max - min))
    }

    /// Random index into a slice of the given length
    pub fn gen_index(&self, len: usize) -> usize {
        assert!(len > 0, "len must be positive");
        (self.next_u64() % len as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let a = Rng::with_seed(42);
        let b = Rng::with_seed(42);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_gen_range_bounds() {
        let rng = Rng::with_seed(7);
        for _ in 0..1000 {
            let v = rng.gen_range(10, 20);
            assert!((10..20).contains(&v));
        }
    }

    #[test]
    fn test_gen_index_bounds() {
        let rng = Rng::with_seed(7);
        for _ in 0..100 {
            assert!(rng.gen_index(3) < 3);
        }
    }
}
