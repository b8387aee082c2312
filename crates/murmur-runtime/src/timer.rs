//! Per-actor timer service
//!
//! Timers never execute actor code: each timer is a background task that
//! only enqueues into its owner's mailbox, preserving the
//! single-threaded-per-actor invariant. Timers are keyed; starting a timer
//! under a live key replaces the previous schedule. All of an actor's
//! timers are cancelled when the actor stops — the set aborts its tasks on
//! drop, so even a panicking handler cannot leak a ticking timer.

use crate::mailbox::{Envelope, MailboxSender};
use murmur_core::{Error, Result, TIMER_PERIOD_MS_MIN, TIMER_PER_ACTOR_COUNT_MAX};
use std::collections::HashMap;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Keyed set of timers owned by one actor
pub(crate) struct Timers {
    handles: HashMap<String, JoinHandle<()>>,
}

impl Timers {
    pub(crate) fn new() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }

    /// Re-enqueue `msg` every `period` until cancelled or the owner stops
    pub(crate) fn start_fixed_delay<M>(
        &mut self,
        owner: &str,
        tx: MailboxSender<M>,
        key: String,
        msg: M,
        period: Duration,
    ) -> Result<()>
    where
        M: Clone + Send + 'static,
    {
        self.check_schedule(owner, &key, period.as_millis() as u64)?;

        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(period).await;
                if tx.send(Envelope::User(msg.clone())).is_err() {
                    break;
                }
            }
        });

        if let Some(old) = self.handles.insert(key, handle) {
            old.abort();
        }
        Ok(())
    }

    /// Enqueue `msg` exactly once after `delay`
    pub(crate) fn start_once<M>(
        &mut self,
        owner: &str,
        tx: MailboxSender<M>,
        key: String,
        msg: M,
        delay: Duration,
    ) -> Result<()>
    where
        M: Send + 'static,
    {
        self.check_schedule(owner, &key, delay.as_millis() as u64)?;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Envelope::User(msg));
        });

        if let Some(old) = self.handles.insert(key, handle) {
            old.abort();
        }
        Ok(())
    }

    /// Cancel the timer under `key`; unknown keys are a no-op
    pub(crate) fn cancel(&mut self, key: &str) {
        if let Some(handle) = self.handles.remove(key) {
            handle.abort();
        }
    }

    pub(crate) fn cancel_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }

    fn check_schedule(&self, owner: &str, key: &str, period_ms: u64) -> Result<()> {
        if period_ms < TIMER_PERIOD_MS_MIN {
            return Err(Error::InvalidTimerPeriod {
                period_ms,
                min_ms: TIMER_PERIOD_MS_MIN,
            });
        }
        // Replacing an existing key does not grow the set.
        if !self.handles.contains_key(key) && self.handles.len() >= TIMER_PER_ACTOR_COUNT_MAX {
            return Err(Error::TimerLimitReached {
                actor: owner.to_string(),
                count: self.handles.len(),
                limit: TIMER_PER_ACTOR_COUNT_MAX,
            });
        }
        Ok(())
    }
}

impl Drop for Timers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
