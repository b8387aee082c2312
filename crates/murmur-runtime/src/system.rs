//! The actor system
//!
//! Owns the set of live actors, hands out identities via the injected
//! [`LifecycleObserver`], runs one tokio task per actor, and delivers
//! termination notifications to watchers. Fairness across actors comes from
//! the tokio scheduler's work stealing; there are no priority messages.

use crate::actor::{Actor, Flow, Signal};
use crate::actor_ref::ActorRef;
use crate::context::Context;
use crate::mailbox::{mailbox, Envelope, MailboxReceiver};
use murmur_core::{
    ActorId, Error, LifecycleObserver, Result, ACTOR_LIVE_COUNT_MAX, ACTOR_NAME_LENGTH_BYTES_MAX,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

/// Bookkeeping for one live actor
///
/// The enqueue closures type-erase the actor's message type so the system
/// can reach actors of any role. Both only ever push onto an unbounded
/// channel; neither blocks nor runs actor code.
struct ActorEntry {
    name: String,
    parent: Option<ActorId>,
    signal: Box<dyn Fn(Signal) + Send + Sync>,
    stop: Box<dyn Fn() + Send + Sync>,
}

#[derive(Default)]
struct LiveSet {
    entries: HashMap<ActorId, ActorEntry>,
    /// Names of live actors; the registry's name<->key map is a bijection,
    /// so uniqueness is enforced globally rather than per-sibling.
    names: HashSet<String>,
    /// target -> watchers subscribed to its termination
    watchers: HashMap<ActorId, Vec<ActorId>>,
}

struct SystemShared {
    observer: Arc<dyn LifecycleObserver>,
    live: Mutex<LiveSet>,
}

/// Handle to the actor system; cheap to clone
#[derive(Clone)]
pub struct ActorSystem {
    shared: Arc<SystemShared>,
}

impl std::fmt::Debug for ActorSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorSystem")
            .field("live_count", &self.live_count())
            .finish()
    }
}

impl ActorSystem {
    /// Create a system reporting lifecycle transitions to `observer`
    pub fn new(observer: Arc<dyn LifecycleObserver>) -> Self {
        Self {
            shared: Arc::new(SystemShared {
                observer,
                live: Mutex::new(LiveSet::default()),
            }),
        }
    }

    /// Spawn a top-level actor
    ///
    /// The name must be unique among live actors; a collision is a spawn
    /// error and the caller decides whether to retry or rename.
    pub fn spawn<A: Actor>(&self, name: &str, actor: A) -> Result<ActorRef<A::Msg>> {
        self.spawn_child(None, name, actor)
    }

    pub(crate) fn spawn_child<A: Actor>(
        &self,
        parent: Option<ActorId>,
        name: &str,
        actor: A,
    ) -> Result<ActorRef<A::Msg>> {
        validate_name(name)?;

        let (tx, rx) = mailbox::<A::Msg>();

        // Reserve the name and install the entry under one lock so two
        // racing spawns cannot both claim it.
        {
            let mut live = self.lock();
            if live.entries.len() >= ACTOR_LIVE_COUNT_MAX {
                return Err(Error::ActorLimitReached {
                    count: live.entries.len(),
                    limit: ACTOR_LIVE_COUNT_MAX,
                });
            }
            if !live.names.insert(name.to_string()) {
                return Err(Error::name_collision(name));
            }
        }

        let id = self.shared.observer.register(name);

        {
            let mut live = self.lock();
            let signal_tx = tx.clone();
            let stop_tx = tx.clone();
            live.entries.insert(
                id,
                ActorEntry {
                    name: name.to_string(),
                    parent,
                    signal: Box::new(move |sig| {
                        let _ = signal_tx.send(Envelope::Signal(sig));
                    }),
                    stop: Box::new(move || {
                        let _ = stop_tx.send(Envelope::Stop);
                    }),
                },
            );
        }

        let actor_ref = ActorRef::new(id, Arc::from(name), tx);
        let ctx = Context::new(self.clone(), actor_ref.clone());

        debug!(actor = name, id = %id, "Actor spawned");
        tokio::spawn(run_actor(self.clone(), id, actor, ctx, rx));

        Ok(actor_ref)
    }

    /// Request graceful termination of an actor
    ///
    /// Asynchronous: the stop request is a mailbox-ordered marker, so
    /// messages already enqueued ahead of it are still processed. Unknown
    /// or already-stopped ids are a no-op.
    pub fn stop(&self, id: ActorId) {
        let live = self.lock();
        if let Some(entry) = live.entries.get(&id) {
            (entry.stop)();
        }
    }

    /// Subscribe `watcher` to `target`'s termination
    ///
    /// If the target is already gone, the signal is delivered immediately.
    pub fn watch(&self, watcher: ActorId, target: ActorId) {
        let mut live = self.lock();
        if live.entries.contains_key(&target) {
            live.watchers.entry(target).or_default().push(watcher);
        } else if let Some(entry) = live.entries.get(&watcher) {
            (entry.signal)(Signal::Terminated(target));
        }
    }

    /// Whether the actor is still live
    pub fn is_live(&self, id: ActorId) -> bool {
        self.lock().entries.contains_key(&id)
    }

    /// Number of live actors
    pub fn live_count(&self) -> usize {
        self.lock().entries.len()
    }

    /// Request termination of every live actor
    pub fn stop_all(&self) {
        let live = self.lock();
        for entry in live.entries.values() {
            (entry.stop)();
        }
    }

    /// Wait until no actors remain live
    pub async fn wait_idle(&self) {
        while self.live_count() > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LiveSet> {
        // Lock poisoning only happens if a thread panicked while holding
        // the lock; the guarded maps are still structurally sound.
        match self.shared.live.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Tear down bookkeeping for a terminated actor: retire its registry
    /// entry, release its name, notify watchers, stop its children.
    fn finish(&self, id: ActorId) {
        let name = {
            let mut live = self.lock();
            let Some(entry) = live.entries.remove(&id) else {
                return;
            };

            // The observer must retire the old registration before the name
            // becomes re-claimable: once `names` releases it, a racing spawn
            // may re-register the same name, and the registry would still
            // hold the old mapping. The observer only touches its own
            // mutex/channel, never this system, so calling it under the
            // live lock cannot deadlock.
            self.shared.observer.unregister(id);
            live.names.remove(&entry.name);

            let watchers = live.watchers.remove(&id).unwrap_or_default();
            for list in live.watchers.values_mut() {
                list.retain(|w| *w != id);
            }

            // Signal/stop closures only push onto unbounded channels, so
            // invoking them under the lock cannot deadlock or block.
            for watcher in watchers {
                if let Some(w) = live.entries.get(&watcher) {
                    (w.signal)(Signal::Terminated(id));
                }
            }

            let children: Vec<ActorId> = live
                .entries
                .iter()
                .filter(|(_, e)| e.parent == Some(id))
                .map(|(child, _)| *child)
                .collect();
            for child in children {
                if let Some(c) = live.entries.get(&child) {
                    (c.stop)();
                }
            }

            entry.name
        };

        info!(actor = %name, id = %id, "Actor terminated");
    }
}

/// Ensures registry consistency even if a handler panics: the entry is
/// released and watchers are notified when the actor task unwinds.
struct TerminationGuard {
    system: ActorSystem,
    id: ActorId,
}

impl Drop for TerminationGuard {
    fn drop(&mut self) {
        self.system.finish(self.id);
    }
}

/// The per-actor message loop: exactly one message at a time, to completion.
async fn run_actor<A: Actor>(
    system: ActorSystem,
    id: ActorId,
    mut actor: A,
    mut ctx: Context<A::Msg>,
    mut rx: MailboxReceiver<A::Msg>,
) {
    let guard = TerminationGuard { system, id };

    match actor.on_start(&mut ctx).await {
        Ok(()) => loop {
            let Some(envelope) = rx.recv().await else {
                break;
            };
            let flow = match envelope {
                Envelope::User(msg) => actor.handle(&mut ctx, msg).await,
                Envelope::Signal(sig) => actor.on_signal(&mut ctx, sig).await,
                Envelope::Stop => Ok(Flow::Stop),
            };
            match flow {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => break,
                Err(e) => {
                    // Crash isolation: this actor terminates, nothing else.
                    error!(actor = ctx.self_name(), error = %e, "Actor terminated by handler failure");
                    break;
                }
            }
        },
        Err(e) => {
            error!(actor = ctx.self_name(), error = %e, "Actor failed to start");
        }
    }

    actor.on_stop(&mut ctx).await;
    ctx.cancel_all_timers();
    drop(guard);
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_name(name, "must not be empty"));
    }
    if name.len() > ACTOR_NAME_LENGTH_BYTES_MAX {
        return Err(Error::invalid_name(
            name,
            format!(
                "length {} exceeds limit {}",
                name.len(),
                ACTOR_NAME_LENGTH_BYTES_MAX
            ),
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(Error::invalid_name(name, "contains invalid characters"));
    }
    Ok(())
}
