//! The chat client actor
//!
//! Demo traffic source. A client starts without a session and becomes a
//! posting participant when the room grants one: the granted handle is the
//! state change, held as an `Option`. Until granted, post ticks are
//! dropped. A denied client logs the reason and stops.

use crate::protocol::{SessionCommand, SessionEvent};
use async_trait::async_trait;
use murmur_core::{Result, Rng};
use murmur_runtime::{Actor, ActorRef, Context, Flow};
use murmur_vis::VisHandle;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const POST_VALUE_MAX: u64 = 1000;

/// The client actor
pub struct Client {
    vis: Arc<VisHandle>,
    screen_name: String,
    group: String,
    session: Option<ActorRef<SessionCommand>>,
    rng: Rng,
    post_period: Duration,
    sync_period: Duration,
}

impl Client {
    pub fn new(
        vis: Arc<VisHandle>,
        screen_name: String,
        group: String,
        post_period: Duration,
        sync_period: Duration,
    ) -> Self {
        Self {
            vis,
            screen_name,
            group,
            session: None,
            rng: Rng::new(),
            post_period,
            sync_period,
        }
    }

    /// Fixed RNG seed for reproducible traffic in tests
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = Rng::with_seed(seed);
        self
    }
}

#[async_trait]
impl Actor for Client {
    type Msg = SessionEvent;

    async fn on_start(&mut self, ctx: &mut Context<SessionEvent>) -> Result<()> {
        ctx.start_fixed_delay(
            "post",
            SessionEvent::PostTick { key: ctx.self_id() },
            self.post_period,
        )?;
        ctx.start_fixed_delay(
            "sync",
            SessionEvent::SyncState { key: ctx.self_id() },
            self.sync_period,
        )?;
        Ok(())
    }

    async fn handle(&mut self, ctx: &mut Context<SessionEvent>, msg: SessionEvent) -> Result<Flow> {
        self.vis.notify_received(ctx.self_id(), &msg);
        match msg {
            SessionEvent::SessionGranted { handle, .. } => {
                handle.tell(SessionCommand::PostMessage {
                    key: ctx.self_id(),
                    message: format!("Hello from {}", self.screen_name),
                });
                self.session = Some(handle);
            }
            SessionEvent::SessionDenied { reason, .. } => {
                warn!(client = self.screen_name, reason, "Session denied, stopping");
                return Ok(Flow::Stop);
            }
            SessionEvent::MessagePosted {
                screen_name,
                message,
                ..
            } => {
                info!(
                    client = self.screen_name,
                    from = screen_name,
                    message,
                    "Message received"
                );
            }
            SessionEvent::PostTick { .. } => {
                if let Some(session) = &self.session {
                    session.tell(SessionCommand::PostMessage {
                        key: ctx.self_id(),
                        message: self.rng.gen_range(0, POST_VALUE_MAX).to_string(),
                    });
                }
            }
            SessionEvent::SyncState { .. } => {
                self.vis.set_state(json!({
                    "name": ctx.self_name(),
                    "nodeType": self.group,
                }));
            }
        }
        Ok(Flow::Continue)
    }
}
