//! The session actor
//!
//! One per admitted client, owned by the room. It is the client's posting
//! capability and the room's delivery path back to that client; it holds no
//! state beyond the two refs and its screen name. A session outlives
//! neither peer: it watches both and stops when either terminates.

use crate::protocol::{RoomCommand, SessionCommand, SessionEvent};
use async_trait::async_trait;
use murmur_core::Result;
use murmur_runtime::{Actor, ActorRef, Context, Flow, Signal};
use murmur_vis::VisHandle;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// The session actor
pub struct Session {
    vis: Arc<VisHandle>,
    room: ActorRef<RoomCommand>,
    client: ActorRef<SessionEvent>,
    screen_name: String,
    sync_period: Duration,
}

impl Session {
    pub fn new(
        vis: Arc<VisHandle>,
        room: ActorRef<RoomCommand>,
        client: ActorRef<SessionEvent>,
        screen_name: String,
        sync_period: Duration,
    ) -> Self {
        Self {
            vis,
            room,
            client,
            screen_name,
            sync_period,
        }
    }
}

#[async_trait]
impl Actor for Session {
    type Msg = SessionCommand;

    async fn on_start(&mut self, ctx: &mut Context<SessionCommand>) -> Result<()> {
        ctx.watch(&self.room);
        ctx.watch(&self.client);
        ctx.start_fixed_delay(
            "sync",
            SessionCommand::SyncState { key: ctx.self_id() },
            self.sync_period,
        )?;
        Ok(())
    }

    async fn handle(
        &mut self,
        ctx: &mut Context<SessionCommand>,
        msg: SessionCommand,
    ) -> Result<Flow> {
        self.vis.notify_received(ctx.self_id(), &msg);
        match msg {
            SessionCommand::PostMessage { message, .. } => {
                self.room.tell(RoomCommand::PublishSessionMessage {
                    key: ctx.self_id(),
                    screen_name: self.screen_name.clone(),
                    message,
                });
            }
            SessionCommand::NotifyClient { posted, .. } => {
                self.client.tell(SessionEvent::MessagePosted {
                    key: ctx.self_id(),
                    screen_name: posted.screen_name,
                    message: posted.message,
                });
            }
            SessionCommand::SyncState { .. } => {
                self.vis.set_state(json!({
                    "name": ctx.self_name(),
                    "nodeType": "session",
                    "screenName": self.screen_name,
                }));
            }
        }
        Ok(Flow::Continue)
    }

    async fn on_signal(&mut self, ctx: &mut Context<SessionCommand>, sig: Signal) -> Result<Flow> {
        // Either peer going away ends the session.
        let Signal::Terminated(id) = sig;
        debug!(session = ctx.self_name(), peer = %id, "Peer terminated, stopping session");
        Ok(Flow::Stop)
    }
}
