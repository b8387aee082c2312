//! The chat room actor
//!
//! Admits clients under unique screen names, spawns one session actor per
//! admitted client, and fans posted messages out to every live session in
//! join order. Sessions are watched; a terminated session is pruned so the
//! fan-out list only ever holds live handles.

use crate::protocol::{Posted, RoomCommand, SessionCommand, SessionEvent};
use crate::session::Session;
use async_trait::async_trait;
use murmur_core::{ActorId, Result};
use murmur_runtime::{Actor, ActorRef, Context, Flow, Signal};
use murmur_vis::VisHandle;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

struct SessionEntry {
    id: ActorId,
    screen_name: String,
    handle: ActorRef<SessionCommand>,
}

/// The room actor
pub struct ChatRoom {
    vis: Arc<VisHandle>,
    sessions: Vec<SessionEntry>,
    sync_period: Duration,
    session_sync_period: Duration,
}

impl ChatRoom {
    pub fn new(vis: Arc<VisHandle>, sync_period: Duration, session_sync_period: Duration) -> Self {
        Self {
            vis,
            sessions: Vec::new(),
            sync_period,
            session_sync_period,
        }
    }

    fn screen_name_taken(&self, screen_name: &str) -> bool {
        self.sessions.iter().any(|s| s.screen_name == screen_name)
    }

    fn get_session(
        &mut self,
        ctx: &mut Context<RoomCommand>,
        screen_name: String,
        reply_to: ActorRef<SessionEvent>,
    ) {
        if self.screen_name_taken(&screen_name) {
            warn!(screen_name, "Join refused, screen name already in use");
            reply_to.tell(SessionEvent::SessionDenied {
                key: ctx.self_id(),
                reason: format!("screen name '{screen_name}' is already taken"),
            });
            return;
        }

        let session = Session::new(
            self.vis.clone(),
            ctx.self_ref().clone(),
            reply_to.clone(),
            screen_name.clone(),
            self.session_sync_period,
        );
        let handle = match ctx.spawn(&format!("session-{screen_name}"), session) {
            Ok(handle) => handle,
            Err(e) => {
                warn!(screen_name, error = %e, "Join refused, session spawn failed");
                reply_to.tell(SessionEvent::SessionDenied {
                    key: ctx.self_id(),
                    reason: e.to_string(),
                });
                return;
            }
        };

        ctx.watch(&handle);
        self.sessions.push(SessionEntry {
            id: handle.id(),
            screen_name: screen_name.clone(),
            handle: handle.clone(),
        });
        info!(screen_name, session = %handle.id(), "Session granted");
        reply_to.tell(SessionEvent::SessionGranted {
            key: ctx.self_id(),
            handle,
        });
    }

    fn publish(&self, ctx: &Context<RoomCommand>, screen_name: String, message: String) {
        let posted = Posted {
            screen_name,
            message,
        };
        // Broadcast in join order. An empty room is a no-op.
        for entry in &self.sessions {
            entry.handle.tell(SessionCommand::NotifyClient {
                key: ctx.self_id(),
                posted: posted.clone(),
            });
        }
    }

    fn sync_state(&self, ctx: &Context<RoomCommand>) {
        let members: Vec<&str> = self
            .sessions
            .iter()
            .map(|s| s.screen_name.as_str())
            .collect();
        self.vis.set_state(json!({
            "name": ctx.self_name(),
            "nodeType": "chatRoom",
            "sessions": members,
        }));
    }
}

#[async_trait]
impl Actor for ChatRoom {
    type Msg = RoomCommand;

    async fn on_start(&mut self, ctx: &mut Context<RoomCommand>) -> Result<()> {
        ctx.start_fixed_delay(
            "sync",
            RoomCommand::SyncState { key: ctx.self_id() },
            self.sync_period,
        )?;
        Ok(())
    }

    async fn handle(&mut self, ctx: &mut Context<RoomCommand>, msg: RoomCommand) -> Result<Flow> {
        self.vis.notify_received(ctx.self_id(), &msg);
        match msg {
            RoomCommand::GetSession {
                screen_name,
                reply_to,
                ..
            } => self.get_session(ctx, screen_name, reply_to),
            RoomCommand::PublishSessionMessage {
                screen_name,
                message,
                ..
            } => self.publish(ctx, screen_name, message),
            RoomCommand::SyncState { .. } => self.sync_state(ctx),
        }
        Ok(Flow::Continue)
    }

    async fn on_signal(&mut self, _ctx: &mut Context<RoomCommand>, sig: Signal) -> Result<Flow> {
        let Signal::Terminated(id) = sig;
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        if self.sessions.len() < before {
            debug!(session = %id, "Pruned terminated session");
        }
        Ok(Flow::Continue)
    }
}
