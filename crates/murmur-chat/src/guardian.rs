//! The guardian actor
//!
//! Bootstraps the demo topology: one room, N clients, one join request per
//! client. The guardian watches the room and stops when it does; stopping
//! the guardian tears the whole tree down through parent supervision.

use crate::client::Client;
use crate::config::ChatConfig;
use crate::protocol::RoomCommand;
use crate::room::ChatRoom;
use async_trait::async_trait;
use murmur_core::{Result, Rng};
use murmur_runtime::{Actor, Context, Flow, Signal};
use murmur_vis::VisHandle;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// The guardian receives no protocol messages; it only reacts to signals.
#[derive(Debug, Clone)]
pub enum GuardianCommand {}

/// The guardian actor
pub struct Guardian {
    vis: Arc<VisHandle>,
    config: ChatConfig,
    rng: Rng,
}

impl Guardian {
    pub fn new(vis: Arc<VisHandle>, config: ChatConfig) -> Self {
        Self {
            vis,
            config,
            rng: Rng::new(),
        }
    }
}

#[async_trait]
impl Actor for Guardian {
    type Msg = GuardianCommand;

    async fn on_start(&mut self, ctx: &mut Context<GuardianCommand>) -> Result<()> {
        let room = ctx.spawn(
            &self.config.room.name,
            ChatRoom::new(
                self.vis.clone(),
                Duration::from_millis(self.config.room.sync_interval_ms),
                Duration::from_millis(self.config.clients.sync_interval_ms),
            ),
        )?;
        ctx.watch(&room);

        for i in 1..=self.config.clients.count {
            let screen_name = format!("{}-{i}", self.config.clients.name_prefix);
            let groups = &self.config.clients.groups;
            let group = groups[self.rng.gen_index(groups.len())].clone();
            let client = ctx.spawn(
                &screen_name,
                Client::new(
                    self.vis.clone(),
                    screen_name.clone(),
                    group,
                    Duration::from_millis(self.config.clients.post_interval_ms),
                    Duration::from_millis(self.config.clients.sync_interval_ms),
                ),
            )?;
            room.tell(RoomCommand::GetSession {
                key: ctx.self_id(),
                screen_name,
                reply_to: client,
            });
        }

        info!(
            room = self.config.room.name,
            clients = self.config.clients.count,
            "Chat topology started"
        );
        Ok(())
    }

    async fn handle(
        &mut self,
        _ctx: &mut Context<GuardianCommand>,
        msg: GuardianCommand,
    ) -> Result<Flow> {
        match msg {}
    }

    async fn on_signal(&mut self, _ctx: &mut Context<GuardianCommand>, sig: Signal) -> Result<Flow> {
        let Signal::Terminated(id) = sig;
        info!(room = %id, "Room terminated, shutting down");
        Ok(Flow::Stop)
    }
}
