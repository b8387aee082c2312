//! End-to-end chat protocol behavior, observed through the probe clients
//! and the in-memory event sink.

use async_trait::async_trait;
use murmur_chat::{ChatConfig, ChatRoom, Guardian, RoomCommand, SessionCommand, SessionEvent};
use murmur_core::{Error, Result};
use murmur_runtime::{Actor, ActorRef, ActorSystem, Context, Flow};
use murmur_vis::{EventSink, MemorySink, VisEvent, VisHandle};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Stands in for a chat client; forwards everything to the test.
struct Probe {
    out: mpsc::UnboundedSender<SessionEvent>,
}

#[async_trait]
impl Actor for Probe {
    type Msg = SessionEvent;

    async fn handle(&mut self, _ctx: &mut Context<SessionEvent>, msg: SessionEvent) -> Result<Flow> {
        let _ = self.out.send(msg);
        Ok(Flow::Continue)
    }
}

struct Harness {
    sink: Arc<MemorySink>,
    vis: Arc<VisHandle>,
    system: ActorSystem,
    room: ActorRef<RoomCommand>,
}

/// Room with sync timers effectively disabled so tests see only the
/// traffic they generate.
async fn harness() -> Harness {
    let sink = Arc::new(MemorySink::new());
    let vis = Arc::new(VisHandle::new(sink.clone() as Arc<dyn EventSink>));
    let system = ActorSystem::new(vis.clone());
    let room = system
        .spawn(
            "chatroom",
            ChatRoom::new(vis.clone(), Duration::from_secs(3600), Duration::from_secs(3600)),
        )
        .unwrap();
    Harness {
        sink,
        vis,
        system,
        room,
    }
}

async fn join(
    h: &Harness,
    name: &str,
) -> (
    ActorRef<SessionEvent>,
    ActorRef<SessionCommand>,
    mpsc::UnboundedReceiver<SessionEvent>,
) {
    let (out, mut seen) = mpsc::unbounded_channel();
    let probe = h.system.spawn(name, Probe { out }).unwrap();
    h.room.tell(RoomCommand::GetSession {
        key: probe.id(),
        screen_name: name.to_string(),
        reply_to: probe.clone(),
    });
    match seen.recv().await.unwrap() {
        SessionEvent::SessionGranted { handle, .. } => (probe, handle, seen),
        other => panic!("expected grant, got {other:?}"),
    }
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::test]
async fn test_broadcast_to_empty_room_is_noop() {
    let h = harness().await;

    h.room.tell(RoomCommand::PublishSessionMessage {
        key: h.room.id(),
        screen_name: "ghost".into(),
        message: "anyone?".into(),
    });
    settle().await;

    // The room received the publish; nothing was fanned out.
    let receives: Vec<VisEvent> = h
        .sink
        .events()
        .into_iter()
        .filter(|e| e.kind() == "receive")
        .collect();
    assert_eq!(receives.len(), 1);
    assert!(
        matches!(&receives[0], VisEvent::Receive { label, .. } if label == "PublishSessionMessage")
    );
}

#[tokio::test]
async fn test_join_grants_session_and_registers_it() {
    let h = harness().await;
    let (_probe, handle, _seen) = join(&h, "alice").await;

    assert_eq!(handle.name(), "session-alice");
    assert!(h.vis.registry().key_of("session-alice").is_some());

    let spawns: Vec<VisEvent> = h
        .sink
        .events()
        .into_iter()
        .filter(|e| matches!(e, VisEvent::Spawn { name, .. } if name == "session-alice"))
        .collect();
    assert_eq!(spawns.len(), 1);
}

#[tokio::test]
async fn test_posted_message_reaches_every_member_once() {
    let h = harness().await;
    let (_alice, alice_session, mut alice_seen) = join(&h, "alice").await;
    let (_bob, _bob_session, mut bob_seen) = join(&h, "bob").await;

    alice_session.tell(SessionCommand::PostMessage {
        key: alice_session.id(),
        message: "hi all".into(),
    });

    for seen in [&mut alice_seen, &mut bob_seen] {
        match seen.recv().await.unwrap() {
            SessionEvent::MessagePosted {
                screen_name,
                message,
                ..
            } => {
                assert_eq!(screen_name, "alice");
                assert_eq!(message, "hi all");
            }
            other => panic!("expected posted message, got {other:?}"),
        }
    }

    // Exactly once each.
    settle().await;
    assert!(alice_seen.try_recv().is_err());
    assert!(bob_seen.try_recv().is_err());
}

#[tokio::test]
async fn test_duplicate_screen_name_denied_without_session() {
    let h = harness().await;
    let (_alice, _session, _seen) = join(&h, "alice").await;

    let (out, mut impostor_seen) = mpsc::unbounded_channel();
    let impostor = h.system.spawn("alice2", Probe { out }).unwrap();
    h.room.tell(RoomCommand::GetSession {
        key: impostor.id(),
        screen_name: "alice".into(),
        reply_to: impostor.clone(),
    });

    match impostor_seen.recv().await.unwrap() {
        SessionEvent::SessionDenied { reason, .. } => {
            assert!(reason.contains("alice"));
        }
        other => panic!("expected denial, got {other:?}"),
    }

    // Exactly one session actor for the name was ever created.
    let spawns = h
        .sink
        .events()
        .into_iter()
        .filter(|e| matches!(e, VisEvent::Spawn { name, .. } if name == "session-alice"))
        .count();
    assert_eq!(spawns, 1);
}

#[tokio::test]
async fn test_dead_member_pruned_from_broadcast() {
    let h = harness().await;
    let (alice, alice_session, _alice_seen) = join(&h, "alice").await;
    let (_bob, _bob_session, mut bob_seen) = join(&h, "bob").await;

    // Client goes away; its session stops, the room prunes it.
    h.system.stop(alice.id());
    let mut waited = 0;
    while h.vis.registry().key_of("session-alice").is_some() {
        tokio::time::sleep(Duration::from_millis(10)).await;
        waited += 1;
        assert!(waited < 200, "session never pruned");
    }
    assert!(!h.system.is_live(alice_session.id()));
    h.sink.take();

    h.room.tell(RoomCommand::PublishSessionMessage {
        key: h.room.id(),
        screen_name: "bob".into(),
        message: "still here?".into(),
    });

    match bob_seen.recv().await.unwrap() {
        SessionEvent::MessagePosted { message, .. } => assert_eq!(message, "still here?"),
        other => panic!("expected posted message, got {other:?}"),
    }
    settle().await;

    // Fan-out touched only the surviving session.
    for event in h.sink.events() {
        if let VisEvent::Receive { label, to, .. } = event {
            if label == "NotifyClient" {
                assert_eq!(to, "session-bob");
            }
        }
    }
}

#[tokio::test]
async fn test_stream_spawns_before_attributing_receives() {
    let h = harness().await;
    let (_alice, session, _seen) = join(&h, "alice").await;
    session.tell(SessionCommand::PostMessage {
        key: session.id(),
        message: "hi".into(),
    });
    settle().await;

    let events = h.sink.events();
    for (i, event) in events.iter().enumerate() {
        if let VisEvent::Receive { to, .. } = event {
            if to.is_empty() {
                continue;
            }
            let spawned_before = events[..i]
                .iter()
                .any(|e| matches!(e, VisEvent::Spawn { name, .. } if name == to));
            assert!(spawned_before, "receive for {to} before its spawn");
        }
    }
}

#[tokio::test]
async fn test_respawn_under_same_name_keeps_registry_mapped() {
    let sink = Arc::new(MemorySink::new());
    let vis = Arc::new(VisHandle::new(sink.clone() as Arc<dyn EventSink>));
    let system = ActorSystem::new(vis.clone());

    let (out, _seen) = mpsc::unbounded_channel();
    let mut phoenix = system.spawn("phoenix", Probe { out: out.clone() }).unwrap();

    // Re-claim the name the instant it frees up. A successful spawn must
    // already see the old registration retired: the new key maps to the
    // name, never to the empty sentinel.
    for _ in 0..50 {
        system.stop(phoenix.id());
        phoenix = loop {
            match system.spawn("phoenix", Probe { out: out.clone() }) {
                Ok(r) => break r,
                Err(Error::SpawnNameCollision { .. }) => tokio::task::yield_now().await,
                Err(e) => panic!("unexpected spawn error: {e}"),
            }
        };
        assert_eq!(vis.registry().name_of(phoenix.id()), "phoenix");
    }

    system.stop(phoenix.id());
    system.wait_idle().await;

    // On the wire, each reincarnation appears only after the previous
    // node was destroyed.
    let mut live = 0;
    for event in sink.events() {
        match event {
            VisEvent::Spawn { name, .. } if name == "phoenix" => {
                assert_eq!(live, 0, "spawn before previous destroyNode");
                live += 1;
            }
            VisEvent::DestroyNode { name, .. } if name == "phoenix" => {
                assert_eq!(live, 1, "destroyNode without live node");
                live -= 1;
            }
            _ => {}
        }
    }
    assert_eq!(live, 0);
}

#[tokio::test]
async fn test_guardian_builds_and_tears_down_topology() {
    let sink = Arc::new(MemorySink::new());
    let vis = Arc::new(VisHandle::new(sink.clone() as Arc<dyn EventSink>));
    let system = ActorSystem::new(vis.clone());

    let mut config = ChatConfig::default();
    config.clients.count = 3;
    config.clients.post_interval_ms = 10;
    config.clients.sync_interval_ms = 10;
    config.room.sync_interval_ms = 10;

    let guardian = system
        .spawn("guardian", Guardian::new(vis.clone(), config))
        .unwrap();

    // Room, 3 clients, 3 sessions, guardian.
    let mut waited = 0;
    while vis.registry().len() < 8 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        waited += 1;
        assert!(waited < 200, "topology never formed");
    }
    assert!(vis.registry().key_of("chatroom").is_some());
    assert!(vis.registry().key_of("client-1").is_some());
    assert!(vis.registry().key_of("session-client-3").is_some());

    system.stop(guardian.id());
    system.wait_idle().await;
    assert_eq!(system.live_count(), 0);
    assert_eq!(vis.registry().len(), 0);

    // Every actor that appeared also disappeared, exactly once.
    let events = sink.events();
    for event in &events {
        if let VisEvent::Spawn { name, .. } = event {
            let destroys = events
                .iter()
                .filter(
                    |e| matches!(e, VisEvent::DestroyNode { name: n, .. } if n == name),
                )
                .count();
            assert_eq!(destroys, 1, "expected one destroyNode for {name}");
        }
    }
}
