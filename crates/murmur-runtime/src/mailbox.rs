//! Actor mailboxes
//!
//! A mailbox is an unbounded mpsc channel of envelopes. Enqueueing never
//! blocks the sender; per-sender-per-receiver FIFO comes from the channel,
//! and there is deliberately no ordering guarantee across distinct senders
//! racing to enqueue.

use crate::actor::Signal;
use tokio::sync::mpsc;

/// One queued item: a user message or a runtime-injected marker
///
/// `Stop` travels through the mailbox like any message, so a stop request
/// is processed in turn: messages already ahead of it still run, messages
/// behind it are dropped.
#[derive(Debug)]
pub enum Envelope<M> {
    /// A protocol message from some sender
    User(M),
    /// A lifecycle signal (watched actor terminated)
    Signal(Signal),
    /// Graceful stop marker
    Stop,
}

pub(crate) type MailboxSender<M> = mpsc::UnboundedSender<Envelope<M>>;
pub(crate) type MailboxReceiver<M> = mpsc::UnboundedReceiver<Envelope<M>>;

/// Create a fresh mailbox
pub(crate) fn mailbox<M>() -> (MailboxSender<M>, MailboxReceiver<M>) {
    mpsc::unbounded_channel()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mailbox_fifo_order() {
        let (tx, mut rx) = mailbox::<u32>();

        for i in 0..10 {
            tx.send(Envelope::User(i)).unwrap();
        }

        for i in 0..10 {
            match rx.recv().await.unwrap() {
                Envelope::User(v) => assert_eq!(v, i),
                other => panic!("unexpected envelope: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_stop_marker_keeps_mailbox_order() {
        let (tx, mut rx) = mailbox::<&'static str>();

        tx.send(Envelope::User("before")).unwrap();
        tx.send(Envelope::Stop).unwrap();
        tx.send(Envelope::User("after")).unwrap();

        assert!(matches!(rx.recv().await.unwrap(), Envelope::User("before")));
        assert!(matches!(rx.recv().await.unwrap(), Envelope::Stop));
    }
}
