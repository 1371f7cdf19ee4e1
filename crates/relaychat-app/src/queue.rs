//! Serialized update queue.
//!
//! All state lives on the UI task. Other tasks (the transport, timers) never
//! touch it directly: they push tagged [`AppEvent`]s onto this queue and the
//! UI task drains it in FIFO order. Senders are cheap to clone and usable from
//! async tasks and plain threads alike.

use thiserror::Error;
use tokio::sync::mpsc;

use crate::AppEvent;

/// Update queue errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The other end of the queue was dropped.
    #[error("update queue closed")]
    Closed,

    /// The queue is at capacity.
    #[error("update queue full")]
    Full,
}

/// Create a bounded update queue.
///
/// # Panics
///
/// Panics if `capacity` is zero.
pub fn update_queue(capacity: usize) -> (UpdateSender, UpdateReceiver) {
    let (tx, rx) = mpsc::channel(capacity);
    (UpdateSender { tx }, UpdateReceiver { rx })
}

/// Producer side of the update queue.
#[derive(Debug, Clone)]
pub struct UpdateSender {
    tx: mpsc::Sender<AppEvent>,
}

impl UpdateSender {
    /// Enqueue an update, waiting for capacity.
    ///
    /// # Errors
    ///
    /// [`QueueError::Closed`] if the UI task is gone.
    pub async fn send(&self, event: impl Into<AppEvent>) -> Result<(), QueueError> {
        self.tx.send(event.into()).await.map_err(|_| QueueError::Closed)
    }

    /// Enqueue an update without waiting.
    ///
    /// # Errors
    ///
    /// - [`QueueError::Full`] if the queue is at capacity
    /// - [`QueueError::Closed`] if the UI task is gone
    pub fn try_send(&self, event: impl Into<AppEvent>) -> Result<(), QueueError> {
        self.tx.try_send(event.into()).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => QueueError::Full,
            mpsc::error::TrySendError::Closed(_) => QueueError::Closed,
        })
    }

    /// Enqueue an update from a thread outside the async runtime.
    ///
    /// Must not be called from within an async context.
    ///
    /// # Errors
    ///
    /// [`QueueError::Closed`] if the UI task is gone.
    pub fn blocking_send(&self, event: impl Into<AppEvent>) -> Result<(), QueueError> {
        self.tx.blocking_send(event.into()).map_err(|_| QueueError::Closed)
    }

    /// Whether the UI task has dropped its receiver.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer side of the update queue. Owned by the UI task.
#[derive(Debug)]
pub struct UpdateReceiver {
    rx: mpsc::Receiver<AppEvent>,
}

impl UpdateReceiver {
    /// Wait for the next update.
    ///
    /// Returns `None` once every sender is dropped and the queue is empty.
    pub async fn recv(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    /// Take the next update if one is ready.
    ///
    /// # Errors
    ///
    /// [`QueueError::Closed`] if the queue is empty and every sender is gone.
    pub fn try_recv(&mut self) -> Result<Option<AppEvent>, QueueError> {
        match self.rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => Err(QueueError::Closed),
        }
    }

    /// Take every update that is ready, in arrival order.
    pub fn drain(&mut self) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InboundEvent;

    fn message(text: &str) -> InboundEvent {
        InboundEvent::Message { channel: "#a".into(), from: "ada".into(), text: text.into() }
    }

    #[tokio::test]
    async fn updates_arrive_in_fifo_order() {
        let (tx, mut rx) = update_queue(8);

        for text in ["one", "two", "three"] {
            assert!(tx.send(message(text)).await.is_ok());
        }

        assert_eq!(rx.drain(), vec![
            AppEvent::Inbound(message("one")),
            AppEvent::Inbound(message("two")),
            AppEvent::Inbound(message("three")),
        ]);
    }

    #[tokio::test]
    async fn sends_from_plain_thread() {
        let (tx, mut rx) = update_queue(8);

        let handle = std::thread::spawn(move || {
            for text in ["one", "two"] {
                assert!(tx.blocking_send(message(text)).is_ok());
            }
        });

        assert_eq!(rx.recv().await, Some(AppEvent::Inbound(message("one"))));
        assert_eq!(rx.recv().await, Some(AppEvent::Inbound(message("two"))));
        assert!(handle.join().is_ok());
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn full_queue_rejects_try_send() {
        let (tx, _rx) = update_queue(1);

        assert_eq!(tx.try_send(AppEvent::Tick), Ok(()));
        assert_eq!(tx.try_send(AppEvent::Tick), Err(QueueError::Full));
    }

    #[tokio::test]
    async fn dropped_receiver_closes_queue() {
        let (tx, rx) = update_queue(1);
        drop(rx);

        assert!(tx.is_closed());
        assert_eq!(tx.send(AppEvent::Tick).await, Err(QueueError::Closed));
    }

    #[tokio::test]
    async fn try_recv_reports_empty_then_closed() {
        let (tx, mut rx) = update_queue(1);

        assert_eq!(rx.try_recv(), Ok(None));
        drop(tx);
        assert_eq!(rx.try_recv(), Err(QueueError::Closed));
    }
}
