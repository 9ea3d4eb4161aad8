//! FIFO hand-off of created artifact names from the bulk job to the consumer job.
//!
//! The queue is bounded, cloneable (all clones share one channel) and supports an explicit one-shot close.
//! After [`ArtifactQueue::close`] no new names are accepted, but names already queued are still drained in publish order;
//! once drained, [`ArtifactQueue::recv`] returns `None` instead of blocking.
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("artifact queue is closed")]
pub struct QueueClosed;

#[derive(Clone)]
pub struct ArtifactQueue {
    inner: Arc<Inner>,
}

struct Inner {
    tx: Mutex<Option<mpsc::Sender<String>>>,
    rx: tokio::sync::Mutex<mpsc::Receiver<String>>,
}

impl ArtifactQueue {
    /// Create an open queue holding at most `capacity` names (at least one).
    pub fn bounded(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        Self {
            inner: Arc::new(Inner {
                tx: Mutex::new(Some(tx)),
                rx: tokio::sync::Mutex::new(rx),
            }),
        }
    }

    /// Create a queue that is already closed and empty.
    pub fn closed() -> Self {
        let queue = Self::bounded(1);
        queue.close();
        queue
    }

    /// Append a name; waits while the queue is full.
    pub async fn publish(&self, name: String) -> Result<(), QueueClosed> {
        let tx = self.sender().ok_or(QueueClosed)?;
        tx.send(name).await.map_err(|_| QueueClosed)
    }

    /// Stop accepting names. Idempotent.
    pub fn close(&self) {
        let mut tx = self.inner.tx.lock().unwrap_or_else(|e| e.into_inner());
        tx.take();
    }

    pub fn is_closed(&self) -> bool {
        self.inner
            .tx
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_none()
    }

    /// Next name in publish order; `None` once the queue is closed and drained.
    pub async fn recv(&self) -> Option<String> {
        let mut rx = self.inner.rx.lock().await;
        rx.recv().await
    }

    fn sender(&self) -> Option<mpsc::Sender<String>> {
        self.inner
            .tx
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn drains_in_publish_order_after_close() {
        let queue = ArtifactQueue::bounded(4);
        for i in 0..3 {
            queue.publish(format!("image-{i}")).await.unwrap();
        }
        queue.close();

        assert_eq!(queue.recv().await.as_deref(), Some("image-0"));
        assert_eq!(queue.recv().await.as_deref(), Some("image-1"));
        assert_eq!(queue.recv().await.as_deref(), Some("image-2"));
        assert_eq!(queue.recv().await, None);
        assert_eq!(queue.recv().await, None);
    }

    #[tokio::test]
    async fn publish_after_close_is_rejected() {
        let queue = ArtifactQueue::bounded(1);
        queue.close();
        queue.close();

        assert!(queue.is_closed());
        assert_eq!(queue.publish("late".into()).await, Err(QueueClosed));
    }

    #[tokio::test]
    async fn closed_queue_never_blocks() {
        let queue = ArtifactQueue::closed();
        let got = tokio::time::timeout(Duration::from_secs(1), queue.recv()).await;
        assert_eq!(got, Ok(None));
    }

    #[tokio::test]
    async fn receiver_wakes_on_close() {
        let queue = ArtifactQueue::bounded(1);
        let waiter = {
            let queue = queue.clone();
            tokio::spawn(async move { queue.recv().await })
        };

        tokio::task::yield_now().await;
        queue.close();

        assert_eq!(waiter.await.unwrap(), None);
    }
}
