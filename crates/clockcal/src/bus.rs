//! Fixed-capacity FIFO queues between the logic and view tasks.
//!
//! Thin wrappers over `tokio::sync::mpsc` that carry the queue's name and
//! expose occupancy from the producer side for the supervisor's health check.
//! Nothing is dropped silently: `send` waits for space and `try_send` hands
//! the message back on `Full`.

use std::fmt;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::{TryRecvError, TrySendError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueName {
    LogicToView,
    ViewToLogic,
}

impl fmt::Display for QueueName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueName::LogicToView => f.write_str("l2v"),
            QueueName::ViewToLogic => f.write_str("v2l"),
        }
    }
}

/// Rejected send; carries the message back to the caller.
#[derive(Debug, thiserror::Error)]
pub enum QueueError<T> {
    #[error("queue is full")]
    Full(T),
    #[error("queue is closed")]
    Closed(T),
}

/// Snapshot of a queue's fill level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    pub len: usize,
    pub capacity: usize,
}

impl Occupancy {
    pub fn is_saturated(self) -> bool {
        self.len >= self.capacity
    }
}

/// Creates a queue holding at most `capacity` messages (at least one).
pub fn bounded<T>(name: QueueName, capacity: usize) -> (QueueSender<T>, QueueReceiver<T>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (QueueSender { name, tx }, QueueReceiver { name, rx })
}

#[derive(Debug)]
pub struct QueueSender<T> {
    name: QueueName,
    tx: mpsc::Sender<T>,
}

impl<T> Clone for QueueSender<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            tx: self.tx.clone(),
        }
    }
}

impl<T> QueueSender<T> {
    pub fn name(&self) -> QueueName {
        self.name
    }

    /// Waits for free space, then enqueues.
    pub async fn send(&self, msg: T) -> Result<(), QueueError<T>> {
        self.tx.send(msg).await.map_err(|e| QueueError::Closed(e.0))
    }

    /// Enqueues without waiting.
    pub fn try_send(&self, msg: T) -> Result<(), QueueError<T>> {
        self.tx.try_send(msg).map_err(|e| match e {
            TrySendError::Full(m) => QueueError::Full(m),
            TrySendError::Closed(m) => QueueError::Closed(m),
        })
    }

    pub fn occupancy(&self) -> Occupancy {
        let capacity = self.tx.max_capacity();
        Occupancy {
            len: capacity - self.tx.capacity(),
            capacity,
        }
    }
}

#[derive(Debug)]
pub struct QueueReceiver<T> {
    name: QueueName,
    rx: mpsc::Receiver<T>,
}

impl<T> QueueReceiver<T> {
    pub fn name(&self) -> QueueName {
        self.name
    }

    /// Waits for the next message; `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Next queued message, if any. Never waits.
    pub fn try_recv(&mut self) -> Option<T> {
        match self.rx.try_recv() {
            Ok(msg) => Some(msg),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fewer_than_capacity_drain_in_order() {
        let (tx, mut rx) = bounded(QueueName::ViewToLogic, 10);
        for i in 0..7 {
            tx.try_send(i).expect("space");
        }
        assert_eq!(tx.occupancy(), Occupancy { len: 7, capacity: 10 });

        let drained: Vec<_> = std::iter::from_fn(|| rx.try_recv()).collect();
        assert_eq!(drained, (0..7).collect::<Vec<_>>());
        assert_eq!(tx.occupancy().len, 0);
    }

    #[test]
    fn full_queue_hands_the_message_back() {
        let (tx, _rx) = bounded(QueueName::LogicToView, 2);
        tx.try_send("a").expect("space");
        tx.try_send("b").expect("space");
        assert!(tx.occupancy().is_saturated());

        match tx.try_send("c") {
            Err(QueueError::Full(m)) => assert_eq!(m, "c"),
            other => panic!("expected Full, got {other:?}"),
        }
    }

    #[test]
    fn closed_queue_is_reported() {
        let (tx, rx) = bounded::<u8>(QueueName::LogicToView, 1);
        drop(rx);
        assert!(matches!(tx.try_send(1), Err(QueueError::Closed(1))));
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let (tx, _rx) = bounded::<u8>(QueueName::ViewToLogic, 0);
        assert_eq!(tx.occupancy().capacity, 1);
    }

    #[tokio::test]
    async fn send_waits_for_space() {
        let (tx, mut rx) = bounded(QueueName::ViewToLogic, 1);
        tx.send(1).await.expect("space");

        let producer = {
            let tx = tx.clone();
            tokio::spawn(async move { tx.send(2).await })
        };
        tokio::task::yield_now().await;
        assert_eq!(rx.recv().await, Some(1));
        producer.await.expect("join").expect("send");
        assert_eq!(rx.recv().await, Some(2));
    }

    #[test]
    fn names_match_log_labels() {
        assert_eq!(QueueName::LogicToView.to_string(), "l2v");
        assert_eq!(QueueName::ViewToLogic.to_string(), "v2l");
    }
}
