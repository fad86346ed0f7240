//! Deferred tasks.
//!
//! The layout and the shortcut coordinator never sleep.  When a step has to
//! happen later (recreating a view, hiding revealed views) they return a
//! delay, and the owner hands a [`Deferred`] task to the [`DeferredQueue`].
//!
//! # How it works (for beginners)
//!
//! `schedule` spawns a tiny tokio task that sleeps for the delay and then
//! sends the [`Deferred`] value on an unbounded channel.  The control loop
//! owns the receiving end and handles one task at a time, so the layout is
//! only ever touched from that loop and needs no locks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::trace;

use latte_core::ViewId;

/// A step to run once its delay has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Destroy the old window of a scheduled recreation.
    BeginTeardown(ViewId),
    /// Place a recreated view again.
    FinishRecreate(ViewId),
    /// The hide-views timer with this generation fired.
    HideViewsTimeout(u64),
}

/// Timer queue feeding the control loop.
pub struct DeferredQueue {
    tx: UnboundedSender<Deferred>,
    rx: UnboundedReceiver<Deferred>,
    outstanding: Arc<AtomicUsize>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            outstanding: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Delivers `task` after `after`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, after: Duration, task: Deferred) {
        trace!(?task, ?after, "scheduling deferred task");
        self.outstanding.fetch_add(1, Ordering::SeqCst);

        let tx = self.tx.clone();
        tokio::spawn(async move {
            if !after.is_zero() {
                tokio::time::sleep(after).await;
            }
            // The receiver lives as long as the queue; a failed send means
            // the loop is shutting down.
            let _ = tx.send(task);
        });
    }

    /// Waits for the next due task.
    pub async fn recv(&mut self) -> Option<Deferred> {
        let task = self.rx.recv().await;
        if task.is_some() {
            self.outstanding.fetch_sub(1, Ordering::SeqCst);
        }
        task
    }

    /// Number of scheduled tasks not yet received.
    pub fn pending(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }
}

impl Default for DeferredQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_tasks_arrive_in_deadline_order() {
        // Arrange
        let mut queue = DeferredQueue::new();
        queue.schedule(Duration::from_millis(250), Deferred::FinishRecreate(ViewId(1)));
        queue.schedule(Duration::from_millis(50), Deferred::BeginTeardown(ViewId(2)));

        // Act
        let first = queue.recv().await;
        let second = queue.recv().await;

        // Assert
        assert_eq!(first, Some(Deferred::BeginTeardown(ViewId(2))));
        assert_eq!(second, Some(Deferred::FinishRecreate(ViewId(1))));
        assert!(queue.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_is_not_delivered_before_its_delay() {
        let mut queue = DeferredQueue::new();
        let start = Instant::now();

        queue.schedule(Duration::from_millis(350), Deferred::HideViewsTimeout(1));
        let task = queue.recv().await;

        assert_eq!(task, Some(Deferred::HideViewsTimeout(1)));
        assert!(start.elapsed() >= Duration::from_millis(350));
    }

    #[tokio::test]
    async fn test_pending_counts_undelivered_tasks() {
        let mut queue = DeferredQueue::new();
        assert!(queue.is_idle());

        queue.schedule(Duration::ZERO, Deferred::BeginTeardown(ViewId(1)));
        assert_eq!(queue.pending(), 1);

        queue.recv().await;
        assert!(queue.is_idle());
    }
}
