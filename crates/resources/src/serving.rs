//! The depletable serving supply
//!
//! Servings flow through a bounded channel. The producer half sends a fixed
//! number of them and is then dropped, which is the exhaustion signal: once
//! the buffer drains, every taker sees [`TakeOutcome::Exhausted`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex, Semaphore};

/// One indivisible, valueless unit of consumption
#[derive(Debug)]
pub struct Serving(());

/// Result of asking the source for a serving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakeOutcome {
    /// Exactly one serving was consumed by this caller
    Served,
    /// No serving was available and none ever will be
    Exhausted,
}

/// Producing half; consumed by the one-time [`produce`](Self::produce)
#[derive(Debug)]
pub struct ServingProducer {
    tx: mpsc::Sender<Serving>,
}

/// Consuming half; cheap to clone and safe for many concurrent callers
#[derive(Debug, Clone)]
pub struct ServingSource {
    rx: Arc<Mutex<mpsc::Receiver<Serving>>>,
    served: Arc<AtomicU64>,
}

/// Create a source buffering up to `capacity` servings
///
/// The buffer is clamped to at least one and at most what the channel's
/// internal semaphore can count.
#[must_use]
pub fn serving_source(capacity: usize) -> (ServingProducer, ServingSource) {
    let (tx, rx) = mpsc::channel(capacity.clamp(1, Semaphore::MAX_PERMITS));
    (
        ServingProducer { tx },
        ServingSource {
            rx: Arc::new(Mutex::new(rx)),
            served: Arc::new(AtomicU64::new(0)),
        },
    )
}

impl ServingProducer {
    /// Enqueue `servings` servings, then mark the source exhausted
    ///
    /// Returns how many servings were enqueued. This is less than requested
    /// only if every [`ServingSource`] handle was dropped first.
    pub async fn produce(self, servings: u64) -> u64 {
        for produced in 0..servings {
            if self.tx.send(Serving(())).await.is_err() {
                tracing::debug!(produced, "serving source dropped before supply ran out");
                return produced;
            }
        }
        tracing::debug!(servings, "serving supply exhausted");
        servings
    }

    /// Mark the source exhausted without producing anything
    pub fn exhaust(self) {
        drop(self);
    }
}

impl ServingSource {
    /// Take one serving, waiting while the source is neither stocked nor exhausted
    pub async fn take_one(&self) -> TakeOutcome {
        let mut rx = self.rx.lock().await;
        match rx.recv().await {
            Some(Serving(())) => {
                self.served.fetch_add(1, Ordering::AcqRel);
                TakeOutcome::Served
            }
            None => TakeOutcome::Exhausted,
        }
    }

    /// Servings handed out so far
    #[must_use]
    pub fn served(&self) -> u64 {
        self.served.load(Ordering::Acquire)
    }
}
