//! Bounded dispatch queue for downstream delivery.

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::trace;

use engine_api::QueueConfig;
use engine_spi::DispatchItem;

/// Bounded FIFO queue decoupling detection from downstream delivery.
///
/// Producers never block: when the queue is full the oldest item is dropped
/// to admit the newest, and a monotonic drop counter records it. Bounded
/// staleness is preferred over unbounded memory growth.
pub struct DispatchQueue {
    tx: Sender<DispatchItem>,
    rx: Receiver<DispatchItem>,
    drops: AtomicU64,
}

impl DispatchQueue {
    /// Create a queue with the given capacity.
    pub fn new(config: QueueConfig) -> Self {
        let (tx, rx) = bounded(config.capacity.max(1));
        Self {
            tx,
            rx,
            drops: AtomicU64::new(0),
        }
    }

    /// Enqueue an item without blocking. Returns false only if the item
    /// could not be admitted at all.
    pub fn enqueue(&self, item: DispatchItem) -> bool {
        match self.tx.try_send(item) {
            Ok(()) => true,
            Err(TrySendError::Full(item)) => {
                if let Ok(dropped) = self.rx.try_recv() {
                    self.drops.fetch_add(1, Ordering::Relaxed);
                    trace!(series = %dropped.series_key, "dispatch queue full, dropped oldest");
                }
                self.tx.try_send(item).is_ok()
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Pop the oldest queued item, if any. Consumer side for the external
    /// delivery worker.
    pub fn try_next(&self) -> Option<DispatchItem> {
        self.rx.try_recv().ok()
    }

    /// A receiver handle for a dedicated delivery loop.
    pub fn receiver(&self) -> Receiver<DispatchItem> {
        self.rx.clone()
    }

    /// Items currently queued.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Total items dropped under pressure since construction.
    pub fn drops(&self) -> u64 {
        self.drops.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pattern_spi::{Classification, PatternResult, Severity};

    fn item(key: &str, fingerprint: u64) -> DispatchItem {
        DispatchItem::new(PatternResult {
            series_key: key.to_string(),
            window_fingerprint: fingerprint,
            score: 0.0,
            classification: Classification::Normal,
            severity: Severity::None,
            insufficient_data: false,
            computed_at: 0,
        })
    }

    fn queue(capacity: usize) -> DispatchQueue {
        DispatchQueue::new(QueueConfig { capacity })
    }

    #[test]
    fn test_fifo_order() {
        let q = queue(4);
        for i in 0..3 {
            assert!(q.enqueue(item("a", i)));
        }
        let fingerprints: Vec<u64> = std::iter::from_fn(|| q.try_next())
            .map(|i| i.result.window_fingerprint)
            .collect();
        assert_eq!(fingerprints, vec![0, 1, 2]);
    }

    #[test]
    fn test_overflow_drops_oldest_and_counts() {
        let q = queue(3);
        for i in 0..3 {
            assert!(q.enqueue(item("a", i)));
        }
        assert_eq!(q.len(), 3);

        assert!(q.enqueue(item("a", 3)));
        assert_eq!(q.len(), 3);
        assert_eq!(q.drops(), 1);

        let fingerprints: Vec<u64> = std::iter::from_fn(|| q.try_next())
            .map(|i| i.result.window_fingerprint)
            .collect();
        assert_eq!(fingerprints, vec![1, 2, 3]);
    }

    #[test]
    fn test_each_overflow_drops_exactly_one() {
        let q = queue(2);
        for i in 0..10 {
            assert!(q.enqueue(item("a", i)));
        }
        assert_eq!(q.len(), 2);
        assert_eq!(q.drops(), 8);
    }

    #[test]
    fn test_consumer_drains_while_producer_runs() {
        let q = std::sync::Arc::new(queue(64));
        let rx = q.receiver();
        let producer = {
            let q = std::sync::Arc::clone(&q);
            std::thread::spawn(move || {
                for i in 0..500 {
                    q.enqueue(item("a", i));
                }
            })
        };
        producer.join().unwrap();

        let mut seen = 0;
        while rx.try_recv().is_ok() {
            seen += 1;
        }
        assert_eq!(seen as u64 + q.drops(), 500);
    }
}
