//! Counting admission gate for outbound detail-page requests.

use tokio::sync::{Semaphore, SemaphorePermit};

/// Hard ceiling on simultaneously in-flight requests.
///
/// Callers hold the returned permit for the duration of one request; the
/// slot is released when the permit is dropped. Waiters are admitted in
/// FIFO order.
#[derive(Debug)]
pub struct AdmissionGate {
    permits: Semaphore,
    capacity: usize,
}

impl AdmissionGate {
    /// Creates a gate admitting at most `capacity` holders at once.
    ///
    /// A `capacity` of zero is raised to one so the gate can never deadlock.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            permits: Semaphore::new(capacity),
            capacity,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently free.
    #[must_use]
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Waits for a free slot.
    ///
    /// # Panics
    ///
    /// Never in practice: the underlying semaphore is owned by the gate and
    /// is never closed.
    pub async fn acquire(&self) -> SemaphorePermit<'_> {
        self.permits
            .acquire()
            .await
            .expect("admission gate semaphore is never closed")
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let gate = AdmissionGate::new(0);
        assert_eq!(gate.capacity(), 1);
        assert_eq!(gate.available(), 1);
    }

    #[tokio::test]
    async fn acquire_blocks_once_capacity_is_reached() {
        let gate = AdmissionGate::new(2);
        let first = gate.acquire().await;
        let _second = gate.acquire().await;
        assert_eq!(gate.available(), 0);

        let blocked = tokio::time::timeout(Duration::from_millis(20), gate.acquire()).await;
        assert!(blocked.is_err(), "third acquire should wait for a free slot");

        drop(first);
        let third = tokio::time::timeout(Duration::from_millis(200), gate.acquire()).await;
        assert!(third.is_ok(), "slot should be reusable after a permit drops");
    }
}
