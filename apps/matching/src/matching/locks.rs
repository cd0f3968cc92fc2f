//! Per-candidate mutual exclusion for match recalculation.
//!
//! Recalculation reads a candidate's matches and then writes them back; two
//! overlapping runs for the same candidate could both see "no match yet" for a
//! job and insert twice. Runs for one candidate are therefore serialised,
//! while runs for different candidates proceed in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

type Slot = Arc<tokio::sync::Mutex<()>>;

#[derive(Debug, Default)]
pub struct CandidateLocks {
    // Only touched briefly to hand out slots; never held across an await.
    slots: Mutex<HashMap<Uuid, Slot>>,
}

/// Held for the duration of one recalculation.
#[derive(Debug)]
pub struct CandidateGuard<'a> {
    owner: &'a CandidateLocks,
    guard: Option<OwnedMutexGuard<()>>,
}

impl CandidateLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other recalculation for `candidate_id` is in flight.
    pub async fn acquire(&self, candidate_id: Uuid) -> CandidateGuard<'_> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.entry(candidate_id).or_default().clone()
        };
        // Built before waiting: dropping a cancelled wait still releases the slot.
        let mut pending = CandidateGuard {
            owner: self,
            guard: None,
        };
        pending.guard = Some(slot.lock_owned().await);
        pending
    }

    /// Number of candidates with a live slot (held or awaited).
    pub fn active(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Drops every slot nobody holds or awaits.
    fn release(&self) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        // The map holds one reference; anything more is a holder or waiter.
        slots.retain(|_, slot| Arc::strong_count(slot) > 1);
    }
}

impl Drop for CandidateGuard<'_> {
    fn drop(&mut self) {
        // Unlock first so the slot's reference count reflects only waiters.
        // `guard` is `None` when the wait was cancelled.
        drop(self.guard.take());
        self.owner.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_slot_removed_after_release() {
        let locks = CandidateLocks::new();
        let id = Uuid::new_v4();
        {
            let _guard = locks.acquire(id).await;
            assert_eq!(locks.active(), 1);
        }
        assert_eq!(locks.active(), 0);
    }

    #[tokio::test]
    async fn test_distinct_candidates_do_not_block() {
        let locks = CandidateLocks::new();
        let _a = locks.acquire(Uuid::new_v4()).await;
        let b = tokio::time::timeout(Duration::from_millis(50), locks.acquire(Uuid::new_v4())).await;
        assert!(b.is_ok());
        assert_eq!(locks.active(), 2);
    }

    #[tokio::test]
    async fn test_same_candidate_blocks_until_released() {
        let locks = CandidateLocks::new();
        let id = Uuid::new_v4();
        let guard = locks.acquire(id).await;
        let blocked = tokio::time::timeout(Duration::from_millis(20), locks.acquire(id)).await;
        assert!(blocked.is_err());
        drop(guard);
        let acquired = tokio::time::timeout(Duration::from_millis(50), locks.acquire(id)).await;
        assert!(acquired.is_ok());
    }

    #[tokio::test]
    async fn test_cancelled_waiter_releases_slot() {
        let locks = CandidateLocks::new();
        let id = Uuid::new_v4();
        let holder = locks.acquire(id).await;

        let mut waiter = Box::pin(locks.acquire(id));
        let waited = tokio::time::timeout(Duration::from_millis(10), &mut waiter).await;
        assert!(waited.is_err());

        drop(holder);
        assert_eq!(locks.active(), 1);
        drop(waiter);
        assert_eq!(locks.active(), 0);
    }

    #[tokio::test]
    async fn test_waiter_cancelled_while_holder_active() {
        let locks = CandidateLocks::new();
        let id = Uuid::new_v4();
        let holder = locks.acquire(id).await;

        let waited = tokio::time::timeout(Duration::from_millis(10), locks.acquire(id)).await;
        assert!(waited.is_err());
        assert_eq!(locks.active(), 1);

        drop(holder);
        assert_eq!(locks.active(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_at_most_one_holder_per_candidate() {
        let locks = Arc::new(CandidateLocks::new());
        let id = Uuid::new_v4();
        let inside = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = locks.clone();
            let inside = inside.clone();
            let peak = peak.clone();
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire(id).await;
                let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(2)).await;
                inside.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(peak.load(Ordering::SeqCst), 1);
        assert_eq!(locks.active(), 0);
    }
}
