use super::snapshot::RateSnapshot;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Single-slot holder of the most recently fetched snapshot.
///
/// The slot is shared by every chat: there is one live snapshot per process. Handlers keep
/// the guard from [`SnapshotCache::lock`] for the whole check, refresh and render sequence
/// so two events never interleave a stale read with a write.
#[derive(Clone, Default)]
pub struct SnapshotCache {
    inner: Arc<Mutex<RateSnapshot>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: RateSnapshot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(snapshot)),
        }
    }

    pub async fn lock(&self) -> SnapshotGuard<'_> {
        SnapshotGuard {
            slot: self.inner.lock().await,
        }
    }

    pub async fn get(&self) -> RateSnapshot {
        self.inner.lock().await.clone()
    }
}

pub struct SnapshotGuard<'a> {
    slot: MutexGuard<'a, RateSnapshot>,
}

impl SnapshotGuard<'_> {
    pub fn snapshot(&self) -> &RateSnapshot {
        &self.slot
    }

    /// Whether the cached snapshot already covers `date`.
    pub fn holds(&self, date: NaiveDate) -> bool {
        let hit = self.slot.date == date;
        if hit {
            debug!(%date, "Cache HIT");
        } else {
            debug!(%date, cached = %self.slot.date, "Cache MISS");
        }
        hit
    }

    pub fn replace(&mut self, snapshot: RateSnapshot) {
        debug!(date = %snapshot.date, "Cache PUT");
        *self.slot = snapshot;
    }
}
