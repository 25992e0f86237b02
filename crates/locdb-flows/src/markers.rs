//! Detached marker placement.
//!
//! Marker creation is best-effort: the entry flow spawns it and moves on
//! without awaiting the result. A failed marker is logged and otherwise
//! lost; the note is written regardless.
//!
//! The task handles are parked in [`PendingMarkers`] only so a short-lived
//! process can give in-flight requests a grace period before the runtime
//! shuts down. The flows themselves never wait on them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use locdb_core::{Coordinates, MapProvisioner};
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Set of in-flight marker requests.
#[derive(Clone, Default)]
pub struct PendingMarkers {
    tasks: Arc<Mutex<JoinSet<()>>>,
}

impl PendingMarkers {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, JoinSet<()>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fire a marker request and return immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        &self,
        provisioner: Arc<dyn MapProvisioner>,
        map_id: String,
        coordinates: Coordinates,
    ) {
        let mut tasks = self.lock();
        // Reap finished tasks so the set does not grow across a repair pass.
        while tasks.try_join_next().is_some() {}
        tasks.spawn(async move {
            match provisioner.create_marker(&map_id, &coordinates).await {
                Ok(()) => debug!(map_id = %map_id, "Marker created"),
                Err(e) => warn!(
                    map_id = %map_id,
                    error = ?e,
                    "Marker creation failed; entry kept without marker"
                ),
            }
        });
    }

    /// Number of marker requests not yet reaped.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wait up to `grace` for in-flight requests, then abort the rest.
    ///
    /// Returns the number of requests that were still running at the deadline.
    pub async fn drain(&self, grace: Duration) -> usize {
        let mut tasks = std::mem::take(&mut *self.lock());
        if tasks.is_empty() {
            return 0;
        }
        debug!(pending = tasks.len(), "Waiting for marker requests");

        let finished = tokio::time::timeout(grace, async {
            while tasks.join_next().await.is_some() {}
        })
        .await;

        if finished.is_err() {
            let abandoned = tasks.len();
            warn!(
                abandoned,
                grace_secs = grace.as_secs(),
                "Marker requests still running at exit; abandoning"
            );
            tasks.abort_all();
            return abandoned;
        }
        0
    }
}
