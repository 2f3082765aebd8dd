use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, error};

use super::ProjectStore;
use crate::error::StorageResult;
use crate::model::Project;

/// Coalesces rapid edits to one project into a single deferred write.
///
/// Each [`queue`](DebouncedSaver::queue) supersedes any earlier pending
/// write; the write fires once the configured quiet period passes without a
/// newer queue. [`flush`](DebouncedSaver::flush) persists any pending write
/// immediately and is the screen-exit path.
///
/// Callers keep editing the copy of the project they loaded, so a snapshot
/// queued after an earlier autosave fired still carries the pre-save
/// version. The saver remembers the version it last persisted per project
/// and rebases such snapshots onto it before writing; a version bumped by
/// anyone else still fails the update as stale.
pub struct DebouncedSaver {
    store: Arc<ProjectStore>,
    delay: Duration,
    pending: Arc<Mutex<Option<Project>>>,
    generation: Arc<AtomicU64>,
    last_saved: Arc<Mutex<Option<(String, u64)>>>,
}

impl DebouncedSaver {
    /// Create a saver over the given store with the given quiet period.
    pub fn new(store: Arc<ProjectStore>, delay: Duration) -> Self {
        Self {
            store,
            delay,
            pending: Arc::new(Mutex::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
            last_saved: Arc::new(Mutex::new(None)),
        }
    }

    /// Queue a project snapshot for a deferred write, replacing any pending
    /// snapshot.
    pub async fn queue(&self, project: Project) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.pending.lock().await = Some(project);

        let store = Arc::clone(&self.store);
        let pending = Arc::clone(&self.pending);
        let latest = Arc::clone(&self.generation);
        let last_saved = Arc::clone(&self.last_saved);
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // A newer queue or a flush superseded this timer.
            if latest.load(Ordering::SeqCst) != generation {
                return;
            }
            let snapshot = pending.lock().await.take();
            if let Some(project) = snapshot {
                debug!(project_id = %project.id, "Debounce window elapsed, saving");
                if let Err(e) = persist(&store, &last_saved, project).await {
                    error!(error = %e, "Debounced save failed");
                }
            }
        });
    }

    /// Persist any pending snapshot immediately. Returns the project as
    /// persisted, or `None` when nothing was pending.
    pub async fn flush(&self) -> StorageResult<Option<Project>> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let snapshot = self.pending.lock().await.take();
        match snapshot {
            Some(project) => Ok(Some(persist(&self.store, &self.last_saved, project).await?)),
            None => Ok(None),
        }
    }

    /// Whether a snapshot is waiting for its quiet period to elapse.
    pub async fn has_pending(&self) -> bool {
        self.pending.lock().await.is_some()
    }
}

/// Write a snapshot, first rebasing its version onto the one this saver
/// last persisted for the same project.
async fn persist(
    store: &ProjectStore,
    last_saved: &Mutex<Option<(String, u64)>>,
    mut project: Project,
) -> StorageResult<Project> {
    {
        let guard = last_saved.lock().await;
        if let Some((id, version)) = guard.as_ref() {
            if *id == project.id && project.version < *version {
                project.version = *version;
            }
        }
    }
    let saved = store.update(project).await?;
    *last_saved.lock().await = Some((saved.id.clone(), saved.version));
    Ok(saved)
}
