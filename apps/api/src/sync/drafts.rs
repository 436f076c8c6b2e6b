//! Debounced draft persistence.
//!
//! Editors push whole documents on every change. Each resume gets its own
//! debouncer, so only the last document of a burst is written, once the
//! editor has been quiet for `DRAFT_SYNC_QUIET_MS`. A written draft is
//! forgotten unless a newer one arrived during the write. Explicit saves and
//! deletes cancel the pending draft, waiting out a write already in flight,
//! so a stale write never lands after them; reorders `take` the latest draft
//! and apply to it instead of the stored copy.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::models::resume::ResumeDocument;
use crate::resumes::store::ResumeStore;
use crate::sync::debounce::Debouncer;

type Pending = Mutex<HashMap<Uuid, Draft>>;

struct Draft {
    debouncer: Debouncer<(u64, ResumeDocument)>,
    latest: ResumeDocument,
    /// Bumped on every push; the writer only forgets the draft it wrote.
    generation: u64,
}

#[derive(Clone)]
pub struct DraftSync {
    quiet: Duration,
    store: Arc<dyn ResumeStore>,
    pending: Arc<Pending>,
}

impl DraftSync {
    pub fn new(store: Arc<dyn ResumeStore>, quiet: Duration) -> Self {
        Self {
            quiet,
            store,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Queues `document` as the latest draft of resume `id`.
    pub fn push(&self, id: Uuid, document: ResumeDocument) {
        let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        let draft = pending.entry(id).or_insert_with(|| Draft {
            debouncer: self.spawn_writer(id),
            latest: ResumeDocument::default(),
            generation: 0,
        });
        draft.generation += 1;
        draft.latest = document.clone();
        draft.debouncer.push((draft.generation, document));
    }

    fn spawn_writer(&self, id: Uuid) -> Debouncer<(u64, ResumeDocument)> {
        let store = Arc::clone(&self.store);
        let pending = Arc::downgrade(&self.pending);
        Debouncer::spawn(self.quiet, move |(generation, doc): (u64, ResumeDocument)| {
            let store = Arc::clone(&store);
            let pending = pending.clone();
            async move {
                match store.update_document(id, &doc).await {
                    Ok(true) => debug!("Draft of resume {id} persisted"),
                    Ok(false) => warn!("Draft of resume {id} dropped: resume no longer exists"),
                    Err(e) => {
                        // Kept pending so a later reorder still sees the edits.
                        error!("Draft of resume {id} failed to persist: {e}");
                        return;
                    }
                }
                forget_written(&pending, id, generation);
            }
        })
    }

    /// Stops syncing resume `id` and returns its latest unsaved document, if
    /// any. Returns once a write already in flight has finished.
    pub async fn take(&self, id: Uuid) -> Option<ResumeDocument> {
        let removed = self
            .pending
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .remove(&id)?;
        removed.debouncer.shutdown().await;
        debug!("Stopped draft sync of resume {id}");
        Some(removed.latest)
    }

    /// Discards any pending draft of resume `id`. Returns whether one was tracked.
    pub async fn cancel(&self, id: Uuid) -> bool {
        self.take(id).await.is_some()
    }

    /// Number of resumes with an unsaved draft.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().unwrap_or_else(|p| p.into_inner()).len()
    }
}

fn forget_written(pending: &Weak<Pending>, id: Uuid, generation: u64) {
    let Some(pending) = pending.upgrade() else {
        return;
    };
    let mut pending = pending.lock().unwrap_or_else(|p| p.into_inner());
    if pending.get(&id).is_some_and(|d| d.generation == generation) {
        // Dropping the entry ends this writer's own task.
        pending.remove(&id);
    }
}
