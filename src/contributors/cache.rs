use crate::contributors::buckets::RepositoryBuckets;
use crate::Result;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

type Slot = Arc<Mutex<Option<Arc<RepositoryBuckets>>>>;

/// Process-lifetime cache of bucketed contributors, keyed by repository name.
///
/// Each repository has its own slot lock which is held while the slot is
/// being populated, so two requests for the same repository never resolve
/// concurrently and never interleave writes. Entries are only ever replaced
/// whole; there is no eviction.
#[derive(Clone, Default)]
pub struct ContributorCache {
    slots: Arc<RwLock<HashMap<String, Slot>>>,
}

impl ContributorCache {
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, repository: &str) -> Slot {
        if let Some(slot) = self.slots.read().await.get(repository) {
            return slot.clone();
        }

        self.slots
            .write()
            .await
            .entry(repository.to_string())
            .or_default()
            .clone()
    }

    /// Return the cached structure, running `populate` first on a miss or when
    /// `refetch` is set. A failed population leaves the previous entry intact.
    pub async fn get_or_populate<F, Fut>(
        &self,
        repository: &str,
        refetch: bool,
        populate: F,
    ) -> Result<Arc<RepositoryBuckets>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<RepositoryBuckets>>,
    {
        let slot = self.slot(repository).await;
        let mut entry = slot.lock().await;

        if !refetch {
            if let Some(cached) = entry.as_ref() {
                debug!("Contributor cache hit for {}", repository);
                return Ok(cached.clone());
            }
        }

        debug!(
            "Contributor cache {} for {}",
            if refetch { "refetch" } else { "miss" },
            repository
        );

        let fresh = Arc::new(populate().await?);
        *entry = Some(fresh.clone());
        Ok(fresh)
    }

    /// Cached structure for a repository, if one has been stored
    pub async fn get(&self, repository: &str) -> Option<Arc<RepositoryBuckets>> {
        let slot = self.slots.read().await.get(repository).cloned()?;
        let entry = slot.lock().await;
        entry.clone()
    }

    /// Number of repositories with a stored structure
    pub async fn len(&self) -> usize {
        let slots: Vec<Slot> = self.slots.read().await.values().cloned().collect();
        let mut count = 0;
        for slot in slots {
            if slot.lock().await.is_some() {
                count += 1;
            }
        }
        count
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
