//! Message-count cache over the per-workspace metadata document
//!
//! A workspace's document is read from the store at most once per load
//! generation, no matter how many requests arrive while the read is pending.
//! Counts for channels missing from the document are computed on demand
//! (again at most once per channel at a time), committed onto the current
//! snapshot and written back through the store.
//!
//! Loads and counts run as spawned tasks, so they finish and write back even
//! when every caller stops waiting.
//!
//! Snapshots are immutable `Arc<WorkspaceMetadata>` values. The bookkeeping
//! lock is only held for synchronous check-and-update steps; store writes
//! for a workspace are serialized by its write gate and always write the
//! snapshot current at the time of the write.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::{join_all, BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tracing::instrument;

use archive_core::{
    ChannelKey, ChannelLoader, ChannelMetadata, DomainError, MetadataStore, WorkspaceMetadata,
};

use super::pages::count_channel_messages;
use crate::error::{CacheError, CacheResult};

type LoadFlight = Shared<BoxFuture<'static, CacheResult<Loaded>>>;
type CountFlight = Shared<BoxFuture<'static, CacheResult<MessageCount>>>;

/// Where a returned count came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountSource {
    /// Read from the loaded metadata snapshot
    Cached,
    /// Computed from the channel's pages by this or a concurrent request
    Computed,
}

/// Result of a count lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCount {
    pub count: u64,
    pub source: CountSource,
    /// Set when the count was computed but could not be written back
    pub persist_error: Option<CacheError>,
}

impl MessageCount {
    fn cached(count: u64) -> Self {
        Self {
            count,
            source: CountSource::Cached,
            persist_error: None,
        }
    }

    fn computed(count: u64, persist_error: Option<CacheError>) -> Self {
        Self {
            count,
            source: CountSource::Computed,
            persist_error,
        }
    }

    #[inline]
    pub fn is_cached(&self) -> bool {
        self.source == CountSource::Cached
    }

    /// Whether the value is durable (cached, or computed and written back)
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.persist_error.is_none()
    }
}

#[derive(Debug, Clone)]
struct Loaded {
    epoch: u64,
    snapshot: Arc<WorkspaceMetadata>,
}

/// Bookkeeping for one workspace
struct WorkspaceState {
    /// Identifies this load generation; a full clear starts a new one
    epoch: u64,
    snapshot: Option<Arc<WorkspaceMetadata>>,
    loading: Option<LoadFlight>,
    /// In-flight counts with the id of the flight that owns the slot
    counting: HashMap<ChannelKey, (u64, CountFlight)>,
    write_gate: Arc<tokio::sync::Mutex<()>>,
}

impl WorkspaceState {
    fn new(epoch: u64) -> Self {
        Self {
            epoch,
            snapshot: None,
            loading: None,
            counting: HashMap::new(),
            write_gate: Arc::new(tokio::sync::Mutex::new(())),
        }
    }
}

struct CacheInner {
    store: Arc<dyn MetadataStore>,
    loader: Arc<dyn ChannelLoader>,
    workspaces: Mutex<HashMap<String, WorkspaceState>>,
    last_error: Mutex<Option<CacheError>>,
    next_id: AtomicU64,
}

/// Per-workspace message-count cache
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct CountCache {
    inner: Arc<CacheInner>,
}

impl CountCache {
    /// Create a new CountCache over the given store and loader
    pub fn new(store: Arc<dyn MetadataStore>, loader: Arc<dyn ChannelLoader>) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                store,
                loader,
                workspaces: Mutex::new(HashMap::new()),
                last_error: Mutex::new(None),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Message count for `channel` in `workspace`
    ///
    /// Loads the workspace document on first use. A channel missing from the
    /// document is counted from its pages and written back; a failed write
    /// still returns the count, with `persist_error` set.
    #[instrument(skip(self))]
    pub async fn get_message_count(
        &self,
        workspace: &str,
        channel: &str,
    ) -> CacheResult<MessageCount> {
        let key = ChannelKey::new(channel);
        if key.is_empty() {
            return Err(self.inner.skip(CacheError::Count {
                workspace: workspace.to_string(),
                channel: channel.to_string(),
                source: DomainError::InvalidIdentifier(channel.to_string()),
            }));
        }

        let loaded = self.ensure_loaded(workspace).await?;
        if let Some(entry) = loaded.snapshot.get(&key) {
            tracing::debug!(workspace = %workspace, channel = %key, count = entry.message_count, "count cache hit");
            return Ok(MessageCount::cached(entry.message_count));
        }

        let flight = {
            let mut workspaces = self.inner.workspaces.lock();
            match workspaces
                .get_mut(workspace)
                .filter(|state| state.epoch == loaded.epoch)
            {
                Some(state) => {
                    // another flight may have committed since the snapshot was taken
                    if let Some(entry) = state.snapshot.as_ref().and_then(|s| s.get(&key)) {
                        return Ok(MessageCount::cached(entry.message_count));
                    }
                    if let Some((_, flight)) = state.counting.get(&key) {
                        tracing::debug!(workspace = %workspace, channel = %key, "joining in-flight count");
                        flight.clone()
                    } else {
                        let id = self.inner.next_id();
                        let flight = self.count_flight(workspace, &key, loaded.epoch, id);
                        state.counting.insert(key.clone(), (id, flight.clone()));
                        flight
                    }
                }
                // cleared after loading: count, but leave nothing behind
                None => self.count_flight(workspace, &key, loaded.epoch, 0),
            }
        };

        flight.await
    }

    /// Counts for several channels; each result is independent
    #[instrument(skip(self, channels), fields(channels = channels.len()))]
    pub async fn get_message_counts(
        &self,
        workspace: &str,
        channels: &[String],
    ) -> Vec<(String, CacheResult<MessageCount>)> {
        let results = join_all(
            channels
                .iter()
                .map(|channel| self.get_message_count(workspace, channel)),
        )
        .await;

        channels.iter().cloned().zip(results).collect()
    }

    /// Cached entry for a channel, without loading or counting
    pub fn cached_entry(&self, workspace: &str, channel: &str) -> Option<ChannelMetadata> {
        let key = ChannelKey::new(channel);
        self.snapshot(workspace)
            .and_then(|snapshot| snapshot.get(&key).cloned())
    }

    /// Current snapshot of a loaded workspace
    pub fn snapshot(&self, workspace: &str) -> Option<Arc<WorkspaceMetadata>> {
        self.inner
            .workspaces
            .lock()
            .get(workspace)
            .and_then(|state| state.snapshot.clone())
    }

    pub fn is_loaded(&self, workspace: &str) -> bool {
        self.snapshot(workspace).is_some()
    }

    #[cfg(test)]
    pub(crate) fn tracked_workspaces(&self) -> usize {
        self.inner.workspaces.lock().len()
    }

    /// Most recent load or persist failure, cleared by the next successful one
    pub fn last_error(&self) -> Option<CacheError> {
        self.inner.last_error.lock().clone()
    }

    // ========================================================================
    // Invalidation
    // ========================================================================

    /// Forget cached counts
    ///
    /// With a channel, removes that channel's entry and writes the document
    /// back; nothing happens if the workspace was never loaded. Without a
    /// channel, forgets the whole workspace so the next request reloads it
    /// from the store; nothing is written.
    #[instrument(skip(self))]
    pub async fn clear_metadata(&self, workspace: &str, channel: Option<&str>) -> CacheResult<()> {
        let Some(channel) = channel else {
            let removed = self.inner.workspaces.lock().remove(workspace).is_some();
            self.inner.loader.clear_cache();
            tracing::info!(workspace = %workspace, removed, "workspace metadata cleared");
            return Ok(());
        };

        let key = ChannelKey::new(channel);
        self.inner.loader.forget_listing(workspace, key.as_str());
        let target = {
            let mut workspaces = self.inner.workspaces.lock();
            match workspaces.get_mut(workspace) {
                Some(state) => match state.snapshot.take() {
                    Some(snapshot) => {
                        state.snapshot = Some(Arc::new(snapshot.without_channel(&key)));
                        state.counting.remove(&key);
                        Some((state.epoch, Arc::clone(&state.write_gate)))
                    }
                    None => None,
                },
                None => None,
            }
        };

        let Some((epoch, gate)) = target else {
            tracing::debug!(workspace = %workspace, channel = %key, "workspace not loaded, nothing to clear");
            return Ok(());
        };

        tracing::info!(workspace = %workspace, channel = %key, "channel count cleared");
        self.inner.persist(workspace, epoch, &gate).await
    }

    // ========================================================================
    // Single-flight plumbing
    // ========================================================================

    async fn ensure_loaded(&self, workspace: &str) -> CacheResult<Loaded> {
        let flight = {
            let mut workspaces = self.inner.workspaces.lock();
            let state = workspaces
                .entry(workspace.to_string())
                .or_insert_with(|| WorkspaceState::new(self.inner.next_id()));

            if let Some(snapshot) = &state.snapshot {
                return Ok(Loaded {
                    epoch: state.epoch,
                    snapshot: Arc::clone(snapshot),
                });
            }

            match &state.loading {
                Some(flight) => flight.clone(),
                None => {
                    let flight = self.load_flight(workspace, state.epoch);
                    state.loading = Some(flight.clone());
                    flight
                }
            }
        };

        flight.await
    }

    fn load_flight(&self, workspace: &str, epoch: u64) -> LoadFlight {
        let inner = Arc::clone(&self.inner);
        let workspace = workspace.to_string();
        let task = tokio::spawn(load_workspace(Arc::clone(&inner), workspace.clone(), epoch));

        async move {
            match task.await {
                Ok(result) => result,
                Err(join_error) => {
                    inner.drop_workspace(&workspace, epoch);
                    Err(inner.fail(CacheError::Load {
                        workspace,
                        source: DomainError::InternalError(join_error.to_string()),
                    }))
                }
            }
        }
        .boxed()
        .shared()
    }

    fn count_flight(&self, workspace: &str, key: &ChannelKey, epoch: u64, id: u64) -> CountFlight {
        let inner = Arc::clone(&self.inner);
        let workspace = workspace.to_string();
        let key = key.clone();
        let task = tokio::spawn(count_and_commit(
            Arc::clone(&inner),
            workspace.clone(),
            key.clone(),
            epoch,
            id,
        ));

        async move {
            match task.await {
                Ok(result) => result,
                Err(join_error) => {
                    inner.release_count(&workspace, &key, epoch, id);
                    Err(inner.skip(CacheError::Count {
                        workspace,
                        channel: String::from(key),
                        source: DomainError::InternalError(join_error.to_string()),
                    }))
                }
            }
        }
        .boxed()
        .shared()
    }
}

impl CacheInner {
    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Log a channel-level failure that leaves the cache untouched
    fn skip(&self, err: CacheError) -> CacheError {
        tracing::warn!(workspace = %err.workspace(), error = %err, "message count failed");
        err
    }

    /// Log and remember a load or persist failure, handing it back to the caller
    fn fail(&self, err: CacheError) -> CacheError {
        tracing::warn!(workspace = %err.workspace(), stage = err.stage(), error = %err, "count cache failure");
        *self.last_error.lock() = Some(err.clone());
        err
    }

    fn recovered(&self) {
        self.last_error.lock().take();
    }

    /// Forget a workspace whose load generation `epoch` failed
    fn drop_workspace(&self, workspace: &str, epoch: u64) {
        let mut workspaces = self.workspaces.lock();
        if workspaces
            .get(workspace)
            .is_some_and(|state| state.epoch == epoch)
        {
            workspaces.remove(workspace);
        }
    }

    /// Free a count slot still owned by flight `id`
    fn release_count(&self, workspace: &str, key: &ChannelKey, epoch: u64, id: u64) {
        let mut workspaces = self.workspaces.lock();
        if let Some(state) = workspaces
            .get_mut(workspace)
            .filter(|state| state.epoch == epoch)
        {
            if state.counting.get(key).map(|(owner, _)| *owner) == Some(id) {
                state.counting.remove(key);
            }
        }
    }

    /// Write the workspace's current snapshot, one writer at a time
    async fn persist(
        &self,
        workspace: &str,
        epoch: u64,
        gate: &tokio::sync::Mutex<()>,
    ) -> CacheResult<()> {
        let _guard = gate.lock().await;

        let snapshot = self
            .workspaces
            .lock()
            .get(workspace)
            .filter(|state| state.epoch == epoch)
            .and_then(|state| state.snapshot.clone());

        let Some(snapshot) = snapshot else {
            tracing::debug!(workspace = %workspace, "workspace cleared before write, skipped");
            return Ok(());
        };

        self.store
            .write(workspace, &snapshot)
            .await
            .map_err(|source| {
                self.fail(CacheError::Persist {
                    workspace: workspace.to_string(),
                    source,
                })
            })?;

        self.recovered();
        tracing::debug!(workspace = %workspace, channels = snapshot.len(), "metadata persisted");
        Ok(())
    }
}

async fn load_workspace(
    inner: Arc<CacheInner>,
    workspace: String,
    epoch: u64,
) -> CacheResult<Loaded> {
    tracing::debug!(workspace = %workspace, "loading channel metadata");
    let result = inner.store.read(&workspace).await;

    let snapshot = match result {
        Ok(document) => Arc::new(document.unwrap_or_default()),
        Err(source) => {
            // the next request starts over
            inner.drop_workspace(&workspace, epoch);
            return Err(inner.fail(CacheError::Load { workspace, source }));
        }
    };

    {
        let mut workspaces = inner.workspaces.lock();
        if let Some(state) = workspaces
            .get_mut(&workspace)
            .filter(|state| state.epoch == epoch)
        {
            state.loading = None;
            state.snapshot = Some(Arc::clone(&snapshot));
        }
    }

    inner.recovered();
    tracing::info!(workspace = %workspace, channels = snapshot.len(), "channel metadata loaded");
    Ok(Loaded { epoch, snapshot })
}

async fn count_and_commit(
    inner: Arc<CacheInner>,
    workspace: String,
    key: ChannelKey,
    epoch: u64,
    id: u64,
) -> CacheResult<MessageCount> {
    // directories are addressed by the normalized name
    let counted = count_channel_messages(inner.loader.as_ref(), &workspace, key.as_str()).await;

    let gate = {
        let mut workspaces = inner.workspaces.lock();
        let state = workspaces
            .get_mut(&workspace)
            .filter(|state| state.epoch == epoch);

        match state {
            Some(state) if state.counting.get(&key).map(|(owner, _)| *owner) == Some(id) => {
                state.counting.remove(&key);
                match &counted {
                    Ok(count) => {
                        let base = state.snapshot.clone().unwrap_or_default();
                        let entry = ChannelMetadata::counted_now(*count);
                        state.snapshot = Some(Arc::new(base.with_channel(key.clone(), entry)));
                        Some(Arc::clone(&state.write_gate))
                    }
                    Err(_) => None,
                }
            }
            _ => None,
        }
    };

    let count = counted.map_err(|source| {
        inner.skip(CacheError::Count {
            workspace: workspace.clone(),
            channel: key.to_string(),
            source,
        })
    })?;

    let Some(gate) = gate else {
        tracing::debug!(workspace = %workspace, channel = %key, "cleared while counting, result not cached");
        return Ok(MessageCount::computed(count, None));
    };

    let persist_error = inner.persist(&workspace, epoch, &gate).await.err();
    Ok(MessageCount::computed(count, persist_error))
}
