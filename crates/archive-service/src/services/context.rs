//! Service context - dependency container for services
//!
//! Holds the count cache and the channel loader needed by services.

use std::sync::Arc;

use archive_cache::CountCache;
use archive_core::{ChannelLoader, MetadataStore};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Built once by the composition root and shared by reference with every
/// service.
#[derive(Clone)]
pub struct ServiceContext {
    count_cache: CountCache,
    loader: Arc<dyn ChannelLoader>,
}

impl ServiceContext {
    /// Create a new service context over a store and loader
    pub fn new(store: Arc<dyn MetadataStore>, loader: Arc<dyn ChannelLoader>) -> Self {
        Self {
            count_cache: CountCache::new(store, Arc::clone(&loader)),
            loader,
        }
    }

    /// Get the message-count cache
    pub fn count_cache(&self) -> &CountCache {
        &self.count_cache
    }

    /// Get the channel loader
    pub fn loader(&self) -> &dyn ChannelLoader {
        self.loader.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("count_cache", &"CountCache")
            .field("loader", &"dyn ChannelLoader")
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    store: Option<Arc<dyn MetadataStore>>,
    loader: Option<Arc<dyn ChannelLoader>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: Arc<dyn MetadataStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn loader(mut self, loader: Arc<dyn ChannelLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.store
                .ok_or_else(|| ServiceError::validation("store is required"))?,
            self.loader
                .ok_or_else(|| ServiceError::validation("loader is required"))?,
        ))
    }
}
