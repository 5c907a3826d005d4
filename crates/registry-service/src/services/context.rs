//! Service context - dependency container for services
//!
//! Holds the user repository and the optional event sink.

use std::sync::Arc;

use registry_core::traits::UserRepository;
use registry_core::DomainEvent;

use crate::sink::UserEventSink;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cheap to clone; every field is shared.
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    sink: Option<Arc<dyn UserEventSink>>,
}

impl ServiceContext {
    /// Create a context without a sink
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self {
            user_repo,
            sink: None,
        }
    }

    /// Start a builder
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Whether an event sink is attached
    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Forward an event to the sink, if any
    pub fn publish(&self, event: DomainEvent) {
        if let Some(sink) = &self.sink {
            sink.publish(event);
        }
    }

    /// True when the store answers a ping
    pub async fn store_ready(&self) -> bool {
        match self.user_repo.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Store ping failed");
                false
            }
        }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("user_repo", &"dyn UserRepository")
            .field("sink", &self.sink.as_ref().map(|_| "dyn UserEventSink"))
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    sink: Option<Arc<dyn UserEventSink>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn sink(mut self, sink: Arc<dyn UserEventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Build the context
    ///
    /// # Errors
    /// Returns an error if the user repository was not set
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::internal("user_repo is required"))?,
            sink: self.sink,
        })
    }
}
