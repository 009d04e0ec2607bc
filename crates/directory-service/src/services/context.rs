//! Service context - dependency container for services
//!
//! Holds the repository, the id generator and process facts that services need.

use std::sync::Arc;
use std::time::{Duration, Instant};

use directory_core::traits::UserRepository;
use directory_core::{IdGenerator, RecordId};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the dependency container that gets passed to all services.
/// It provides access to:
/// - The user repository (storage handle opened once at startup)
/// - The record id generator
/// - Environment name and process start time for health reporting
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    id_generator: Arc<IdGenerator>,
    environment: String,
    started_at: Instant,
}

impl ServiceContext {
    /// Create a new service context
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        id_generator: Arc<IdGenerator>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            user_repo,
            id_generator,
            environment: environment.into(),
            started_at: Instant::now(),
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    // === Services ===

    /// Get the record id generator
    pub fn id_generator(&self) -> &IdGenerator {
        self.id_generator.as_ref()
    }

    /// Generate a new record id
    pub fn generate_id(&self) -> RecordId {
        self.id_generator.generate()
    }

    // === Process ===

    /// Deployment environment name
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Time since the context was built
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("user_repo", &self.user_repo.backend())
            .field("worker_id", &self.id_generator.worker_id())
            .field("environment", &self.environment)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    id_generator: Option<Arc<IdGenerator>>,
    environment: String,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            user_repo: None,
            id_generator: None,
            environment: "development".to_string(),
        }
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn id_generator(mut self, generator: Arc<IdGenerator>) -> Self {
        self.id_generator = Some(generator);
        self
    }

    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Build the ServiceContext
    ///
    /// A missing id generator falls back to worker 0.
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if the user repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::internal("user_repo is required"))?,
            self.id_generator.unwrap_or_default(),
            self.environment,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
