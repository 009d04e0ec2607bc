//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::User;
use crate::error::DomainError;
use crate::query::{PageRequest, UserFilter};
use crate::schema::UserPatch;
use crate::value_objects::RecordId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Connection pool figures reported by detailed health checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub size: u32,
    pub idle: u32,
}

/// Record as stored after a write, and whether the write changed it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub user: User,
    pub changed: bool,
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<User>>;

    /// One page of matching users, newest first (ties broken by id, newest first)
    async fn find_page(&self, filter: &UserFilter, page: &PageRequest) -> RepoResult<Vec<User>>;

    /// Count users matching a filter
    async fn count(&self, filter: &UserFilter) -> RepoResult<i64>;

    /// Check if an email is held by any user other than `exclude`
    async fn email_taken(&self, email: &str, exclude: Option<RecordId>) -> RepoResult<bool>;

    /// Insert a new user.
    ///
    /// Fails with `EmailAlreadyExists` when the email is already stored.
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Write the fields named by `patch` in one atomic step.
    ///
    /// Fields the patch leaves out are never written, so concurrent writes to
    /// other fields survive. `updated_at` only moves when a value changed.
    /// Fails with `UserNotFound` when the record is gone and with
    /// `EmailAlreadyExists` when the new email collides.
    async fn update_fields(&self, id: RecordId, patch: &UserPatch) -> RepoResult<UpdateOutcome>;

    /// Set the active flag in one atomic step.
    ///
    /// A redundant transition reports `changed: false` and leaves
    /// `updated_at` alone. Fails with `UserNotFound` when absent.
    async fn set_active(&self, id: RecordId, active: bool) -> RepoResult<UpdateOutcome>;

    /// Hard delete a user, failing with `UserNotFound` when absent
    async fn delete(&self, id: RecordId) -> RepoResult<()>;

    /// Check the store is reachable
    async fn ping(&self) -> RepoResult<()>;

    /// Short name of the storage backend
    fn backend(&self) -> &'static str;

    /// Pool figures, when the backend has a pool
    fn pool_stats(&self) -> Option<PoolStats> {
        None
    }
}
