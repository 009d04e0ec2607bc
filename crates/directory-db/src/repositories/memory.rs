//! In-process implementation of UserRepository
//!
//! Keeps records in a map behind an async lock. Used by service and router
//! tests, and handy for running the API without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::instrument;

use directory_core::entities::User;
use directory_core::error::DomainError;
use directory_core::query::{PageRequest, UserFilter};
use directory_core::schema::UserPatch;
use directory_core::traits::{RepoResult, UpdateOutcome, UserRepository};
use directory_core::value_objects::RecordId;

use super::error::user_not_found;

/// In-memory implementation of UserRepository
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<RecordId, User>>,
    offline: AtomicBool,
    stale_email_checks: AtomicBool,
}

impl InMemoryUserRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate losing (or regaining) the store; every call fails while offline
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Make `email_taken` always answer "free", as a lookup that raced a
    /// concurrent write would. Writes still enforce uniqueness.
    pub fn set_stale_email_checks(&self, stale: bool) {
        self.stale_email_checks.store(stale, Ordering::SeqCst);
    }

    fn check_online(&self) -> RepoResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError(
                "in-memory store is offline".to_string(),
            ));
        }
        Ok(())
    }
}

fn email_held_by_other(users: &HashMap<RecordId, User>, email: &str, exclude: Option<RecordId>) -> bool {
    users
        .values()
        .any(|u| u.email == email && Some(u.id) != exclude)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<User>> {
        self.check_online()?;
        Ok(self.users.read().await.get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_page(&self, filter: &UserFilter, page: &PageRequest) -> RepoResult<Vec<User>> {
        self.check_online()?;
        let users = self.users.read().await;

        let mut matching: Vec<&User> = users.values().filter(|u| filter.matches(u)).collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let skip = usize::try_from(page.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit).unwrap_or(0);

        Ok(matching
            .into_iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &UserFilter) -> RepoResult<i64> {
        self.check_online()?;
        let users = self.users.read().await;
        Ok(users.values().filter(|u| filter.matches(u)).count() as i64)
    }

    #[instrument(skip(self))]
    async fn email_taken(&self, email: &str, exclude: Option<RecordId>) -> RepoResult<bool> {
        self.check_online()?;
        if self.stale_email_checks.load(Ordering::SeqCst) {
            return Ok(false);
        }
        Ok(email_held_by_other(&*self.users.read().await, email, exclude))
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: &User) -> RepoResult<()> {
        self.check_online()?;
        let mut users = self.users.write().await;

        // Same guarantee as the unique index: check and insert under one lock
        if email_held_by_other(&users, &user.email, None) {
            return Err(DomainError::EmailAlreadyExists);
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    #[instrument(skip(self, patch))]
    async fn update_fields(&self, id: RecordId, patch: &UserPatch) -> RepoResult<UpdateOutcome> {
        self.check_online()?;
        let mut users = self.users.write().await;

        if !users.contains_key(&id) {
            return Err(user_not_found(id));
        }
        if let Some(email) = patch.email.as_deref() {
            if email_held_by_other(&users, email, Some(id)) {
                return Err(DomainError::EmailAlreadyExists);
            }
        }

        let user = users.get_mut(&id).ok_or_else(|| user_not_found(id))?;
        let changed = patch.apply_to(user);
        Ok(UpdateOutcome {
            user: user.clone(),
            changed,
        })
    }

    #[instrument(skip(self))]
    async fn set_active(&self, id: RecordId, active: bool) -> RepoResult<UpdateOutcome> {
        self.check_online()?;
        let mut users = self.users.write().await;

        let user = users.get_mut(&id).ok_or_else(|| user_not_found(id))?;
        let changed = user.set_active(active);
        Ok(UpdateOutcome {
            user: user.clone(),
            changed,
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        self.check_online()?;
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| user_not_found(id))
    }

    async fn ping(&self) -> RepoResult<()> {
        self.check_online()
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
