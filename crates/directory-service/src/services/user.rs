//! User service
//!
//! Listing, lookup, creation, partial update, activation and deletion of
//! user records.

use directory_core::entities::User;
use directory_core::query::{PageMeta, PageRequest, UserFilter};
use directory_core::schema::{normalize_new, normalize_patch, UserCandidate};
use directory_core::RecordId;
use tracing::{info, instrument};

use crate::dto::{
    CreateUserRequest, DeletedUserResponse, ListUsersQuery, StatusChange, UpdateUserRequest,
    UserPage, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List users, newest first, with optional search and active filter
    #[instrument(skip(self))]
    pub async fn list_users(&self, query: ListUsersQuery) -> ServiceResult<UserPage> {
        let filter = UserFilter::from_raw(query.search.as_deref(), query.active.as_deref());
        let page = PageRequest::from_raw(query.page.as_deref(), query.limit.as_deref());

        let repo = self.ctx.user_repo();
        let users = repo.find_page(&filter, &page).await?;
        let total = repo.count(&filter).await?;

        Ok(UserPage {
            users: users.iter().map(UserResponse::from).collect(),
            pagination: PageMeta::new(&page, total).into(),
        })
    }

    /// Get user by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: RecordId) -> ServiceResult<UserResponse> {
        let user = self.get_user_entity(user_id).await?;
        Ok(UserResponse::from(&user))
    }

    /// Get user entity by ID
    #[instrument(skip(self))]
    pub async fn get_user_entity(&self, user_id: RecordId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    /// Create a user
    ///
    /// Field rules run first; the email is checked against storage only when
    /// every other rule passed.
    #[instrument(skip(self, request))]
    pub async fn create_user(&self, request: CreateUserRequest) -> ServiceResult<UserResponse> {
        let new_user = normalize_new(UserCandidate::from(request)).map_err(ServiceError::Validation)?;

        if self.ctx.user_repo().email_taken(&new_user.email, None).await? {
            return Err(ServiceError::DuplicateEmail);
        }

        let user = new_user.into_user(self.ctx.generate_id());
        // The unique index still guards against a racing create
        self.ctx.user_repo().create(&user).await?;

        info!(user_id = %user.id, "User created");
        Ok(UserResponse::from(&user))
    }

    /// Apply a partial update
    ///
    /// The patch is validated before storage is touched. Storage then writes
    /// only the provided fields in one step; when nothing actually changes the
    /// record comes back as-is and `updatedAt` stays put. A colliding email is
    /// rejected by the storage unique guard.
    #[instrument(skip(self, request))]
    pub async fn update_user(
        &self,
        user_id: RecordId,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        let patch = normalize_patch(UserCandidate::from(request)).map_err(ServiceError::Validation)?;

        let outcome = self.ctx.user_repo().update_fields(user_id, &patch).await?;
        if outcome.changed {
            info!(user_id = %user_id, "User updated");
        }

        Ok(UserResponse::from(&outcome.user))
    }

    /// Delete a user permanently
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: RecordId) -> ServiceResult<DeletedUserResponse> {
        self.ctx.user_repo().delete(user_id).await?;
        info!(user_id = %user_id, "User deleted");

        Ok(DeletedUserResponse {
            id: user_id.to_string(),
        })
    }

    /// Mark a user active
    pub async fn activate_user(&self, user_id: RecordId) -> ServiceResult<StatusChange> {
        self.set_active(user_id, true).await
    }

    /// Mark a user inactive
    pub async fn deactivate_user(&self, user_id: RecordId) -> ServiceResult<StatusChange> {
        self.set_active(user_id, false).await
    }

    /// Idempotent active-flag transition
    #[instrument(skip(self))]
    async fn set_active(&self, user_id: RecordId, active: bool) -> ServiceResult<StatusChange> {
        let outcome = self.ctx.user_repo().set_active(user_id, active).await?;
        if outcome.changed {
            info!(user_id = %user_id, active, "User status changed");
        }

        Ok(StatusChange {
            user: UserResponse::from(&outcome.user),
            changed: outcome.changed,
        })
    }
}
