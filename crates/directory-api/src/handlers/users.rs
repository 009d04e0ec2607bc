//! User handlers
//!
//! CRUD and activation endpoints under `/api/users`.

use axum::extract::State;
use directory_service::dto::{
    CreateUserRequest, DeletedUserResponse, ListUsersQuery, StatusChange, UpdateUserRequest,
    UserResponse,
};
use directory_service::UserService;

use crate::extractors::{JsonBody, QueryPairs, UserIdPath};
use crate::response::{ApiResult, Created, Envelope, OperationContext};
use crate::state::AppState;

/// List users
///
/// GET /api/users?page&limit&search&active
pub async fn list_users(
    State(state): State<AppState>,
    QueryPairs(pairs): QueryPairs,
) -> ApiResult<Envelope<Vec<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let page = service
        .list_users(ListUsersQuery::from_pairs(pairs))
        .await
        .during("Error fetching users")?;

    Ok(Envelope::ok(page.users).with_pagination(page.pagination))
}

/// Get user by ID
///
/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    UserIdPath(user_id): UserIdPath,
) -> ApiResult<Envelope<UserResponse>> {
    let service = UserService::new(state.service_context());
    let user = service
        .get_user(user_id)
        .await
        .during("Error fetching user")?;

    Ok(Envelope::ok(user))
}

/// Create user
///
/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateUserRequest>,
) -> ApiResult<Created<Envelope<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let user = service
        .create_user(request)
        .await
        .during("Error creating user")?;

    Ok(Created(
        Envelope::ok(user).with_message("User created successfully"),
    ))
}

/// Update user
///
/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    UserIdPath(user_id): UserIdPath,
    JsonBody(request): JsonBody<UpdateUserRequest>,
) -> ApiResult<Envelope<UserResponse>> {
    let service = UserService::new(state.service_context());
    let user = service
        .update_user(user_id, request)
        .await
        .during("Error updating user")?;

    Ok(Envelope::ok(user).with_message("User updated successfully"))
}

/// Delete user
///
/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    UserIdPath(user_id): UserIdPath,
) -> ApiResult<Envelope<DeletedUserResponse>> {
    let service = UserService::new(state.service_context());
    let deleted = service
        .delete_user(user_id)
        .await
        .during("Error deleting user")?;

    Ok(Envelope::ok(deleted).with_message("User deleted successfully"))
}

/// Activate user
///
/// PATCH /api/users/{id}/activate
pub async fn activate_user(
    State(state): State<AppState>,
    UserIdPath(user_id): UserIdPath,
) -> ApiResult<Envelope<UserResponse>> {
    let service = UserService::new(state.service_context());
    let change = service
        .activate_user(user_id)
        .await
        .during("Error activating user")?;

    Ok(status_envelope(
        change,
        "User activated successfully",
        "User is already active",
    ))
}

/// Deactivate user
///
/// PATCH /api/users/{id}/deactivate
pub async fn deactivate_user(
    State(state): State<AppState>,
    UserIdPath(user_id): UserIdPath,
) -> ApiResult<Envelope<UserResponse>> {
    let service = UserService::new(state.service_context());
    let change = service
        .deactivate_user(user_id)
        .await
        .during("Error deactivating user")?;

    Ok(status_envelope(
        change,
        "User deactivated successfully",
        "User is already inactive",
    ))
}

fn status_envelope(
    change: StatusChange,
    changed: &'static str,
    unchanged: &'static str,
) -> Envelope<UserResponse> {
    let message = if change.changed { changed } else { unchanged };
    Envelope::ok(change.user).with_message(message)
}
