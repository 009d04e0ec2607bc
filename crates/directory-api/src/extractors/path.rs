//! Path parameter extractors
//!
//! Type-safe extraction of record ids from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use directory_core::RecordId;

use crate::response::ApiError;

/// The `:id` segment of a user route, parsed as a record id
///
/// Anything that is not a well-formed id is rejected with
/// "Invalid user ID format" before the handler runs.
#[derive(Debug, Clone, Copy)]
pub struct UserIdPath(pub RecordId);

#[async_trait]
impl<S> FromRequestParts<S> for UserIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InvalidId)?;

        RecordId::parse(&raw)
            .map(UserIdPath)
            .map_err(|_| ApiError::InvalidId)
    }
}
