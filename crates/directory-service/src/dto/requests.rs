//! Request DTOs for API endpoints
//!
//! Bodies and query strings are taken as sent; every rule is checked by the
//! record schema once the request reaches the service.

use serde::Deserialize;

// ============================================================================
// User Requests
// ============================================================================

/// Address parts of a create or update body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

/// Create user request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<AddressRequest>,
    pub is_active: Option<bool>,
}

/// Update user request. Only the fields present are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<AddressRequest>,
    pub is_active: Option<bool>,
}

/// Listing query string, kept raw so bad values can fall back to defaults
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListUsersQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub active: Option<String>,
}

impl ListUsersQuery {
    /// Build from raw query pairs. The first value of a repeated key wins and
    /// unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                "search" => &mut query.search,
                "active" => &mut query.active,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}
