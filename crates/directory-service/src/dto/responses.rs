//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output with camelCase keys.
//! Record ids are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// User Responses
// ============================================================================

/// Stored address parts; absent parts are omitted
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// A user record as returned by the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: AddressResponse,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub full_address: String,
}

/// Page-number pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_users: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

/// One page of users
#[derive(Debug, Clone, Serialize)]
pub struct UserPage {
    pub users: Vec<UserResponse>,
    pub pagination: PaginationMeta,
}

/// Body returned for a deleted record
#[derive(Debug, Clone, Serialize)]
pub struct DeletedUserResponse {
    pub id: String,
}

/// Result of an activate/deactivate call
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub user: UserResponse,
    /// False when the record already had the requested state
    pub changed: bool,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Overall health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Ok,
    Degraded,
}

impl HealthStatus {
    pub fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

/// Storage connectivity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    /// Seconds since startup
    pub uptime: f64,
    pub environment: String,
    pub version: String,
    pub services: HealthServices,
}

/// Per-dependency status for the basic check
#[derive(Debug, Clone, Serialize)]
pub struct HealthServices {
    pub database: ConnectionState,
}

/// Detailed health check response
#[derive(Debug, Clone, Serialize)]
pub struct DetailedHealthResponse {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub uptime: f64,
    pub environment: String,
    pub version: String,
    pub services: DetailedHealthServices,
}

/// Per-dependency detail for the detailed check
#[derive(Debug, Clone, Serialize)]
pub struct DetailedHealthServices {
    pub database: DatabaseHealth,
}

/// Storage detail
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealth {
    pub status: ConnectionState,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_connections: Option<u32>,
}
