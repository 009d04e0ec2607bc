//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests. Emails carry a per-run
//! tag so repeated runs against the same database never collide.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::LazyLock;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Tag shared by every record created in this test run
pub static RUN_TAG: LazyLock<String> =
    LazyLock::new(|| format!("run{}", chrono::Utc::now().timestamp_millis()));

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Address body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressBody {
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

/// Create user request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl CreateUserRequest {
    /// A valid request with a unique name and email
    pub fn unique() -> Self {
        Self::named(&format!("Test User {}", unique_suffix()))
    }

    /// A valid request whose name contains `name` and the run tag
    pub fn named(name: &str) -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("{name} {}", *RUN_TAG),
            email: format!("user{suffix}.{}@example.com", *RUN_TAG),
            phone: "+91 98765 43210".to_string(),
            address: None,
            is_active: None,
        }
    }
}

/// Response envelope
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
    pub pagination: Option<Pagination>,
    pub errors: Option<Vec<FieldErrorBody>>,
    pub field: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap the data of a successful envelope
    pub fn into_data(self) -> T {
        assert!(self.success, "envelope is not successful: {:?}", self.message);
        self.data.expect("successful envelope carries data")
    }
}

/// One field violation
#[derive(Debug, Deserialize)]
pub struct FieldErrorBody {
    pub field: String,
    pub message: String,
}

/// Pagination metadata
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_users: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

/// User response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: AddressBody,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
    pub full_address: String,
}

/// Deleted user response
#[derive(Debug, Deserialize)]
pub struct DeletedBody {
    pub id: String,
}
