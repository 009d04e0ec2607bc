//! User entity - a single record in the directory

use chrono::{DateTime, SubsecRound, Utc};

use crate::value_objects::RecordId;

/// Country stored when a record does not name one
pub const DEFAULT_COUNTRY: &str = "India";

/// Postal address attached to a user. Every part is optional free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

impl Default for Address {
    fn default() -> Self {
        Self {
            street: None,
            city: None,
            state: None,
            zip_code: None,
            country: Some(DEFAULT_COUNTRY.to_string()),
        }
    }
}

impl Address {
    /// Non-empty parts joined in street, city, state, zip code, country order
    pub fn full_address(&self) -> String {
        [
            &self.street,
            &self.city,
            &self.state,
            &self.zip_code,
            &self.country,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// User record as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user with a default address
    pub fn new(id: RecordId, name: String, email: String, phone: String) -> Self {
        let now = current_timestamp();
        Self {
            id,
            name,
            email,
            phone,
            address: Address::default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Derived display address, never stored
    pub fn full_address(&self) -> String {
        self.address.full_address()
    }

    /// Set the active flag, returning whether anything changed.
    ///
    /// `updated_at` only moves when the flag actually flips.
    pub fn set_active(&mut self, active: bool) -> bool {
        if self.is_active == active {
            return false;
        }
        self.is_active = active;
        self.touch();
        true
    }

    /// Record a mutation
    pub fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }
}

/// Current time at the precision storage keeps (microseconds)
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
