//! Entity to DTO mappers
//!
//! Implements `From` conversions between domain types and DTOs.

use directory_core::entities::{Address, User};
use directory_core::query::PageMeta;
use directory_core::schema::{AddressCandidate, UserCandidate};

use super::requests::{AddressRequest, CreateUserRequest, UpdateUserRequest};
use super::responses::{AddressResponse, PaginationMeta, UserResponse};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&Address> for AddressResponse {
    fn from(address: &Address) -> Self {
        Self {
            street: address.street.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            zip_code: address.zip_code.clone(),
            country: address.country.clone(),
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            address: AddressResponse::from(&user.address),
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
            full_address: user.full_address(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<PageMeta> for PaginationMeta {
    fn from(meta: PageMeta) -> Self {
        Self {
            current_page: meta.current_page,
            total_pages: meta.total_pages,
            total_users: meta.total_users,
            has_next_page: meta.has_next_page,
            has_prev_page: meta.has_prev_page,
        }
    }
}

// ============================================================================
// Request Mappers
// ============================================================================

impl From<AddressRequest> for AddressCandidate {
    fn from(req: AddressRequest) -> Self {
        Self {
            street: req.street,
            city: req.city,
            state: req.state,
            zip_code: req.zip_code,
            country: req.country,
        }
    }
}

impl From<CreateUserRequest> for UserCandidate {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            address: req.address.map(AddressCandidate::from),
            is_active: req.is_active,
        }
    }
}

impl From<UpdateUserRequest> for UserCandidate {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            address: req.address.map(AddressCandidate::from),
            is_active: req.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use directory_core::RecordId;

    #[test]
    fn test_user_response_includes_full_address() {
        let mut user = User::new(
            RecordId::new(123),
            "Ann".to_string(),
            "ann@test.com".to_string(),
            "123".to_string(),
        );
        user.address.street = Some("1 Elm St".to_string());

        let response = UserResponse::from(&user);
        assert_eq!(response.id, "123");
        assert_eq!(response.full_address, "1 Elm St, India");
        assert_eq!(response.address.country.as_deref(), Some("India"));
    }

    #[test]
    fn test_request_to_candidate() {
        let candidate = UserCandidate::from(UpdateUserRequest {
            name: Some("X".to_string()),
            address: Some(AddressRequest {
                city: Some("Pune".to_string()),
                ..AddressRequest::default()
            }),
            ..UpdateUserRequest::default()
        });

        assert_eq!(candidate.name.as_deref(), Some("X"));
        assert_eq!(
            candidate.address.and_then(|a| a.city).as_deref(),
            Some("Pune")
        );
        assert!(candidate.email.is_none());
    }
}
