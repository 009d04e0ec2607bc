//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers between domain types and DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{AddressRequest, CreateUserRequest, ListUsersQuery, UpdateUserRequest};

// Re-export commonly used response types
pub use responses::{
    AddressResponse, ConnectionState, DatabaseHealth, DeletedUserResponse,
    DetailedHealthResponse, DetailedHealthServices, HealthResponse, HealthServices, HealthStatus,
    PaginationMeta, StatusChange, UserPage, UserResponse,
};
