//! Business logic services
//!
//! This module contains the service layer that validates input and
//! orchestrates repository calls.

pub mod context;
pub mod error;
pub mod health;
pub mod user;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use health::HealthService;
pub use user::UserService;
