//! Repository implementations
//!
//! PostgreSQL and in-memory implementations of the `UserRepository` trait
//! defined in directory-core.

mod error;
mod memory;
mod user;

pub use memory::InMemoryUserRepository;
pub use user::PgUserRepository;
