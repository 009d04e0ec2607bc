//! # directory-db
//!
//! Database layer implementing the user repository with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate handles:
//!
//! - Connection pool management and the users schema
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations (PostgreSQL and in-memory)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use directory_db::{create_pool, run_migrations, DatabaseConfig, PgUserRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     run_migrations(&pool).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{InMemoryUserRepository, PgUserRepository};
