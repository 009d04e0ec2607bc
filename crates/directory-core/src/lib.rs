//! # directory-core
//!
//! Domain layer containing the user entity, record ids, field rules, listing
//! queries and the repository trait.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod query;
pub mod schema;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Address, User, DEFAULT_COUNTRY};
pub use error::DomainError;
pub use query::{PageMeta, PageRequest, UserFilter};
pub use schema::{
    normalize_new, normalize_patch, AddressCandidate, FieldError, NewUser, UserCandidate,
    UserPatch,
};
pub use traits::{PoolStats, RepoResult, UpdateOutcome, UserRepository};
pub use value_objects::{IdGenerator, RecordId, RecordIdParseError};
