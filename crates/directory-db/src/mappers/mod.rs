//! Entity to model mappers
//!
//! Conversions between domain entities (directory-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Row` structs: Prepare entity data for database writes

mod user;

pub use user::UserRow;
