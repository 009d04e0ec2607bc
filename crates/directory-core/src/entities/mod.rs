//! Domain entities - core business objects

mod user;

pub use user::{current_timestamp, Address, User, DEFAULT_COUNTRY};
