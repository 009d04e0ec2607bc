//! Axum extractors for request handling
//!
//! Custom extractors for path ids, JSON bodies and query strings.

mod body;
mod path;

pub use body::{JsonBody, QueryPairs};
pub use path::UserIdPath;
