mod repositories;

pub use repositories::{PoolStats, RepoResult, UpdateOutcome, UserRepository};
