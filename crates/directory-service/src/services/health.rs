//! Health service
//!
//! Reports process facts and storage connectivity. A failed storage probe
//! degrades the report instead of failing it.

use chrono::Utc;
use tracing::{instrument, warn};

use crate::dto::{
    ConnectionState, DatabaseHealth, DetailedHealthResponse, DetailedHealthServices,
    HealthResponse, HealthServices, HealthStatus,
};

use super::context::ServiceContext;

/// Crate version reported by the health endpoints
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Health service
pub struct HealthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HealthService<'a> {
    /// Create a new HealthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Basic health report
    #[instrument(skip(self))]
    pub async fn check(&self) -> HealthResponse {
        let database = self.probe_database().await;

        HealthResponse {
            status: overall(database),
            timestamp: Utc::now(),
            uptime: self.ctx.uptime().as_secs_f64(),
            environment: self.ctx.environment().to_string(),
            version: VERSION.to_string(),
            services: HealthServices { database },
        }
    }

    /// Health report with storage backend and pool detail
    #[instrument(skip(self))]
    pub async fn detailed(&self) -> DetailedHealthResponse {
        let database = self.probe_database().await;
        let repo = self.ctx.user_repo();
        let stats = repo.pool_stats();

        DetailedHealthResponse {
            status: overall(database),
            timestamp: Utc::now(),
            uptime: self.ctx.uptime().as_secs_f64(),
            environment: self.ctx.environment().to_string(),
            version: VERSION.to_string(),
            services: DetailedHealthServices {
                database: DatabaseHealth {
                    status: database,
                    backend: repo.backend().to_string(),
                    pool_size: stats.map(|s| s.size),
                    idle_connections: stats.map(|s| s.idle),
                },
            },
        }
    }

    async fn probe_database(&self) -> ConnectionState {
        match self.ctx.user_repo().ping().await {
            Ok(()) => ConnectionState::Connected,
            Err(e) => {
                warn!(error = %e, "Database health probe failed");
                ConnectionState::Disconnected
            }
        }
    }
}

fn overall(database: ConnectionState) -> HealthStatus {
    match database {
        ConnectionState::Connected => HealthStatus::Ok,
        ConnectionState::Disconnected => HealthStatus::Degraded,
    }
}
