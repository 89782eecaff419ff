use std::sync::Arc;

use onboard_events::Notifier;

use crate::config::ServerConfig;
use crate::storage::BlobStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: onboard_db::DbPool,
    /// Server configuration, resolved once at startup.
    pub config: Arc<ServerConfig>,
    /// Blob storage for uploaded files (S3 in production).
    pub blob: Arc<dyn BlobStore>,
    /// Outbound email notifications.
    pub notifier: Arc<dyn Notifier>,
}
