pub mod api;
pub mod config;
pub mod db;
pub mod ui;

pub use db::Db;

use config::Config;

use crate::api::error::ApiError;

/// Shared state handed to every handler through axum's `State` extractor.
///
/// `db` is `None` when the MongoDB connection could not be established at
/// startup and is never reassigned afterwards.
pub struct AppState {
    pub config: Config,
    pub db: Option<Db>,
}

impl AppState {
    pub fn new(config: Config, db: Option<Db>) -> Self {
        Self { config, db }
    }

    /// The database handle, or the `ServiceUnavailable` error that data
    /// routes fail fast with when the connection was absent at startup.
    pub fn db(&self) -> Result<&Db, ApiError> {
        self.db
            .as_ref()
            .ok_or_else(|| ApiError::service_unavailable("Database connection error"))
    }
}
