mod models;

pub use models::*;

use anyhow::{Context, Result};
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;

pub const DATABASE_NAME: &str = "TaxiShare";
pub const RIDES_COLLECTION: &str = "TripDetail";
pub const USERS_COLLECTION: &str = "Users";

const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the `TaxiShare` database.
///
/// Constructed once at startup and shared by every handler; never
/// reassigned for the lifetime of the process.
#[derive(Clone)]
pub struct Db {
    database: Database,
}

impl Db {
    pub fn new(client: &Client) -> Self {
        Self {
            database: client.database(DATABASE_NAME),
        }
    }

    pub fn rides(&self) -> Collection<Ride> {
        self.database.collection(RIDES_COLLECTION)
    }

    pub fn users(&self) -> Collection<User> {
        self.database.collection(USERS_COLLECTION)
    }
}

/// Connect to MongoDB, verify the connection with a ping, and ensure the
/// unique index on `Users.email`.
///
/// Any failure here leaves the caller without a handle for the rest of the
/// process lifetime; there is no reconnection logic.
pub async fn init(config: &DatabaseConfig) -> Result<Db> {
    info!("Connecting to MongoDB at {}", config.uri);

    let mut options = ClientOptions::parse(&config.uri)
        .await
        .context("Failed to parse MongoDB URI")?;
    options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
    options.app_name = Some("taxishare".to_string());

    let client = Client::with_options(options).context("Failed to build MongoDB client")?;
    let db = Db::new(&client);

    db.database
        .run_command(doc! { "ping": 1 })
        .await
        .context("Failed to reach MongoDB")?;

    ensure_indexes(&db).await?;

    info!("Database initialized successfully");
    Ok(db)
}

/// A unique index on `Users.email` backs the at-most-one-user-per-email
/// invariant; together with the atomic upsert it closes the window where
/// two first-time submissions for the same address could both insert.
async fn ensure_indexes(db: &Db) -> Result<()> {
    let email_index = IndexModel::builder()
        .keys(doc! { "email": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();

    db.users()
        .create_index(email_index)
        .await
        .context("Failed to create unique index on Users.email")?;

    Ok(())
}
