use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;

use crate::DbPool;

const SCHEMA: &str = include_str!("../migrations/2025-06-01-000000_create_review_scheduler/up.sql");

/// Per-connection SQLite settings applied when the pool hands out a connection.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionOptions {
    pub busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA foreign_keys = ON; PRAGMA journal_mode = WAL;",
            self.busy_timeout.as_millis()
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn build_pool(
    database_url: &str,
    max_size: u32,
    options: ConnectionOptions,
) -> Result<DbPool, r2d2::Error> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(options))
        .build(manager)
}

/// Creates the scheduler tables and indexes if they do not exist yet.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), diesel::result::Error> {
    conn.batch_execute(SCHEMA)
}
