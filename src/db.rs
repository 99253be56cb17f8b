use chrono::{DateTime, Utc};
use diesel::{
    connection::SimpleConnection,
    r2d2::{self, ConnectionManager, CustomizeConnection},
    result::DatabaseErrorKind,
    SqliteConnection,
};
use std::time::SystemTime;
use thiserror::Error;

use crate::types::DbPool;

pub mod messages;
pub mod rooms;
pub mod users;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database pool error: {0}")]
    Pool(#[from] r2d2::PoolError),

    #[error(transparent)]
    Query(#[from] diesel::result::Error),
}

impl DbError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            DbError::Query(diesel::result::Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                _
            ))
        )
    }
}

// Messages reference their room without ON DELETE CASCADE; rooms::delete_room
// removes them explicitly.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS rooms (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    room_id INTEGER NOT NULL REFERENCES rooms (id),
    user_id TEXT NOT NULL REFERENCES users (id),
    message_text VARCHAR(255) NOT NULL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS messages_room_id ON messages (room_id);
";

/// Applied to every connection the pool hands out.
#[derive(Debug)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(r2d2::Error::QueryError)
    }
}

pub(crate) fn iso_date() -> String {
    let now = SystemTime::now();
    let now: DateTime<Utc> = now.into();
    now.to_rfc3339()
}

pub fn create_pool(database_url: &str, max_size: u32) -> Result<DbPool, DbError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = r2d2::Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)?;

    Ok(pool)
}

/// Creates the tables if they are missing. Existing data is left alone.
pub fn init_schema(conn: &mut SqliteConnection) -> Result<(), DbError> {
    conn.batch_execute(SCHEMA)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_pool() -> DbPool {
    // a single connection keeps the in-memory database alive between requests
    let pool = create_pool(":memory:", 1).expect("in-memory pool");
    let mut conn = pool.get().expect("pooled connection");
    init_schema(&mut conn).expect("schema");
    drop(conn);
    pool
}

/// File-backed pool with several connections, for tests that overlap requests.
#[cfg(test)]
pub(crate) fn test_file_pool(dir: &std::path::Path, max_size: u32) -> DbPool {
    let path = dir.join("chat.db");
    let pool = create_pool(path.to_str().expect("utf-8 temp path"), max_size).expect("file pool");
    init_schema(&mut pool.get().expect("pooled connection")).expect("schema");
    pool
}
