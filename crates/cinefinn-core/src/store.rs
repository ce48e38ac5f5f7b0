use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::CoreError;

const SCHEMA: &str = include_str!("../../../migrations/001_initial.sql");

/// Service key under which the bearer token is filed.
const SERVICE: &str = "cinefinn";

/// Durable storage for the session's bearer token.
///
/// One key-value entry: written on login, deleted on logout, read once at
/// process start.
pub struct TokenStore {
    conn: Connection,
}

impl TokenStore {
    /// Open (or create) the database at the given path and run migrations.
    pub fn open(path: &Path) -> Result<Self, CoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for tests and throwaway sessions).
    pub fn open_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Store the bearer token, replacing any previous one.
    pub fn save_token(&self, token: &str) -> Result<(), CoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO auth_tokens (service, token) VALUES (?1, ?2)",
            params![SERVICE, token],
        )?;
        Ok(())
    }

    /// Get the persisted token, if any.
    pub fn token(&self) -> Result<Option<String>, CoreError> {
        self.conn
            .query_row(
                "SELECT token FROM auth_tokens WHERE service = ?1",
                params![SERVICE],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Delete the persisted token. Idempotent.
    pub fn clear_token(&self) -> Result<(), CoreError> {
        self.conn.execute(
            "DELETE FROM auth_tokens WHERE service = ?1",
            params![SERVICE],
        )?;
        Ok(())
    }
}
