//! # ideate-db
//!
//! libSQL record store for Ideate.
//!
//! Holds one row per idea submission in the `ideas` table. The web tier reads
//! through the gateway operations on [`service::RecordStore`]; the ingestion
//! side (the seed command, tests, and anything acting for the workflow engine)
//! writes the phased updates.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

use error::DatabaseError;
use libsql::Builder;

/// Database handle: a libSQL database and one connection.
pub struct IdeateDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl IdeateDb {
    /// Open a local database at `path` (`:memory:` for a throwaway store).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let ideate_db = Self { db, conn };
        ideate_db.run_migrations().await?;
        tracing::debug!(path, "record store opened");
        Ok(ideate_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g. `"idea-a3f8b2c1d4e5f607"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT ?1 || '-' || lower(hex(randomblob(8)))", [prefix])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = IdeateDb::open_local(":memory:").await.unwrap();
        let mut rows = db
            .conn()
            .query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name='ideas'",
                (),
            )
            .await
            .unwrap();
        assert!(rows.next().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = IdeateDb::open_local(":memory:").await.unwrap();
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn generated_ids_are_prefixed_and_distinct() {
        let db = IdeateDb::open_local(":memory:").await.unwrap();
        let a = db.generate_id("idea").await.unwrap();
        let b = db.generate_id("idea").await.unwrap();
        assert!(a.starts_with("idea-"));
        assert_eq!(a.len(), "idea-".len() + 16);
        assert_ne!(a, b);
    }
}
