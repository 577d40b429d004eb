//! Record store service.
//!
//! `RecordStore` wraps [`IdeateDb`]; every gateway and ingestion operation is
//! implemented as an `impl RecordStore` block under [`crate::repos`].

use crate::IdeateDb;
use crate::error::DatabaseError;

pub struct RecordStore {
    db: IdeateDb,
}

impl RecordStore {
    /// Open a store backed by a local database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = IdeateDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    #[must_use]
    pub const fn from_db(db: IdeateDb) -> Self {
        Self { db }
    }

    #[must_use]
    pub const fn db(&self) -> &IdeateDb {
        &self.db
    }
}
