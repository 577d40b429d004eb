//! Repository modules for the record store.
//!
//! Each module adds methods to `RecordStore` via `impl RecordStore` blocks.
//! `records` holds the gateway reads, `ingest` the phased writes of the
//! workflow engine, `projects` the project picker and completion flag.

pub mod ingest;
pub mod projects;
pub mod records;
