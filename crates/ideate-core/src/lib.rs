//! # ideate-core
//!
//! Core types, completion detection, and error types for Ideate.
//!
//! This crate provides the foundational types shared across all Ideate crates:
//! - Entity structs for analysis records, idea submissions, and diagram state
//! - The completion detector that decides when the external pipeline is done
//! - Status enums
//! - Request/response bodies for the HTTP surface
//! - Structured dashboard context for the assistant
//! - The export document and a sample record for local seeding

pub mod api;
pub mod completion;
pub mod context;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod export;
pub mod sample;
