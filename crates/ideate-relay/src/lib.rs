//! # ideate-relay
//!
//! HTTP clients for the two external collaborators:
//! - [`WorkflowClient`] forwards submissions to the workflow engine's webhook
//! - [`AssistantClient`] asks the language-model endpoint on behalf of the chat panel
//!
//! Neither client retries. Failures come back as [`RelayError`].

pub mod assistant;
mod error;
mod http;
pub mod workflow;

pub use assistant::AssistantClient;
pub use error::RelayError;
pub use workflow::WorkflowClient;
