//! # ideate-poller
//!
//! The dashboard poller: after a submission, repeatedly asks the record
//! gateway whether the new analysis is complete, then hands back a
//! navigation target or gives up once the budget is spent.
//!
//! Timeline with the default settings (grace 8 s, interval 5 s, budget 180 s):
//! checks at 8, 13, 18, ... 178 s; `failed` at 180 s if none succeeded.

pub mod poller;
pub mod settings;
pub mod source;
pub mod state;

pub use poller::{Navigation, PollOutcome, PollRequest, Poller};
pub use settings::PollerSettings;
pub use source::{HttpRecordSource, RecordSource, SourceError};
pub use state::{PollSnapshot, PollState, StatusPhase};
