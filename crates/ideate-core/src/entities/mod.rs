//! Entity structs for all Ideate domain objects.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so they can
//! travel over the HTTP surface and be published as schemas by `ideate schema`.

mod idea;
mod project;
mod record;
mod trend;
mod visualization;

pub use idea::IdeaInput;
pub use project::ProjectSummary;
pub use record::{AnalysisRecord, CompetitorAnalysis, MarketResearch, Refinement};
pub use trend::Trend;
pub use visualization::{VisualizationConnection, VisualizationNode, VisualizationState};
