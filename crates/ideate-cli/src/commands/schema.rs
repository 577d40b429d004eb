use schemars::{JsonSchema, schema_for};

use ideate_core::context::DashboardContext;
use ideate_core::entities::{AnalysisRecord, IdeaInput, ProjectSummary, VisualizationState};
use ideate_core::export::ExportDocument;

use crate::cli::{GlobalFlags, SchemaArgs, SchemaType};
use crate::output::output;

fn print<T: JsonSchema>(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema_for!(T), flags.format)
}

/// Handle `ideate schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    match args.type_name {
        SchemaType::Record => print::<AnalysisRecord>(flags),
        SchemaType::Idea => print::<IdeaInput>(flags),
        SchemaType::Project => print::<ProjectSummary>(flags),
        SchemaType::Visualization => print::<VisualizationState>(flags),
        SchemaType::Export => print::<ExportDocument>(flags),
        SchemaType::Context => print::<DashboardContext>(flags),
    }
}
