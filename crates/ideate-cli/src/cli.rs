use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for the `ideate` binary.
#[derive(Debug, Parser)]
#[command(name = "ideate", version, about = "Ideate - business idea analysis dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Raw,
}

#[derive(Clone, Copy, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Wait for an analysis to complete, like the dashboard does.
    Wait(WaitArgs),
    /// List an owner's projects.
    Projects(OwnerArgs),
    /// Insert a complete sample record for local development.
    Seed(SeedArgs),
    /// Apply the workflow engine's phased writes to the local store.
    Ingest {
        #[command(subcommand)]
        action: IngestCommands,
    },
    /// Write the export document for a record.
    Export(ExportArgs),
    /// Ask the assistant about an owner's dashboard.
    Ask(AskArgs),
    /// Print the JSON Schema of a public entity.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Listen address (overrides `server.bind`)
    #[arg(long)]
    pub bind: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct OwnerArgs {
    /// Owner email
    #[arg(long)]
    pub email: String,

    /// Record id; defaults to the latest record
    #[arg(long)]
    pub project: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct WaitArgs {
    /// Owner email
    #[arg(long)]
    pub email: String,

    /// A submission was just made: wait out the grace delay and ignore older records
    #[arg(long)]
    pub fresh: bool,

    /// Track exactly this record id
    #[arg(long)]
    pub id: Option<String>,

    /// Base URL of a running server (overrides `server.public_url`)
    #[arg(long)]
    pub server: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SeedArgs {
    /// Owner email for the sample record
    #[arg(long)]
    pub email: String,
}

#[derive(Clone, Debug, Subcommand)]
pub enum IngestCommands {
    /// Phase 1: record a submitted idea read from a JSON file.
    Submit {
        /// Idea in the form's JSON shape
        #[arg(long)]
        file: PathBuf,

        /// Project name to attach
        #[arg(long)]
        project: Option<String>,
    },
    /// Phase 2a: store the refinement output for a record.
    Refinement {
        /// Record id
        #[arg(long)]
        id: String,

        /// Raw refinement JSON
        #[arg(long)]
        file: PathBuf,
    },
    /// Phase 2b: store the market research output for a record.
    Research {
        /// Record id
        #[arg(long)]
        id: String,

        /// Raw market research JSON
        #[arg(long)]
        file: PathBuf,

        /// Search citation URL (repeatable)
        #[arg(long = "citation")]
        citations: Vec<String>,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub owner: OwnerArgs,

    /// Directory to write into; prints to stdout when omitted
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct AskArgs {
    #[command(flatten)]
    pub owner: OwnerArgs,

    /// The question for the assistant
    pub question: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    Record,
    Idea,
    Project,
    Visualization,
    Export,
    Context,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Entity to describe
    #[arg(value_enum)]
    pub type_name: SchemaType,
}
