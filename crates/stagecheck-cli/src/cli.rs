use clap::{Parser, Subcommand, ValueEnum};
use stagecheck_sources::SourceKind;

#[derive(Parser)]
#[command(
    name = "stagecheck",
    about = "Stagecheck: reconcile registry maturity stages against external sources",
    version
)]
pub struct Cli {
    /// Log extraction and reconciliation detail to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile the registry manifest against every configured source
    Audit {
        /// Path to the audit configuration (TOML)
        #[arg(long, default_value = "stagecheck.toml")]
        config: String,

        /// Write the report here instead of stdout
        #[arg(long)]
        out: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Exit with status 1 when any mismatch is found
        #[arg(long)]
        fail_on_mismatch: bool,
    },

    /// Print the claims a single source document yields
    Extract {
        /// Document shape
        #[arg(long, value_enum)]
        kind: SourceKindArg,

        /// Path to the document
        #[arg(long)]
        path: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SourceKindArg {
    #[value(name = "tree")]
    Tree,
    #[value(name = "tabular")]
    Tabular,
    #[value(name = "record_list")]
    RecordList,
    #[value(name = "heading_grouped")]
    HeadingGrouped,
    #[value(name = "indent_grouped")]
    IndentGrouped,
}

impl From<SourceKindArg> for SourceKind {
    fn from(value: SourceKindArg) -> Self {
        match value {
            SourceKindArg::Tree => SourceKind::Tree,
            SourceKindArg::Tabular => SourceKind::Tabular,
            SourceKindArg::RecordList => SourceKind::RecordList,
            SourceKindArg::HeadingGrouped => SourceKind::HeadingGrouped,
            SourceKindArg::IndentGrouped => SourceKind::IndentGrouped,
        }
    }
}
