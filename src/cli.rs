use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dumpscope",
    version,
    about = "Chat server diagnostic dump health analyzer"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a dump directory or a single dump file
    Analyze(AnalyzeCommand),
    /// Show how a single file's content would be classified
    Detect(DetectCommand),
}

#[derive(Args)]
pub struct AnalyzeCommand {
    pub path: PathBuf,
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,
    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Extra configuration file layered over dumpscope.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct DetectCommand {
    pub file: PathBuf,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
    Html,
}
