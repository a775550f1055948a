mod analyze;
mod cli;
mod config;
mod error;
mod normalize;
mod report;
mod scan;
mod types;

use crate::error::DumpscopeError;
use crate::normalize::DumpBundle;
use crate::types::report::RunMetadata;
use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const CRITICAL: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dumpscope={default_level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<i32, DumpscopeError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Analyze(cmd) => {
            let loaded = config::load_config(&cmd.path, cmd.config.as_deref())?;
            let engine_config = loaded.resolve();
            let located = scan::locate(&cmd.path)?;
            let bundle = DumpBundle::from_raw(&located.raw);
            let health_report = analyze::analyze(
                &bundle,
                &engine_config,
                RunMetadata::now(cmd.path.display().to_string()).with_files(located.files),
            );

            let output_format = match cmd.format {
                cli::ReportFormat::Text => report::OutputFormat::Text,
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Csv => report::OutputFormat::Csv,
                cli::ReportFormat::Html => report::OutputFormat::Html,
            };
            let rendered = report::render(&health_report, output_format)?;
            match &cmd.output {
                Some(path) => {
                    std::fs::write(path, &rendered)?;
                    if !cli.quiet {
                        eprintln!("report written to {}", path.display());
                    }
                }
                None => println!("{rendered}"),
            }

            if health_report.has_critical() {
                Ok(exit_code::CRITICAL)
            } else if !health_report.analysis.issues.is_empty() {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Detect(cmd) => {
            if !cmd.file.is_file() {
                return Err(DumpscopeError::PathNotFound(cmd.file.display().to_string()));
            }
            let value = scan::filesystem::read_json(&cmd.file)?;
            let label = normalize::detect::detect(&value);
            let kinds = label
                .kinds()
                .iter()
                .map(|kind| kind.as_str())
                .collect::<Vec<_>>();
            println!("content: {}", label.as_str());
            if kinds.is_empty() {
                println!("sources: none");
            } else {
                println!("sources: {}", kinds.join(", "));
            }
            if let Some(kind) = scan::kind_from_name(&cmd.file) {
                println!("file name suggests: {}", kind.as_str());
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
