use crate::report::{run_export, run_report, ExportArgs, ReportArgs};
use crate::server;
use attrition_insight::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Attrition Insight",
    about = "Analyze employee departures and serve attrition reports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print summary statistics, insights and recommendations
    Report(ReportArgs),
    /// Write the enriched dataset, statistics or recommendations
    Export(ExportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Serve reports over this departure CSV instead of the configured source
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// JSON file overriding rule thresholds and action catalogs
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Export(args) => run_export(args),
    }
}
