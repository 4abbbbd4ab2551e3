use crate::demo::{run_score_files, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lead_scoring::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Lead Scoring Backend",
    about = "Score sales leads with rule-based heuristics and AI intent classification",
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
    /// Score an offer and lead CSV from disk without starting the server
    Score(ScoreArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score_files(args).await,
    }
}
