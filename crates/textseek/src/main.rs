//! textseek: find text on a screenshot with OCR and move the mouse cursor to it.

mod cli;
mod output;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, Globals};

#[tokio::main]
async fn main() {
    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    use output::Output;

    let output = Output::new(cli.json);
    let globals = Globals::from(&cli);

    match cli.command {
        Commands::Read(args) => cli::commands::read::run(&globals, args, &output).await,
        Commands::Find(args) => cli::commands::find::run(&globals, args, &output).await,
        Commands::Move(args) => cli::commands::move_to::run(args, &output).await,
        Commands::Seek(args) => cli::commands::seek::run(&globals, args, &output).await,
        Commands::Tour(args) => cli::commands::tour::run(args, &output).await,
    }
}
