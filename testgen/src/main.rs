use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Parse CLI arguments first to get verbosity level
    let cli = Cli::parse();

    // Initialize tracing with appropriate verbosity
    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let config = cli::config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate(args) => {
            info!("Generate command: {:?}", args);
            cli::commands::generate::execute(args, &config)?;
        }
        Commands::Methods(args) => {
            info!("Methods command: {:?}", args);
            cli::commands::methods::execute(args)?;
        }
    }

    Ok(())
}
