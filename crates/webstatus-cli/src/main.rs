//! CLI entry point - the composition root.
//!
//! Loads `.env`, parses arguments, initialises logging and dispatches to the
//! handlers. Errors are printed to stderr and mapped to exit codes.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use webstatus_cli::{Cli, CliError, Commands, bootstrap, handlers};

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let settings = cli.settings();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Serve { bind } => {
            handlers::serve::execute(settings, bind).await?;
        }
        Commands::Dump { host, pretty } => {
            let ctx = bootstrap(settings)?;
            handlers::dump::execute(&ctx, &host, pretty).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(&cli);
    tracing::debug!(version = webstatus_build_info::LONG_VERSION_WITH_SHA, "starting");

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
