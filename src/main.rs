//! us-census - US Census Bureau survey data from the command line
//!
//! Main entry point for the us-census CLI application.

use std::process::ExitCode;

use console::style;
use tracing_subscriber::EnvFilter;

use us_census::cli::{self, Cli, Commands};
use us_census::error::Result;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Set up logging
    setup_logging(&cli);

    // Run the application
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Set up logging based on CLI arguments
fn setup_logging(cli: &Cli) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Main application logic
async fn run(cli: Cli) -> Result<()> {
    // Dispatch to appropriate command handler
    match &cli.command {
        Commands::Acs(args) => cli::execute_acs(&cli, args).await,
        Commands::Profile(args) => cli::execute_profile(&cli, args).await,
        Commands::PopProfile(args) => cli::execute_pop_profile(&cli, args).await,
        Commands::Supplemental(args) => cli::execute_supplemental(&cli, args).await,
        Commands::Entrepreneurship(args) => cli::execute_entrepreneurship(&cli, args).await,
        Commands::Business(args) => cli::execute_business(&cli, args).await,
        Commands::Manufacturing(args) => cli::execute_manufacturing(&cli, args).await,
        Commands::Nonemployer(args) => cli::execute_nonemployer(&cli, args).await,
        Commands::Cbp(args) => cli::execute_cbp(&cli, args).await,
        Commands::Econ(args) => cli::execute_econ(&cli, args).await,
        Commands::Health(args) => cli::execute_health(&cli, args).await,
        Commands::Config(args) => cli::execute_config(&cli, args).await,
        Commands::Clean(args) => cli::execute_clean(&cli, args).await,
    }
}
