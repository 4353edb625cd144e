use bulk_issuance::cli::{Cli, Commands, DefaultRun};
use bulk_issuance::commands::{handle_generate, handle_run};
use bulk_issuance::services::output::print_config_failure;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    // Global flags were already consumed above; only the environment remains.
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Run(DefaultRun::parse_from(std::env::args_os().take(1)).args));

    let result = match command {
        Commands::Run(args) => handle_run(cli.json, cli.quiet, args),
        Commands::Generate(args) => handle_generate(cli.json, args),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            print_config_failure(cli.json, &e);
            ExitCode::from(2)
        }
    }
}
