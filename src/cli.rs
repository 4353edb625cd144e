use crate::domain::constants::DEFAULT_STUDENT_COUNT;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bulk-issuance",
    version,
    about = "Provision an issuer and bulk-issue synthetic learner credentials"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,
    #[arg(short, long, global = true, help = "Only log errors, no spinners")]
    pub quiet: bool,
    /// Defaults to `run` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full issuance pipeline against the remote service
    Run(RunArgs),
    /// Only generate the enrollment/assessment CSV files locally
    Generate(DatasetArgs),
}

/// Used when no subcommand is given: every value then comes from the environment.
#[derive(Parser, Debug)]
#[command(name = "bulk-issuance")]
pub struct DefaultRun {
    #[command(flatten)]
    pub args: RunArgs,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[arg(long, env = "BULK_BASE_URL", help = "Issuance service base URL")]
    pub base_url: String,
    #[arg(long, env = "BULK_CLIENT_USERNAME")]
    pub client_username: String,
    #[arg(
        long,
        env = "BULK_DEFAULT_PASSWORD",
        hide_env_values = true,
        help = "Password for client/issuer tokens and every learner account"
    )]
    pub default_password: String,
    #[arg(long, env = "BULK_WALLET_URL")]
    pub wallet_url: String,
    #[arg(long, env = "BULK_VERIFICATION_URL")]
    pub verification_url: String,
    #[arg(
        long,
        env = "BULK_TIMEOUT_SECS",
        help = "Per-request deadline in seconds (default: none)"
    )]
    pub timeout_secs: Option<u64>,
    #[command(flatten)]
    pub dataset: DatasetArgs,
}

#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    #[arg(
        long,
        env = "BULK_OUT_DIR",
        help = "Directory for CSV files (default: system temp dir)"
    )]
    pub out_dir: Option<PathBuf>,
    #[arg(
        long,
        env = "BULK_STUDENT_COUNT",
        default_value_t = DEFAULT_STUDENT_COUNT as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub count: u64,
    #[arg(long, env = "BULK_SEED", help = "Seed for reproducible data")]
    pub seed: Option<u64>,
    #[arg(long, env = "BULK_PROFILE", help = "TOML issuance profile")]
    pub profile: Option<PathBuf>,
}
