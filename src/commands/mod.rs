//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `run.rs`: full issuance pipeline.
//! - `generate.rs`: offline dataset generation.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod generate;
pub mod run;

pub use generate::handle_generate;
pub use run::handle_run;

use crate::cli::DatasetArgs;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

pub(crate) fn out_dir(args: &DatasetArgs) -> PathBuf {
    args.out_dir.clone().unwrap_or_else(std::env::temp_dir)
}
