//! Bulk credential issuance.
//!
//! Authenticates against a bulk issuance service, provisions a fresh issuer,
//! generates synthetic learner enrollment/assessment data, writes it to CSV,
//! uploads both files as credential batches and reports learner logins.
//!
//! ## Layers
//! - `cli`: clap definitions.
//! - `commands`: command handlers and output wiring.
//! - `services`: pipeline, generator, CSV writer, upload, report.
//! - `issuance`: the remote service seam (`IssuanceApi`) and its HTTP client.
//! - `domain`: data-only types and constants.
//! - `error`: failure taxonomy.

pub mod cli;
pub mod commands;
pub mod domain;
pub mod error;
pub mod issuance;
pub mod services;
