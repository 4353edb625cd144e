//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `pipeline.rs`: ordered issuance stages with fail-fast semantics.
//! - `dataset.rs`: synthetic enrollment/assessment records and issuer ids.
//! - `csv_writer.rs`: timestamped CSV artifacts.
//! - `upload.rs`: upload metadata and submission.
//! - `report.rs`: learner accounts + portal hand-off report.
//! - `profile.rs`: optional TOML issuance profile.
//! - `progress.rs`: stage observers (spinner / log).
//! - `output.rs`: JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod csv_writer;
pub mod dataset;
pub mod output;
pub mod pipeline;
pub mod profile;
pub mod progress;
pub mod report;
pub mod upload;
