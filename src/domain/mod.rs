//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep record/report structs in one place.
//! - Avoid cyclic imports and duplicated type definitions.
//! - Make JSON and CSV output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs`: run config, issuer identity, records, artifacts, reports.
//! - `constants.rs`: remote endpoint paths, file suffixes, fixed metadata.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! Field order of `StudentRecord` / `AssessmentRecord` is the CSV column order.
//! `RunReport` is the `--json` contract in `docs/contracts/run_report.schema.json`.

pub mod constants;
pub mod models;
