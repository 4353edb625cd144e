use crate::cli::RunArgs;
use crate::commands::{out_dir, seeded_rng};
use crate::domain::models::{RunConfig, RunReport};
use crate::issuance::HttpIssuanceApi;
use crate::services::dataset::BuiltinNames;
use crate::services::output::{print_failure, print_one};
use crate::services::pipeline::Pipeline;
use crate::services::profile::load_profile;
use crate::services::progress::{LogObserver, SpinnerObserver, StageObserver};
use std::process::ExitCode;
use std::time::Duration;

/// S0: turn parsed arguments into the run's single immutable config.
pub fn build_run_config(args: RunArgs) -> anyhow::Result<RunConfig> {
    let profile = load_profile(args.dataset.profile.as_deref())?;
    Ok(RunConfig {
        out_dir: out_dir(&args.dataset),
        student_count: args.dataset.count as usize,
        seed: args.dataset.seed,
        request_timeout: args.timeout_secs.map(Duration::from_secs),
        base_url: args.base_url,
        client_username: args.client_username,
        default_password: args.default_password,
        wallet_url: args.wallet_url,
        verification_url: args.verification_url,
        profile,
    })
}

pub fn render_report(r: &RunReport) -> String {
    let mut out = Vec::new();
    out.push(format!("issuer: {} ({})", r.issuer.name, r.issuer.issuer_id));
    out.push(format!("did: {}", r.issuer.did));
    out.push(format!("wallet: {}", r.wallet_url));
    out.push(format!("verification: {}", r.verification_url));
    out.push(String::new());
    for (i, line) in r.instructions.iter().enumerate() {
        out.push(format!("{}. {}", i + 1, line));
    }
    out.push(String::new());
    for a in &r.artifacts {
        out.push(format!("{}\t{}\t{} rows", a.kind, a.path.display(), a.rows));
    }
    out.push(String::new());
    out.push("username\tpassword".to_string());
    for a in &r.accounts {
        out.push(format!("{}\t{}", a.username, a.password));
    }
    out.join("\n")
}

pub fn handle_run(json: bool, quiet: bool, args: RunArgs) -> anyhow::Result<ExitCode> {
    tracing::info!("loading configuration");
    let config = build_run_config(args)?;
    tracing::debug!(?config, "configuration loaded");

    let api = HttpIssuanceApi::new(&config.base_url, config.request_timeout)?;
    let mut spinner = SpinnerObserver::new();
    let mut log = LogObserver;
    let observer: &mut dyn StageObserver = if json || quiet {
        &mut log
    } else {
        &mut spinner
    };

    let rng = seeded_rng(config.seed);
    let outcome = Pipeline::new(&config, &api, &BuiltinNames, rng, observer).run();

    match outcome {
        Ok(report) => {
            tracing::info!(accounts = report.accounts.len(), "issuance run complete");
            print_one(json, report, render_report)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            print_failure(json, &failure)?;
            Ok(ExitCode::FAILURE)
        }
    }
}
