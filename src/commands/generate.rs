use crate::cli::DatasetArgs;
use crate::commands::{out_dir, seeded_rng};
use crate::domain::models::Stage;
use crate::error::StageFailure;
use crate::services::csv_writer::write_dataset;
use crate::services::dataset::{BuiltinNames, DatasetGenerator};
use crate::services::output::{print_failure, print_out};
use crate::services::profile::load_profile;
use chrono::Local;
use std::process::ExitCode;

pub fn handle_generate(json: bool, args: DatasetArgs) -> anyhow::Result<ExitCode> {
    let profile = load_profile(args.profile.as_deref())?;
    let mut rng = seeded_rng(args.seed);
    let dataset = DatasetGenerator::new(
        &BuiltinNames,
        args.count as usize,
        &profile.credential.quarterly_assessment,
    )
    .generate(&mut rng);

    match write_dataset(&out_dir(&args), Local::now().naive_local(), &dataset) {
        Ok((enrollment, assessment)) => {
            print_out(json, &[enrollment, assessment], |a| {
                format!("{}\t{}\t{} rows", a.kind, a.path.display(), a.rows)
            })?;
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            let failure = StageFailure {
                stage: Stage::WriteCsv,
                error,
                registered_issuer: None,
            };
            print_failure(json, &failure)?;
            Ok(ExitCode::FAILURE)
        }
    }
}
