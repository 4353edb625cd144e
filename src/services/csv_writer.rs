use crate::domain::constants::RUN_TIMESTAMP_FORMAT;
use crate::domain::models::{CredentialKind, CsvArtifact, Dataset};
use crate::error::IssuanceError;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub fn format_run_timestamp(ts: NaiveDateTime) -> String {
    ts.format(RUN_TIMESTAMP_FORMAT).to_string()
}

/// `<dir>/<DD_MMM_YYYY_hh_mm_ss_am>_<kind>.csv`
pub fn artifact_path(dir: &Path, run_ts: NaiveDateTime, kind: CredentialKind) -> PathBuf {
    dir.join(format!(
        "{}{}",
        format_run_timestamp(run_ts),
        kind.file_suffix()
    ))
}

/// Header comes from the record's field order. Nothing is cleaned up if the
/// write fails part way.
pub fn write_csv<T: Serialize>(
    path: &Path,
    kind: CredentialKind,
    records: &[T],
) -> Result<CsvArtifact, IssuanceError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    for r in records {
        writer.serialize(r)?;
    }
    writer.flush()?;
    tracing::debug!(path = %path.display(), rows = records.len(), "wrote csv");
    Ok(CsvArtifact {
        kind,
        path: path.to_path_buf(),
        rows: records.len(),
    })
}

/// Enrollment first; the assessment file is only written once it succeeded.
pub fn write_dataset(
    dir: &Path,
    run_ts: NaiveDateTime,
    dataset: &Dataset,
) -> Result<(CsvArtifact, CsvArtifact), IssuanceError> {
    let enrollment = write_csv(
        &artifact_path(dir, run_ts, CredentialKind::Enrollment),
        CredentialKind::Enrollment,
        &dataset.students,
    )?;
    let assessment = write_csv(
        &artifact_path(dir, run_ts, CredentialKind::Assessment),
        CredentialKind::Assessment,
        &dataset.assessments,
    )?;
    Ok((enrollment, assessment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{AssessmentRecord, StudentRecord};
    use crate::services::dataset::{BuiltinNames, DatasetGenerator};
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn run_ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 3, 7)
            .and_then(|d| d.and_hms_opt(15, 4, 9))
            .expect("valid timestamp")
    }

    fn dataset(n: usize) -> Dataset {
        DatasetGenerator::new(&BuiltinNames, n, "3").generate(&mut StdRng::seed_from_u64(9))
    }

    #[test]
    fn file_names_carry_run_timestamp_and_suffix() {
        let dir = Path::new("/tmp/out");
        assert_eq!(
            artifact_path(dir, run_ts(), CredentialKind::Enrollment),
            dir.join("07_Mar_2023_03_04_09_pm_enrollment.csv")
        );
        assert_eq!(
            artifact_path(dir, run_ts(), CredentialKind::Assessment),
            dir.join("07_Mar_2023_03_04_09_pm_assessment.csv")
        );
    }

    #[test]
    fn enrollment_round_trips_through_csv() {
        let tmp = TempDir::new().expect("temp dir");
        let ds = dataset(10);
        let (enrollment, assessment) =
            write_dataset(tmp.path(), run_ts(), &ds).expect("write dataset");
        assert_eq!(enrollment.rows, 10);
        assert_eq!(assessment.rows, 10);

        let mut reader = csv::Reader::from_path(&enrollment.path).expect("open enrollment");
        let headers: Vec<String> = reader
            .headers()
            .expect("headers")
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(
            headers,
            [
                "username",
                "name",
                "email",
                "contact",
                "student_id",
                "guardian_name",
                "dob",
                "enrolled_on",
                "aadhar_token"
            ]
        );
        let back: Vec<StudentRecord> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .expect("parse enrollment");
        assert_eq!(back, ds.students);

        let back: Vec<AssessmentRecord> = csv::Reader::from_path(&assessment.path)
            .expect("open assessment")
            .deserialize()
            .collect::<Result<_, _>>()
            .expect("parse assessment");
        assert_eq!(back, ds.assessments);
    }

    #[test]
    fn dates_are_written_without_time() {
        let tmp = TempDir::new().expect("temp dir");
        let ds = dataset(1);
        let (enrollment, _) = write_dataset(tmp.path(), run_ts(), &ds).expect("write");
        let raw = std::fs::read_to_string(enrollment.path).expect("read back");
        let row: Vec<&str> = raw.lines().nth(1).expect("data row").split(',').collect();
        assert_eq!(row[6], ds.students[0].dob.format("%Y-%m-%d").to_string());
        assert_eq!(row[7].len(), "2021-01-01".len());
    }

    #[test]
    fn unwritable_directory_is_an_io_error() {
        let tmp = TempDir::new().expect("temp dir");
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, "x").expect("write blocker file");
        let err = write_dataset(&blocker, run_ts(), &dataset(2)).expect_err("must fail");
        assert_eq!(err.kind(), "io");
        assert!(!blocker.join("07_Mar_2023_03_04_09_pm_assessment.csv").exists());
    }
}
