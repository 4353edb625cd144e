use crate::domain::models::{
    CsvArtifact, IssuerIdentity, LearnerAccount, RunConfig, RunReport, StudentRecord,
    UploadResult,
};

pub fn instructions(config: &RunConfig) -> Vec<String> {
    vec![
        format!(
            "Learners sign in to the wallet at {} with the username and password listed below.",
            config.wallet_url
        ),
        "Issued credentials appear in the learner wallet once the batch has been processed."
            .to_string(),
        format!(
            "Credentials can be checked by scanning their QR code or uploading them at {}.",
            config.verification_url
        ),
    ]
}

/// One account per generated student, all sharing the run's default password.
pub fn learner_accounts(students: &[StudentRecord], password: &str) -> Vec<LearnerAccount> {
    students
        .iter()
        .map(|s| LearnerAccount {
            username: s.username.clone(),
            password: password.to_string(),
        })
        .collect()
}

pub fn build_run_report(
    config: &RunConfig,
    issuer: IssuerIdentity,
    students: &[StudentRecord],
    artifacts: Vec<CsvArtifact>,
    uploads: Vec<UploadResult>,
) -> RunReport {
    RunReport {
        issuer,
        wallet_url: config.wallet_url.clone(),
        verification_url: config.verification_url.clone(),
        instructions: instructions(config),
        accounts: learner_accounts(students, &config.default_password),
        artifacts,
        uploads,
    }
}
