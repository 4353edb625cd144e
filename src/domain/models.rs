use crate::domain::constants::UPLOAD_FILES_PATH;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// Immutable parameters of one issuance run, built once at startup.
#[derive(Clone)]
pub struct RunConfig {
    pub base_url: String,
    pub client_username: String,
    pub default_password: String,
    pub wallet_url: String,
    pub verification_url: String,
    pub out_dir: PathBuf,
    pub student_count: usize,
    pub seed: Option<u64>,
    /// `None` means requests may block indefinitely.
    pub request_timeout: Option<Duration>,
    pub profile: IssuanceProfile,
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("base_url", &self.base_url)
            .field("client_username", &self.client_username)
            .field("default_password", &"***")
            .field("wallet_url", &self.wallet_url)
            .field("verification_url", &self.verification_url)
            .field("out_dir", &self.out_dir)
            .field("student_count", &self.student_count)
            .field("seed", &self.seed)
            .field("request_timeout", &self.request_timeout)
            .field("profile", &self.profile)
            .finish()
    }
}

fn default_school_id() -> String {
    "SCH-0001".to_string()
}

fn default_school_name() -> String {
    "Bulk Issuance Demo School".to_string()
}

fn default_grade() -> String {
    "class-8".to_string()
}

fn default_academic_year() -> String {
    "2022-2023".to_string()
}

fn default_assessment() -> String {
    "Quarterly Assessment".to_string()
}

fn default_quarterly_assessment() -> String {
    "3".to_string()
}

fn default_validity_days() -> i64 {
    365
}

/// Fixed metadata sent with every upload. Loaded from an optional TOML file.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct IssuanceProfile {
    #[serde(default)]
    pub school: SchoolProfile,
    #[serde(default)]
    pub credential: CredentialProfile,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SchoolProfile {
    #[serde(default = "default_school_id")]
    pub id: String,
    #[serde(default = "default_school_name")]
    pub name: String,
}

impl Default for SchoolProfile {
    fn default() -> Self {
        Self {
            id: default_school_id(),
            name: default_school_name(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CredentialProfile {
    #[serde(default = "default_grade")]
    pub grade: String,
    #[serde(default = "default_academic_year")]
    pub academic_year: String,
    #[serde(default = "default_assessment")]
    pub assessment: String,
    #[serde(default = "default_quarterly_assessment")]
    pub quarterly_assessment: String,
    #[serde(default = "default_validity_days")]
    pub validity_days: i64,
}

impl Default for CredentialProfile {
    fn default() -> Self {
        Self {
            grade: default_grade(),
            academic_year: default_academic_year(),
            assessment: default_assessment(),
            quarterly_assessment: default_quarterly_assessment(),
            validity_days: default_validity_days(),
        }
    }
}

/// Bearer credential for issuer registration. Lives only in process memory.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientToken(pub String);

/// Bearer credential for uploads, scoped to one issuer identity.
#[derive(Clone, PartialEq, Eq)]
pub struct IssuerToken(pub String);

impl ClientToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl IssuerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientToken(***)")
    }
}

impl fmt::Debug for IssuerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IssuerToken(***)")
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct IssuerIdentity {
    pub issuer_id: String,
    pub name: String,
    pub did: String,
    pub email: String,
    pub mobile: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StudentRecord {
    pub username: String,
    pub name: String,
    pub email: String,
    pub contact: String,
    pub student_id: String,
    pub guardian_name: String,
    pub dob: NaiveDate,
    pub enrolled_on: NaiveDate,
    pub aadhar_token: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AssessmentRecord {
    pub username: String,
    pub name: String,
    pub email: String,
    pub contact: String,
    pub student_id: String,
    pub dob: NaiveDate,
    pub marks: u32,
    pub total: u32,
    pub grade: String,
    pub quarterly_assessment: String,
}

/// Enrollment and assessment rows for the same students, index-aligned.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub students: Vec<StudentRecord>,
    pub assessments: Vec<AssessmentRecord>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CredentialKind {
    Enrollment,
    Assessment,
}

impl CredentialKind {
    pub fn upload_path(self) -> String {
        let suffix = match self {
            CredentialKind::Enrollment => "proofOfEnrollment",
            CredentialKind::Assessment => "proofOfAssessment",
        };
        format!("{}/{}", UPLOAD_FILES_PATH, suffix)
    }

    pub fn file_suffix(self) -> &'static str {
        match self {
            CredentialKind::Enrollment => "_enrollment.csv",
            CredentialKind::Assessment => "_assessment.csv",
        }
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialKind::Enrollment => f.write_str("enrollment"),
            CredentialKind::Assessment => f.write_str("assessment"),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CsvArtifact {
    pub kind: CredentialKind,
    pub path: PathBuf,
    pub rows: usize,
}

#[derive(Debug, Serialize, Clone)]
pub struct UploadResult {
    pub kind: CredentialKind,
    pub artifact: PathBuf,
    pub success: bool,
    pub response: serde_json::Value,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LearnerAccount {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct RunReport {
    pub issuer: IssuerIdentity,
    pub wallet_url: String,
    pub verification_url: String,
    pub instructions: Vec<String>,
    pub accounts: Vec<LearnerAccount>,
    pub artifacts: Vec<CsvArtifact>,
    pub uploads: Vec<UploadResult>,
}

/// Pipeline stages in execution order.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    LoadConfig,
    GetClientToken,
    GetDid,
    RegisterIssuer,
    GetIssuerToken,
    GenerateDataset,
    WriteCsv,
    UploadEnrollment,
    UploadAssessment,
    Report,
}

impl Stage {
    pub fn code(self) -> &'static str {
        match self {
            Stage::LoadConfig => "S0",
            Stage::GetClientToken => "S1",
            Stage::GetDid => "S2",
            Stage::RegisterIssuer => "S3",
            Stage::GetIssuerToken => "S4",
            Stage::GenerateDataset => "S5",
            Stage::WriteCsv => "S6",
            Stage::UploadEnrollment => "S7",
            Stage::UploadAssessment => "S8",
            Stage::Report => "S9",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::LoadConfig => "loading configuration",
            Stage::GetClientToken => "fetching client token",
            Stage::GetDid => "requesting issuer DID",
            Stage::RegisterIssuer => "registering issuer",
            Stage::GetIssuerToken => "fetching issuer token",
            Stage::GenerateDataset => "generating learner dataset",
            Stage::WriteCsv => "writing CSV files",
            Stage::UploadEnrollment => "uploading enrollment credentials",
            Stage::UploadAssessment => "uploading assessment credentials",
            Stage::Report => "building report",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.label())
    }
}
