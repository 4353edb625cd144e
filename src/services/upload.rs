use crate::domain::constants::ASSESSMENT_TOTAL;
use crate::domain::models::{
    CredentialKind, CsvArtifact, IssuanceProfile, IssuerToken, UploadResult,
};
use crate::error::IssuanceError;
use crate::issuance::{IssuanceApi, UploadRequest};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{json, Value};

pub fn issuer_detail(did: &str, profile: &IssuanceProfile) -> Value {
    json!({
        "did": did,
        "schoolName": profile.school.name,
        "schoolId": profile.school.id,
    })
}

/// Expiration must land strictly after issuance.
pub fn vc_data(issued_at: DateTime<Utc>, validity_days: i64) -> Result<Value, IssuanceError> {
    let expires_at = Duration::try_days(validity_days)
        .filter(|_| validity_days > 0)
        .and_then(|d| issued_at.checked_add_signed(d))
        .ok_or_else(|| {
            IssuanceError::Metadata(format!("unusable credential validity: {} days", validity_days))
        })?;
    Ok(json!({
        "issuanceDate": issued_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        "expirationDate": expires_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

pub fn credential_subject_common(kind: CredentialKind, profile: &IssuanceProfile) -> Value {
    let c = &profile.credential;
    match kind {
        CredentialKind::Enrollment => json!({
            "grade": c.grade,
            "academicYear": c.academic_year,
        }),
        CredentialKind::Assessment => json!({
            "grade": c.grade,
            "academicYear": c.academic_year,
            "assessment": c.assessment,
            "total": ASSESSMENT_TOTAL.to_string(),
            "quarterlyAssessment": c.quarterly_assessment,
        }),
    }
}

pub fn build_upload_request(
    artifact: &CsvArtifact,
    did: &str,
    profile: &IssuanceProfile,
    issued_at: DateTime<Utc>,
) -> Result<UploadRequest, IssuanceError> {
    Ok(UploadRequest {
        kind: artifact.kind,
        csv_path: artifact.path.clone(),
        issuer_detail: issuer_detail(did, profile),
        vc_data: vc_data(issued_at, profile.credential.validity_days)?,
        credential_subject_common: credential_subject_common(artifact.kind, profile),
    })
}

pub fn upload_artifact<A: IssuanceApi + ?Sized>(
    api: &A,
    token: &IssuerToken,
    request: &UploadRequest,
) -> Result<UploadResult, IssuanceError> {
    let response = api.upload_files(token, request)?;
    Ok(UploadResult {
        kind: request.kind,
        artifact: request.csv_path.clone(),
        success: true,
        response,
    })
}
