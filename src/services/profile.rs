use crate::domain::constants::VALIDITY_DAYS_RANGE;
use crate::domain::models::IssuanceProfile;
use std::path::Path;

/// A missing file yields the built-in profile; a malformed one is an error.
pub fn load_profile(path: Option<&Path>) -> anyhow::Result<IssuanceProfile> {
    let Some(path) = path else {
        return Ok(IssuanceProfile::default());
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "profile not found, using defaults");
        return Ok(IssuanceProfile::default());
    }
    let raw = std::fs::read_to_string(path)?;
    let profile: IssuanceProfile = toml::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("invalid issuance profile {}: {}", path.display(), e))?;
    let days = profile.credential.validity_days;
    if !VALIDITY_DAYS_RANGE.contains(&days) {
        anyhow::bail!(
            "invalid issuance profile {}: validity_days {} is outside {}..={}",
            path.display(),
            days,
            VALIDITY_DAYS_RANGE.start(),
            VALIDITY_DAYS_RANGE.end()
        );
    }
    Ok(profile)
}
