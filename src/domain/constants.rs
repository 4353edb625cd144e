pub const CLIENT_TOKEN_PATH: &str = "/bulk/v1/clienttoken";
pub const GET_DID_PATH: &str = "/bulk/v1/getdid";
pub const ISSUER_REGISTER_PATH: &str = "/bulk/v1/issuerregister";
pub const ISSUER_TOKEN_PATH: &str = "/bulk/v1/issuertoken";
pub const UPLOAD_FILES_PATH: &str = "/bulk/v1/uploadFiles";

pub const DEFAULT_STUDENT_COUNT: usize = 10;

/// Every assessment is marked out of this total.
pub const ASSESSMENT_TOTAL: u32 = 300;

pub const GRADE_LABELS: &[&str] = &["A+", "A", "B", "C", "D"];

pub const EMAIL_DOMAIN: &str = "example.com";
pub const ISSUER_MOBILE_PLACEHOLDER: &str = "9999999999";

/// `DD_MMM_YYYY_hh_mm_ss_am`
pub const RUN_TIMESTAMP_FORMAT: &str = "%d_%b_%Y_%I_%M_%S_%P";

/// Accepted credential validity, in days.
pub const VALIDITY_DAYS_RANGE: std::ops::RangeInclusive<i64> = 1..=36_500;
