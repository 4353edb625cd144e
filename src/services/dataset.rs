use crate::domain::constants::{
    ASSESSMENT_TOTAL, EMAIL_DOMAIN, GRADE_LABELS, ISSUER_MOBILE_PLACEHOLDER,
};
use crate::domain::models::{AssessmentRecord, Dataset, IssuerIdentity, StudentRecord};
use chrono::{Duration, NaiveDate};
use md5::{Digest, Md5};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use std::collections::HashSet;

const MAX_REDRAWS: usize = 32;

const FIRST_NAMES: &[&str] = &[
    "Aarav", "Aditi", "Alex", "Amara", "Ananya", "Arjun", "Bianca", "Chen", "Diya", "Elena",
    "Farah", "Gabriel", "Hana", "Ishaan", "Jonas", "Kavya", "Leila", "Mateo", "Meera", "Nikhil",
    "Olivia", "Priya", "Rahul", "Rohan", "Sara", "Tariq", "Uma", "Vikram", "Yara", "Zoya",
];

const LAST_NAMES: &[&str] = &[
    "Agarwal", "Bose", "Castillo", "Das", "Fernandes", "Gupta", "Hughes", "Iyer", "Joshi",
    "Kapoor", "Khan", "Lopez", "Mehta", "Menon", "Nair", "Okafor", "Patel", "Rao", "Reddy",
    "Sharma", "Singh", "Tan", "Verma", "Wong",
];

/// Supplies person names for generated records.
pub trait NameSource {
    fn first_name(&self, rng: &mut dyn RngCore) -> String;
    fn last_name(&self, rng: &mut dyn RngCore) -> String;
}

/// Picks from small embedded name lists.
pub struct BuiltinNames;

impl NameSource for BuiltinNames {
    fn first_name(&self, rng: &mut dyn RngCore) -> String {
        FIRST_NAMES.choose(rng).copied().unwrap_or("Alex").to_string()
    }

    fn last_name(&self, rng: &mut dyn RngCore) -> String {
        LAST_NAMES.choose(rng).copied().unwrap_or("Rao").to_string()
    }
}

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy)]
pub struct DateBounds {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateBounds {
    pub fn contains(&self, d: NaiveDate) -> bool {
        d >= self.start && d <= self.end
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> NaiveDate {
        let span = (self.end - self.start).num_days();
        self.start + Duration::days(rng.gen_range(0..=span))
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

pub fn dob_bounds() -> DateBounds {
    DateBounds {
        start: ymd(1990, 1, 1),
        end: ymd(2005, 12, 31),
    }
}

pub fn enrollment_bounds() -> DateBounds {
    DateBounds {
        start: ymd(2020, 1, 1),
        end: ymd(2022, 12, 31),
    }
}

/// Hex MD5 of `text`. An identifier, not an integrity check.
pub fn content_token(text: &str) -> String {
    hex::encode(Md5::digest(text.as_bytes()))
}

fn draw_unique(
    taken: &mut HashSet<String>,
    index: usize,
    mut draw: impl FnMut() -> String,
) -> String {
    for _ in 0..MAX_REDRAWS {
        let candidate = draw();
        if taken.insert(candidate.clone()) {
            return candidate;
        }
    }
    let mut candidate = format!("{}_{}", draw(), index);
    while !taken.insert(candidate.clone()) {
        candidate.push('_');
    }
    candidate
}

fn mobile_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}{:09}",
        rng.gen_range(7..=9),
        rng.gen_range(0..1_000_000_000u32)
    )
}

pub struct DatasetGenerator<'a> {
    names: &'a dyn NameSource,
    count: usize,
    quarterly_assessment: String,
}

impl<'a> DatasetGenerator<'a> {
    pub fn new(names: &'a dyn NameSource, count: usize, quarterly_assessment: &str) -> Self {
        Self {
            names,
            count,
            quarterly_assessment: quarterly_assessment.to_string(),
        }
    }

    /// Exactly `count` enrollment rows and `count` assessment rows; row `i` of
    /// both sets describes the same student.
    pub fn generate<R: RngCore>(&self, rng: &mut R) -> Dataset {
        let dob_range = dob_bounds();
        let enrolled_range = enrollment_bounds();
        let mut usernames = HashSet::new();
        let mut student_ids = HashSet::new();
        let mut students = Vec::with_capacity(self.count);
        let mut assessments = Vec::with_capacity(self.count);

        for i in 0..self.count {
            let first = self.names.first_name(rng);
            let last = self.names.last_name(rng);
            let username = draw_unique(&mut usernames, i, || {
                format!("{}_{}", first, rng.gen_range(1..=1000)).to_lowercase()
            });
            let student_id = draw_unique(&mut student_ids, i, || {
                format!("{}_{}", rng.gen_range(1..=1000), username)
            });
            let name = format!("{} {}", first, last);
            let email = format!("{}@{}", username, EMAIL_DOMAIN);
            let contact = mobile_number(rng);
            let guardian_name = format!("{} {}", self.names.first_name(rng), last);
            let dob = dob_range.sample(rng);
            let enrolled_on = enrolled_range.sample(rng);
            let marks = rng.gen_range(1..=ASSESSMENT_TOTAL);
            let grade = GRADE_LABELS.choose(rng).copied().unwrap_or("A").to_string();

            assessments.push(AssessmentRecord {
                username: username.clone(),
                name: name.clone(),
                email: email.clone(),
                contact: contact.clone(),
                student_id: student_id.clone(),
                dob,
                marks,
                total: ASSESSMENT_TOTAL,
                grade,
                quarterly_assessment: self.quarterly_assessment.clone(),
            });
            students.push(StudentRecord {
                aadhar_token: content_token(&student_id),
                username,
                name,
                email,
                contact,
                student_id,
                guardian_name,
                dob,
                enrolled_on,
            });
        }

        tracing::debug!(count = students.len(), "generated dataset");
        Dataset {
            students,
            assessments,
        }
    }
}

/// Issuer fields known before the service assigns a DID.
#[derive(Debug, Clone)]
pub struct IssuerDraft {
    pub issuer_id: String,
    pub name: String,
}

impl IssuerDraft {
    pub fn generate<R: RngCore>(names: &dyn NameSource, rng: &mut R) -> Self {
        let first = names.first_name(rng);
        let last = names.last_name(rng);
        Self {
            issuer_id: format!(
                "{}_{}",
                first.to_lowercase(),
                rng.gen_range(100_000..=999_999)
            ),
            name: format!("{} {}", first, last),
        }
    }

    pub fn into_identity(self, did: String) -> IssuerIdentity {
        IssuerIdentity {
            email: format!("{}@{}", self.issuer_id, EMAIL_DOMAIN),
            mobile: ISSUER_MOBILE_PLACEHOLDER.to_string(),
            issuer_id: self.issuer_id,
            name: self.name,
            did,
        }
    }
}
