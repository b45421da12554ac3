use crate::pipeline::extract::RawCourse;
use crate::types::CourseRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, info};

static DEPARTMENT_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]+").unwrap());
static COURSE_LEVEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{3}").unwrap());

/// The leading alphabetic run of a course code, if any.
pub fn department_of(code: &str) -> Option<&str> {
    DEPARTMENT_PREFIX.find(code).map(|m| m.as_str())
}

/// The first 3-digit run of a course code, if any.
pub fn level_of(code: &str) -> Option<u16> {
    COURSE_LEVEL
        .find(code)
        .and_then(|m| m.as_str().parse().ok())
}

/// Derives `department` and `level` from each raw code and drops rows the
/// pattern cannot explain, since those signal a corrupted match rather than
/// a valid course. Duplicate codes are collapsed with first-occurrence-wins
/// (extraction order), which protects against the extractor matching the
/// same header twice.
pub fn derive_fields(raw: Vec<RawCourse>) -> Vec<CourseRecord> {
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(raw.len());
    let mut unparseable = 0usize;
    let mut duplicates = 0usize;

    for course in raw {
        let (department, level) = match (department_of(&course.code), level_of(&course.code)) {
            (Some(dept), Some(level)) => (dept.to_string(), level),
            _ => {
                unparseable += 1;
                debug!("dropping unparseable course code {:?}", course.code);
                continue;
            }
        };

        if !seen.insert(course.code.clone()) {
            duplicates += 1;
            continue;
        }

        records.push(CourseRecord {
            code: course.code,
            title: course.title,
            department,
            level,
        });
    }

    info!(
        "derived fields for {} records ({} unparseable dropped, {} duplicate codes collapsed)",
        records.len(),
        unparseable,
        duplicates
    );
    records
}
