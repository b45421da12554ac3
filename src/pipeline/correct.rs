use crate::config::DepartmentRewrite;
use crate::types::CourseRecord;
use std::collections::HashMap;
use tracing::{debug, info};

/// Replaces titles for codes listed in the override table. A subset of codes
/// is known to extract a truncated or malformed title; the overrides carry
/// the manually verified text. Returns the number of titles replaced.
pub fn apply_title_overrides(
    records: &mut [CourseRecord],
    overrides: &HashMap<String, String>,
) -> usize {
    let mut corrected = 0usize;
    for record in records.iter_mut() {
        if let Some(title) = overrides.get(&record.code) {
            debug!("overriding title for {}: {:?}", record.code, title);
            record.title = title.clone();
            corrected += 1;
        }
    }
    info!("title correction replaced {} titles", corrected);
    corrected
}

/// Rewrites the department prefix for codes known to carry the wrong one.
/// `department` and `code` change in one atomic update; the level suffix is
/// untouched. Returns the number of records rewritten.
pub fn apply_department_rewrites(
    records: &mut [CourseRecord],
    rewrites: &[DepartmentRewrite],
) -> usize {
    let by_code: HashMap<&str, &str> = rewrites
        .iter()
        .map(|r| (r.code.as_str(), r.department.as_str()))
        .collect();

    let mut rewritten = 0usize;
    for record in records.iter_mut() {
        if let Some(department) = by_code.get(record.code.as_str()) {
            let old_code = record.code.clone();
            record.rewrite_department(department);
            debug!("rewrote department: {} -> {}", old_code, record.code);
            rewritten += 1;
        }
    }
    info!("department correction rewrote {} codes", rewritten);
    rewritten
}
