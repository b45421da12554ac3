use crate::config::DeduplicationConfig;
use crate::error::{CatalogError, Result};
use crate::pipeline::derive::{department_of, level_of};
use crate::types::CourseRecord;
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Checks every final-table invariant before the catalog is written. This is
/// the only hard gate protecting downstream stages from a malformed catalog,
/// so any violation is fatal.
pub fn validate(records: &[CourseRecord], config: &DeduplicationConfig) -> Result<()> {
    let blacklist: HashSet<&str> = config.blacklist.iter().map(String::as_str).collect();
    let independent: HashSet<u16> = config.independent_work_levels.iter().copied().collect();

    let mut codes = HashSet::new();
    let mut titles: HashMap<&str, &str> = HashMap::new();

    for record in records {
        if !codes.insert(record.code.as_str()) {
            return Err(CatalogError::Validation(format!(
                "duplicate course code in final table: {:?}",
                record.code
            )));
        }

        if department_of(&record.code) != Some(record.department.as_str()) {
            return Err(CatalogError::Validation(format!(
                "department {:?} is not the alphabetic prefix of code {:?}",
                record.department, record.code
            )));
        }
        if level_of(&record.code) != Some(record.level) {
            return Err(CatalogError::Validation(format!(
                "level {} does not match the numeric component of code {:?}",
                record.level, record.code
            )));
        }

        if blacklist.contains(record.code.as_str()) {
            return Err(CatalogError::Validation(format!(
                "blacklisted course code in final table: {:?}",
                record.code
            )));
        }
        if record.level == config.excluded_level {
            return Err(CatalogError::Validation(format!(
                "excluded level {} in final table for code {:?}",
                record.level, record.code
            )));
        }

        // Shared titles are only legitimate between independent-work slots.
        if !independent.contains(&record.level) {
            if let Some(other) = titles.insert(record.title.as_str(), record.code.as_str()) {
                return Err(CatalogError::Validation(format!(
                    "title {:?} shared by {:?} and {:?} outside the independent-work exemption",
                    record.title, other, record.code
                )));
            }
        }
    }

    info!("validated final table: {} rows, all invariants hold", records.len());
    Ok(())
}
