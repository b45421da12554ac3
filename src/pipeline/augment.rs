use crate::types::CourseRecord;
use std::collections::HashSet;
use tracing::{info, warn};

/// Appends the manually curated additions to the deduplicated table, then
/// collapses duplicate codes with first-occurrence-wins. The extracted table
/// comes first, so an extracted row always beats a colliding manual one:
/// the additions are a safety net for omissions, never an override.
///
/// The incoming table can itself still carry a duplicate code when a
/// department rewrite lands on a code the extractor also produced. Those
/// collapse first-wins here too, and are logged separately from the manual
/// additions so the counts stay honest.
pub fn augment(records: Vec<CourseRecord>, additions: &[CourseRecord]) -> Vec<CourseRecord> {
    let mut seen = HashSet::new();
    let mut table = Vec::with_capacity(records.len() + additions.len());

    let mut collapsed = 0usize;
    for record in records {
        if seen.contains(record.code.as_str()) {
            collapsed += 1;
            warn!(
                "duplicate code {:?} in the corrected table collapsed first-wins \
                 (a department rewrite collided with an extracted code)",
                record.code
            );
            continue;
        }
        seen.insert(record.code.clone());
        table.push(record);
    }

    let mut added = 0usize;
    let mut skipped = 0usize;
    for record in additions {
        if seen.insert(record.code.clone()) {
            table.push(record.clone());
            added += 1;
        } else {
            skipped += 1;
        }
    }

    if collapsed > 0 {
        info!("augmentation collapsed {} duplicate extracted codes", collapsed);
    }
    info!(
        "augmentation added {} manual records ({} skipped as already present)",
        added, skipped
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, title: &str) -> CourseRecord {
        let department = code.split(' ').next().unwrap().to_string();
        let level = code
            .split(' ')
            .nth(1)
            .and_then(|l| l[..3].parse().ok())
            .unwrap();
        CourseRecord {
            code: code.to_string(),
            title: title.to_string(),
            department,
            level,
        }
    }

    #[test]
    fn test_missing_courses_are_added() {
        let table = augment(
            vec![course("HIST 264", "Topics in World History")],
            &[course("PHYS 151", "Mechanics")],
        );

        assert_eq!(table.len(), 2);
        assert_eq!(table[1].code, "PHYS 151");
    }

    #[test]
    fn test_extracted_record_beats_colliding_manual_addition() {
        let table = augment(
            vec![course("ECON 101", "X")],
            &[course("ECON 101", "Y")],
        );

        assert_eq!(table.len(), 1);
        assert_eq!(table[0].title, "X");
    }

    #[test]
    fn test_duplicate_extracted_codes_collapse_with_no_additions() {
        // A department rewrite can land on a code the extractor also
        // produced, so the incoming table may repeat a code even with the
        // manual-addition list empty.
        let table = augment(
            vec![
                course("AVC 266", "History of Photography"),
                course("AVC 266", "Photography Rewritten"),
            ],
            &[],
        );

        assert_eq!(table.len(), 1);
        assert_eq!(table[0].title, "History of Photography");
    }

    #[test]
    fn test_collapsed_extracted_codes_do_not_affect_manual_counting() {
        let table = augment(
            vec![course("AVC 266", "First"), course("AVC 266", "Second")],
            &[course("MUSI 100", "Fundamentals of Music")],
        );

        let codes: Vec<&str> = table.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["AVC 266", "MUSI 100"]);
    }
}
