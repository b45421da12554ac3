use crate::config::DeduplicationConfig;
use crate::error::{CatalogError, Result};
use crate::types::CourseRecord;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

/// Resolves cross-listed courses down to one canonical record per course.
///
/// The keeper allow-list is the single source of truth for which code
/// represents a cross-listed title group. A group with no registered keeper
/// silently vanishes by default; `strict_keepers` turns that case into a
/// fatal error for operators who prefer fail-fast over a stale allow-list.
pub struct Deduplicator<'a> {
    blacklist: HashSet<&'a str>,
    keepers: HashSet<&'a str>,
    independent_work_levels: HashSet<u16>,
    excluded_level: u16,
    strict_keepers: bool,
}

impl<'a> Deduplicator<'a> {
    pub fn new(config: &'a DeduplicationConfig) -> Self {
        Self {
            blacklist: config.blacklist.iter().map(String::as_str).collect(),
            keepers: config.keepers.iter().map(String::as_str).collect(),
            independent_work_levels: config.independent_work_levels.iter().copied().collect(),
            excluded_level: config.excluded_level,
            strict_keepers: config.strict_keepers,
        }
    }

    fn is_independent_work(&self, record: &CourseRecord) -> bool {
        self.independent_work_levels.contains(&record.level)
    }

    /// Runs the four deduplication sub-steps in order: blacklist removal,
    /// independent-work exemption, title-collision counting, and keeper
    /// resolution. Output preserves input order.
    pub fn dedup(&self, records: Vec<CourseRecord>) -> Result<Vec<CourseRecord>> {
        // Sub-step 1: blacklisted codes and the administrative level.
        let before = records.len();
        let records: Vec<CourseRecord> = records
            .into_iter()
            .filter(|r| {
                !self.blacklist.contains(r.code.as_str()) && r.level != self.excluded_level
            })
            .collect();
        info!("blacklist removal dropped {} records", before - records.len());

        // Sub-steps 2 and 3: count titles among non-exempt candidates only.
        // Independent-work slots legitimately share titles and never count.
        let mut title_counts: HashMap<String, usize> = HashMap::new();
        for record in &records {
            if !self.is_independent_work(record) {
                *title_counts.entry(record.title.clone()).or_default() += 1;
            }
        }

        // Title groups that would vanish entirely: collided but no keeper.
        let mut keeperless: Vec<&str> = Vec::new();
        let mut group_has_keeper: HashSet<&str> = HashSet::new();
        for record in &records {
            if !self.is_independent_work(record) && self.keepers.contains(record.code.as_str()) {
                group_has_keeper.insert(record.title.as_str());
            }
        }
        for (title, count) in &title_counts {
            if *count > 1 && !group_has_keeper.contains(title.as_str()) {
                keeperless.push(title.as_str());
            }
        }
        if !keeperless.is_empty() {
            keeperless.sort_unstable();
            if self.strict_keepers {
                return Err(CatalogError::Validation(format!(
                    "cross-listed title group(s) with no registered keeper code: {:?}",
                    keeperless
                )));
            }
            for title in &keeperless {
                warn!(
                    "cross-listed title {:?} has no registered keeper; all members dropped",
                    title
                );
            }
        }

        // Sub-step 4: keeper resolution in one ordered pass.
        let before = records.len();
        let mut kept = Vec::with_capacity(records.len());
        for record in records {
            if self.is_independent_work(&record) {
                kept.push(record);
                continue;
            }
            match title_counts.get(&record.title) {
                Some(&count) if count > 1 => {
                    if self.keepers.contains(record.code.as_str()) {
                        kept.push(record);
                    }
                }
                _ => kept.push(record),
            }
        }
        info!(
            "cross-listing resolution dropped {} records, {} remain",
            before - kept.len(),
            kept.len()
        );

        Ok(kept)
    }
}
