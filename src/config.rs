use crate::error::{CatalogError, Result};
use crate::types::CourseRecord;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::warn;

/// The full knowledge base driving one ingest run: parsing sentinels, the
/// department vocabulary, and every manually curated correction table.
///
/// Each table is versioned in the config file rather than hardcoded so the
/// curated domain knowledge can evolve independently of the pipeline code.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    pub vocabulary: VocabularyConfig,
    #[serde(default)]
    pub corrections: CorrectionsConfig,
    pub deduplication: DeduplicationConfig,
    /// Courses known to be missing from the source text, supplied verbatim.
    #[serde(default)]
    pub additions: Vec<CourseRecord>,
}

#[derive(Debug, Deserialize)]
pub struct SourceConfig {
    /// Literal substring marking the start of the course listings section.
    pub listings_sentinel: String,
    /// Below this many extracted blocks the run logs an extraction-gap
    /// warning, since it likely indicates catalog-format drift.
    #[serde(default = "default_min_expected_courses")]
    pub min_expected_courses: usize,
}

fn default_min_expected_courses() -> usize {
    100
}

#[derive(Debug, Deserialize)]
pub struct VocabularyConfig {
    /// Department tokens the extractor may match, in match-priority order.
    pub departments: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CorrectionsConfig {
    /// Verified replacement titles for codes known to extract badly.
    #[serde(default)]
    pub titles: HashMap<String, String>,
    /// Codes known to carry the wrong department prefix.
    #[serde(default)]
    pub departments: Vec<DepartmentRewrite>,
}

/// One department-prefix correction: the code as extracted, and the
/// department token it should have carried.
#[derive(Debug, Deserialize)]
pub struct DepartmentRewrite {
    pub code: String,
    pub department: String,
}

#[derive(Debug, Deserialize)]
pub struct DeduplicationConfig {
    /// Codes removed unconditionally before cross-listing resolution.
    #[serde(default)]
    pub blacklist: Vec<String>,
    /// Administrative level code that never represents a real course.
    pub excluded_level: u16,
    /// Thesis/independent-study levels exempt from title deduplication.
    pub independent_work_levels: Vec<u16>,
    /// Canonical code per cross-listed title group; non-keepers are dropped.
    #[serde(default)]
    pub keepers: Vec<String>,
    /// When true, a cross-listed title group with no keeper fails the run
    /// instead of silently vanishing.
    #[serde(default)]
    pub strict_keepers: bool,
}

impl Config {
    /// Loads and sanity-checks the knowledge base from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CatalogError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut config: Config = toml::from_str(&content)?;

        if config.vocabulary.departments.is_empty() {
            return Err(CatalogError::Config(
                "Department vocabulary is empty".to_string(),
            ));
        }

        config.dedupe_vocabulary();
        Ok(config)
    }

    /// The source vocabulary is known to repeat a few tokens. Matching is
    /// set-membership so duplicates are harmless, but they are collapsed
    /// here (first occurrence kept) to keep the alternation pattern clean.
    fn dedupe_vocabulary(&mut self) {
        let mut seen = std::collections::HashSet::new();
        let before = self.vocabulary.departments.len();
        self.vocabulary.departments.retain(|d| seen.insert(d.clone()));
        let dropped = before - self.vocabulary.departments.len();
        if dropped > 0 {
            warn!(
                "department vocabulary contained {} duplicate token(s); deduplicated",
                dropped
            );
        }
    }
}
