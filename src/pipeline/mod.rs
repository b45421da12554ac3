// Catalog ingestion pipeline: normalization, extraction, correction,
// deduplication, augmentation, validation, and the persisted artifact.

pub mod augment;
pub mod correct;
pub mod dedup;
pub mod derive;
pub mod extract;
pub mod normalize;
pub mod validate;
pub mod writer;

use crate::config::Config;
use crate::error::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// Stage-by-stage counts for one ingest run, persisted beside the catalog
/// artifact so operators can spot drift between runs.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    /// Raw course blocks matched by the extractor.
    pub raw_matches: usize,
    /// Records surviving field derivation and code deduplication.
    pub derived: usize,
    /// Titles replaced by the correction table.
    pub corrected_titles: usize,
    /// Department prefixes rewritten by the correction table.
    pub rewritten_departments: usize,
    /// Records surviving blacklist removal and cross-listing resolution.
    pub after_dedup: usize,
    /// Rows in the final validated table.
    pub final_rows: usize,
    /// Path of the persisted catalog table.
    pub output_file: String,
}

/// The one-shot batch transformation from raw catalog text to the canonical
/// course table. Strictly sequential: each stage consumes the complete
/// output of the previous one, so identical input and config always produce
/// byte-identical artifacts.
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs every stage over `input_path` and persists the catalog table and
    /// run report under `output_dir`.
    pub fn run(&self, input_path: &Path, output_dir: &Path) -> Result<IngestReport> {
        let raw_text = fs::read_to_string(input_path)?;
        info!(
            "ingesting catalog from {} ({} bytes)",
            input_path.display(),
            raw_text.len()
        );

        let normalized = normalize::normalize_lines(raw_text.lines());
        let listings =
            normalize::locate_listings(&normalized, &self.config.source.listings_sentinel)?;

        let extractor = extract::CourseExtractor::new(
            &self.config.vocabulary.departments,
            self.config.source.min_expected_courses,
        )?;
        let raw_courses = extractor.extract(listings);
        let raw_matches = raw_courses.len();

        let mut records = derive::derive_fields(raw_courses);
        let derived = records.len();

        let corrected_titles =
            correct::apply_title_overrides(&mut records, &self.config.corrections.titles);
        let rewritten_departments =
            correct::apply_department_rewrites(&mut records, &self.config.corrections.departments);

        let deduper = dedup::Deduplicator::new(&self.config.deduplication);
        let records = deduper.dedup(records)?;
        let after_dedup = records.len();

        let records = augment::augment(records, &self.config.additions);

        validate::validate(&records, &self.config.deduplication)?;

        let output_file = writer::write_catalog(&records, output_dir)?;
        let report = IngestReport {
            raw_matches,
            derived,
            corrected_titles,
            rewritten_departments,
            after_dedup,
            final_rows: records.len(),
            output_file: output_file.display().to_string(),
        };
        writer::write_report(&report, output_dir)?;

        info!(
            "ingest complete: {} raw matches -> {} final rows",
            report.raw_matches, report.final_rows
        );
        Ok(report)
    }
}
