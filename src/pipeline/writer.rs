use crate::error::Result;
use crate::pipeline::IngestReport;
use crate::types::CourseRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the canonical catalog table inside the output directory.
pub const CATALOG_FILE: &str = "catalog.csv";
/// File name of the per-run diagnostics report.
pub const REPORT_FILE: &str = "ingest_report.json";

/// Persists the final table as a CSV artifact with the stable column headers
/// `CourseCode`, `CourseTitle`, `Department`, `CourseLevel`. Fails loudly on
/// any I/O problem; the scheduling stage must never see a partial catalog.
pub fn write_catalog(records: &[CourseRecord], output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(CATALOG_FILE);

    let mut writer = csv::Writer::from_path(&path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!("wrote {} course rows to {}", records.len(), path.display());
    Ok(path)
}

/// Persists the run report beside the catalog artifact.
pub fn write_report(report: &IngestReport, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(REPORT_FILE);
    fs::write(&path, serde_json::to_string_pretty(report)?)?;
    Ok(path)
}
