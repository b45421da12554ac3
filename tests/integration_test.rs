use anyhow::Result;
use std::fs;
use tempfile::tempdir;

use catalog_ingest::{Config, Pipeline};

const CONFIG: &str = r#"
[source]
listings_sentinel = "Course Descriptions"
min_expected_courses = 1

[vocabulary]
departments = ["HIST", "ASIA", "ECON", "PHIL", "AVC", "ARTH"]

[corrections.titles]
"AVC 212A" = "Intermediate Studio: Painting"

[[corrections.departments]]
code = "ARTH 266"
department = "AVC"

[deduplication]
blacklist = ["PHIL 666"]
excluded_level = 999
independent_work_levels = [395]
keepers = ["HIST 264"]

[[additions]]
code = "ECON 101"
title = "Manual Title That Must Lose"
department = "ECON"
level = 101

[[additions]]
code = "PHIL 210"
title = "Logic"
department = "PHIL"
level = 210
"#;

const CATALOG_TEXT: &str = "\
Office of the Registrar
Academic Regulations and other front matter.

Course Descriptions

HIST 264  Topics in World History. A survey of global history
since 1500, taught jointly with Asian Studies.
Instructor Permission Required: No

ASIA 264  Topics in World History. A survey of global history
since 1500, taught jointly with History.
Instructor Permission Required: No

ECON 101  Principles of Economics. Supply, demand, and markets.
Instructor Permission Required: No

AVC 212A  Intermediate Studio. Materials fee required.
Instructor Permission Required: Yes

ARTH 266  History of Photography. From the daguerreotype onward.
Instructor Permission Required: No

PHIL 666  Retired Seminar. Kept in the source by mistake.
Instructor Permission Required: Yes

HIST 999  Registration Placeholder. Administrative use only.
Instructor Permission Required: No

HIST 395  Independent Study. Directed reading with a faculty sponsor.
Instructor Permission Required: Yes

ECON 395  Independent Study. Directed research with a faculty sponsor.
Instructor Permission Required: Yes
";

fn run_pipeline(output_dir: &std::path::Path) -> Result<catalog_ingest::IngestReport> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("catalog.toml");
    let input_path = temp_dir.path().join("catalog.txt");
    fs::write(&config_path, CONFIG)?;
    fs::write(&input_path, CATALOG_TEXT)?;

    let config = Config::load(&config_path)?;
    let pipeline = Pipeline::new(config);
    Ok(pipeline.run(&input_path, output_dir)?)
}

fn read_rows(output_dir: &std::path::Path) -> Result<(String, Vec<Vec<String>>)> {
    let content = fs::read_to_string(output_dir.join("catalog.csv"))?;
    let mut lines = content.lines();
    let header = lines.next().unwrap_or_default().to_string();
    let rows = lines
        .map(|l| l.split(',').map(str::to_string).collect())
        .collect();
    Ok((header, rows))
}

#[test]
fn test_end_to_end_catalog_ingest() -> Result<()> {
    let out = tempdir()?;
    let report = run_pipeline(out.path())?;

    let (header, rows) = read_rows(out.path())?;
    assert_eq!(header, "CourseCode,CourseTitle,Department,CourseLevel");

    let codes: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();

    // Keeper resolution: HIST 264 kept, the cross-listed ASIA 264 dropped.
    assert!(codes.contains(&"HIST 264"));
    assert!(!codes.contains(&"ASIA 264"));

    // Well-formed block from the listings survives with derived fields.
    let hist = rows.iter().find(|r| r[0] == "HIST 264").unwrap();
    assert_eq!(hist[1], "Topics in World History");
    assert_eq!(hist[2], "HIST");
    assert_eq!(hist[3], "264");

    // Title correction applied to the known-bad extraction.
    let avc = rows.iter().find(|r| r[0] == "AVC 212A").unwrap();
    assert_eq!(avc[1], "Intermediate Studio: Painting");

    // Department rewrite moved ARTH 266 to AVC, code and department together.
    assert!(codes.contains(&"AVC 266"));
    assert!(!codes.contains(&"ARTH 266"));

    // Blacklist and excluded administrative level removed.
    assert!(!codes.contains(&"PHIL 666"));
    assert!(!codes.contains(&"HIST 999"));

    // Independent-work slots share a title legitimately.
    assert!(codes.contains(&"HIST 395"));
    assert!(codes.contains(&"ECON 395"));

    // Manual addition for a missing course lands; the colliding one loses.
    assert!(codes.contains(&"PHIL 210"));
    let econ = rows.iter().find(|r| r[0] == "ECON 101").unwrap();
    assert_eq!(econ[1], "Principles of Economics");

    // CourseCode is unique across the final table.
    let mut unique = codes.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), codes.len());

    assert_eq!(report.final_rows, rows.len());
    assert!(out.path().join("ingest_report.json").exists());
    Ok(())
}

#[test]
fn test_runs_are_byte_identical() -> Result<()> {
    let first = tempdir()?;
    let second = tempdir()?;
    run_pipeline(first.path())?;
    run_pipeline(second.path())?;

    let a = fs::read(first.path().join("catalog.csv"))?;
    let b = fs::read(second.path().join("catalog.csv"))?;
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn test_department_rewrite_collision_collapses_first_wins() -> Result<()> {
    // A department rewrite can produce a code the extractor also emitted;
    // the collision must collapse first-wins at augmentation, not panic and
    // not reach the duplicate-code validation gate. Install a subscriber so
    // every log argument is actually evaluated.
    let _ = tracing_subscriber::fmt().try_init();

    let config = r#"
[source]
listings_sentinel = "Course Descriptions"
min_expected_courses = 1

[vocabulary]
departments = ["AVC", "ARTH"]

[[corrections.departments]]
code = "ARTH 266"
department = "AVC"

[deduplication]
excluded_level = 999
independent_work_levels = [395]
"#;
    let text = "\
Course Descriptions
AVC 266  History of Photography. From the daguerreotype onward.
Instructor Permission Required: No
ARTH 266  Photography and the Archive. A seminar on photographic history.
Instructor Permission Required: Yes
";

    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("catalog.toml");
    let input_path = temp_dir.path().join("catalog.txt");
    fs::write(&config_path, config)?;
    fs::write(&input_path, text)?;

    let pipeline = Pipeline::new(Config::load(&config_path)?);
    let report = pipeline.run(&input_path, temp_dir.path())?;

    let (_, rows) = read_rows(temp_dir.path())?;
    assert_eq!(report.final_rows, 1);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "AVC 266");
    assert_eq!(rows[0][1], "History of Photography");
    Ok(())
}

#[test]
fn test_missing_listings_sentinel_aborts() -> Result<()> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("catalog.toml");
    let input_path = temp_dir.path().join("catalog.txt");
    fs::write(&config_path, CONFIG)?;
    fs::write(&input_path, "No listings section in this file at all.")?;

    let config = Config::load(&config_path)?;
    let pipeline = Pipeline::new(config);
    let result = pipeline.run(&input_path, temp_dir.path());

    assert!(matches!(
        result,
        Err(catalog_ingest::CatalogError::Format(_))
    ));
    Ok(())
}
