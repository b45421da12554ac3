use crate::error::{CatalogError, Result};
use regex::Regex;
use tracing::{debug, info, warn};

/// One raw `(code, title)` pair pulled from a single course block. No
/// uniqueness or well-formedness guarantee; that is the deriver's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCourse {
    pub code: String,
    pub title: String,
}

/// Scans the listings text for course blocks.
///
/// Block boundaries are first-class here: the text is split on the literal
/// per-course terminator phrase, and a header pattern is applied within each
/// block. This keeps extraction linear in the text length instead of leaning
/// on non-greedy backtracking across the whole document.
#[derive(Debug)]
pub struct CourseExtractor {
    header: Regex,
    terminator: Regex,
    min_expected: usize,
}

impl CourseExtractor {
    /// Builds the extractor from the department vocabulary. The vocabulary
    /// is expected to be deduplicated at config load.
    pub fn new(departments: &[String], min_expected: usize) -> Result<Self> {
        if departments.is_empty() {
            return Err(CatalogError::Config(
                "cannot build extractor from an empty department vocabulary".to_string(),
            ));
        }

        let alternation = departments
            .iter()
            .map(|d| regex::escape(d))
            .collect::<Vec<_>>()
            .join("|");
        let header = Regex::new(&format!(r"\b(?:{}) \d{{3}}[A-Z]?\b", alternation))
            .map_err(|e| CatalogError::Config(format!("invalid header pattern: {}", e)))?;

        // Fixed phrase ending every course block in this catalog's layout.
        let terminator = Regex::new(r"Instructor Permission Required:\s*(?:Yes|No)").unwrap();

        Ok(Self {
            header,
            terminator,
            min_expected,
        })
    }

    /// Extracts every course block from the listings text.
    ///
    /// Each chunk before a terminator occurrence is one block; trailing text
    /// after the final terminator is not a complete block and is ignored.
    /// Within a block the title runs from the header to the first period,
    /// which is where the source layout puts the description. Codes known
    /// to truncate badly under this rule are repaired by the correction
    /// table downstream.
    pub fn extract(&self, listings: &str) -> Vec<RawCourse> {
        let mut courses = Vec::new();
        let mut block_start = 0usize;
        let mut skipped_blocks = 0usize;

        for terminator in self.terminator.find_iter(listings) {
            let block = &listings[block_start..terminator.start()];
            block_start = terminator.end();

            match self.header.find(block) {
                Some(header) => {
                    let rest = &block[header.end()..];
                    let title = rest.split('.').next().unwrap_or(rest);
                    courses.push(RawCourse {
                        code: header.as_str().trim().to_string(),
                        title: title.trim().to_string(),
                    });
                }
                None => {
                    skipped_blocks += 1;
                    debug!("block without course header skipped, len={}", block.len());
                }
            }
        }

        info!(
            "extracted {} raw course blocks ({} skipped)",
            courses.len(),
            skipped_blocks
        );
        if courses.len() < self.min_expected {
            warn!(
                "extraction gap: only {} course blocks matched, expected at least {}; \
                 the catalog format may have drifted",
                courses.len(),
                self.min_expected
            );
        }

        courses
    }
}
