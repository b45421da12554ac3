use serde::{Deserialize, Serialize};

/// A single course offering flowing through the ingestion pipeline.
///
/// The serialized column names are a stable contract with the scheduling
/// stage, which indexes the catalog table by these exact headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    #[serde(rename(serialize = "CourseCode"))]
    pub code: String,
    #[serde(rename(serialize = "CourseTitle"))]
    pub title: String,
    #[serde(rename(serialize = "Department"))]
    pub department: String,
    #[serde(rename(serialize = "CourseLevel"))]
    pub level: u16,
}

impl CourseRecord {
    /// Replaces the department token in both `department` and `code` in a
    /// single update so the two fields cannot diverge. The level and any
    /// letter suffix are untouched.
    pub fn rewrite_department(&mut self, department: &str) {
        if let Some((_, rest)) = self.code.split_once(' ') {
            self.code = format!("{} {}", department, rest);
            self.department = department.to_string();
        }
    }
}
