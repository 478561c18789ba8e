//! Report Model
//!
//! Every exercise run is mapped to a `Report` before rendering output.

use serde::{Deserialize, Serialize};

use crate::core::error::ExerciseError;

/// Error information for a failed exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportError {
    pub code: String,
    pub message: String,
}

impl ReportError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&ExerciseError> for ReportError {
    fn from(err: &ExerciseError) -> Self {
        ReportError::new(err.code(), err.to_string())
    }
}

/// Output of one exercise run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Exercise name as listed in the catalogue
    pub exercise: String,

    /// Output lines, without the header and trailer
    pub lines: Vec<String>,

    /// Set when the exercise failed part way
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ReportError>,
}

impl Report {
    pub fn new(exercise: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            exercise: exercise.into(),
            lines,
            error: None,
        }
    }

    /// Attach an error
    pub fn with_error(mut self, error: ReportError) -> Self {
        self.error = Some(error);
        self
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Ordered collection of reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSet {
    pub reports: Vec<Report>,
}

impl ReportSet {
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Number of failed exercises
    pub fn failures(&self) -> usize {
        self.reports.iter().filter(|r| !r.is_success()).count()
    }
}

impl FromIterator<Report> for ReportSet {
    fn from_iter<I: IntoIterator<Item = Report>>(iter: I) -> Self {
        Self {
            reports: iter.into_iter().collect(),
        }
    }
}
