//! Error types shared by the exercises

use thiserror::Error;

use crate::patterns::adapter::backend::BackendError;
use crate::patterns::mediator::MediatorError;
use crate::patterns::state::machine::StripError;

/// Failure of a single exercise.
///
/// Exercises report their own problems through this type; the runner turns
/// it into a `ReportError` so one failing exercise never stops the others.
#[derive(Debug, Error)]
pub enum ExerciseError {
    #[error("{prompt}: {source}")]
    Backend {
        prompt: &'static str,
        #[source]
        source: BackendError,
    },

    #[error(transparent)]
    Mediator(#[from] MediatorError),

    #[error(transparent)]
    Strip(#[from] StripError),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Failed(String),
}

impl ExerciseError {
    /// Stable, machine-readable code for rendered reports
    pub fn code(&self) -> &'static str {
        match self {
            ExerciseError::Backend { .. } => "BACKEND_ERROR",
            ExerciseError::Mediator(_) => "MEDIATOR_ERROR",
            ExerciseError::Strip(_) => "STRIP_ERROR",
            ExerciseError::Io { .. } => "IO_ERROR",
            ExerciseError::Failed(_) => "EXERCISE_FAILED",
        }
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ExerciseError::Io {
            context: context.into(),
            source,
        }
    }
}
