//! Exercise runner
//!
//! Resolves exercise names against the catalogue, runs the exercises and
//! collects one `Report` per exercise.

use anyhow::{bail, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::config::ExerciseConfig;
use crate::core::model::{Report, ReportError, ReportSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::transcript::Transcript;
use crate::patterns::{self, Exercise, CATALOGUE};

/// Resolve names to exercises, in catalogue order and without duplicates.
///
/// No names selects every exercise.
pub fn select(names: &[String]) -> Result<Vec<&'static Exercise>> {
    if names.is_empty() {
        return Ok(CATALOGUE.iter().collect());
    }

    let mut wanted = Vec::with_capacity(names.len());
    for name in names {
        match patterns::find(name) {
            Some(exercise) => wanted.push(exercise.name),
            None => bail!(
                "Unknown exercise: {}. Available exercises: {}",
                name,
                patterns::names().join(", ")
            ),
        }
    }

    Ok(CATALOGUE
        .iter()
        .filter(|exercise| wanted.contains(&exercise.name))
        .collect())
}

/// Run one exercise, capturing its output and any error
pub fn run_exercise(exercise: &Exercise, config: &ExerciseConfig) -> Report {
    log::debug!("running {} exercise", exercise.name);
    let mut transcript = Transcript::new();
    let outcome = (exercise.run)(config, &mut transcript);
    let report = Report::new(exercise.name, transcript.into_lines());

    match outcome {
        Ok(()) => {
            log::debug!("{} exercise finished", exercise.name);
            report
        }
        Err(err) => {
            log::warn!("{} exercise failed: {}", exercise.name, err);
            report.with_error(ReportError::from(&err))
        }
    }
}

/// Run exercises; reports come back in the order given
#[cfg(not(feature = "parallel"))]
pub fn run_all(exercises: &[&Exercise], config: &ExerciseConfig) -> ReportSet {
    exercises
        .iter()
        .map(|exercise| run_exercise(exercise, config))
        .collect()
}

/// Run exercises concurrently; reports come back in the order given
#[cfg(feature = "parallel")]
pub fn run_all(exercises: &[&Exercise], config: &ExerciseConfig) -> ReportSet {
    let reports: Vec<Report> = exercises
        .par_iter()
        .map(|exercise| run_exercise(exercise, config))
        .collect();
    reports.into_iter().collect()
}

/// Run the `run` command
pub fn run_exercises(
    names: &[String],
    config: &ExerciseConfig,
    render_config: RenderConfig,
) -> Result<()> {
    let exercises = select(names)?;
    let report_set = run_all(&exercises, config);

    let renderer = Renderer::with_config(render_config);
    renderer.render_to(&report_set, std::io::stdout().lock())?;

    let failures = report_set.failures();
    if failures > 0 {
        bail!("{} of {} exercises failed", failures, report_set.len());
    }
    Ok(())
}

/// Run the `list` command
pub fn run_list() -> Result<()> {
    for name in patterns::names() {
        println!("{}", name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ExerciseError;

    #[test]
    fn test_select_all_when_no_names() {
        let selected = select(&[]).unwrap();
        assert_eq!(selected.len(), CATALOGUE.len());
    }

    #[test]
    fn test_select_uses_catalogue_order_and_dedupes() {
        let names = vec![
            "visitor".to_string(),
            "Adapter".to_string(),
            "VISITOR".to_string(),
        ];
        let selected: Vec<&str> = select(&names).unwrap().iter().map(|e| e.name).collect();
        assert_eq!(selected, vec!["Adapter", "Visitor"]);
    }

    #[test]
    fn test_select_unknown_lists_available() {
        let err = select(&["Singleton".to_string()]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Unknown exercise: Singleton"));
        assert!(message.contains("HandlerChain"));
    }

    #[test]
    fn test_run_exercise_captures_lines() {
        let exercise = patterns::find("Proxy").unwrap();
        let report = run_exercise(exercise, &ExerciseConfig::default());
        assert!(report.is_success());
        assert_eq!(report.exercise, "Proxy");
        assert_eq!(report.lines[0], "  Getting proxy object...");
    }

    #[test]
    fn test_run_exercise_records_failure() {
        fn failing(_: &ExerciseConfig, out: &mut Transcript) -> Result<(), ExerciseError> {
            out.line("  partial");
            Err(ExerciseError::Failed("boom".to_string()))
        }
        let exercise = Exercise {
            name: "Failing",
            run: failing,
        };
        let report = run_exercise(&exercise, &ExerciseConfig::default());
        assert_eq!(report.lines, vec!["  partial"]);
        let error = report.error.unwrap();
        assert_eq!(error.code, "EXERCISE_FAILED");
        assert_eq!(error.message, "boom");
    }

    #[test]
    fn test_run_all_keeps_order() {
        let exercises = select(&["Strategy".to_string(), "Iterator".to_string()]).unwrap();
        let reports = run_all(&exercises, &ExerciseConfig::default());
        let names: Vec<&str> = reports.reports.iter().map(|r| r.exercise.as_str()).collect();
        assert_eq!(names, vec!["Iterator", "Strategy"]);
    }
}
