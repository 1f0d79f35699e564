//! The `analyze` command, independent of the process it runs in.
//!
//! Input, report output and diagnostics are injected so the exit-code
//! contract can be exercised without spawning the binary.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use super::{render_report, DecisionPrompter, PromptError};
use crate::application::{AnalyzeDecisionCommand, AnalyzeDecisionHandler};
use crate::domain::analysis::SensitivityRange;
use crate::domain::foundation::ValidationError;
use crate::ports::MatrixVault;

/// Analysis completed and the report was written.
pub const EXIT_SUCCESS: u8 = 0;
/// Input, saved document or options failed validation.
pub const EXIT_VALIDATION: u8 = 1;
/// Configuration or server startup failed.
pub const EXIT_STARTUP: u8 = 2;

/// Resolved options for one `analyze` run.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Saved decision to resume from; prompts when `None`
    pub load: Option<PathBuf>,
    pub save: Option<PathBuf>,
    pub span: f64,
    pub steps: usize,
    /// Emit the report as JSON instead of text
    pub json: bool,
}

/// Runs `analyze` against a vault.
pub struct AnalyzeRunner {
    vault: Arc<dyn MatrixVault>,
}

impl AnalyzeRunner {
    pub fn new(vault: Arc<dyn MatrixVault>) -> Self {
        Self { vault }
    }

    /// Writes the report to `out` and prompts or failures to `err`.
    ///
    /// Returns the process exit status. Only a failure to write to `out`
    /// or `err` surfaces as `Err`.
    pub fn run<R, O, E>(
        &self,
        options: &AnalyzeOptions,
        input: R,
        mut out: O,
        mut err: E,
    ) -> io::Result<u8>
    where
        R: BufRead,
        O: Write,
        E: Write,
    {
        let range = match SensitivityRange::symmetric(options.span, options.steps) {
            Ok(range) => range,
            Err(e) => return report_failure(&mut err, &e),
        };

        let command = match &options.load {
            Some(path) => AnalyzeDecisionCommand::saved(path),
            None => {
                let gathered = DecisionPrompter::new(input, &mut err).gather();
                match gathered {
                    Ok(raw) => AnalyzeDecisionCommand::raw(raw),
                    Err(PromptError::Io(e)) => return Err(e),
                    Err(e) => {
                        writeln!(err, "error: {}", e)?;
                        return Ok(EXIT_VALIDATION);
                    }
                }
            }
        };
        let command = match &options.save {
            Some(path) => command.save_to(path),
            None => command,
        };

        let handler = AnalyzeDecisionHandler::new(Arc::clone(&self.vault), range);
        let result = match handler.handle(command) {
            Ok(result) => result,
            Err(e) => return report_failure(&mut err, &e),
        };
        debug!(winner = ?result.report.winner(), "Analysis complete");

        if options.json {
            serde_json::to_writer_pretty(&mut out, &result.report)?;
            writeln!(out)?;
        } else {
            write!(out, "{}", render_report(&result.report))?;
        }

        if let Some(path) = &options.save {
            writeln!(err, "Saved decision to {}", path.display())?;
        }
        Ok(EXIT_SUCCESS)
    }
}

fn report_failure<E: Write>(err: &mut E, e: &ValidationError) -> io::Result<u8> {
    writeln!(err, "error [{}]: {}", e.code(), e)?;
    if let Some(field) = e.field() {
        writeln!(err, "  field: {}", field)?;
    }
    Ok(EXIT_VALIDATION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FileMatrixVault, InMemoryMatrixVault};
    use crate::domain::matrix::DecisionMatrix;
    use serde_json::Value;
    use std::fs;
    use tempfile::TempDir;

    fn options() -> AnalyzeOptions {
        AnalyzeOptions {
            load: None,
            save: None,
            span: 0.1,
            steps: 10,
            json: false,
        }
    }

    fn laptop() -> DecisionMatrix {
        DecisionMatrix::builder()
            .title("Laptop")
            .criterion("Cost", 0.4)
            .criterion("Quality", 0.6)
            .alternatives(vec!["A", "B"])
            .score("A", "Cost", 7.0)
            .score("A", "Quality", 5.5)
            .score("B", "Cost", 3.0)
            .score("B", "Quality", 8.0)
            .build()
            .unwrap()
    }

    /// Returns (status, stdout, stderr).
    fn run_with(
        vault: Arc<dyn MatrixVault>,
        options: &AnalyzeOptions,
        stdin: &str,
    ) -> (u8, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = AnalyzeRunner::new(vault)
            .run(options, stdin.as_bytes(), &mut out, &mut err)
            .unwrap();
        (
            status,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_loaded_decision_succeeds_with_report_on_stdout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("laptop.json");
        let vault = Arc::new(FileMatrixVault::new());
        vault.save(&laptop(), &path).unwrap();

        let options = AnalyzeOptions {
            load: Some(path),
            ..options()
        };
        let (status, out, err) = run_with(vault, &options, "");

        assert_eq!(status, EXIT_SUCCESS);
        assert!(out.starts_with("Laptop\n"));
        assert!(out.contains("Ranking"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_tampered_file_exits_with_validation_status_and_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("laptop.json");
        let vault = Arc::new(FileMatrixVault::new());
        vault.save(&laptop(), &path).unwrap();

        let mut document: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        document["criteria"][1]["weight"] = Value::from(-0.6);
        fs::write(&path, document.to_string()).unwrap();

        let options = AnalyzeOptions {
            load: Some(path),
            ..options()
        };
        let (status, out, err) = run_with(vault, &options, "");

        assert_eq!(status, EXIT_VALIDATION);
        assert!(out.is_empty());
        assert!(err.contains("INVARIANT_VIOLATION"));
        assert!(err.contains("field: criteria[1].weight"));
    }

    #[test]
    fn test_missing_file_exits_with_validation_status() {
        let dir = TempDir::new().unwrap();
        let options = AnalyzeOptions {
            load: Some(dir.path().join("absent.json")),
            ..options()
        };
        let (status, _, err) = run_with(Arc::new(FileMatrixVault::new()), &options, "");

        assert_eq!(status, EXIT_VALIDATION);
        assert!(err.contains("PERSISTENCE_ERROR"));
    }

    #[test]
    fn test_prompted_decision_is_saved_and_reported_as_json() {
        let vault = Arc::new(InMemoryMatrixVault::new());
        let stdin = "Laptop\nA\nB\n\nCost\nQuality\n\n0.4\n0.6\n7\n5.5\n3\n8\n";
        let options = AnalyzeOptions {
            save: Some(PathBuf::from("laptop.json")),
            json: true,
            ..options()
        };
        let (status, out, err) = run_with(vault.clone(), &options, stdin);

        assert_eq!(status, EXIT_SUCCESS);
        let report: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(report["title"], "Laptop");
        assert!(err.contains("Saved decision to laptop.json"));
        assert_eq!(vault.load(std::path::Path::new("laptop.json")).unwrap(), laptop());
    }

    #[test]
    fn test_non_numeric_prompt_answer_names_the_field() {
        let stdin = "\nA\n\nCost\n\nheavy\n7\n";
        let vault = Arc::new(InMemoryMatrixVault::new());
        let (status, out, err) = run_with(vault, &options(), stdin);

        assert_eq!(status, EXIT_VALIDATION);
        assert!(out.is_empty());
        assert!(err.contains("SHAPE_ERROR"));
        assert!(err.contains("field: criteria[0].weight"));
    }

    #[test]
    fn test_truncated_input_exits_with_validation_status() {
        let vault = Arc::new(InMemoryMatrixVault::new());
        let (status, _, err) = run_with(vault, &options(), "Laptop\nA\n");

        assert_eq!(status, EXIT_VALIDATION);
        assert!(err.contains("Input ended while waiting for"));
    }

    #[test]
    fn test_oversized_steps_are_rejected_before_any_work() {
        let options = AnalyzeOptions {
            steps: 1_000_000,
            ..options()
        };
        let (status, out, err) = run_with(Arc::new(InMemoryMatrixVault::new()), &options, "");

        assert_eq!(status, EXIT_VALIDATION);
        assert!(out.is_empty());
        assert!(err.contains("field: sensitivity.steps"));
    }
}
