//! GitHub Actions plumbing
//!
//! Outputs go to the file named by `GITHUB_OUTPUT`, the run summary to
//! `GITHUB_STEP_SUMMARY`, and warnings/errors are issued as workflow
//! commands on stdout. Outside a workflow (no env files) everything falls
//! back to stdout so local runs stay observable.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use swa_core::Reporter;

/// Heading prepended to the run summary.
const SUMMARY_HEADING: &str = "## SWA role sync";

/// [`Reporter`] bound to the GitHub Actions output files.
#[derive(Debug, Default)]
pub struct ActionsReporter {
    output_path: Option<PathBuf>,
    summary_path: Option<PathBuf>,
}

impl ActionsReporter {
    /// Build a reporter from `GITHUB_OUTPUT` / `GITHUB_STEP_SUMMARY`.
    pub fn from_env() -> Self {
        Self {
            output_path: env_path("GITHUB_OUTPUT"),
            summary_path: env_path("GITHUB_STEP_SUMMARY"),
        }
    }

    /// Build a reporter with explicit file targets.
    pub fn new(output_path: Option<PathBuf>, summary_path: Option<PathBuf>) -> Self {
        Self {
            output_path,
            summary_path,
        }
    }
}

impl Reporter for ActionsReporter {
    fn set_output(&mut self, key: &str, value: &str) -> io::Result<()> {
        // Output values here are single-line (counts and URLs); multi-line
        // content goes to the summary instead.
        match &self.output_path {
            Some(path) => append_line(path, &format!("{key}={value}")),
            None => {
                println!("{key}={value}");
                Ok(())
            }
        }
    }

    fn write_summary(&mut self, markdown: &str) -> io::Result<()> {
        let content = format!("{SUMMARY_HEADING}\n\n{markdown}\n");
        match &self.summary_path {
            Some(path) => append_line(path, &content),
            None => {
                println!("{content}");
                Ok(())
            }
        }
    }

    fn warn(&mut self, message: &str) {
        tracing::warn!("{}", message);
        println!("::warning::{}", escape_command_data(message));
    }
}

/// Issue an `::error::` workflow command.
pub fn issue_error(message: &str) {
    println!("::error::{}", escape_command_data(message));
}

/// Escape data for a workflow command line.
fn escape_command_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn append_line(path: &PathBuf, content: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{content}")
}
