//! Subprocess execution for Azure CLI commands
//!
//! Invokes `az` with captured output, translating non-zero exits into
//! [`AzureError::CommandFailed`] with the subcommand name and stderr kept
//! for diagnostics.

use std::process::Stdio;

use tokio::process::Command;

use crate::error::{AzureError, Result};

/// Runner for `az` invocations.
///
/// The program name is configurable so tests and unusual installs can point
/// at a different binary.
#[derive(Debug, Clone)]
pub struct AzCli {
    program: String,
}

impl AzCli {
    /// Create a runner for the `az` binary on `PATH`.
    pub fn new() -> Self {
        Self {
            program: "az".to_string(),
        }
    }

    /// Create a runner for a specific program.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Execute an `az` command and return raw stdout.
    ///
    /// `subcommand` names the logical operation (e.g. `staticwebapp users
    /// list`) for error reporting.
    pub async fn run(&self, subcommand: &str, args: &[String]) -> Result<String> {
        tracing::debug!("running {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            return Err(AzureError::CommandFailed {
                subcommand: subcommand.to_string(),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl Default for AzCli {
    fn default() -> Self {
        Self::new()
    }
}
