//! External process invocation
//!
//! Runs the backend build tool. Failures are surfaced to the caller with the
//! failing step and exit status; the tool's own diagnostics stream through to
//! the user unmodified.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::ActionError;

/// Run an external tool, inheriting stdio, and fail on non-zero exit.
pub fn run_tool(
    step: &str,
    program: &str,
    args: &[String],
    cwd: &Path,
) -> Result<(), ActionError> {
    tracing::debug!("[{step}] {program} {}", args.join(" "));

    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .status()
        .map_err(|e| ActionError::ToolSpawn {
            step: step.to_string(),
            program: program.to_string(),
            error: e.to_string(),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(ActionError::ToolFailed {
            step: step.to_string(),
            program: program.to_string(),
            status: status
                .code()
                .map_or_else(|| "signal".to_string(), |c| format!("status {c}")),
        })
    }
}
