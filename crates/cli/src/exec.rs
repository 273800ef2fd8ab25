// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess invocation shared by checkout, build, and analysis steps.

use std::path::Path;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

/// A failed external command.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {code:?}: {stderr}")]
    NonZeroExit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("empty command line")]
    EmptyCommandLine,
}

/// Run a command to completion, failing on a non-zero exit.
///
/// In verbose mode the child inherits stdout/stderr; otherwise both are
/// captured and stderr is surfaced only on failure.
pub async fn run_checked(
    program: &str,
    args: &[&str],
    cwd: Option<&Path>,
    verbose: bool,
) -> Result<(), ExecError> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(cwd) = cwd {
        cmd.current_dir(cwd);
    }
    if verbose {
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    } else {
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    }
    cmd.kill_on_drop(true);

    let output = cmd.output().await.map_err(|source| ExecError::Spawn {
        program: program.to_string(),
        source,
    })?;

    if !output.status.success() {
        return Err(ExecError::NonZeroExit {
            program: program.to_string(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

/// Run a whitespace-separated command line, as fleet configs write build
/// steps.
pub async fn run_step(step: &str, cwd: &Path, verbose: bool) -> Result<(), ExecError> {
    let mut parts = step.split_whitespace();
    let program = parts.next().ok_or(ExecError::EmptyCommandLine)?;
    let args: Vec<&str> = parts.collect();
    run_checked(program, &args, Some(cwd), verbose).await
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
