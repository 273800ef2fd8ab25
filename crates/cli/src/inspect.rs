// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Analyzer invocation.
//!
//! The analyzer is an opaque subprocess: it gets a solution and a settings
//! file, and leaves behind an XML report, an INFO log, and (when plugins
//! threw) an error log. This module only builds the command line, runs it,
//! and hands the artifact paths back.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::process::Command;

use crate::config::ProjectFilter;
use crate::env::Environment;
use crate::output::print_step;
use crate::summary::format_duration;

/// Report file name inside the project directory.
const REPORT_FILE: &str = "inspect-report.xml";
/// INFO log file name; the analyzer derives the error log name from it.
const LOG_FILE: &str = "inspect-logs.txt";
/// Error log the analyzer writes next to the INFO log.
const ERR_FILE: &str = "inspect-logs.err.txt";

/// Progress heartbeat period while the analyzer runs.
const HEARTBEAT: Duration = Duration::from_secs(60);

/// Cap on echoed stderr; analyzer stderr can reach hundreds of megabytes.
const MAX_DISPLAYED_LEN: usize = 1_000_000;

/// Artifacts of one analyzer run.
#[derive(Debug)]
pub struct InspectRun {
    pub report_file: PathBuf,
    pub err_file: PathBuf,
    pub stdout: String,
    pub exit_code: Option<i32>,
}

/// Errors invoking the analyzer.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("failed to spawn analyzer {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for analyzer: {0}")]
    Wait(#[source] std::io::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Build the analyzer argument list plus the report/log paths it writes.
pub fn analyzer_args(
    env: &Environment,
    project_dir: &Path,
    sln_file: &Path,
    project_to_check: Option<&ProjectFilter>,
    properties: &BTreeMap<String, String>,
) -> (Vec<String>, PathBuf, PathBuf, PathBuf) {
    let report_file = project_dir.join(REPORT_FILE);
    let log_file = project_dir.join(LOG_FILE);
    let err_file = project_dir.join(ERR_FILE);

    let mut args: Vec<String> = vec![
        "--severity=ERROR".into(),
        "-f=Xml".into(),
        "-no-build".into(),
        format!("-o={}", report_file.display()),
        format!("--caches-home={}", env.caches_home().display()),
    ];

    if let Some(filter) = project_to_check {
        for name in filter.names() {
            args.push(format!("--project={name}"));
        }
    }

    if !properties.is_empty() {
        let props: Vec<String> = properties
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        args.push(format!("--properties:{}", props.join(";")));
    }

    args.push("--LogLevel=INFO".into());
    args.push(format!("--LogFile={}", log_file.display()));
    args.push(sln_file.display().to_string());

    (args, report_file, log_file, err_file)
}

/// Run the analyzer over a prepared solution.
///
/// Stdout/stderr are captured; a heartbeat line is printed while the tool
/// runs so CI doesn't kill a long analysis as stalled. A non-zero exit is
/// reported but not fatal here: the report may still have been written,
/// and its comparison decides the outcome.
pub async fn run_analyzer(
    env: &Environment,
    project_dir: &Path,
    sln_file: &Path,
    project_to_check: Option<&ProjectFilter>,
    properties: &BTreeMap<String, String>,
) -> Result<InspectRun, InspectError> {
    let (args, report_file, log_file, err_file) =
        analyzer_args(env, project_dir, sln_file, project_to_check, properties);

    // Stale artifacts from a previous run must not leak into this one.
    for stale in [&report_file, &log_file, &err_file] {
        match tokio::fs::remove_file(stale).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(InspectError::Io(e)),
        }
    }

    let analyzer = env.analyzer_path();
    print_step(
        "run_analyzer",
        format!("{} {}", analyzer.display(), args.join(" ")),
    );

    let child = Command::new(&analyzer)
        .args(&args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| InspectError::Spawn {
            path: analyzer.clone(),
            source,
        })?;

    let start = Instant::now();
    let wait = child.wait_with_output();
    tokio::pin!(wait);
    let mut ticker = tokio::time::interval(HEARTBEAT);
    ticker.tick().await; // the first tick fires immediately
    let output = loop {
        tokio::select! {
            result = &mut wait => break result.map_err(InspectError::Wait)?,
            _ = ticker.tick() => print_step(
                "run_analyzer",
                format!("still running, elapsed time: {}", format_duration(start.elapsed())),
            ),
        }
    };

    let exit_code = output.status.code();
    if !output.status.success() {
        print_step("run_analyzer", format!("error: exit code = {exit_code:?}"));
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.is_empty() {
        println!("::group::stderr");
        if stderr.len() > MAX_DISPLAYED_LEN {
            let cut = truncation_boundary(&stderr, MAX_DISPLAYED_LEN);
            print_step(
                "run_analyzer",
                format!(
                    "stderr:\n{}...\n...(too big: {} bytes)",
                    &stderr[..cut],
                    stderr.len()
                ),
            );
        } else {
            print_step("run_analyzer", format!("stderr:\n{stderr}"));
        }
        println!("::endgroup::");
    }

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    println!("::group::stdout");
    print_step("run_analyzer", format!("stdout:\n{stdout}"));
    println!("::endgroup::");

    if err_file.exists() {
        print_step("run_analyzer", "non-empty errors log");
    } else {
        print_step("run_analyzer", "no runtime errors");
    }
    print_step(
        "run_analyzer",
        format!("elapsed time: {}", format_duration(start.elapsed())),
    );

    Ok(InspectRun {
        report_file,
        err_file,
        stdout,
        exit_code,
    })
}

/// Number of files the analyzer reported inspecting, counted from its
/// stdout.
pub fn inspected_files_count(output: &str) -> usize {
    output.matches("Inspecting ").count()
}

/// Largest char boundary at or below `max`.
fn truncation_boundary(s: &str, max: usize) -> usize {
    let mut cut = max.min(s.len());
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    cut
}

#[cfg(test)]
#[path = "inspect_tests.rs"]
mod tests;
