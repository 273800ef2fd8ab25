// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The fleet run: every selected project is checked in turn, per-project
//! failures are caught and recorded, and the run ends with a summary and
//! an optional JSON report.

use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Instant;
use thiserror::Error;

use inspectfleet_report::{compare, parse_logs, ReportError};

use crate::cli::Cli;
use crate::config::{
    self, compatible_toolchains, load_projects, load_toolchains, parse_selection, ConfigError,
    GeneratorSpec, ProjectConfig, ToolchainsFile,
};
use crate::env::Environment;
use crate::inspect::{inspected_files_count, run_analyzer, InspectError};
use crate::output::{print_error, print_step, print_warning};
use crate::prepare::{prepare, PrepareError};
use crate::sources::{repo_info, RepoInfo};
use crate::summary::{format_duration, Summary};

/// Anything that can fail one project's check. Each variant is caught per
/// project; a failing project never aborts the rest of the fleet.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Prepare(#[from] PrepareError),

    #[error(transparent)]
    Inspect(#[from] InspectError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("no compatible toolchains for this project")]
    NoCompatibleToolchains,

    #[error("toolchains file has no generator named {0:?}")]
    UnknownGenerator(String),

    #[error("analyzer produced no report at {0}")]
    MissingReport(std::path::PathBuf),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Per-generator record written into the run report.
#[derive(Debug, Serialize)]
pub struct CheckOutcome {
    /// Empty on a pass, one line per discrepancy otherwise.
    pub result: String,
    pub error_mismatch: bool,
    pub tool_version: String,
    /// Declared analyzer version from the environment file, when one is
    /// configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzer_version: Option<String>,
    /// Analyzer process exit code; `None` when killed by a signal.
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<RepoInfo>,
    pub timestamp: i64,
    pub elapsed_time: String,
    pub actual_files_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_files_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_projects: Option<crate::config::ProjectFilter>,
}

/// Run the analyzer over one prepared project and compare its report
/// against the baseline for `branch`.
async fn check_project(
    env: &Environment,
    project_name: &str,
    config: &ProjectConfig,
    branch: Option<&str>,
    prepared: &crate::prepare::PreparedProject,
) -> Result<CheckOutcome, ProjectError> {
    let baseline = config.baseline(branch)?;
    let started = Instant::now();
    let timestamp = chrono::Utc::now().timestamp();

    let run = run_analyzer(
        env,
        &prepared.project_dir,
        &prepared.sln_file,
        config.project_to_check.as_ref(),
        &config.analyzer_properties,
    )
    .await?;

    if !run.report_file.exists() {
        return Err(ProjectError::MissingReport(run.report_file));
    }
    let xml = tokio::fs::read_to_string(&run.report_file).await?;

    let mut triage = Vec::new();
    let comparison = compare(
        &xml,
        &baseline.known_errors,
        &baseline.known_file_errors,
        &mut triage,
    )?;
    print!("{}", String::from_utf8_lossy(&triage));

    // Plugins that threw at analysis time fail the project even when the
    // report itself matches the baseline.
    let analyzer_errors = if run.err_file.exists() {
        let logs = tokio::fs::read_to_string(&run.err_file).await?;
        parse_logs(&logs)
    } else {
        Vec::new()
    };
    for error in &analyzer_errors {
        // Analyzer names are fully qualified; the last segment reads best.
        let short_name = error.analyzer.rsplit('.').next().unwrap_or_default();
        print_error(format!(
            "\"{}\" {} => {}",
            error.file_path, short_name, error.message
        ));
    }

    let actual_files_count = inspected_files_count(&run.stdout);
    if let Some(expected) = baseline.inspected_files_count {
        if expected != actual_files_count {
            print_warning(format!(
                "inspected {actual_files_count} files, expected {expected}"
            ));
        }
    }

    let result = match (
        analyzer_errors.is_empty(),
        comparison.result_text.is_empty(),
    ) {
        (true, _) => comparison.result_text.clone(),
        (false, true) => format!("({} errors in logs)", analyzer_errors.len()),
        (false, false) => format!(
            "({} errors in logs) {}",
            analyzer_errors.len(),
            comparison.result_text
        ),
    };

    Ok(CheckOutcome {
        result,
        error_mismatch: comparison.error_mismatch,
        tool_version: comparison.tool_version,
        analyzer_version: env.analyzer_version().map(str::to_string),
        exit_code: run.exit_code,
        project: repo_info(&env.project_dir(project_name)).await,
        timestamp,
        elapsed_time: format_duration(started.elapsed()),
        actual_files_count,
        expected_files_count: baseline.inspected_files_count,
        checked_projects: config.project_to_check.clone(),
    })
}

/// Check one project with every toolchain it supports, stopping at the
/// first failing one. Returns the failure text (empty on a pass) and the
/// per-generator outcomes for the run report.
async fn process_project(
    env: &Environment,
    toolchains: &ToolchainsFile,
    project_name: &str,
    config: &ProjectConfig,
    branch: Option<&str>,
) -> Result<(String, serde_json::Value), ProjectError> {
    let keys: Vec<(String, Option<&GeneratorSpec>)> = if config.custom_build.is_some() {
        vec![("default".to_string(), None)]
    } else {
        let compatible = compatible_toolchains(config, env);
        if compatible.is_empty() {
            return Err(ProjectError::NoCompatibleToolchains);
        }
        compatible
            .into_iter()
            .map(|key| {
                let spec = toolchains
                    .cmake_generators
                    .get(&key)
                    .ok_or_else(|| ProjectError::UnknownGenerator(key.clone()))?;
                Ok((key, Some(spec)))
            })
            .collect::<Result<_, ProjectError>>()?
    };

    let mut result = String::new();
    let mut outcomes: BTreeMap<String, CheckOutcome> = BTreeMap::new();
    for (key, generator) in keys {
        print_step("fleet", format!("{project_name}: toolchain {key}"));
        let prepared = prepare(env, toolchains, project_name, config, branch, &key, generator)
            .await?;
        if env.dry_run {
            print_step(
                "fleet",
                format!(
                    "dry run, resolved solution {} ({key})",
                    prepared.sln_file.display()
                ),
            );
            continue;
        }
        let outcome = check_project(env, project_name, config, branch, &prepared).await?;
        let failed = !outcome.result.is_empty();
        if failed {
            result = format!("({key}) {}", outcome.result);
        }
        outcomes.insert(key, outcome);
        if failed {
            break;
        }
    }

    Ok((result, serde_json::to_value(outcomes)?))
}

/// Run the whole fleet per the CLI selection and return the process exit
/// code.
pub async fn run_fleet(cli: Cli) -> i32 {
    let started = Instant::now();

    let env = match Environment::from_cli(&cli) {
        Ok(env) => env,
        Err(err) => {
            print_error(err.to_string());
            return 2;
        }
    };
    let projects = match load_projects(&cli.projects_file) {
        Ok(projects) => projects,
        Err(err) => {
            print_error(err.to_string());
            return 2;
        }
    };
    let toolchains = match load_toolchains(&cli.toolchains_file) {
        Ok(toolchains) => toolchains,
        Err(err) => {
            print_error(err.to_string());
            return 2;
        }
    };

    let mut summary = Summary::new();
    let mut report = serde_json::Map::new();

    for (name, branch) in parse_selection(&cli.projects, &projects) {
        let label = match &branch {
            Some(branch) => format!("{name}:{branch}"),
            None => name.clone(),
        };
        print_step("fleet", format!("checking {label}"));

        let checked: Result<(String, serde_json::Value), ProjectError> = async {
            let entry = projects
                .get(&name)
                .ok_or_else(|| ConfigError::UnknownProject(name.clone()))?;
            let config = config::resolve_entry(entry, &cli.proj_config_dir)?;
            // Unknown branches fail before any checkout work happens.
            config.baseline(branch.as_deref())?;
            process_project(&env, &toolchains, &name, &config, branch.as_deref()).await
        }
        .await;

        match checked {
            Ok((result, outcomes)) => {
                report.insert(label.clone(), outcomes);
                if result.is_empty() {
                    print_step("fleet", format!("{label}: OK"));
                } else {
                    print_error(format!("{label}: {result}"));
                    summary.record_failure(format!("{label}: {result}"));
                }
            }
            Err(err) => {
                report.insert(label.clone(), json!({ "error": { "exception": err.to_string() } }));
                print_error(format!("{label}: {err}"));
                summary.record_failure(format!("{label}: {err}"));
            }
        }
    }

    // The summary always prints, even when the report file can't be
    // written afterwards.
    let code = summary.finish(started.elapsed());

    if let Some(report_path) = &cli.report_path {
        if let Err(err) = write_report(report_path, &report).await {
            print_error(format!("failed to write report: {err}"));
            return 2;
        }
    }

    code
}

async fn write_report(
    path: &std::path::Path,
    report: &serde_json::Map<String, serde_json::Value>,
) -> Result<(), ProjectError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let body = serde_json::to_string_pretty(report)?;
    tokio::fs::write(path, body).await?;
    Ok(())
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
