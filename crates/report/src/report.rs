// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Comparison of an analyzer XML report against a project baseline.
//!
//! The report document has an `IssueTypes` registry section mapping issue
//! type ids to default severities, an `Issues` section with the emitted
//! `Issue` nodes (possibly grouped under project nodes), and a
//! `ToolsVersion` attribute on the root. Only `ERROR`-severity issues
//! participate in the comparison.

use std::collections::{BTreeSet, HashMap};
use std::io::Write;

use thiserror::Error;

use crate::baseline::{KnownError, KnownFileError};
use crate::diagnostics::{write_errors, write_file_errors, DiagnosticRecord};

/// Severity that participates in comparison.
const ERROR_SEVERITY: &str = "ERROR";

/// Verdict of a single report comparison.
///
/// An empty `result_text` signals a pass; otherwise it holds one line per
/// observed discrepancy, suitable for the run summary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparisonResult {
    pub result_text: String,
    pub error_mismatch: bool,
    pub tool_version: String,
}

/// Fatal defects in a report document. None of these are swallowed; the
/// orchestrating caller records them as a per-project failure.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("malformed report XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("report has no {0} section")]
    MissingSection(&'static str),

    #[error("report root has no ToolsVersion attribute")]
    MissingToolsVersion,

    #[error("issue references unregistered type {type_id:?} and carries no severity")]
    UnknownIssueType { type_id: String },

    #[error("issue in {file} has non-numeric line {line:?}")]
    InvalidLine { file: String, line: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Compare a report document against the project's known errors.
///
/// Human-triage detail (missing/unexpected/expected sets as JSON lines) is
/// written to `out`; the pass/fail contract lives entirely in the returned
/// [`ComparisonResult`].
pub fn compare<W: Write>(
    xml: &str,
    known_errors: &[KnownError],
    known_file_errors: &[KnownFileError],
    out: &mut W,
) -> Result<ComparisonResult, ReportError> {
    let doc = roxmltree::Document::parse(xml)?;
    let root = doc.root_element();

    let tool_version = root
        .attribute("ToolsVersion")
        .ok_or(ReportError::MissingToolsVersion)?
        .to_string();

    let issue_types = root
        .children()
        .find(|n| n.has_tag_name("IssueTypes"))
        .ok_or(ReportError::MissingSection("IssueTypes"))?;
    let issue_severities: HashMap<&str, &str> = issue_types
        .children()
        .filter(|n| n.is_element())
        .filter_map(|n| Some((n.attribute("Id")?, n.attribute("Severity")?)))
        .collect();

    let issues = root
        .children()
        .find(|n| n.has_tag_name("Issues"))
        .ok_or(ReportError::MissingSection("Issues"))?;

    let mut results: Vec<String> = Vec::new();
    let mut error_mismatch = false;

    if !issues.children().any(|n| n.is_element()) {
        writeln!(out, "No compilation errors found")?;

        let known_stable_errors: BTreeSet<DiagnosticRecord> = known_errors
            .iter()
            .filter(|e| !e.flaky)
            .map(KnownError::id)
            .collect();
        if !known_stable_errors.is_empty() {
            write_errors(out, "Expected", &known_stable_errors)?;
            results.push(format!(
                "no compilation errors found, but {} errors were expected",
                known_stable_errors.len()
            ));
            error_mismatch = true;
        }

        let known_stable_file_errors: Vec<&KnownFileError> =
            known_file_errors.iter().filter(|e| !e.flaky).collect();
        if !known_stable_file_errors.is_empty() {
            write_file_errors(out, "Expected", &known_stable_file_errors)?;
            results.push(format!(
                "no compilation errors found, but {} file errors were expected",
                known_stable_file_errors.len()
            ));
            error_mismatch = true;
        }
    } else {
        let mut actual_errors = collect_actual_errors(&issues, &issue_severities)?;

        if !known_file_errors.is_empty() {
            let known_error_files: BTreeSet<&str> =
                known_file_errors.iter().map(|e| e.file.as_str()).collect();
            let actual_error_files: BTreeSet<&str> =
                actual_errors.iter().map(|e| e.file.as_str()).collect();

            // Every non-flaky known file must account for at least one error.
            let missing_file_errors: Vec<&KnownFileError> = known_file_errors
                .iter()
                .filter(|e| !e.flaky && !actual_error_files.contains(e.file.as_str()))
                .collect();
            if !missing_file_errors.is_empty() {
                write_file_errors(out, "Missing", &missing_file_errors)?;
                error_mismatch = true;
            }

            // Errors in known files are accounted for, not compared further.
            let excluded_count = actual_errors
                .iter()
                .filter(|e| known_error_files.contains(e.file.as_str()))
                .count();
            actual_errors.retain(|e| !known_error_files.contains(e.file.as_str()));

            if error_mismatch {
                results.push(format!(
                    "{} files without expected errors",
                    missing_file_errors.len()
                ));
            } else {
                writeln!(
                    out,
                    "{} errors in {} files found as expected",
                    excluded_count,
                    known_error_files.len()
                )?;
            }
        }

        if !known_errors.is_empty() {
            // Flaky entries never count as unexpected: subtract every known
            // id, flaky included.
            let known_ids: BTreeSet<DiagnosticRecord> =
                known_errors.iter().map(KnownError::id).collect();
            let unexpected_errors: BTreeSet<DiagnosticRecord> =
                actual_errors.difference(&known_ids).cloned().collect();
            if !unexpected_errors.is_empty() {
                write_errors(out, "Unexpected", &unexpected_errors)?;
                error_mismatch = true;
            }

            let stable_ids: BTreeSet<DiagnosticRecord> = known_errors
                .iter()
                .filter(|e| !e.flaky)
                .map(KnownError::id)
                .collect();
            let missing_errors: BTreeSet<DiagnosticRecord> =
                stable_ids.difference(&actual_errors).cloned().collect();
            if !missing_errors.is_empty() {
                write_errors(out, "Missing", &missing_errors)?;
                error_mismatch = true;
            }

            if error_mismatch {
                results.push("expected and actual set of errors differ".to_string());
            } else {
                writeln!(out, "{} standalone errors found as expected", actual_errors.len())?;
            }
        } else if !actual_errors.is_empty() {
            write_errors(out, "Unexpected", &actual_errors)?;
            results.push(format!("unexpected {} errors found", actual_errors.len()));
            error_mismatch = true;
        }
    }

    Ok(ComparisonResult {
        result_text: results.join("\n"),
        error_mismatch,
        tool_version,
    })
}

/// Gather the ERROR-severity issues from the `Issues` section.
fn collect_actual_errors<'a>(
    issues: &roxmltree::Node<'a, '_>,
    issue_severities: &HashMap<&'a str, &'a str>,
) -> Result<BTreeSet<DiagnosticRecord>, ReportError> {
    let mut actual_errors = BTreeSet::new();
    for issue in issues.descendants().filter(|n| n.has_tag_name("Issue")) {
        if effective_severity(&issue, issue_severities)? != ERROR_SEVERITY {
            continue;
        }
        let file = issue.attribute("File").unwrap_or_default().to_string();
        let line = match issue.attribute("Line") {
            Some(raw) => raw.parse().map_err(|_| ReportError::InvalidLine {
                file: file.clone(),
                line: raw.to_string(),
            })?,
            None => 0,
        };
        let message = issue.attribute("Message").unwrap_or_default().to_string();
        actual_errors.insert(DiagnosticRecord { file, line, message });
    }
    Ok(actual_errors)
}

/// An issue's own `Severity` attribute, else its type's registered default.
fn effective_severity<'a>(
    issue: &roxmltree::Node<'a, '_>,
    issue_severities: &HashMap<&'a str, &'a str>,
) -> Result<&'a str, ReportError> {
    if let Some(severity) = issue.attribute("Severity") {
        return Ok(severity);
    }
    let type_id = issue.attribute("TypeId").unwrap_or_default();
    issue_severities
        .get(type_id)
        .copied()
        .ok_or_else(|| ReportError::UnknownIssueType {
            type_id: type_id.to_string(),
        })
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
