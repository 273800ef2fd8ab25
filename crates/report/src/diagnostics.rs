// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic identity records and their triage output format.

use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;

use crate::report::ReportError;

/// Identity of a single diagnostic: the full `(file, line, message)` tuple.
///
/// `line` is 0 when the report carried no line number. The `Ord` derive
/// makes sets of records print in a stable, diffable order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DiagnosticRecord {
    pub file: String,
    pub line: u32,
    pub message: String,
}

impl DiagnosticRecord {
    pub fn new(file: impl Into<String>, line: u32, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            message: message.into(),
        }
    }
}

/// Write a titled set of diagnostics as indented JSON lines.
///
/// Output shape, one record per line:
/// ```text
/// Unexpected errors:
///   {"file":"a.cpp","line":3,"message":"..."},
///   {"file":"b.cpp","line":0,"message":"..."}
/// ```
pub(crate) fn write_errors<W: Write>(
    out: &mut W,
    title: &str,
    errors: &BTreeSet<DiagnosticRecord>,
) -> Result<(), ReportError> {
    writeln!(out, "{title} errors:")?;
    let lines = errors
        .iter()
        .map(|e| Ok(format!("  {}", serde_json::to_string(e)?)))
        .collect::<Result<Vec<_>, ReportError>>()?;
    writeln!(out, "{}", lines.join(",\n"))?;
    Ok(())
}

/// Same as [`write_errors`] but for file-wide baseline entries, which have
/// no line/message of their own.
pub(crate) fn write_file_errors<W: Write, E: Serialize>(
    out: &mut W,
    title: &str,
    errors: &[E],
) -> Result<(), ReportError> {
    writeln!(out, "{title} file-wide errors:")?;
    let lines = errors
        .iter()
        .map(|e| Ok(format!("  {}", serde_json::to_string(e)?)))
        .collect::<Result<Vec<_>, ReportError>>()?;
    writeln!(out, "{}", lines.join(",\n"))?;
    Ok(())
}

#[cfg(test)]
#[path = "diagnostics_tests.rs"]
mod tests;
