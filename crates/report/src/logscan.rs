// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Extraction of analyzer runtime errors from the free-text error log.
//!
//! Analyzer plugins that throw at analysis time leave a fixed multi-line
//! block in the error log. This module scans for every occurrence of that
//! block and turns it into a structured record. No match is not an error;
//! the scan is stateless and idempotent.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Opening directional quotation mark the analyzer wraps values in.
const LEFT_MARK: char = '\u{201C}';
/// Closing directional quotation mark.
const RIGHT_MARK: char = '\u{201D}';

/// The exception block template. Group 1 is the analyzer name, group 2 the
/// exception message, group 3 the offending file path. Line endings may be
/// `\n` or `\r\n` depending on the platform that produced the log.
static RUNTIME_ERROR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(
        "Analyzer '(.*)' threw the following exception: (.*)\\.\r?\n\
         \r?\n\
         --- EXCEPTION .*\r?\n\
         Message = .*\r?\n\
         ExceptionPath = .*\r?\n\
         ClassName = .*\r?\n\
         Data\\.File = (.*)",
    )
    .expect("runtime error regex pattern is invalid")
});

/// One runtime exception thrown by an analyzer plugin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnalyzerError {
    /// Fully qualified analyzer name.
    pub analyzer: String,
    /// Exception message, with wrapping quotation marks stripped.
    pub message: String,
    /// Path of the file under analysis when the exception was thrown.
    pub file_path: String,
}

/// Scan `logs` for analyzer exception blocks, in order of appearance.
///
/// Repeated identical blocks yield repeated records: each one is a real
/// occurrence in the log.
pub fn parse_logs(logs: &str) -> Vec<AnalyzerError> {
    RUNTIME_ERROR_REGEX
        .captures_iter(logs)
        .map(|caps| {
            let analyzer = caps.get(1).map_or("", |m| m.as_str());
            let message = caps.get(2).map_or("", |m| m.as_str());
            let file_path = caps.get(3).map_or("", |m| m.as_str());
            AnalyzerError {
                analyzer: analyzer.to_string(),
                message: strip_quotes(message).to_string(),
                file_path: strip_quotes(file_path.trim_end_matches('\r')).to_string(),
            }
        })
        .collect()
}

/// Strip one wrapping pair of directional quotation marks, boundary only.
/// Marks anywhere else in the text are preserved.
fn strip_quotes(text: &str) -> &str {
    let text = text.strip_prefix(LEFT_MARK).unwrap_or(text);
    text.strip_suffix(RIGHT_MARK).unwrap_or(text)
}

#[cfg(test)]
#[path = "logscan_tests.rs"]
mod tests;
