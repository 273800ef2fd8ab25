// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Baseline entry types loaded from per-project configuration.

use serde::{Deserialize, Serialize};

use crate::diagnostics::DiagnosticRecord;

fn is_false(b: &bool) -> bool {
    !*b
}

/// A diagnostic expected to appear in every run.
///
/// Flaky entries are tolerated as present or absent: they are never
/// reported as missing, and never as unexpected.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KnownError {
    pub file: String,
    #[serde(default)]
    pub line: u32,
    pub message: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub flaky: bool,
}

impl KnownError {
    /// Identity tuple of this baseline entry.
    pub fn id(&self) -> DiagnosticRecord {
        DiagnosticRecord {
            file: self.file.clone(),
            line: self.line,
            message: self.message.clone(),
        }
    }
}

/// Baseline entry asserting that a file contains at least one error,
/// without pinning line numbers or messages.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KnownFileError {
    pub file: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub flaky: bool,
}

#[cfg(test)]
#[path = "baseline_tests.rs"]
mod tests;
