// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report comparison and analyzer log parsing for inspectfleet.
//!
//! This crate holds the pure core of the harness: comparing an analyzer's
//! XML diagnostics report against a per-project baseline of known errors,
//! and extracting structured runtime-error records from the analyzer's
//! free-text log. Both are synchronous functions over their inputs; all
//! I/O stays with the caller.

mod baseline;
mod diagnostics;
mod logscan;
mod report;

pub use baseline::{KnownError, KnownFileError};
pub use diagnostics::DiagnosticRecord;
pub use logscan::{parse_logs, AnalyzerError};
pub use report::{compare, ComparisonResult, ReportError};
