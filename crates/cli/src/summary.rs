// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! End-of-run summary.

use std::time::Duration;

use crate::output::print_step;

/// Render a duration as `MM:SS`. Minutes keep growing past an hour; the
/// summary lines are for humans scanning CI logs, not for parsing.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Accumulated failures across the fleet run.
#[derive(Debug, Default)]
pub struct Summary {
    failed: Vec<String>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one failed project as a pre-formatted `name: detail` line.
    pub fn record_failure(&mut self, line: String) {
        self.failed.push(line);
    }

    pub fn is_ok(&self) -> bool {
        self.failed.is_empty()
    }

    /// Print the closing lines and return the process exit code.
    pub fn finish(&self, total: Duration) -> i32 {
        print_step("summary", format!("Total time: {}", format_duration(total)));
        if self.is_ok() {
            print_step("summary", "Summary: OK");
            0
        } else {
            let mut text = String::from("Summary: Fail");
            for line in &self.failed {
                text.push_str("\n  ");
                text.push_str(line);
            }
            print_step("summary", text);
            1
        }
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
