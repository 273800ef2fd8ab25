// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Analyzer settings file generation.
//!
//! The analyzer reads a `.DotSettings` resource dictionary next to the
//! solution. The harness writes one that turns clang-tidy off (its
//! diagnostics are not part of the baseline) and excludes the project's
//! `to_skip` file masks.

use std::path::{Path, PathBuf};

/// Escape a settings key segment: alphanumerics pass through, every other
/// character becomes `_XXXX` with the uppercase hex of its code point.
pub fn escape_dot_settings(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_string()
            } else {
                format!("_{:04X}", c as u32)
            }
        })
        .collect()
}

/// Render the settings document for a project.
pub fn generate_settings(files_to_skip: &[String]) -> String {
    let mut entries = vec![boolean_entry(
        "/Default/CodeInspection/CppClangTidy/EnableClangTidySupport/@EntryValue",
        false,
    )];

    for mask in files_to_skip {
        // Proto exclusions live under CodeInspection, everything else
        // under Environment.
        let section = if mask.ends_with("proto") {
            "CodeInspection"
        } else {
            "Environment"
        };
        entries.push(boolean_entry(
            &format!(
                "/Default/{section}/ExcludedFiles/FileMasksToSkip/={}/@EntryIndexedValue",
                escape_dot_settings(mask)
            ),
            true,
        ));
    }

    format!(
        "<wpf:ResourceDictionary xml:space=\"preserve\" \
         xmlns:x=\"http://schemas.microsoft.com/winfx/2006/xaml\" \
         xmlns:s=\"clr-namespace:System;assembly=mscorlib\" \
         xmlns:ss=\"urn:shemas-jetbrains-com:settings-storage-xaml\" \
         xmlns:wpf=\"http://schemas.microsoft.com/winfx/2006/xaml/presentation\">\
         {}</wpf:ResourceDictionary>",
        entries.join("")
    )
}

/// Settings file path for a solution: the solution path with
/// `.DotSettings` appended.
pub fn settings_path(sln_file: &Path) -> PathBuf {
    let mut path = sln_file.as_os_str().to_os_string();
    path.push(".DotSettings");
    PathBuf::from(path)
}

/// Write the settings document next to the solution.
pub async fn write_settings(sln_file: &Path, files_to_skip: &[String]) -> std::io::Result<()> {
    tokio::fs::write(settings_path(sln_file), generate_settings(files_to_skip)).await
}

fn boolean_entry(key: &str, value: bool) -> String {
    let text = if value { "True" } else { "False" };
    format!("<s:Boolean x:Key=\"{key}\">{text}</s:Boolean>")
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
