// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for harness integration tests: a scratch fleet layout,
//! a throwaway git repository, and a fake analyzer executable that drops
//! a canned XML report.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};

/// The harness binary with ambient configuration stripped.
pub fn harness() -> Command {
    let mut cmd = Command::cargo_bin("inspectfleet").unwrap();
    for var in [
        "INSPECTFLEET_PROJECTS_FILE",
        "INSPECTFLEET_TOOLCHAINS_FILE",
        "INSPECTFLEET_ENV",
        "INSPECTFLEET_ANALYZER_DIR",
        "INSPECTFLEET_PROJECTS_CACHE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// Minimal toolchains file; custom-build projects never look at the
/// generators.
pub const TOOLCHAINS: &str = r#"{
    "cmake_generators": {},
    "vcpkg": {"triplet": "x64-linux"}
}"#;

/// A report with one ERROR-severity issue in `main.cpp:3`.
pub const REPORT_ONE_ERROR: &str = r#"<Report ToolsVersion="243.1">
  <IssueTypes>
    <IssueType Id="CppCompileError" Severity="ERROR"/>
  </IssueTypes>
  <Issues>
    <Project Name="demo">
      <Issue TypeId="CppCompileError" File="main.cpp" Line="3" Message="boom"/>
    </Project>
  </Issues>
</Report>"#;

/// A report whose `Issues` section is empty.
pub const REPORT_CLEAN: &str = r#"<Report ToolsVersion="243.1">
  <IssueTypes>
    <IssueType Id="CppCompileError" Severity="ERROR"/>
  </IssueTypes>
  <Issues>
  </Issues>
</Report>"#;

/// Create an analyzer directory holding a shell-script `inspectcode` that
/// copies `report_xml` to the `-o=` destination and claims to inspect two
/// files.
pub fn fake_analyzer_dir(dir: &Path, report_xml: &str) -> PathBuf {
    let analyzer_dir = dir.join("analyzer");
    std::fs::create_dir_all(&analyzer_dir).unwrap();
    let canned = analyzer_dir.join("canned-report.xml");
    write_file(&canned, report_xml);

    let script = format!(
        "#!/bin/sh\n\
         for arg in \"$@\"; do\n\
           case \"$arg\" in\n\
             -o=*) cp '{}' \"${{arg#-o=}}\" ;;\n\
           esac\n\
         done\n\
         echo 'Inspecting main.cpp'\n\
         echo 'Inspecting util.cpp'\n",
        canned.display()
    );
    let exe = analyzer_dir.join("inspectcode");
    write_file(&exe, &script);
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
    analyzer_dir
}

fn git(dir: &Path, args: &[&str]) {
    let output = std::process::Command::new("git")
        .args([
            "-c",
            "user.name=fleet",
            "-c",
            "user.email=fleet@example.com",
        ])
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(output.status.success(), "git {args:?} failed");
}

/// Seed a git repository shipping its own solution file; returns the
/// head commit sha.
pub fn seed_project_repo(dir: &Path) -> String {
    std::fs::create_dir_all(dir).unwrap();
    git(dir, &["init", "-q", "-b", "main"]);
    write_file(&dir.join("demo.sln"), "Microsoft Visual Studio Solution File\n");
    write_file(&dir.join("main.cpp"), "int main() { return 0; }\n");
    git(dir, &["add", "."]);
    git(dir, &["commit", "-q", "-m", "initial"]);
    let output = std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(dir)
        .output()
        .unwrap();
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

/// Projects file with one custom-build project named `demo`.
pub fn demo_projects_file(repo: &Path, sha: &str, stable_baseline: &str) -> String {
    format!(
        r#"{{
            "demo": {{
                "sources": {{"repo": "{}", "commit": "{}"}},
                "custom_build": {{"solution": "demo.sln"}},
                "stable": {}
            }}
        }}"#,
        repo.display(),
        sha,
        stable_baseline
    )
}
