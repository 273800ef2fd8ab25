#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

use clap::Parser;
use std::collections::BTreeMap;

use crate::cli::Cli;

fn bare_env() -> Environment {
    Environment::from_cli(
        &Cli::try_parse_from(["inspectfleet", "--analyzer-dir", "/opt/analyzer"]).unwrap(),
    )
    .unwrap()
}

fn toolchains() -> ToolchainsFile {
    ToolchainsFile {
        cmake_generators: BTreeMap::new(),
        vcpkg: crate::config::VcpkgConfig {
            triplet: "x64-windows".to_string(),
        },
    }
}

#[tokio::test]
async fn test_dependencies_without_vcpkg_fail_before_running_anything() {
    let dir = tempfile::tempdir().unwrap();
    let generator = GeneratorSpec {
        name: "Ninja".to_string(),
        architecture: None,
    };
    let err = configure(
        &bare_env(),
        &toolchains(),
        &dir.path().join("build"),
        &generator,
        &[],
        &["zlib".to_string()],
    )
    .await
    .unwrap_err();
    match err {
        CmakeError::VcpkgNotConfigured { deps } => assert_eq!(deps, ["zlib"]),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!dir.path().join("build").exists());
}

#[tokio::test]
async fn test_resolve_solution_from_cache() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("CMakeCache.txt"),
        "CMAKE_BUILD_TYPE:STRING=Release\nCMAKE_PROJECT_NAME:STATIC=zlib\n",
    )
    .unwrap();

    let sln = resolve_solution(dir.path()).await.unwrap();
    assert_eq!(sln, dir.path().join("zlib.sln"));
}

#[tokio::test]
async fn test_resolve_solution_without_project_name() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("CMakeCache.txt"), "CMAKE_BUILD_TYPE:STRING=Release\n")
        .unwrap();

    let err = resolve_solution(dir.path()).await.unwrap_err();
    assert!(matches!(err, CmakeError::ProjectNameNotFound));
}

#[tokio::test]
async fn test_resolve_solution_missing_cache() {
    let dir = tempfile::tempdir().unwrap();
    let err = resolve_solution(dir.path()).await.unwrap_err();
    assert!(matches!(err, CmakeError::Io(_)));
}
