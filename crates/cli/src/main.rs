// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fleet harness binary entry point.

use clap::Parser;

use inspectfleet::cli::Cli;
use inspectfleet::runner::run_fleet;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let code = run_fleet(cli).await;
    std::process::exit(code);
}
