// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod cmd_run;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use svctest::cli::Cli;
use svctest::error::{Error, ExitCode};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match cmd_run::run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("svctest: {e:#}");
            let code = e.downcast_ref::<Error>().map_or(ExitCode::Failure, Error::exit_code);
            code.into()
        }
    };
    std::process::exit(code);
}

fn init_logging(verbose: bool) {
    let default = if verbose { "svctest=info" } else { "svctest=warn" };
    let filter = EnvFilter::try_from_env("SVCTEST_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}
