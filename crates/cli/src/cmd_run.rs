// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Default command: sync dependencies and test every service.

use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use termcolor::StandardStream;

use svctest::cli::{Cli, OutputFormat};
use svctest::command::SystemRunner;
use svctest::config::{self, Config, Order};
use svctest::discovery;
use svctest::error::Error;
use svctest::orchestrator::{Orchestrator, RunOptions};
use svctest::report::{self, Banner};

/// Run the orchestrator and return the process exit code.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;

    // An explicit config decides the services directory used to find the root.
    let explicit = match &cli.config {
        Some(path) => Some(config::load(&absolute(&cwd, path))?),
        None => None,
    };

    let root = resolve_root(cli, &cwd, explicit.as_ref())?;
    let config = match explicit {
        Some(config) => config,
        None => config::load_or_default(&root)?,
    };
    tracing::debug!("repository root: {}", root.display());

    let options = RunOptions {
        sync: !cli.no_sync,
        order: if cli.sorted { Order::Sorted } else { config.order },
        only: cli.services.clone(),
    };
    let runner = SystemRunner;
    let orchestrator = Orchestrator::new(&root, &config, &runner);

    if cli.list {
        let services = orchestrator.plan(&options)?;
        let mut stdout = std::io::stdout().lock();
        for service in &services {
            writeln!(stdout, "{}", service.name)?;
        }
        return Ok(0);
    }

    let summary = match cli.output {
        OutputFormat::Text => {
            let choice = cli.color.choice(cli.no_color, std::io::stdout().is_terminal());
            let mut progress = Banner::new(StandardStream::stdout(choice));
            let summary = orchestrator.run(&options, &mut progress)?;
            if let Err(e) = report::write_text(&summary, &mut progress.into_inner()) {
                tracing::warn!("failed to write summary: {}", e);
            }
            summary
        }
        OutputFormat::Json => {
            // Keep stdout parseable: banners go to stderr.
            let choice = cli.color.choice(cli.no_color, std::io::stderr().is_terminal());
            let mut progress = Banner::new(StandardStream::stderr(choice));
            let summary = orchestrator.run(&options, &mut progress)?;
            if let Err(e) = report::write_json(&summary, &mut std::io::stdout().lock()) {
                tracing::warn!("failed to write summary: {}", e);
            }
            summary
        }
    };

    Ok(summary.exit_code)
}

fn resolve_root(cli: &Cli, cwd: &Path, explicit: Option<&Config>) -> anyhow::Result<PathBuf> {
    if let Some(root) = &cli.root {
        return Ok(absolute(cwd, root));
    }
    let services_dir = explicit.map_or_else(
        || PathBuf::from(config::defaults::SERVICES_DIR),
        |c| c.services_dir.clone(),
    );
    discovery::find_root(cwd, &services_dir)
        .ok_or_else(|| Error::RootNotFound { start: cwd.to_path_buf(), marker: services_dir }.into())
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() { path.to_path_buf() } else { cwd.join(path) }
}
