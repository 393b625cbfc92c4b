// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sequential service test orchestration.
//!
//! Runs the dependency sync once at the repository root, then the test
//! command once per service, folding exit codes into a [`RunSummary`].
//! A failing service never stops the run; a failing sync aborts it.

use std::path::Path;
use std::time::{Duration, Instant};

use crate::command::CommandRunner;
use crate::config::{Config, Order};
use crate::discovery::{Service, ServiceDiscovery};
use crate::error::{Error, Result};
use crate::report::Progress;

/// Per-invocation options layered over the config.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Run the dependency sync before testing.
    pub sync: bool,
    /// Execution order.
    pub order: Order,
    /// Restrict execution to these service names (empty = all).
    pub only: Vec<String>,
}

/// Result of one service's test command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOutcome {
    pub service: Service,
    pub exit_code: i32,
    pub duration: Duration,
}

impl ServiceOutcome {
    pub fn passed(&self) -> bool {
        self.exit_code == 0
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Services in the order they ran.
    pub outcomes: Vec<ServiceOutcome>,
    /// `0`, or the exit code of the first failing service.
    pub exit_code: i32,
    /// Time spent in the dependency sync, if it ran.
    pub sync_duration: Option<Duration>,
}

impl RunSummary {
    /// Record a service outcome and fold its exit code.
    pub fn record(&mut self, outcome: ServiceOutcome) {
        self.exit_code = aggregate(self.exit_code, outcome.exit_code);
        self.outcomes.push(outcome);
    }

    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.passed_count()
    }

    pub fn total_duration(&self) -> Duration {
        self.outcomes.iter().map(|o| o.duration).sum()
    }
}

/// Fold one exit code into the running aggregate.
///
/// The first nonzero code sticks; later codes never overwrite it.
pub fn aggregate(acc: i32, code: i32) -> i32 {
    if acc == 0 { code } else { acc }
}

/// Drives the sync and per-service test commands for one repository.
pub struct Orchestrator<'a> {
    root: &'a Path,
    config: &'a Config,
    runner: &'a dyn CommandRunner,
}

impl<'a> Orchestrator<'a> {
    pub fn new(root: &'a Path, config: &'a Config, runner: &'a dyn CommandRunner) -> Self {
        Self { root, config, runner }
    }

    pub fn discovery(&self) -> ServiceDiscovery {
        ServiceDiscovery::new(self.config.services_path(self.root), self.config.manifest.as_str())
    }

    /// Services that a run with `options` would test, in execution order.
    pub fn plan(&self, options: &RunOptions) -> Result<Vec<Service>> {
        let services = self.discovery().collect(options.order == Order::Sorted)?;
        select(services, &options.only)
    }

    /// Run the dependency sync at the repository root.
    pub fn sync(&self, progress: &mut dyn Progress) -> Result<Duration> {
        let command = self.config.sync_command()?;
        progress.sync_started(&command);
        let started = Instant::now();
        let code = self.runner.run(&command, self.root)?;
        if code != 0 {
            return Err(Error::SyncFailed { command: command.to_string(), code });
        }
        Ok(started.elapsed())
    }

    /// Sync, then test every selected service in order.
    ///
    /// Returns `Err` only for fatal failures: sync failure, a command that
    /// cannot be started, an unreadable services directory, or an unknown
    /// `--service` name. A missing services directory and unknown names are
    /// reported before sync runs.
    pub fn run(&self, options: &RunOptions, progress: &mut dyn Progress) -> Result<RunSummary> {
        let test = self.config.test_command()?;
        let discovery = self.discovery();
        discovery.ensure_exists()?;

        // Selection and sorting need the full listing up front; the plain
        // case streams entries as the directory is read.
        let planned = if options.only.is_empty() && options.order == Order::Filesystem {
            None
        } else {
            Some(self.plan(options)?)
        };

        let sync_duration = if options.sync { Some(self.sync(progress)?) } else { None };

        let services: Box<dyn Iterator<Item = Result<Service>>> = match planned {
            Some(services) => Box::new(services.into_iter().map(Ok)),
            None => Box::new(discovery.iter()?),
        };

        let mut summary = services.into_iter().try_fold(
            RunSummary::default(),
            |mut summary, service| -> Result<RunSummary> {
                let service = service?;
                progress.service_started(&service);
                let started = Instant::now();
                let exit_code = self.runner.run(&test, &service.path)?;
                let outcome = ServiceOutcome { service, exit_code, duration: started.elapsed() };
                progress.service_finished(&outcome);
                summary.record(outcome);
                Ok(summary)
            },
        )?;
        summary.sync_duration = sync_duration;

        tracing::info!(
            "{} services tested, {} failed, exit code {}",
            summary.outcomes.len(),
            summary.failed_count(),
            summary.exit_code
        );
        Ok(summary)
    }
}

/// Keep only the services named in `only`, preserving discovery order.
fn select(services: Vec<Service>, only: &[String]) -> Result<Vec<Service>> {
    if only.is_empty() {
        return Ok(services);
    }
    if let Some(unknown) = only.iter().find(|name| !services.iter().any(|s| &s.name == *name)) {
        return Err(Error::UnknownService(unknown.clone()));
    }
    Ok(services.into_iter().filter(|s| only.contains(&s.name)).collect())
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
