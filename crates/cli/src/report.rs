// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Progress output and run summaries.

use std::io::{self, Write};
use std::time::Duration;

use serde_json::json;
use termcolor::WriteColor;

use crate::color::scheme;
use crate::command::CommandSpec;
use crate::discovery::Service;
use crate::orchestrator::{RunSummary, ServiceOutcome};

/// Receives progress notifications while a run is in flight.
pub trait Progress {
    fn sync_started(&mut self, _command: &CommandSpec) {}

    fn service_started(&mut self, service: &Service);

    fn service_finished(&mut self, _outcome: &ServiceOutcome) {}
}

/// Prints a banner before each service so its inherited output is easy to
/// tell apart.
pub struct Banner<W> {
    out: W,
}

impl<W: WriteColor> Banner<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_banner(&mut self, service: &Service) -> io::Result<()> {
        writeln!(self.out)?;
        write!(self.out, "🧪 Testing ")?;
        self.out.set_color(&scheme::service_name())?;
        write!(self.out, "{}", service.name)?;
        self.out.reset()?;
        writeln!(self.out, "...")?;
        self.out.flush()
    }
}

impl<W: WriteColor> Progress for Banner<W> {
    fn sync_started(&mut self, command: &CommandSpec) {
        tracing::info!("syncing dependencies: {}", command);
    }

    fn service_started(&mut self, service: &Service) {
        // Output is advisory; a closed pipe must not abort the run.
        if let Err(e) = self.write_banner(service) {
            tracing::warn!("failed to write progress: {}", e);
        }
    }
}

/// Write the human-readable summary.
pub fn write_text(summary: &RunSummary, out: &mut dyn WriteColor) -> io::Result<()> {
    writeln!(out)?;
    for outcome in &summary.outcomes {
        if outcome.passed() {
            out.set_color(&scheme::pass())?;
            write!(out, "PASS")?;
            out.reset()?;
            writeln!(out, " {} ({})", outcome.service.name, format_duration(outcome.duration))?;
        } else {
            out.set_color(&scheme::fail())?;
            write!(out, "FAIL")?;
            out.reset()?;
            writeln!(
                out,
                " {} (exit {}, {})",
                outcome.service.name,
                outcome.exit_code,
                format_duration(outcome.duration)
            )?;
        }
    }

    if summary.outcomes.is_empty() {
        writeln!(out, "No services found.")?;
        return Ok(());
    }

    writeln!(
        out,
        "\n{} passed, {} failed in {}",
        summary.passed_count(),
        summary.failed_count(),
        format_duration(summary.total_duration())
    )
}

/// JSON form of the summary.
pub fn to_json(summary: &RunSummary) -> serde_json::Value {
    let services: Vec<_> = summary
        .outcomes
        .iter()
        .map(|o| {
            json!({
                "name": o.service.name,
                "path": o.service.path.display().to_string(),
                "exit_code": o.exit_code,
                "passed": o.passed(),
                "duration_ms": duration_ms(o.duration),
            })
        })
        .collect();

    json!({
        "exit_code": summary.exit_code,
        "passed": summary.passed_count(),
        "failed": summary.failed_count(),
        "sync_duration_ms": summary.sync_duration.map(duration_ms),
        "services": services,
    })
}

/// Write the JSON summary followed by a newline.
pub fn write_json(summary: &RunSummary, out: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &to_json(summary))?;
    writeln!(out)
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Format a duration as `850ms` or `12.3s`.
pub fn format_duration(d: Duration) -> String {
    if d < Duration::from_secs(1) {
        format!("{}ms", d.as_millis())
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
