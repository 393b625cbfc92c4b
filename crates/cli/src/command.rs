// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! External command execution.
//!
//! Commands run with inherited stdio. Only the exit status is observed;
//! output is streamed straight to the operator and never parsed.

use std::fmt;
use std::path::Path;
use std::process::{Command, ExitStatus};

use crate::error::{Error, Result};

/// An external command as an argv vector. No shell is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Build from an argv slice, returning `None` if it is empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        if program.is_empty() {
            return None;
        }
        Some(Self { program: program.clone(), args: args.to_vec() })
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs an external command to completion and reports its exit code.
///
/// This is the seam between orchestration and the operating system; tests
/// substitute a recording implementation.
pub trait CommandRunner {
    /// Run `command` with `cwd` as working directory, blocking until it exits.
    ///
    /// Returns `Err` only when the command could not be started.
    fn run(&self, command: &CommandSpec, cwd: &Path) -> Result<i32>;
}

/// Runs commands as child processes with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandSpec, cwd: &Path) -> Result<i32> {
        tracing::info!("running `{}` in {}", command, cwd.display());
        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(cwd)
            .status()
            .map_err(|source| Error::Spawn { command: command.to_string(), source })?;
        let code = exit_code(status);
        tracing::debug!("`{}` exited with {}", command, code);
        Ok(code)
    }
}

/// Integer exit code for a finished child.
///
/// A child killed by a signal has no exit code; it maps to `128 + signal`
/// on Unix (the shell convention) and to `1` elsewhere, so it is always a
/// failure.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
