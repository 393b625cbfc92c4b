// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types and process exit codes.

use std::path::PathBuf;

/// Process exit codes used when the run does not reach the aggregation step.
///
/// A completed run exits with the aggregate service code instead, which is
/// either `0` or the first failing service's own exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Sync and every service test command succeeded.
    Success = 0,
    /// Fatal precondition failure (sync failed, command could not start).
    Failure = 1,
    /// Invalid configuration, missing root, or unknown service name.
    ConfigError = 2,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Errors that abort a run before or during service execution.
///
/// A service whose test command exits nonzero is not an error: it is recorded
/// in the run summary and the run continues.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("no repository root with a `{marker}` directory found above {start}")]
    RootNotFound { start: PathBuf, marker: PathBuf },

    #[error("services directory not found: {0}")]
    ServicesDirMissing(PathBuf),

    #[error("unknown service: {0}")]
    UnknownService(String),

    #[error("dependency sync `{command}` failed with exit code {code}")]
    SyncFailed { command: String, code: i32 },

    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Exit code the process should terminate with for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Error::ConfigRead { .. }
            | Error::ConfigParse { .. }
            | Error::ConfigInvalid(_)
            | Error::RootNotFound { .. }
            | Error::ServicesDirMissing(_)
            | Error::UnknownService(_) => ExitCode::ConfigError,
            Error::SyncFailed { .. } | Error::Spawn { .. } | Error::Io { .. } => ExitCode::Failure,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
