// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run the test suite of every service in a monorepo.
//!
//! Services are the child directories of `services/` that contain a
//! manifest file. Dependencies are synced once at the root, then each
//! service's tests run in sequence; the process exits with the first
//! failing service's code.

pub mod cli;
pub mod color;
pub mod command;
pub mod config;
pub mod discovery;
pub mod error;
pub mod orchestrator;
pub mod report;


pub use error::{Error, ExitCode, Result};
