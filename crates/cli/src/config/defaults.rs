// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized default values for configuration.
//!
//! Individual config structs delegate to these via their `default_*` methods.

/// Config file name looked up at the repository root.
pub const CONFIG_FILE: &str = "svctest.toml";

/// Directory (relative to the root) whose children are candidate services.
pub const SERVICES_DIR: &str = "services";

/// Marker file that makes a child directory a testable service.
pub const MANIFEST: &str = "pyproject.toml";

/// Dependency sync command, run once at the repository root.
pub fn sync_command() -> Vec<String> {
    ["uv", "sync", "--frozen"].iter().map(|s| s.to_string()).collect()
}

/// Test command, run once per service with the service as working directory.
pub fn test_command() -> Vec<String> {
    ["uv", "run", "pytest", "-v"].iter().map(|s| s.to_string()).collect()
}
