// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration loading for `svctest.toml`.
//!
//! Every field is optional. An absent file yields the defaults in
//! [`defaults`], which reproduce the plain `uv` + `pytest` workflow.

pub mod defaults;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::command::CommandSpec;
use crate::error::{Error, Result};

pub use defaults::CONFIG_FILE;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Services directory, relative to the repository root.
    #[serde(default = "Config::default_services_dir")]
    pub services_dir: PathBuf,

    /// Manifest file name marking a directory as a service.
    #[serde(default = "Config::default_manifest")]
    pub manifest: String,

    /// Order services run in.
    #[serde(default)]
    pub order: Order,

    /// Dependency sync settings.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Per-service test settings.
    #[serde(default)]
    pub test: TestConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            services_dir: Self::default_services_dir(),
            manifest: Self::default_manifest(),
            order: Order::default(),
            sync: SyncConfig::default(),
            test: TestConfig::default(),
        }
    }
}

impl Config {
    pub(crate) fn default_services_dir() -> PathBuf {
        PathBuf::from(defaults::SERVICES_DIR)
    }

    pub(crate) fn default_manifest() -> String {
        defaults::MANIFEST.to_string()
    }

    /// Parse config from TOML text and validate it.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|source| Error::ConfigParse { path: path.to_path_buf(), source })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make every run fail in a confusing way.
    pub fn validate(&self) -> Result<()> {
        if self.manifest.trim().is_empty() {
            return Err(Error::ConfigInvalid("`manifest` must not be empty".to_string()));
        }
        if Path::new(&self.manifest).components().count() != 1 {
            return Err(Error::ConfigInvalid(format!(
                "`manifest` must be a plain file name, got {:?}",
                self.manifest
            )));
        }
        if self.services_dir.as_os_str().is_empty() {
            return Err(Error::ConfigInvalid("`services_dir` must not be empty".to_string()));
        }
        self.sync_command()?;
        self.test_command()?;
        Ok(())
    }

    /// The dependency sync command.
    pub fn sync_command(&self) -> Result<CommandSpec> {
        CommandSpec::from_argv(&self.sync.command)
            .ok_or_else(|| Error::ConfigInvalid("`sync.command` must not be empty".to_string()))
    }

    /// The per-service test command.
    pub fn test_command(&self) -> Result<CommandSpec> {
        CommandSpec::from_argv(&self.test.command)
            .ok_or_else(|| Error::ConfigInvalid("`test.command` must not be empty".to_string()))
    }

    /// Absolute services directory for a given repository root.
    pub fn services_path(&self, root: &Path) -> PathBuf {
        root.join(&self.services_dir)
    }
}

/// Order in which discovered services are executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Whatever order the file system yields entries in.
    #[default]
    Filesystem,
    /// Lexicographic by service name.
    Sorted,
}

/// `[sync]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// Command argv, run with the repository root as working directory.
    #[serde(default = "defaults::sync_command")]
    pub command: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { command: defaults::sync_command() }
    }
}

/// `[test]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestConfig {
    /// Command argv, run with each service directory as working directory.
    #[serde(default = "defaults::test_command")]
    pub command: Vec<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self { command: defaults::test_command() }
    }
}

/// Load and validate a config file.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| Error::ConfigRead { path: path.to_path_buf(), source })?;
    Config::parse(&content, path)
}

/// Load `svctest.toml` from `root` if present, otherwise return defaults.
pub fn load_or_default(root: &Path) -> Result<Config> {
    let path = root.join(CONFIG_FILE);
    if path.is_file() {
        tracing::debug!("loading config from {}", path.display());
        load(&path)
    } else {
        Ok(Config::default())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
