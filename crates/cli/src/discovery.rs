// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Repository root and service discovery.
//!
//! The root is found by walking up from the current directory. Services are
//! the immediate children of the services directory that contain the
//! manifest file.

use std::ffi::OsString;
use std::fs::ReadDir;
use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE;
use crate::error::{Error, Result};

/// Find the repository root starting from `start_dir` and walking up to the
/// git root.
///
/// A directory is the root if it holds `svctest.toml` or a `services_dir`
/// subdirectory.
pub fn find_root(start_dir: &Path, services_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        if current.join(CONFIG_FILE).is_file() || current.join(services_dir).is_dir() {
            return Some(current);
        }

        // Stop at git root
        if current.join(".git").exists() {
            return None;
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return None,
        }
    }
}

/// A testable service directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    /// Directory name, used for display and `--service` selection.
    pub name: String,
    /// Absolute path, used as the test command's working directory.
    pub path: PathBuf,
}

/// True if `dir` directly contains `manifest`.
pub fn is_service(dir: &Path, manifest: &str) -> bool {
    dir.join(manifest).is_file()
}

/// Restartable service discovery over one services directory.
#[derive(Debug, Clone)]
pub struct ServiceDiscovery {
    dir: PathBuf,
    manifest: String,
}

impl ServiceDiscovery {
    pub fn new(dir: impl Into<PathBuf>, manifest: impl Into<String>) -> Self {
        Self { dir: dir.into(), manifest: manifest.into() }
    }

    /// Fail with [`Error::ServicesDirMissing`] unless the services directory
    /// exists.
    pub fn ensure_exists(&self) -> Result<()> {
        if self.dir.is_dir() { Ok(()) } else { Err(Error::ServicesDirMissing(self.dir.clone())) }
    }

    /// Start a fresh pass over the services directory.
    ///
    /// Entries come back in file system order. Each call re-reads the
    /// directory.
    pub fn iter(&self) -> Result<Services> {
        self.ensure_exists()?;
        let entries = std::fs::read_dir(&self.dir)
            .map_err(|source| Error::Io { path: self.dir.clone(), source })?;
        Ok(Services { dir: self.dir.clone(), manifest: self.manifest.clone(), entries })
    }

    /// Collect all services, optionally sorted by name.
    pub fn collect(&self, sorted: bool) -> Result<Vec<Service>> {
        let mut services = self.iter()?.collect::<Result<Vec<_>>>()?;
        if sorted {
            services.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Ok(services)
    }
}

/// Lazy iterator over the services in a directory.
pub struct Services {
    dir: PathBuf,
    manifest: String,
    entries: ReadDir,
}

impl Iterator for Services {
    type Item = Result<Service>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(source) => return Some(Err(Error::Io { path: self.dir.clone(), source })),
            };
            let path = entry.path();

            if !path.is_dir() {
                tracing::debug!("skipping {}: not a directory", path.display());
                continue;
            }
            if !is_service(&path, &self.manifest) {
                tracing::debug!("skipping {}: no {}", path.display(), self.manifest);
                continue;
            }

            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => lossy_name(raw),
            };
            return Some(Ok(Service { name, path }));
        }
    }
}

fn lossy_name(raw: OsString) -> String {
    let name = raw.to_string_lossy().into_owned();
    tracing::warn!("service directory name is not valid UTF-8: {}", name);
    name
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
