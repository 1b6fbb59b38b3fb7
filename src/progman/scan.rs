//! # Filesystem Scanner
//!
//! Rebuilds a catalog from a template by walking the scan roots and looking
//! for executables whose file name is one of a program's processes.
//!
//! Roots are walked in the order given and, inside a root, in file-name
//! order. When a program is found more than once, the last hit wins, so a
//! later root overrides an earlier one. Programs that are never found are
//! left out; every template category is kept, even when empty.

use crate::model::{Catalog, Program, ScanPathTemplate};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub const USERNAME_PLACEHOLDER: &str = "%USERNAME%";
/// Extension scanned for when none is configured
pub const DEFAULT_EXECUTABLE_EXT: &str = ".exe";

/// Expands every `%USERNAME%` in every template path.
pub fn resolve_scan_paths(template: &ScanPathTemplate, username: &str) -> Vec<PathBuf> {
    template
        .paths
        .iter()
        .map(|path| PathBuf::from(path.replace(USERNAME_PLACEHOLDER, username)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub catalog: Catalog,
    /// Distinct programs found
    pub matched: usize,
    /// Executable files inspected
    pub files_seen: usize,
}

#[derive(Debug, Clone)]
pub struct Scanner {
    extensions: Vec<String>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new([DEFAULT_EXECUTABLE_EXT])
    }
}

impl Scanner {
    /// An empty extension list accepts every file.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().to_lowercase())
                .collect(),
        }
    }

    fn is_executable(&self, file_name: &str) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        let lower = file_name.to_lowercase();
        self.extensions.iter().any(|ext| lower.ends_with(ext.as_str()))
    }

    pub fn scan(&self, template: &Catalog, scan_paths: &[PathBuf]) -> ScanReport {
        let mut found: IndexMap<(String, String), PathBuf> = IndexMap::new();
        let mut files_seen = 0;

        for root in scan_paths {
            if !root.exists() {
                warn!("Scan path does not exist: {}", root.display());
                continue;
            }
            info!("Scanning path: {}", root.display());

            for entry in WalkDir::new(root)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
            {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        debug!("Skipping unreadable entry: {}", e);
                        continue;
                    }
                };
                if !entry.file_type().is_file() {
                    continue;
                }

                let file_name = entry.file_name().to_string_lossy();
                if !self.is_executable(&file_name) {
                    continue;
                }
                files_seen += 1;
                debug!("Found executable: {}", entry.path().display());

                let location = absolute(entry.path());
                for (category, name, program) in template.programs() {
                    if program.processes.iter().any(|p| *p == file_name) {
                        info!("Matched program: {} ({})", name, location.display());
                        found.insert((category.clone(), name.clone()), location.clone());
                    }
                }
            }
        }

        let mut catalog = Catalog::new();
        for (category, programs) in template.categories() {
            catalog.add_category(category.as_str());
            for (name, program) in programs {
                if let Some(location) = found.get(&(category.clone(), name.clone())) {
                    catalog.insert(
                        category.as_str(),
                        name.as_str(),
                        Program::new(program.processes.iter().cloned()).with_path(location),
                    );
                }
            }
        }

        ScanReport {
            catalog,
            matched: found.len(),
            files_seen,
        }
    }
}

/// Scans with the default `.exe` filter.
pub fn scan(template: &Catalog, scan_paths: &[PathBuf]) -> ScanReport {
    Scanner::default().scan(template, scan_paths)
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
