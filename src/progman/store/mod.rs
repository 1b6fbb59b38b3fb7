//! # Storage Layer
//!
//! This module defines the storage abstraction for progman. The [`CatalogStore`]
//! trait lets the commands work against files in production and against memory
//! in tests.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - Per-user catalog in `programs_db_<user>.json`
//!   - Shared template in `programs.json`, used when no per-user catalog exists
//!   - Scan roots in `programs_default_paths.json`
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── programs.json                  # Shared catalog template
//! ├── programs_default_paths.json    # {"paths": [...]} with %USERNAME% placeholders
//! ├── programs_db_<user>.json        # Catalog written by the last scan
//! ├── config.json                    # Optional ProgmanConfig
//! └── progman.log                    # Session log
//! ```
//!
//! Catalogs are always read and written whole. A save goes through a temporary
//! file in the same directory followed by a rename, so a failed save leaves the
//! previous catalog in place.

use crate::error::Result;
use crate::model::{Catalog, ScanPathTemplate};

pub mod fs;
#[cfg(any(test, feature = "test_utils"))]
pub mod memory;

/// Abstract interface for catalog storage.
pub trait CatalogStore {
    /// The working catalog: the per-user catalog if present, else the template
    fn load_catalog(&self) -> Result<Catalog>;

    /// Replace the per-user catalog
    fn save_catalog(&mut self, catalog: &Catalog) -> Result<()>;

    /// The shared template a scan matches against
    fn load_template(&self) -> Result<Catalog>;

    /// The scan roots, before `%USERNAME%` expansion
    fn load_scan_paths(&self) -> Result<ScanPathTemplate>;

    /// Where `save_catalog` writes, for reporting
    fn catalog_location(&self) -> String;
}
