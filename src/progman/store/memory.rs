use super::CatalogStore;
use crate::error::{ProgmanError, Result};
use crate::model::{Catalog, ScanPathTemplate};
use std::path::PathBuf;

/// Keeps the per-user catalog, the template and the scan paths in memory.
///
/// Missing pieces fail with the same errors the file store raises.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub user_catalog: Option<Catalog>,
    pub template: Option<Catalog>,
    pub scan_paths: Option<ScanPathTemplate>,
    pub saves: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, template: Catalog) -> Self {
        self.template = Some(template);
        self
    }

    pub fn with_user_catalog(mut self, catalog: Catalog) -> Self {
        self.user_catalog = Some(catalog);
        self
    }

    pub fn with_scan_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scan_paths = Some(ScanPathTemplate {
            paths: paths.into_iter().map(Into::into).collect(),
        });
        self
    }
}

impl CatalogStore for InMemoryStore {
    fn load_catalog(&self) -> Result<Catalog> {
        self.user_catalog
            .clone()
            .or_else(|| self.template.clone())
            .ok_or_else(|| ProgmanError::ConfigNotFound {
                preferred: PathBuf::from("memory:user"),
                fallback: PathBuf::from("memory:template"),
            })
    }

    fn save_catalog(&mut self, catalog: &Catalog) -> Result<()> {
        self.user_catalog = Some(catalog.clone());
        self.saves += 1;
        Ok(())
    }

    fn load_template(&self) -> Result<Catalog> {
        self.template
            .clone()
            .ok_or_else(|| ProgmanError::CatalogTemplateNotFound(PathBuf::from("memory:template")))
    }

    fn load_scan_paths(&self) -> Result<ScanPathTemplate> {
        self.scan_paths
            .clone()
            .ok_or_else(|| ProgmanError::PathTemplateNotFound(PathBuf::from("memory:paths")))
    }

    fn catalog_location(&self) -> String {
        "memory:user".to_string()
    }
}

// --- Test Fixtures ---

pub mod fixtures {
    use crate::model::{Catalog, Program};

    /// Two categories, three programs, one of them with two processes.
    pub fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert("Browsers", "Chrome", Program::new(["chrome.exe"]));
        catalog.insert("Browsers", "Firefox", Program::new(["firefox.exe"]));
        catalog.insert(
            "Gaming",
            "Steam",
            Program::new(["steam.exe", "steamwebhelper.exe"]),
        );
        catalog
    }
}
