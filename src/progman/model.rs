use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A catalogued program: the executables it runs as and, once a scan has
/// found it, where it is installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub processes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Program {
    pub fn new<I, S>(processes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            processes: processes.into_iter().map(Into::into).collect(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Programs of one category, keyed by program name in file order.
pub type Category = IndexMap<String, Program>;

/// The full category -> program -> executables mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    categories: IndexMap<String, Category>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an empty category if it is not already present.
    pub fn add_category(&mut self, name: impl Into<String>) -> &mut Category {
        self.categories.entry(name.into()).or_default()
    }

    /// Inserts or replaces a program, creating its category if needed.
    pub fn insert(
        &mut self,
        category: impl Into<String>,
        name: impl Into<String>,
        program: Program,
    ) -> Option<Program> {
        self.add_category(category).insert(name.into(), program)
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    pub fn program(&self, category: &str, name: &str) -> Option<&Program> {
        self.categories.get(category)?.get(name)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&String, &Category)> {
        self.categories.iter()
    }

    /// Every `(category, program name, program)` in display order.
    pub fn programs(&self) -> impl Iterator<Item = (&String, &String, &Program)> {
        self.categories.iter().flat_map(|(category, programs)| {
            programs
                .iter()
                .map(move |(name, program)| (category, name, program))
        })
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn program_count(&self) -> usize {
        self.categories.values().map(|c| c.len()).sum()
    }

    /// Checks the invariants serde cannot express: process lists are
    /// non-empty and hold no blank names.
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (category, name, program) in self.programs() {
            if program.processes.is_empty() {
                return Err(format!("{} / {} has no processes", category, name));
            }
            if program.processes.iter().any(|p| p.trim().is_empty()) {
                return Err(format!("{} / {} has an empty process name", category, name));
            }
        }
        Ok(())
    }
}

/// Scan-path template as stored in `programs_default_paths.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanPathTemplate {
    pub paths: Vec<String>,
}
