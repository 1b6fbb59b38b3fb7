use super::CatalogStore;
use crate::config::ProgmanPaths;
use crate::error::{ProgmanError, Result};
use crate::model::{Catalog, ScanPathTemplate};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

pub struct FileStore {
    user_catalog: PathBuf,
    template: PathBuf,
    scan_paths: PathBuf,
}

impl FileStore {
    pub fn new(paths: &ProgmanPaths) -> Self {
        Self {
            user_catalog: paths.user_catalog.clone(),
            template: paths.template.clone(),
            scan_paths: paths.scan_paths.clone(),
        }
    }
}

impl CatalogStore for FileStore {
    fn load_catalog(&self) -> Result<Catalog> {
        load(&self.user_catalog, &self.template)
    }

    fn save_catalog(&mut self, catalog: &Catalog) -> Result<()> {
        save(catalog, &self.user_catalog)
    }

    fn load_template(&self) -> Result<Catalog> {
        load_template(&self.template)
    }

    fn load_scan_paths(&self) -> Result<ScanPathTemplate> {
        load_scan_paths(&self.scan_paths)
    }

    fn catalog_location(&self) -> String {
        self.user_catalog.display().to_string()
    }
}

enum ReadError {
    NotFound,
    Malformed(String),
    Io(io::Error),
}

fn read_json<T: DeserializeOwned>(path: &Path) -> std::result::Result<T, ReadError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ReadError::NotFound,
        _ => ReadError::Io(e),
    })?;
    serde_json::from_str(&content).map_err(|e| ReadError::Malformed(e.to_string()))
}

fn read_catalog(path: &Path) -> std::result::Result<Catalog, ReadError> {
    let catalog: Catalog = read_json(path)?;
    catalog.validate().map_err(ReadError::Malformed)?;
    Ok(catalog)
}

/// Reads `preferred` if it exists, otherwise `fallback`.
///
/// A malformed `preferred` file is an error even when `fallback` is fine.
pub fn load(preferred: &Path, fallback: &Path) -> Result<Catalog> {
    let source = if preferred.exists() {
        preferred
    } else {
        fallback
    };

    let catalog = read_catalog(source).map_err(|e| match e {
        ReadError::NotFound => ProgmanError::ConfigNotFound {
            preferred: preferred.to_path_buf(),
            fallback: fallback.to_path_buf(),
        },
        ReadError::Malformed(reason) => ProgmanError::ConfigMalformed {
            path: source.to_path_buf(),
            reason,
        },
        ReadError::Io(e) => ProgmanError::Io(e),
    })?;

    info!(
        "Loaded {} programs from {} categories ({})",
        catalog.program_count(),
        catalog.category_count(),
        source.display()
    );
    Ok(catalog)
}

/// Replaces `path` with the pretty-printed catalog.
///
/// The JSON goes to a temporary sibling first and is renamed into place.
pub fn save(catalog: &Catalog, path: &Path) -> Result<()> {
    let write_error = |source: io::Error| ProgmanError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(write_error)?;
    }

    let content = serde_json::to_string_pretty(catalog).map_err(ProgmanError::Serialization)?;
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_error)?;
    tmp.write_all(content.as_bytes()).map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;
    tmp.persist(path).map_err(|e| write_error(e.error))?;

    info!(
        "Saved {} programs to {}",
        catalog.program_count(),
        path.display()
    );
    Ok(())
}

pub fn load_template(path: &Path) -> Result<Catalog> {
    let catalog = read_catalog(path).map_err(|e| match e {
        ReadError::NotFound => ProgmanError::CatalogTemplateNotFound(path.to_path_buf()),
        ReadError::Malformed(reason) => ProgmanError::CatalogTemplateMalformed {
            path: path.to_path_buf(),
            reason,
        },
        ReadError::Io(e) => ProgmanError::Io(e),
    })?;
    debug!("Loaded template from {}", path.display());
    Ok(catalog)
}

pub fn load_scan_paths(path: &Path) -> Result<ScanPathTemplate> {
    let template: ScanPathTemplate = read_json(path).map_err(|e| match e {
        ReadError::NotFound => ProgmanError::PathTemplateNotFound(path.to_path_buf()),
        ReadError::Malformed(reason) => ProgmanError::PathTemplateMalformed {
            path: path.to_path_buf(),
            reason,
        },
        ReadError::Io(e) => ProgmanError::Io(e),
    })?;
    debug!(
        "Loaded {} paths from {}",
        template.paths.len(),
        path.display()
    );
    Ok(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Program;
    use tempfile::tempdir;

    const TEMPLATE: &str = r#"{"Browsers":{"Chrome":{"processes":["chrome.exe"]}}}"#;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(
            "Gaming",
            "Steam",
            Program::new(["steam.exe", "steamwebhelper.exe"]).with_path("/apps/steam.exe"),
        );
        catalog.insert("Gaming", "Epic", Program::new(["EpicGamesLauncher.exe"]));
        catalog.insert("Chat", "Discord", Program::new(["Discord.exe"]));
        catalog.add_category("Empty");
        catalog
    }

    #[test]
    fn falls_back_to_template_when_user_file_is_absent() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("programs.json");
        fs::write(&template, TEMPLATE).unwrap();

        let catalog = load(&dir.path().join("programs_db_me.json"), &template).unwrap();
        let expected: Catalog = serde_json::from_str(TEMPLATE).unwrap();
        assert_eq!(catalog, expected);
    }

    #[test]
    fn prefers_user_file() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("programs.json");
        let user = dir.path().join("programs_db_me.json");
        fs::write(&template, TEMPLATE).unwrap();
        fs::write(&user, r#"{"Chat":{"Discord":{"processes":["Discord.exe"]}}}"#).unwrap();

        let catalog = load(&user, &template).unwrap();
        assert!(catalog.category("Chat").is_some());
        assert!(catalog.category("Browsers").is_none());
    }

    #[test]
    fn malformed_user_file_fails_even_with_valid_template() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("programs.json");
        let user = dir.path().join("programs_db_me.json");
        fs::write(&template, TEMPLATE).unwrap();
        fs::write(&user, "{ not json").unwrap();

        let err = load(&user, &template).unwrap_err();
        assert!(matches!(err, ProgmanError::ConfigMalformed { path, .. } if path == user));
    }

    #[test]
    fn wrong_shape_is_malformed() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("programs.json");
        fs::write(&template, r#"{"Browsers":{"Chrome":{"processes":"chrome.exe"}}}"#).unwrap();

        let err = load(&dir.path().join("missing.json"), &template).unwrap_err();
        assert!(matches!(err, ProgmanError::ConfigMalformed { .. }));
    }

    #[test]
    fn empty_process_list_is_malformed() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("programs.json");
        fs::write(&template, r#"{"Browsers":{"Chrome":{"processes":[]}}}"#).unwrap();

        let err = load(&dir.path().join("missing.json"), &template).unwrap_err();
        assert!(matches!(err, ProgmanError::ConfigMalformed { .. }));
    }

    #[test]
    fn neither_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = load(&dir.path().join("a.json"), &dir.path().join("b.json")).unwrap_err();
        assert!(matches!(err, ProgmanError::ConfigNotFound { .. }));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("programs_db_me.json");
        let catalog = sample_catalog();

        save(&catalog, &path).unwrap();
        let loaded = load(&path, &dir.path().join("unused.json")).unwrap();
        assert_eq!(loaded, catalog);

        let order: Vec<_> = loaded.categories().map(|(n, _)| n.clone()).collect();
        assert_eq!(order, ["Gaming", "Chat", "Empty"]);
    }

    #[test]
    fn save_overwrites_previous_catalog() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("programs_db_me.json");
        save(&sample_catalog(), &path).unwrap();

        let mut smaller = Catalog::new();
        smaller.insert("Chat", "Discord", Program::new(["Discord.exe"]));
        save(&smaller, &path).unwrap();

        let loaded = load(&path, &path).unwrap();
        assert_eq!(loaded, smaller);
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn template_errors_are_distinct() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("programs.json");
        assert!(matches!(
            load_template(&missing),
            Err(ProgmanError::CatalogTemplateNotFound(_))
        ));

        fs::write(&missing, "[]").unwrap();
        assert!(matches!(
            load_template(&missing),
            Err(ProgmanError::CatalogTemplateMalformed { .. })
        ));
    }

    #[test]
    fn scan_path_template_errors_are_distinct() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("programs_default_paths.json");
        assert!(matches!(
            load_scan_paths(&path),
            Err(ProgmanError::PathTemplateNotFound(_))
        ));

        fs::write(&path, r#"{"roots": []}"#).unwrap();
        assert!(matches!(
            load_scan_paths(&path),
            Err(ProgmanError::PathTemplateMalformed { .. })
        ));

        fs::write(&path, r#"{"paths": ["C:\\Users\\%USERNAME%\\AppData"]}"#).unwrap();
        let template = load_scan_paths(&path).unwrap();
        assert_eq!(template.paths, vec!["C:\\Users\\%USERNAME%\\AppData"]);
    }
}
