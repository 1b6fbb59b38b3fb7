use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::scan::{resolve_scan_paths, Scanner};
use crate::store::CatalogStore;
use tracing::info;

/// Rescans the machine, replaces the per-user catalog and returns the
/// reloaded catalog.
///
/// Template problems abort before anything is written.
pub fn run<S: CatalogStore>(store: &mut S, scanner: &Scanner, username: &str) -> Result<CmdResult> {
    info!("Starting program scan");

    let scan_paths = resolve_scan_paths(&store.load_scan_paths()?, username);
    let template = store.load_template()?;

    let report = scanner.scan(&template, &scan_paths);
    store.save_catalog(&report.catalog)?;
    let catalog = store.load_catalog()?;

    let mut result = CmdResult::default().with_catalog(catalog);
    result.matched = Some(report.matched);
    result.add_message(CmdMessage::success(format!(
        "> Scan complete. {} programs found and saved to {}",
        report.matched,
        store.catalog_location()
    )));
    info!("Program scan completed");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProgmanError;
    use crate::store::memory::fixtures::sample_catalog;
    use crate::store::memory::InMemoryStore;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn replaces_user_catalog_with_scan_results() {
        let dir = tempdir().unwrap();
        let home = dir.path().join("alice");
        fs::create_dir_all(home.join("Steam")).unwrap();
        fs::write(home.join("Steam").join("steam.exe"), b"").unwrap();

        let pattern = dir.path().join("%USERNAME%").display().to_string();
        let mut store = InMemoryStore::new()
            .with_template(sample_catalog())
            .with_user_catalog(sample_catalog())
            .with_scan_paths([pattern]);

        let result = run(&mut store, &Scanner::default(), "alice").unwrap();

        assert_eq!(result.matched, Some(1));
        assert_eq!(store.saves, 1);
        let catalog = result.catalog.unwrap();
        assert_eq!(catalog.program_count(), 1);
        assert_eq!(
            catalog.program("Gaming", "Steam").unwrap().path.as_deref(),
            Some(home.join("Steam").join("steam.exe").as_path())
        );
        assert_eq!(store.user_catalog, Some(catalog));
    }

    #[test]
    fn missing_scan_paths_abort_without_saving() {
        let mut store = InMemoryStore::new().with_template(sample_catalog());
        let err = run(&mut store, &Scanner::default(), "alice").unwrap_err();
        assert!(matches!(err, ProgmanError::PathTemplateNotFound(_)));
        assert_eq!(store.saves, 0);
    }

    #[test]
    fn missing_template_aborts_without_saving() {
        let mut store = InMemoryStore::new().with_scan_paths(["/nowhere"]);
        let err = run(&mut store, &Scanner::default(), "alice").unwrap_err();
        assert!(matches!(err, ProgmanError::CatalogTemplateNotFound(_)));
        assert_eq!(store.saves, 0);
    }

    #[test]
    fn empty_scan_still_saves_categories() {
        let dir = tempdir().unwrap();
        let mut store = InMemoryStore::new()
            .with_template(sample_catalog())
            .with_scan_paths([dir.path().display().to_string()]);

        let result = run(&mut store, &Scanner::default(), "alice").unwrap();
        assert_eq!(result.matched, Some(0));
        let catalog = result.catalog.unwrap();
        assert_eq!(catalog.category_count(), 2);
        assert_eq!(catalog.program_count(), 0);
    }
}
