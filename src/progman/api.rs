//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for the shell.
//!
//! ## The Catalog Is a Value
//!
//! `ProgmanApi` does not hold the working catalog. Callers load it with
//! [`ProgmanApi::load_catalog`], keep it, build selection tables from it, and
//! replace it with the catalog returned by [`ProgmanApi::scan`]. Nothing is
//! cached between calls, so a stale table can only come from the caller.
//!
//! ## Generic Over Store and Probe
//!
//! - Production: `ProgmanApi<FileStore, SystemProbe>`
//! - Testing: `ProgmanApi<InMemoryStore, FakeProbe>`

use crate::commands;
use crate::error::Result;
use crate::index::{parse_selection, CategoryIndex, ProgramIndex};
use crate::model::Catalog;
use crate::probe::ProcessProbe;
use crate::scan::Scanner;
use crate::store::CatalogStore;

pub struct ProgmanApi<S: CatalogStore, P: ProcessProbe> {
    store: S,
    probe: P,
    scanner: Scanner,
    username: String,
}

impl<S: CatalogStore, P: ProcessProbe> ProgmanApi<S, P> {
    pub fn new(store: S, probe: P, username: impl Into<String>) -> Self {
        Self {
            store,
            probe,
            scanner: Scanner::default(),
            username: username.into(),
        }
    }

    pub fn with_scanner(mut self, scanner: Scanner) -> Self {
        self.scanner = scanner;
        self
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        self.store.load_catalog()
    }

    pub fn list_programs(&self, index: &ProgramIndex) -> Result<commands::CmdResult> {
        commands::list::programs(&self.probe, index)
    }

    pub fn list_categories(&self, index: &CategoryIndex) -> Result<commands::CmdResult> {
        commands::list::categories(&self.probe, index)
    }

    pub fn end_programs(&self, index: &ProgramIndex, input: &str) -> Result<commands::CmdResult> {
        let selection = parse_selection(input, index.len());
        commands::end::programs(&self.probe, index, &selection)
    }

    pub fn end_categories(
        &self,
        index: &CategoryIndex,
        input: &str,
    ) -> Result<commands::CmdResult> {
        let selection = parse_selection(input, index.len());
        commands::end::categories(&self.probe, index, &selection)
    }

    pub fn scan(&mut self) -> Result<commands::CmdResult> {
        commands::scan::run(&mut self.store, &self.scanner, &self.username)
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

pub use commands::{
    CmdMessage, CmdResult, ListedCategory, ListedProgram, MessageLevel, ProgramOutcome,
    ProgramStatus,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::fake::FakeProbe;
    use crate::store::memory::fixtures::sample_catalog;
    use crate::store::memory::InMemoryStore;

    fn api(probe: FakeProbe) -> ProgmanApi<InMemoryStore, FakeProbe> {
        let store = InMemoryStore::new().with_template(sample_catalog());
        ProgmanApi::new(store, probe, "alice")
    }

    #[test]
    fn loads_template_when_no_user_catalog() {
        let api = api(FakeProbe::new());
        assert_eq!(api.load_catalog().unwrap(), sample_catalog());
    }

    #[test]
    fn end_programs_parses_the_answer() {
        let api = api(FakeProbe::new().with_running(["chrome.exe", "steam.exe"]));
        let index = ProgramIndex::build(&api.load_catalog().unwrap());

        let result = api.end_programs(&index, "1, 3").unwrap();
        assert_eq!(result.outcomes.len(), 2);
    }

    #[test]
    fn end_categories_parses_ranges() {
        let api = api(FakeProbe::new().with_running(["firefox.exe", "steam.exe"]));
        let index = CategoryIndex::build(&api.load_catalog().unwrap());

        let result = api.end_categories(&index, "1-2").unwrap();
        assert_eq!(result.outcomes.len(), 2);
    }

    #[test]
    fn oversized_range_is_clamped_and_reported() {
        let api = api(FakeProbe::new().with_running(["chrome.exe"]));
        let index = ProgramIndex::build(&api.load_catalog().unwrap());

        let result = api
            .end_programs(&index, &format!("1-{}", usize::MAX))
            .unwrap();
        assert_eq!(result.outcomes.len(), 1);
        assert!(result.messages[0].content.contains("Ignored unknown option(s): 4"));
    }

    #[test]
    fn scan_errors_surface() {
        let mut api = api(FakeProbe::new());
        assert!(api.scan().is_err());
        assert_eq!(api.username(), "alice");
    }
}
