use super::{ProcessProbe, Termination};
use crate::error::{ProgmanError, Result};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// Scripted probe: a set of running names, optional refusals, optional
/// listing failure. Successful terminations remove the name.
#[derive(Debug, Default)]
pub struct FakeProbe {
    running: RefCell<HashSet<String>>,
    refusals: HashMap<String, String>,
    listing_error: Option<String>,
    pub terminated: RefCell<Vec<String>>,
}

impl FakeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_running<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.running
            .borrow_mut()
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Termination of `name` fails with `reason`.
    pub fn refusing(mut self, name: &str, reason: &str) -> Self {
        self.refusals.insert(name.to_string(), reason.to_string());
        self
    }

    /// Every status query fails.
    pub fn broken(mut self, reason: &str) -> Self {
        self.listing_error = Some(reason.to_string());
        self
    }

    pub fn is_alive(&self, name: &str) -> bool {
        self.running.borrow().contains(name)
    }
}

impl ProcessProbe for FakeProbe {
    fn running(&self, process_names: &[String]) -> Result<Vec<String>> {
        if let Some(reason) = &self.listing_error {
            return Err(ProgmanError::ProbeFailure(reason.clone()));
        }
        let running = self.running.borrow();
        Ok(process_names
            .iter()
            .filter(|p| running.contains(p.as_str()))
            .cloned()
            .collect())
    }

    fn terminate(&self, process_names: &[String]) -> Vec<Termination> {
        process_names
            .iter()
            .map(|p| {
                self.terminated.borrow_mut().push(p.clone());
                match self.refusals.get(p) {
                    Some(reason) => Termination::failed(p.as_str(), reason.as_str()),
                    None => {
                        self.running.borrow_mut().remove(p);
                        Termination::ended(p.as_str())
                    }
                }
            })
            .collect()
    }
}
