//! # Process Probe
//!
//! Answers "is any of these executables running?" and ends executables by
//! name. [`system::SystemProbe`] shells out to the OS tools (`tasklist` /
//! `taskkill` on Windows, `ps` / `pkill` elsewhere); tests use
//! [`fake::FakeProbe`].
//!
//! Names are compared against the listing according to [`MatchMode`]. The
//! default is an exact, case-insensitive comparison of image names, so
//! `notepad.exe` does not match a running `notepad.exe.bak`.
//!
//! On Linux the kernel keeps only the first 15 bytes of a process name, and
//! both `ps -o comm=` and `pkill -x` see that short form. Names are cut the
//! same way before they are compared or killed there, so
//! `steamwebhelper.exe` is found as `steamwebhelper.`. Two names that share
//! those 15 bytes cannot be told apart.

use crate::error::{ProgmanError, Result};
use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "test_utils"))]
pub mod fake;
pub mod system;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Listed image name equals the process name, ignoring case
    #[default]
    Exact,
    /// Process name occurs anywhere in the raw listing, ignoring case
    Substring,
}

/// Outcome of one termination attempt.
#[derive(Debug)]
pub struct Termination {
    pub process: String,
    pub outcome: Result<()>,
}

impl Termination {
    pub fn ended(process: impl Into<String>) -> Self {
        Self {
            process: process.into(),
            outcome: Ok(()),
        }
    }

    pub fn failed(process: impl Into<String>, reason: impl Into<String>) -> Self {
        let process = process.into();
        Self {
            outcome: Err(ProgmanError::TerminationFailure {
                process: process.clone(),
                reason: reason.into(),
            }),
            process,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

pub trait ProcessProbe {
    /// The subset of `process_names` currently running, in input order
    fn running(&self, process_names: &[String]) -> Result<Vec<String>>;

    /// Whether any of `process_names` is running
    fn is_running(&self, process_names: &[String]) -> Result<bool> {
        if process_names.is_empty() {
            return Ok(false);
        }
        Ok(!self.running(process_names)?.is_empty())
    }

    /// Force-ends each name once; one failure does not stop the others
    fn terminate(&self, process_names: &[String]) -> Vec<Termination>;
}

/// A snapshot of the OS process listing.
#[derive(Debug, Clone, Default)]
pub struct ProcessListing {
    raw: String,
    names: Vec<String>,
    name_limit: Option<usize>,
}

/// `name` cut to at most `limit` bytes, on a char boundary.
pub fn truncate_name(name: &str, limit: usize) -> &str {
    if name.len() <= limit {
        return name;
    }
    let mut end = limit;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

impl ProcessListing {
    /// Output of `tasklist /FO CSV /NH`: the image name is the first quoted field.
    pub fn from_tasklist_csv(raw: &str) -> Self {
        let names = raw
            .lines()
            .filter_map(|line| {
                let line = line.trim().strip_prefix('"')?;
                let end = line.find('"')?;
                Some(line[..end].to_string())
            })
            .filter(|name| !name.is_empty())
            .collect();
        Self {
            raw: raw.to_string(),
            names,
            name_limit: None,
        }
    }

    /// Output of `ps -A -o comm=`: one command per line, sometimes a full path.
    pub fn from_ps(raw: &str) -> Self {
        let names = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.rsplit('/').next().unwrap_or(line).to_string())
            .collect();
        Self {
            raw: raw.to_string(),
            names,
            name_limit: None,
        }
    }

    /// The listing shows names cut to `limit` bytes.
    pub fn with_name_limit(mut self, limit: usize) -> Self {
        self.name_limit = Some(limit);
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, process: &str, mode: MatchMode) -> bool {
        match mode {
            MatchMode::Exact => {
                let process = match self.name_limit {
                    Some(limit) => truncate_name(process, limit),
                    None => process,
                };
                self.names.iter().any(|n| n.eq_ignore_ascii_case(process))
            }
            MatchMode::Substring => self
                .raw
                .to_lowercase()
                .contains(&process.to_lowercase()),
        }
    }

    /// Names from `process_names` present in the listing, in input order
    pub fn matching(&self, process_names: &[String], mode: MatchMode) -> Vec<String> {
        process_names
            .iter()
            .filter(|p| self.contains(p, mode))
            .cloned()
            .collect()
    }
}
