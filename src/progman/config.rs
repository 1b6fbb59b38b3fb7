use crate::error::{ProgmanError, Result};
use crate::probe::MatchMode;
use crate::scan::DEFAULT_EXECUTABLE_EXT;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const TEMPLATE_FILENAME: &str = "programs.json";
const SCAN_PATHS_FILENAME: &str = "programs_default_paths.json";
const LOG_FILENAME: &str = "progman.log";
const FALLBACK_USERNAME: &str = "user";

/// Configuration for progman, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProgmanConfig {
    /// How process names are compared against the OS process listing
    #[serde(default)]
    pub match_mode: MatchMode,

    /// Extensions a file must carry to be considered during a scan (e.g. ".exe")
    #[serde(default = "default_executable_extensions")]
    pub executable_extensions: Vec<String>,

    /// Overrides the shared catalog template location
    #[serde(default)]
    pub template_file: Option<PathBuf>,

    /// Overrides the scan-path template location
    #[serde(default)]
    pub scan_paths_file: Option<PathBuf>,
}

fn default_executable_extensions() -> Vec<String> {
    vec![DEFAULT_EXECUTABLE_EXT.to_string()]
}

impl Default for ProgmanConfig {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::default(),
            executable_extensions: default_executable_extensions(),
            template_file: None,
            scan_paths_file: None,
        }
    }
}

impl ProgmanConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ProgmanError::Io)?;
        let mut config: ProgmanConfig =
            serde_json::from_str(&content).map_err(ProgmanError::Serialization)?;
        let extensions = std::mem::take(&mut config.executable_extensions);
        config.set_executable_extensions(extensions);
        Ok(config)
    }

    /// Set the executable extensions (normalizes each to start with a dot)
    pub fn set_executable_extensions<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.executable_extensions = extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.as_ref();
                if ext.starts_with('.') {
                    ext.to_string()
                } else {
                    format!(".{}", ext)
                }
            })
            .collect();
    }
}

/// Every file location a session touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgmanPaths {
    pub data_dir: PathBuf,
    pub template: PathBuf,
    pub scan_paths: PathBuf,
    pub user_catalog: PathBuf,
    pub log_file: PathBuf,
}

impl ProgmanPaths {
    /// Lays out the files under `data_dir`, honoring the template overrides
    /// in `config`. Relative overrides resolve against `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>, username: &str, config: &ProgmanConfig) -> Self {
        let data_dir = data_dir.into();
        let resolve = |custom: &Option<PathBuf>, default: &str| match custom {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => data_dir.join(path),
            None => data_dir.join(default),
        };

        Self {
            template: resolve(&config.template_file, TEMPLATE_FILENAME),
            scan_paths: resolve(&config.scan_paths_file, SCAN_PATHS_FILENAME),
            user_catalog: data_dir.join(format!("programs_db_{}.json", username)),
            log_file: data_dir.join(LOG_FILENAME),
            data_dir,
        }
    }
}

/// The login name used for the per-user catalog and `%USERNAME%` expansion.
pub fn current_username() -> String {
    ["USERNAME", "USER"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|name| name.trim().to_string())
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_USERNAME.to_string())
}
