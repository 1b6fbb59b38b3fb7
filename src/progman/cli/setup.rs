use clap::Parser;
use directories::ProjectDirs;
use progman::error::{ProgmanError, Result};
use std::path::PathBuf;

const HOME_ENV: &str = "PROGMAN_HOME";

#[derive(Parser, Debug)]
#[command(name = "progman", bin_name = "progman", version)]
#[command(
    about = "List, scan and end catalogued programs from a terminal menu",
    long_about = None
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// `$PROGMAN_HOME`, or the platform data directory.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "progman", "progman")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ProgmanError::Api("Could not determine data directory".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn debug_flag_is_optional() {
        assert!(!Cli::try_parse_from(["progman"]).unwrap().debug);
        assert!(Cli::try_parse_from(["progman", "--debug"]).unwrap().debug);
        assert!(Cli::try_parse_from(["progman", "--global"]).is_err());
    }
}
