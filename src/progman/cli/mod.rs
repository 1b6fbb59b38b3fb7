mod logging;
mod print;
mod setup;
mod shell;

use clap::Parser;
use progman::api::ProgmanApi;
use progman::config::{current_username, ProgmanConfig, ProgmanPaths};
use progman::error::Result;
use progman::probe::system::SystemProbe;
use progman::scan::Scanner;
use progman::store::fs::FileStore;
use tracing::{debug, error, warn};

use setup::{data_dir, Cli};
use shell::Shell;

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = data_dir()?;
    let username = current_username();
    let config = ProgmanConfig::load(&data_dir);
    let paths = ProgmanPaths::new(
        &data_dir,
        &username,
        config.as_ref().unwrap_or(&ProgmanConfig::default()),
    );

    if let Err(e) = logging::init(&paths.log_file, cli.debug) {
        eprintln!("Warning: logging disabled ({}): {}", paths.log_file.display(), e);
    }
    let config = config.unwrap_or_else(|e| {
        warn!("Ignoring unreadable config in {}: {}", data_dir.display(), e);
        ProgmanConfig::default()
    });
    debug!("Data directory: {}", data_dir.display());

    let store = FileStore::new(&paths);
    let probe = SystemProbe::new(config.match_mode);
    let api = ProgmanApi::new(store, probe, username)
        .with_scanner(Scanner::new(&config.executable_extensions));

    let catalog = api.load_catalog().inspect_err(|e| error!("{}", e))?;

    let stdin = std::io::stdin();
    Shell::new(api, catalog, stdin.lock()).run();
    Ok(())
}
