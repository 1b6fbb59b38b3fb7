use super::{MatchMode, ProcessListing, ProcessProbe, Termination};
use crate::error::{ProgmanError, Result};
use std::process::{Command, Output};
use tracing::{debug, info, warn};

/// Bytes of a process name the Linux kernel keeps (`TASK_COMM_LEN` - 1)
pub const LINUX_COMM_LEN: usize = 15;

/// Probes the local machine through the platform's process tools.
#[derive(Debug, Clone, Default)]
pub struct SystemProbe {
    mode: MatchMode,
}

impl SystemProbe {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Takes one snapshot of the running processes.
    pub fn listing(&self) -> Result<ProcessListing> {
        let output = list_command()
            .output()
            .map_err(|e| ProgmanError::ProbeFailure(format!("could not list processes: {}", e)))?;

        if !output.status.success() {
            return Err(ProgmanError::ProbeFailure(failure_reason(&output)));
        }

        let raw = String::from_utf8_lossy(&output.stdout);
        let listing = if cfg!(windows) {
            ProcessListing::from_tasklist_csv(&raw)
        } else if cfg!(target_os = "linux") {
            ProcessListing::from_ps(&raw).with_name_limit(LINUX_COMM_LEN)
        } else {
            ProcessListing::from_ps(&raw)
        };
        debug!("Process listing has {} entries", listing.names().len());
        Ok(listing)
    }
}

impl ProcessProbe for SystemProbe {
    fn running(&self, process_names: &[String]) -> Result<Vec<String>> {
        if process_names.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.listing()?.matching(process_names, self.mode))
    }

    fn terminate(&self, process_names: &[String]) -> Vec<Termination> {
        process_names
            .iter()
            .map(|process| {
                debug!("Ending process: {}", process);
                match kill_command(process).output() {
                    Ok(output) if output.status.success() => {
                        info!("Successfully ended {}", process);
                        Termination::ended(process.as_str())
                    }
                    Ok(output) => {
                        let reason = failure_reason(&output);
                        warn!("Failed to end {}: {}", process, reason);
                        Termination::failed(process.as_str(), reason)
                    }
                    Err(e) => {
                        warn!("Failed to end {}: {}", process, e);
                        Termination::failed(process.as_str(), e.to_string())
                    }
                }
            })
            .collect()
    }
}

#[cfg(windows)]
fn list_command() -> Command {
    let mut cmd = Command::new("tasklist");
    cmd.args(["/FO", "CSV", "/NH"]);
    cmd
}

#[cfg(not(windows))]
fn list_command() -> Command {
    let mut cmd = Command::new("ps");
    cmd.args(["-A", "-o", "comm="]);
    cmd
}

#[cfg(windows)]
fn kill_command(process: &str) -> Command {
    let mut cmd = Command::new("taskkill");
    cmd.args(["/IM", process, "/F"]);
    cmd
}

#[cfg(not(windows))]
fn kill_command(process: &str) -> Command {
    let mut cmd = Command::new("pkill");
    cmd.args(["-KILL", "-x", kill_pattern(process)]);
    cmd
}

/// The name `pkill -x` can match; Linux compares against the cut name.
#[cfg(not(windows))]
fn kill_pattern(process: &str) -> &str {
    if cfg!(target_os = "linux") {
        super::truncate_name(process, LINUX_COMM_LEN)
    } else {
        process
    }
}

/// The tool's own message if it printed one, else the exit status.
fn failure_reason(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !stderr.is_empty() {
        return stderr;
    }
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !stdout.is_empty() {
        return stdout;
    }
    match output.status.code() {
        // pkill: no process matched
        Some(1) if cfg!(not(windows)) => "no matching process".to_string(),
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_queries_never_reach_the_os() {
        let probe = SystemProbe::default();
        assert!(!probe.is_running(&[]).unwrap());
        assert!(probe.running(&[]).unwrap().is_empty());
        assert!(probe.terminate(&[]).is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn long_names_are_killed_by_their_cut_form() {
        assert_eq!(kill_pattern("steamwebhelper.exe"), "steamwebhelper.");
        assert_eq!(kill_pattern("steam.exe"), "steam.exe");

        let cmd = kill_command("steamwebhelper.exe");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy()).collect();
        assert_eq!(args, ["-KILL", "-x", "steamwebhelper."]);
    }

    #[test]
    fn defaults_to_exact_matching() {
        assert_eq!(SystemProbe::default().mode(), MatchMode::Exact);
        assert_eq!(
            SystemProbe::new(MatchMode::Substring).mode(),
            MatchMode::Substring
        );
    }
}
