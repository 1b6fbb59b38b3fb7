use crate::commands::{CmdMessage, CmdResult, ProgramOutcome, ProgramStatus};
use crate::model::Program;
use crate::probe::ProcessProbe;
use tracing::{debug, error};

pub fn program_status<P: ProcessProbe>(probe: &P, name: &str, program: &Program) -> ProgramStatus {
    match probe.is_running(&program.processes) {
        Ok(true) => ProgramStatus::Running,
        Ok(false) => ProgramStatus::Offline,
        Err(e) => {
            error!("Error checking status for {}: {}", name, e);
            ProgramStatus::Unknown
        }
    }
}

/// Ends the running processes of one program.
///
/// Returns `None` when nothing of the program is running.
pub fn end_program<P: ProcessProbe>(
    probe: &P,
    category: &str,
    name: &str,
    program: &Program,
) -> Option<ProgramOutcome> {
    let mut outcome = ProgramOutcome {
        category: category.to_string(),
        program: name.to_string(),
        ended: Vec::new(),
        failures: Vec::new(),
    };

    let running = match probe.running(&program.processes) {
        Ok(running) if running.is_empty() => return None,
        Ok(running) => running,
        Err(e) => {
            error!("Error ending program {}: {}", name, e);
            outcome.failures.push(e.to_string());
            return Some(outcome);
        }
    };

    debug!("> Ending program: {}", name);
    for termination in probe.terminate(&running) {
        match termination.outcome {
            Ok(()) => outcome.ended.push(termination.process),
            Err(e) => outcome.failures.push(e.to_string()),
        }
    }
    Some(outcome)
}

/// Turns outcomes into the per-program report lines. A program can get both
/// a success and an error line when only some of its processes ended.
pub fn report_outcomes(result: &mut CmdResult, outcomes: Vec<ProgramOutcome>) {
    for outcome in &outcomes {
        if outcome.is_success() {
            result.add_message(CmdMessage::success(format!(
                "✓ Successfully ended process {}",
                outcome.program
            )));
            continue;
        }
        if !outcome.ended.is_empty() {
            result.add_message(CmdMessage::success(format!(
                "✓ Ended {} of process {}",
                outcome.ended.join(", "),
                outcome.program
            )));
        }
        result.add_message(CmdMessage::error(format!(
            "✗ Could not end process {} ({})",
            outcome.program,
            outcome.failures.join("; ")
        )));
    }

    if outcomes.is_empty() {
        result.add_message(CmdMessage::warning(
            "! No viable options were selected or no running programs were found.",
        ));
    }
    result.outcomes = outcomes;
}

pub fn report_unknown(result: &mut CmdResult, selection: &[usize], known: usize) {
    let unknown: Vec<String> = selection
        .iter()
        .filter(|i| **i > known)
        .map(|i| i.to_string())
        .collect();
    if !unknown.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "! Ignored unknown option(s): {}",
            unknown.join(", ")
        )));
    }
}
