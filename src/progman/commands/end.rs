use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::{CategoryIndex, ProgramIndex};
use crate::probe::ProcessProbe;
use tracing::debug;

use super::helpers::{end_program, report_outcomes, report_unknown};

/// Ends every selected program that is running. Each program is handled on
/// its own; a failure is reported and the rest still run.
pub fn programs<P: ProcessProbe>(
    probe: &P,
    index: &ProgramIndex,
    selection: &[usize],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    report_unknown(&mut result, selection, index.len());

    let outcomes = index
        .select(selection)
        .into_iter()
        .filter_map(|entry| end_program(probe, &entry.category, &entry.name, &entry.program))
        .collect();

    report_outcomes(&mut result, outcomes);
    Ok(result)
}

/// Ends the running programs of every selected category.
pub fn categories<P: ProcessProbe>(
    probe: &P,
    index: &CategoryIndex,
    selection: &[usize],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    report_unknown(&mut result, selection, index.len());

    let mut outcomes = Vec::new();
    for entry in index.select(selection) {
        debug!("> Ending category: {}", entry.name);
        outcomes.extend(
            entry
                .programs
                .iter()
                .filter_map(|(name, program)| end_program(probe, &entry.name, name, program)),
        );
    }

    report_outcomes(&mut result, outcomes);
    Ok(result)
}
