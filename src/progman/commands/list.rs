use crate::commands::{CmdMessage, CmdResult, ListedCategory, ListedProgram};
use crate::error::Result;
use crate::index::{CategoryIndex, ProgramIndex};
use crate::probe::ProcessProbe;

use super::helpers::program_status;

pub fn programs<P: ProcessProbe>(probe: &P, index: &ProgramIndex) -> Result<CmdResult> {
    let listed = index
        .entries()
        .iter()
        .map(|entry| ListedProgram {
            index: entry.index,
            category: entry.category.clone(),
            name: entry.name.clone(),
            processes: entry.program.processes.clone(),
            status: program_status(probe, &entry.name, &entry.program),
        })
        .collect();

    let mut result = CmdResult::default().with_listed_programs(listed);
    if index.is_empty() {
        result.add_message(CmdMessage::info("No programs found."));
    }
    Ok(result)
}

pub fn categories<P: ProcessProbe>(probe: &P, index: &CategoryIndex) -> Result<CmdResult> {
    let listed = index
        .entries()
        .iter()
        .map(|entry| ListedCategory {
            index: entry.index,
            name: entry.name.clone(),
            programs: entry
                .programs
                .iter()
                .map(|(name, program)| ListedProgram {
                    index: entry.index,
                    category: entry.name.clone(),
                    name: name.clone(),
                    processes: program.processes.clone(),
                    status: program_status(probe, name, program),
                })
                .collect(),
        })
        .collect();

    let mut result = CmdResult::default().with_listed_categories(listed);
    if index.is_empty() {
        result.add_message(CmdMessage::info("No categories found."));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ProgramStatus;
    use crate::probe::fake::FakeProbe;
    use crate::store::memory::fixtures::sample_catalog;

    #[test]
    fn reports_status_per_program() {
        let probe = FakeProbe::new().with_running(["steamwebhelper.exe"]);
        let index = ProgramIndex::build(&sample_catalog());

        let result = programs(&probe, &index).unwrap();
        let statuses: Vec<_> = result
            .listed_programs
            .iter()
            .map(|p| (p.name.as_str(), p.status))
            .collect();
        assert_eq!(
            statuses,
            [
                ("Chrome", ProgramStatus::Offline),
                ("Firefox", ProgramStatus::Offline),
                ("Steam", ProgramStatus::Running),
            ]
        );
    }

    #[test]
    fn probe_failure_shows_unknown() {
        let probe = FakeProbe::new().broken("ps not found");
        let index = ProgramIndex::build(&sample_catalog());

        let result = programs(&probe, &index).unwrap();
        assert!(result
            .listed_programs
            .iter()
            .all(|p| p.status == ProgramStatus::Unknown));
    }

    #[test]
    fn groups_programs_by_category() {
        let probe = FakeProbe::new().with_running(["chrome.exe"]);
        let index = CategoryIndex::build(&sample_catalog());

        let result = categories(&probe, &index).unwrap();
        assert_eq!(result.listed_categories.len(), 2);
        let browsers = &result.listed_categories[0];
        assert_eq!(browsers.index, 1);
        assert_eq!(browsers.programs.len(), 2);
        assert_eq!(browsers.programs[0].status, ProgramStatus::Running);
    }

    #[test]
    fn empty_catalog_says_so() {
        let probe = FakeProbe::new();
        let result = programs(&probe, &ProgramIndex::default()).unwrap();
        assert!(result.listed_programs.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
