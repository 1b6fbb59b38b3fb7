use colored::Colorize;
use progman::api::ProgmanApi;
use progman::index::{CategoryIndex, ProgramIndex};
use progman::model::Catalog;
use progman::probe::ProcessProbe;
use progman::store::CatalogStore;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing::{debug, error, info};

use super::print::{
    category_table, print_banner, print_error, print_farewell, print_help, print_menu,
    print_messages, program_table,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    EndPrograms,
    EndCategories,
    ListPrograms,
    Scan,
    Help,
    Exit,
}

impl MenuChoice {
    /// Menu order
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::EndPrograms,
        MenuChoice::EndCategories,
        MenuChoice::ListPrograms,
        MenuChoice::Scan,
        MenuChoice::Help,
        MenuChoice::Exit,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            MenuChoice::EndPrograms => "1",
            MenuChoice::EndCategories => "2",
            MenuChoice::ListPrograms => "3",
            MenuChoice::Scan => "4",
            MenuChoice::Help => "5",
            MenuChoice::Exit => "0",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MenuChoice::EndPrograms => "End program(s)",
            MenuChoice::EndCategories => "End program category(s)",
            MenuChoice::ListPrograms => "List programs by category",
            MenuChoice::Scan => "Scan programs on local machine",
            MenuChoice::Help => "Help",
            MenuChoice::Exit => "Exit",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            MenuChoice::EndPrograms => {
                "Terminate individual programs by selecting them from the list."
            }
            MenuChoice::EndCategories => "Terminate all programs within a selected category.",
            MenuChoice::ListPrograms => "View all programs organized by their categories.",
            MenuChoice::Scan => {
                "Scan the system for installed programs and update the configuration."
            }
            MenuChoice::Help => "Display this help section.",
            MenuChoice::Exit => "Close the Program Manager.",
        }
    }
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        MenuChoice::ALL
            .into_iter()
            .find(|choice| choice.key() == s)
            .ok_or_else(|| format!("Invalid option: {}", s))
    }
}

/// The interactive menu loop. Owns the working catalog and reads answers
/// from `input`; end of input leaves the session.
pub struct Shell<S: CatalogStore, P: ProcessProbe, R: BufRead> {
    api: ProgmanApi<S, P>,
    catalog: Catalog,
    input: R,
}

impl<S: CatalogStore, P: ProcessProbe, R: BufRead> Shell<S, P, R> {
    pub fn new(api: ProgmanApi<S, P>, catalog: Catalog, input: R) -> Self {
        Self {
            api,
            catalog,
            input,
        }
    }

    pub fn run(&mut self) {
        info!("Program Manager started");
        print_banner();

        loop {
            print_menu();
            println!();
            let Some(choice) = self.prompt_choice() else {
                info!("Input closed, leaving");
                break;
            };
            debug!("User chose option: {:?}", choice);

            match choice {
                MenuChoice::EndPrograms => self.end_programs(),
                MenuChoice::EndCategories => self.end_categories(),
                MenuChoice::ListPrograms => {
                    self.list_programs();
                }
                MenuChoice::Scan => self.scan(),
                MenuChoice::Help => print_help(),
                MenuChoice::Exit => break,
            }
        }

        print_farewell();
        info!("Program Manager finished");
    }

    /// `None` once input is exhausted or unreadable.
    fn prompt(&mut self, question: &str) -> Option<String> {
        print!("{} ", question.cyan());
        let _ = io::stdout().flush();

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) => {
                println!();
                None
            }
            Ok(_) => Some(answer.trim().to_string()),
            Err(e) => {
                error!("Failed to read input: {}", e);
                None
            }
        }
    }

    fn prompt_choice(&mut self) -> Option<MenuChoice> {
        loop {
            let answer = self.prompt(" ? Choose an option [1/2/3/4/5/0]:")?;
            match answer.parse() {
                Ok(choice) => return Some(choice),
                Err(_) => println!("{}", "Please select one of the available options".red()),
            }
        }
    }

    fn list_programs(&self) -> ProgramIndex {
        let index = ProgramIndex::build(&self.catalog);
        match self.api.list_programs(&index) {
            Ok(result) => {
                println!("{}", program_table(&result.listed_programs).render());
                print_messages(&result.messages);
            }
            Err(e) => print_error(&e),
        }
        println!();
        index
    }

    fn end_programs(&mut self) {
        loop {
            let index = self.list_programs();
            let Some(answer) =
                self.prompt("? Enter program numbers to end (comma-separated) or 0 to return:")
            else {
                return;
            };
            if answer == "0" {
                println!();
                return;
            }

            println!();
            match self.api.end_programs(&index, &answer) {
                Ok(result) => print_messages(&result.messages),
                Err(e) => print_error(&e),
            }
        }
    }

    fn end_categories(&mut self) {
        loop {
            let index = CategoryIndex::build(&self.catalog);
            match self.api.list_categories(&index) {
                Ok(result) => {
                    println!("{}", category_table(&result.listed_categories).render());
                    print_messages(&result.messages);
                }
                Err(e) => print_error(&e),
            }
            println!();

            let Some(answer) =
                self.prompt("? Enter category numbers to end (comma-separated) or 0 to return:")
            else {
                return;
            };
            if answer == "0" {
                println!();
                return;
            }

            println!();
            match self.api.end_categories(&index, &answer) {
                Ok(result) => print_messages(&result.messages),
                Err(e) => print_error(&e),
            }
        }
    }

    fn scan(&mut self) {
        println!();
        println!("{}", " > Scanning for programs...".cyan());

        match self.api.scan() {
            Ok(result) => {
                if let Some(catalog) = result.catalog {
                    self.catalog = catalog;
                }
                print_messages(&result.messages);
            }
            Err(e) => {
                error!("Scan failed: {}", e);
                print_error(&e);
            }
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_menu_key() {
        for choice in MenuChoice::ALL {
            assert_eq!(choice.key().parse::<MenuChoice>(), Ok(choice));
        }
        assert_eq!(" 4 ".parse::<MenuChoice>(), Ok(MenuChoice::Scan));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!("6".parse::<MenuChoice>().is_err());
        assert!("scan".parse::<MenuChoice>().is_err());
        assert!("".parse::<MenuChoice>().is_err());
    }
}
