use colored::{ColoredString, Colorize};
use console::measure_text_width;
use progman::api::{CmdMessage, ListedCategory, ListedProgram, MessageLevel, ProgramStatus};
use progman::error::ProgmanError;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::shell::MenuChoice;

const PROCESSES_WIDTH: usize = 48;

enum Row {
    Cells(Vec<String>),
    Section,
}

/// A boxed text table. Cells may carry ANSI colors; widths ignore them.
pub(super) struct Table {
    title: String,
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub(super) fn new(title: &str, headers: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub(super) fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.rows
            .push(Row::Cells(cells.into_iter().map(|c| c.to_string()).collect()));
    }

    pub(super) fn section(&mut self) {
        if matches!(self.rows.last(), Some(Row::Cells(_))) {
            self.rows.push(Row::Section);
        }
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            if let Row::Cells(cells) = row {
                for (i, cell) in cells.iter().enumerate() {
                    if let Some(w) = widths.get_mut(i) {
                        *w = (*w).max(measure_text_width(cell));
                    }
                }
            }
        }
        widths
    }

    pub(super) fn render(&self) -> String {
        let widths = self.widths();
        let rule = |left: &str, mid: &str, right: &str| {
            let parts: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{}{}{}", left, parts.join(mid), right)
        };
        let line = |cells: &[String]| {
            let parts: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or("");
                    let padding = w.saturating_sub(measure_text_width(cell));
                    format!(" {}{} ", cell, " ".repeat(padding))
                })
                .collect();
            format!("│{}│", parts.join("│"))
        };

        let total = measure_text_width(&rule("┌", "┬", "┐"));
        let mut out = Vec::new();
        let title_pad = total.saturating_sub(self.title.width()) / 2;
        out.push(format!("{}{}", " ".repeat(title_pad), self.title.bold()));
        out.push(rule("┌", "┬", "┐"));
        let headers: Vec<String> = self.headers.iter().map(|h| h.bold().to_string()).collect();
        out.push(line(&headers));
        out.push(rule("├", "┼", "┤"));
        for row in &self.rows {
            match row {
                Row::Cells(cells) => out.push(line(cells)),
                Row::Section => out.push(rule("├", "┼", "┤")),
            }
        }
        out.push(rule("└", "┴", "┘"));
        out.join("\n")
    }
}

pub(super) fn print_banner() {
    println!();
    println!("{}", "  Program Manager".bold().cyan());
    println!();
}

pub(super) fn print_farewell() {
    println!();
    println!("{}", "  See you soon!".bold().cyan());
}

pub(super) fn print_menu() {
    let mut table = Table::new("Main Menu", &["Option", "Description"]);
    for choice in MenuChoice::ALL {
        table.row([
            choice.key().cyan().to_string(),
            choice.description().magenta().to_string(),
        ]);
    }
    println!("{}", table.render());
}

pub(super) fn print_help() {
    println!();
    for choice in MenuChoice::ALL {
        println!(
            " {} {}",
            format!("{}. {}:", choice.key(), choice.description()).magenta(),
            choice.help()
        );
    }
    println!();
    println!(
        "{}",
        " > Selections accept comma-separated numbers and ranges, e.g. 1, 3-5.".yellow()
    );
    println!();
}

pub(super) fn program_table(programs: &[ListedProgram]) -> Table {
    let mut table = Table::new(
        "Programs",
        &["Option", "Category", "Program", "Processes", "Status"],
    );

    let mut last_category: Option<&str> = None;
    for program in programs {
        if last_category.is_some_and(|c| c != program.category) {
            table.section();
        }
        last_category = Some(&program.category);
        table.row(program_cells(
            program.index.to_string(),
            &program.category,
            program,
        ));
    }
    table.section();
    table.row(back_row());
    table
}

pub(super) fn category_table(categories: &[ListedCategory]) -> Table {
    let mut table = Table::new(
        "Program Categories",
        &["Option", "Category", "Program", "Processes", "Status"],
    );

    for category in categories {
        if category.programs.is_empty() {
            table.row([
                category.index.to_string().cyan().to_string(),
                category.name.yellow().to_string(),
                "(no programs)".dimmed().to_string(),
                String::new(),
                String::new(),
            ]);
        }
        for (i, program) in category.programs.iter().enumerate() {
            let (option, name) = if i == 0 {
                (category.index.to_string(), category.name.as_str())
            } else {
                (String::new(), "")
            };
            table.row(program_cells(option, name, program));
        }
        table.section();
    }
    table.row(back_row());
    table
}

fn program_cells(option: String, category: &str, program: &ListedProgram) -> [String; 5] {
    [
        option.cyan().to_string(),
        category.yellow().to_string(),
        program.name.magenta().to_string(),
        truncate_to_width(&program.processes.join(", "), PROCESSES_WIDTH)
            .blue()
            .to_string(),
        status_label(program.status).to_string(),
    ]
}

fn back_row() -> [String; 5] {
    [
        "0".cyan().to_string(),
        "Back to Main Menu".to_string(),
        String::new(),
        String::new(),
        String::new(),
    ]
}

fn status_label(status: ProgramStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        ProgramStatus::Running => label.green().bold(),
        ProgramStatus::Offline => label.red().bold(),
        ProgramStatus::Unknown => label.yellow().bold(),
    }
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_error(error: &ProgmanError) {
    println!("{}", format!("! Error: {}", error).red());
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listed(index: usize, category: &str, name: &str, status: ProgramStatus) -> ListedProgram {
        ListedProgram {
            index,
            category: category.to_string(),
            name: name.to_string(),
            processes: vec![format!("{}.exe", name.to_lowercase())],
            status,
        }
    }

    #[test]
    fn rows_line_up_despite_colors() {
        let table = program_table(&[
            listed(1, "Browsers", "Chrome", ProgramStatus::Running),
            listed(2, "Gaming", "Steam", ProgramStatus::Offline),
        ]);
        let rendered = table.render();
        let widths: Vec<usize> = rendered
            .lines()
            .skip(1)
            .map(measure_text_width)
            .collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn categories_get_their_own_sections() {
        let rendered = program_table(&[
            listed(1, "Browsers", "Chrome", ProgramStatus::Running),
            listed(2, "Browsers", "Firefox", ProgramStatus::Offline),
            listed(3, "Gaming", "Steam", ProgramStatus::Unknown),
        ])
        .render();
        // header rule, category break, rule before "Back"
        assert_eq!(rendered.matches('├').count(), 3);
        assert!(rendered.contains("Back to Main Menu"));
        assert!(rendered.contains("Unknown"));
    }

    #[test]
    fn category_option_only_on_first_program() {
        let rendered = category_table(&[ListedCategory {
            index: 1,
            name: "Browsers".to_string(),
            programs: vec![
                listed(1, "Browsers", "Chrome", ProgramStatus::Offline),
                listed(1, "Browsers", "Firefox", ProgramStatus::Offline),
            ],
        }])
        .render();
        assert_eq!(rendered.matches("Browsers").count(), 1);
    }

    #[test]
    fn truncates_long_text() {
        assert_eq!(truncate_to_width("short", 10), "short");
        let cut = truncate_to_width("a.exe, b.exe, c.exe", 8);
        assert_eq!(cut.width(), 8);
        assert!(cut.ends_with('…'));
    }
}
