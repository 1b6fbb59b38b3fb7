use crate::model::Catalog;
use std::fmt;

pub mod end;
pub mod helpers;
pub mod list;
pub mod scan;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramStatus {
    Running,
    Offline,
    /// The status query itself failed
    Unknown,
}

impl fmt::Display for ProgramStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramStatus::Running => write!(f, "Running"),
            ProgramStatus::Offline => write!(f, "Offline"),
            ProgramStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedProgram {
    pub index: usize,
    pub category: String,
    pub name: String,
    pub processes: Vec<String>,
    pub status: ProgramStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedCategory {
    pub index: usize,
    pub name: String,
    pub programs: Vec<ListedProgram>,
}

/// What happened when ending one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramOutcome {
    pub category: String,
    pub program: String,
    pub ended: Vec<String>,
    pub failures: Vec<String>,
}

impl ProgramOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_programs: Vec<ListedProgram>,
    pub listed_categories: Vec<ListedCategory>,
    pub outcomes: Vec<ProgramOutcome>,
    pub catalog: Option<Catalog>,
    pub matched: Option<usize>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_programs(mut self, programs: Vec<ListedProgram>) -> Self {
        self.listed_programs = programs;
        self
    }

    pub fn with_listed_categories(mut self, categories: Vec<ListedCategory>) -> Self {
        self.listed_categories = categories;
        self
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }
}
