//! # Selection Indexes
//!
//! Menus number programs (or categories) from 1 in catalog order. The
//! numbering is materialized once per render into a [`ProgramIndex`] or
//! [`CategoryIndex`], and the user's answer is resolved against that same
//! table. A table is a snapshot: after the catalog changes (e.g. a scan),
//! build a new one instead of reusing the old numbers.

use crate::model::{Catalog, Program};

/// One numbered row of the program menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramEntry {
    pub index: usize,
    pub category: String,
    pub name: String,
    pub program: Program,
}

#[derive(Debug, Clone, Default)]
pub struct ProgramIndex {
    entries: Vec<ProgramEntry>,
}

impl ProgramIndex {
    pub fn build(catalog: &Catalog) -> Self {
        let entries = catalog
            .programs()
            .enumerate()
            .map(|(i, (category, name, program))| ProgramEntry {
                index: i + 1,
                category: category.clone(),
                name: name.clone(),
                program: program.clone(),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ProgramEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ProgramEntry> {
        index.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selected entries in table order, each once. Unknown numbers are skipped.
    pub fn select(&self, indexes: &[usize]) -> Vec<&ProgramEntry> {
        self.entries
            .iter()
            .filter(|e| indexes.contains(&e.index))
            .collect()
    }
}

/// One numbered row of the category menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub index: usize,
    pub name: String,
    /// `(program name, program)` in catalog order
    pub programs: Vec<(String, Program)>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    entries: Vec<CategoryEntry>,
}

impl CategoryIndex {
    pub fn build(catalog: &Catalog) -> Self {
        let entries = catalog
            .categories()
            .enumerate()
            .map(|(i, (name, programs))| CategoryEntry {
                index: i + 1,
                name: name.clone(),
                programs: programs
                    .iter()
                    .map(|(n, p)| (n.clone(), p.clone()))
                    .collect(),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CategoryEntry> {
        index.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn select(&self, indexes: &[usize]) -> Vec<&CategoryEntry> {
        self.entries
            .iter()
            .filter(|e| indexes.contains(&e.index))
            .collect()
    }
}

/// Parses a menu answer such as `"1, 3-5 7"` into positive numbers for a
/// table of `len` rows.
///
/// Separators are commas and whitespace. Ranges expand inclusively and may be
/// written backwards, but only up to `len`; the part of a range past the table
/// is kept as its two endpoints so it can be reported as unknown. Single
/// numbers are kept as typed. Tokens that are not numbers, and `0`, are
/// ignored.
pub fn parse_selection(input: &str, len: usize) -> Vec<usize> {
    let mut result = Vec::new();

    for token in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        if let Some((start, end)) = token.split_once('-') {
            if let (Ok(start), Ok(end)) = (start.trim().parse::<usize>(), end.trim().parse::<usize>())
            {
                let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
                result.extend(lo.max(1)..=hi.min(len));
                if hi > len {
                    let past = lo.max(len + 1);
                    result.push(past);
                    if hi != past {
                        result.push(hi);
                    }
                }
            }
            continue;
        }
        if let Ok(n) = token.parse::<usize>() {
            if n > 0 {
                result.push(n);
            }
        }
    }

    result.dedup();
    result
}
