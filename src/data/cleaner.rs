use std::collections::HashSet;
use std::fmt;

use super::model::Table;

// ---------------------------------------------------------------------------
// Cleaning action selector
// ---------------------------------------------------------------------------

/// The cleaning step selected in the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleaningAction {
    #[default]
    None,
    DropEmptyRows,
    DropDuplicateRows,
}

impl CleaningAction {
    pub const ALL: [CleaningAction; 3] = [
        CleaningAction::None,
        CleaningAction::DropEmptyRows,
        CleaningAction::DropDuplicateRows,
    ];

    /// Run the selected cleaning step.
    pub fn apply(self, table: &Table) -> Table {
        match self {
            CleaningAction::None => identity(table),
            CleaningAction::DropEmptyRows => drop_empty_rows(table),
            CleaningAction::DropDuplicateRows => drop_duplicate_rows(table),
        }
    }
}

impl fmt::Display for CleaningAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CleaningAction::None => "None",
            CleaningAction::DropEmptyRows => "Drop rows with missing values",
            CleaningAction::DropDuplicateRows => "Drop duplicate rows",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Cleaning functions
// ---------------------------------------------------------------------------

pub fn identity(table: &Table) -> Table {
    table.clone()
}

/// Drop every row with a missing cell in any column.
pub fn drop_empty_rows(table: &Table) -> Table {
    let keep: Vec<usize> = (0..table.n_rows())
        .filter(|&i| !table.row(i).iter().any(|c| c.is_missing()))
        .collect();
    table.select_rows(&keep)
}

/// Drop every row equal, cell by cell, to an earlier one.
pub fn drop_duplicate_rows(table: &Table) -> Table {
    let mut seen = HashSet::new();
    let keep: Vec<usize> = (0..table.n_rows())
        .filter(|&i| seen.insert(table.row(i)))
        .collect();
    table.select_rows(&keep)
}
