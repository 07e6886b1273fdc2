use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::TableError;

// ---------------------------------------------------------------------------
// Cell – a single value in a column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a CSV reader infers.
#[derive(Debug, Clone)]
pub enum Cell {
    Integer(i64),
    Float(f64),
    Text(String),
    /// Empty field or one of the usual null spellings.
    Missing,
}

// -- Manual Eq/Hash so rows can be put in a HashSet for de-duplication --

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Cell::Integer(a), Cell::Integer(b)) => a == b,
            (Cell::Float(a), Cell::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Cell::Text(a), Cell::Text(b)) => a == b,
            (Cell::Missing, Cell::Missing) => true,
            _ => false,
        }
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Cell::Integer(i) => i.hash(state),
            // -0.0 == 0.0, so both must hash alike.
            Cell::Float(f) if *f == 0.0 => 0u64.hash(state),
            Cell::Float(f) if f.is_nan() => u64::MAX.hash(state),
            Cell::Float(f) => f.to_bits().hash(state),
            Cell::Text(s) => s.hash(state),
            Cell::Missing => {}
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Missing => write!(f, "<NA>"),
        }
    }
}

impl Cell {
    /// Interpret the cell as an `f64` for statistics and plotting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Float(v) => Some(*v),
            Cell::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// `Missing`, or a float that is NaN.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Missing => true,
            Cell::Float(v) => v.is_nan(),
            _ => false,
        }
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Integer(v)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Text(v.to_string())
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// Declared type of a column, decided once at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
    /// Every cell is missing.
    Empty,
}

impl ColumnKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }

    /// Infer the narrowest kind that fits every non-missing cell.
    pub fn infer(cells: &[Cell]) -> Self {
        let mut kind = ColumnKind::Empty;
        for cell in cells {
            kind = match (kind, cell) {
                (_, Cell::Missing) => kind,
                (ColumnKind::Text, _) | (_, Cell::Text(_)) => return ColumnKind::Text,
                (ColumnKind::Float, _) | (_, Cell::Float(_)) => ColumnKind::Float,
                (_, Cell::Integer(_)) => ColumnKind::Integer,
            };
        }
        kind
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Integer => "int64",
            ColumnKind::Float => "float64",
            ColumnKind::Text => "text",
            ColumnKind::Empty => "empty",
        };
        f.write_str(name)
    }
}

/// A named, typed column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub cells: Vec<Cell>,
}

impl Column {
    /// Build a column and infer its kind from the cells.
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        let kind = ColumnKind::infer(&cells);
        Column {
            name: name.into(),
            kind,
            cells,
        }
    }

    /// Non-missing values as `f64`, in row order. Empty for text columns.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.cells.iter().filter_map(Cell::as_f64).collect()
    }
}

// ---------------------------------------------------------------------------
// Table – the working dataset
// ---------------------------------------------------------------------------

/// An ordered set of equally long, uniquely named columns.
///
/// Fields are private: every `Table` in the program went through
/// [`Table::new`] or a row selection of an existing table, so the
/// invariants hold wherever a `Table` is observed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for col in &columns {
            if !seen.insert(col.name.as_str()) {
                return Err(TableError::DuplicateColumn(col.name.clone()));
            }
        }
        if let Some(first) = columns.first() {
            let expected = first.cells.len();
            if let Some(bad) = columns.iter().find(|c| c.cells.len() != expected) {
                return Err(TableError::LengthMismatch {
                    column: bad.name.clone(),
                    expected,
                    found: bad.cells.len(),
                });
            }
        }
        Ok(Table { columns })
    }

    /// Build a table from a header and row tuples, inferring column kinds.
    pub fn from_rows(names: &[&str], rows: Vec<Vec<Cell>>) -> Result<Self, TableError> {
        let mut cells: Vec<Vec<Cell>> = vec![Vec::with_capacity(rows.len()); names.len()];
        for (row_no, row) in rows.into_iter().enumerate() {
            if row.len() != names.len() {
                return Err(TableError::RowWidth {
                    row: row_no,
                    expected: names.len(),
                    found: row.len(),
                });
            }
            for (slot, cell) in cells.iter_mut().zip(row) {
                slot.push(cell);
            }
        }
        let columns = names
            .iter()
            .zip(cells)
            .map(|(name, cells)| Column::new(*name, cells))
            .collect();
        Table::new(columns)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Number of rows (0 when there are no columns).
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Borrow row `idx` as a tuple across columns.
    pub fn row(&self, idx: usize) -> Vec<&Cell> {
        self.columns.iter().map(|c| &c.cells[idx]).collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<&Cell>> + '_ {
        (0..self.n_rows()).map(|i| self.row(i))
    }

    /// Keep only the rows at `indices`, in the given order.
    ///
    /// Column kinds are carried over unchanged: dropping rows never changes
    /// the declared type of a column.
    pub fn select_rows(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                kind: c.kind,
                cells: indices.iter().map(|&i| c.cells[i].clone()).collect(),
            })
            .collect();
        Table { columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_inference_widens_integer_to_float_and_text() {
        assert_eq!(ColumnKind::infer(&[1i64.into(), Cell::Missing]), ColumnKind::Integer);
        assert_eq!(ColumnKind::infer(&[1i64.into(), 2.5.into()]), ColumnKind::Float);
        assert_eq!(ColumnKind::infer(&[1i64.into(), "x".into()]), ColumnKind::Text);
        assert_eq!(ColumnKind::infer(&[Cell::Missing, Cell::Missing]), ColumnKind::Empty);
        assert_eq!(ColumnKind::infer(&[]), ColumnKind::Empty);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let err = Table::new(vec![
            Column::new("a", vec![1i64.into(), 2i64.into()]),
            Column::new("b", vec![1i64.into()]),
        ])
        .unwrap_err();
        assert!(matches!(err, TableError::LengthMismatch { expected: 2, found: 1, .. }));
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = Table::new(vec![Column::new("a", vec![]), Column::new("a", vec![])]).unwrap_err();
        assert!(matches!(err, TableError::DuplicateColumn(name) if name == "a"));
    }

    #[test]
    fn row_count_is_zero_without_columns() {
        let table = Table::new(Vec::new()).unwrap();
        assert_eq!(table.n_rows(), 0);
        assert_eq!(table.n_columns(), 0);
    }

    #[test]
    fn float_equality_treats_signed_zero_and_nan_alike() {
        use std::collections::hash_map::DefaultHasher;

        let hash = |c: &Cell| {
            let mut h = DefaultHasher::new();
            c.hash(&mut h);
            h.finish()
        };
        assert_eq!(Cell::Float(0.0), Cell::Float(-0.0));
        assert_eq!(hash(&Cell::Float(0.0)), hash(&Cell::Float(-0.0)));
        assert_eq!(Cell::Float(f64::NAN), Cell::Float(f64::NAN));
        assert_ne!(Cell::Integer(1), Cell::Float(1.0));
    }

    #[test]
    fn nan_float_counts_as_missing() {
        assert!(Cell::Missing.is_missing());
        assert!(Cell::Float(f64::NAN).is_missing());
        assert!(!Cell::Float(0.0).is_missing());
        assert!(!Cell::Float(f64::INFINITY).is_missing());
        assert!(!Cell::Text("NaN".into()).is_missing());
    }

    #[test]
    fn select_rows_keeps_kinds() {
        let table = Table::from_rows(
            &["a", "b"],
            vec![vec![Cell::Missing, "x".into()], vec![2i64.into(), "y".into()]],
        )
        .unwrap();
        let picked = table.select_rows(&[1]);
        assert_eq!(picked.n_rows(), 1);
        assert_eq!(picked.columns()[0].kind, ColumnKind::Integer);
        assert_eq!(picked.row(0), vec![&Cell::Integer(2), &Cell::Text("y".into())]);
    }
}
