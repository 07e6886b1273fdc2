use std::collections::HashSet;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{Cell, Column, Table};
use crate::error::ParseError;

/// Field values read as missing, on top of the empty field.
const NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Uploaded file
// ---------------------------------------------------------------------------

/// Declared format of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Csv,
}

impl UploadFormat {
    /// Detect the format from a file name. `None` for anything but CSV.
    pub fn from_name(name: &str) -> Option<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "txt" => Some(UploadFormat::Csv),
            _ => None,
        }
    }
}

/// Raw bytes of a picked file plus the name it was picked under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Identity of an upload, used to parse each file at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadKey(u64);

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        UploadedFile {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file picked from disk.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(UploadedFile { name, bytes })
    }

    pub fn key(&self) -> UploadKey {
        let mut hasher = DefaultHasher::new();
        self.name.hash(&mut hasher);
        self.bytes.hash(&mut hasher);
        UploadKey(hasher.finish())
    }

    /// Parse the upload according to its declared format.
    pub fn parse(&self) -> Result<Table, ParseError> {
        match UploadFormat::from_name(&self.name) {
            Some(UploadFormat::Csv) => parse_csv(&self.bytes),
            None => Err(ParseError::UnsupportedFormat {
                name: self.name.clone(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// CSV parser
// ---------------------------------------------------------------------------

/// Parse CSV bytes into a [`Table`].
///
/// The first record is the header. Every record must have as many fields as
/// the header. Column kinds are inferred from the non-missing fields:
/// integers, then floats, falling back to text.
pub fn parse_csv(bytes: &[u8]) -> Result<Table, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(ParseError::Empty);
    }
    let names = unique_names(headers.iter());

    let mut raw: Vec<Vec<String>> = vec![Vec::new(); names.len()];
    for result in reader.records() {
        let record = result?;
        for (slot, field) in raw.iter_mut().zip(record.iter()) {
            slot.push(field.to_string());
        }
    }

    let columns = names
        .into_iter()
        .zip(raw)
        .map(|(name, fields)| Column::new(name, parse_fields(&fields)))
        .collect();

    Ok(Table::new(columns)?)
}

/// Empty, a listed null spelling, or any other spelling `f64` reads as NaN
/// (`NAN`, `+nan`, ...).
fn is_missing(field: &str) -> bool {
    field.is_empty()
        || NA_VALUES.contains(&field)
        || field.trim().parse::<f64>().is_ok_and(f64::is_nan)
}

/// Type a column's fields as a whole: a single non-numeric field turns every
/// field of the column into text.
fn parse_fields(fields: &[String]) -> Vec<Cell> {
    let present = || fields.iter().filter(|f| !is_missing(f)).map(|f| f.trim());

    if present().all(|f| f.parse::<i64>().is_ok()) {
        return fields
            .iter()
            .map(|f| match f.trim().parse::<i64>() {
                Ok(i) if !is_missing(f) => Cell::Integer(i),
                _ => Cell::Missing,
            })
            .collect();
    }
    if present().all(|f| f.parse::<f64>().is_ok()) {
        return fields
            .iter()
            .map(|f| match f.trim().parse::<f64>() {
                Ok(v) if !is_missing(f) => Cell::Float(v),
                _ => Cell::Missing,
            })
            .collect();
    }
    fields
        .iter()
        .map(|f| {
            if is_missing(f) {
                Cell::Missing
            } else {
                Cell::Text(f.clone())
            }
        })
        .collect()
}

/// Name blank headers `Unnamed: <idx>` and suffix repeats with `.1`, `.2`, ...
fn unique_names<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    headers
        .enumerate()
        .map(|(idx, h)| {
            let base = if h.is_empty() {
                format!("Unnamed: {idx}")
            } else {
                h.to_string()
            };
            let mut name = base.clone();
            let mut n = 1;
            while seen.contains(&name) {
                name = format!("{base}.{n}");
                n += 1;
            }
            seen.insert(name.clone());
            name
        })
        .collect()
}
