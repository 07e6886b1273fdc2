use std::path::Path;

use anyhow::{Context, Result};

use super::model::{Cell, Table};

/// File name offered in the save dialog.
pub const EXPORT_FILE_NAME: &str = "dataset_nettoye.csv";

/// Serialize a table to UTF-8 CSV: header row, then one record per row.
/// Missing cells are written as empty fields.
pub fn to_csv(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(table.column_names())
        .context("writing CSV header")?;

    for (row_no, row) in table.rows().enumerate() {
        writer
            .write_record(row.iter().map(|c| format_cell(c)))
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }

    writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("flushing CSV buffer")
}

/// Serialize `table` and write it to `path`.
pub fn save_csv(table: &Table, path: &Path) -> Result<usize> {
    let bytes = to_csv(table)?;
    std::fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(bytes.len())
}

fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::Integer(i) => i.to_string(),
        Cell::Float(v) => format_float(*v),
        Cell::Text(s) => s.clone(),
        Cell::Missing => String::new(),
    }
}

/// Shortest round-tripping decimal; integral floats of any magnitude keep a
/// `.0` so the column reloads as float rather than integer.
fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        v.to_string()
    }
}
