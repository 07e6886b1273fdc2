use serde::Serialize;

use super::model::Table;

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 20;

/// One histogram bar: `[start, end)` and how many values fell in it.
/// The last bin is closed on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Bin {
    pub fn center(&self) -> f64 {
        self.start / 2.0 + self.end / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Names of the integer and float columns, in column order.
pub fn numeric_columns(table: &Table) -> Vec<String> {
    table
        .columns()
        .iter()
        .filter(|c| c.kind.is_numeric())
        .map(|c| c.name.clone())
        .collect()
}

/// Pick the column to plot: `requested` when it is still a numeric column,
/// else the first numeric column. `None` when there is nothing to plot.
pub fn select_column(table: &Table, requested: Option<&str>) -> Option<String> {
    let numeric = numeric_columns(table);
    requested
        .and_then(|r| numeric.iter().find(|c| c.as_str() == r).cloned())
        .or_else(|| numeric.into_iter().next())
}

/// Bin the finite values of `column` into `bins` equal-width bins over
/// `[min, max]`.
///
/// Returns an empty vector when the column is absent, not numeric, has no
/// finite values, or `bins` is zero. When every value is equal the range is
/// widened to `[v - 0.5, v + 0.5]`.
pub fn histogram(table: &Table, column: &str, bins: usize) -> Vec<Bin> {
    let Some(col) = table.column(column).filter(|c| c.kind.is_numeric()) else {
        return Vec::new();
    };
    let values: Vec<f64> = col
        .numeric_values()
        .into_iter()
        .filter(|v| v.is_finite())
        .collect();
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if min == max { (min - 0.5, max + 0.5) } else { (min, max) };
    // Work on halved values: `hi - lo` overflows when the data spans most of
    // the f64 range, `hi / 2 - lo / 2` never does. Halving is exact, so bin
    // edges and counts are the same as with the plain formula.
    let half_width = (hi / 2.0 - lo / 2.0) / bins as f64;
    let width = half_width * 2.0;

    let mut counts = vec![0usize; bins];
    for v in values {
        let idx = (((v / 2.0 - lo / 2.0) / half_width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bin {
            start: lo + width * i as f64,
            end: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Cell, Column};

    fn table_with(cells: Vec<Cell>) -> Table {
        Table::new(vec![
            Column::new("label", cells.iter().map(|_| Cell::Text("x".into())).collect()),
            Column::new("v", cells),
        ])
        .unwrap()
    }

    #[test]
    fn hundred_values_in_twenty_bins() {
        let table = table_with((1..=100).map(Cell::Integer).collect());
        let bins = histogram(&table, "v", DEFAULT_BINS);
        assert_eq!(bins.len(), 20);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 100);
        assert_eq!(bins[0].start, 1.0);
        assert_eq!(bins[19].end, 100.0);
        assert!(bins.iter().all(|b| b.count == 5));
    }

    #[test]
    fn missing_values_are_ignored() {
        let table = table_with(vec![Cell::Float(0.0), Cell::Missing, Cell::Float(10.0)]);
        let bins = histogram(&table, "v", 2);
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 1]);
        assert_eq!((bins[0].start, bins[1].end), (0.0, 10.0));
    }

    #[test]
    fn constant_column_gets_unit_range() {
        let table = table_with(vec![Cell::Integer(3), Cell::Integer(3)]);
        let bins = histogram(&table, "v", 4);
        assert_eq!(bins.len(), 4);
        assert_eq!(bins[0].start, 2.5);
        assert_eq!(bins[3].end, 3.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn range_near_f64_limits_stays_finite() {
        let table = table_with(vec![Cell::Float(-1e308), Cell::Float(0.0), Cell::Float(1e308)]);
        let bins = histogram(&table, "v", 2);
        assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(bins[0].start, -1e308);
        assert_eq!(bins[0].end, 0.0);
        assert_eq!(bins[1].end, 1e308);
        assert!(bins.iter().all(|b| b.start.is_finite() && b.end.is_finite()));
        assert!(bins.iter().all(|b| b.center().is_finite() && b.width().is_finite()));
    }

    #[test]
    fn no_values_gives_no_bins() {
        let table = table_with(vec![]);
        assert!(histogram(&table, "v", DEFAULT_BINS).is_empty());
        assert!(histogram(&table, "label", DEFAULT_BINS).is_empty());
        assert!(histogram(&table, "nope", DEFAULT_BINS).is_empty());
    }

    #[test]
    fn numeric_columns_skip_text_and_empty() {
        let table = Table::new(vec![
            Column::new("t", vec![Cell::Text("a".into())]),
            Column::new("i", vec![Cell::Integer(1)]),
            Column::new("e", vec![Cell::Missing]),
            Column::new("f", vec![Cell::Float(0.5)]),
        ])
        .unwrap();
        assert_eq!(numeric_columns(&table), vec!["i", "f"]);
        assert_eq!(select_column(&table, None).as_deref(), Some("i"));
        assert_eq!(select_column(&table, Some("f")).as_deref(), Some("f"));
        assert_eq!(select_column(&table, Some("t")).as_deref(), Some("i"));
    }
}
