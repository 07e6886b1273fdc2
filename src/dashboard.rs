use crate::config::AppConfig;
use crate::data::histogram::{histogram, numeric_columns, Bin};
use crate::data::model::Table;
use crate::data::summary::{describe, shape, Description, Shape};
use crate::state::{Notice, Session};

/// Histogram of the selected column.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramView {
    pub column: String,
    pub bins: Vec<Bin>,
    /// Position of `column` among the numeric columns, for colouring.
    pub color_index: usize,
    pub palette_size: usize,
}

/// Everything the panels display, derived from the session's current table.
///
/// Rebuilt after every interaction; nothing in here outlives the table it
/// was computed from.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub file_name: String,
    pub shape: Shape,
    /// First `preview_rows` rows.
    pub preview: Table,
    pub hidden_rows: usize,
    pub numeric_columns: Vec<String>,
    pub histogram: Option<HistogramView>,
    pub description: Description,
    /// Warnings about the current table, e.g. nothing to plot.
    pub warnings: Vec<Notice>,
}

impl Dashboard {
    /// `None` when the session holds no table.
    pub fn derive(session: &Session, config: &AppConfig) -> Option<Self> {
        let table = session.table()?;
        let shape = shape(table);

        let shown = shape.rows.min(config.preview_rows);
        let preview_idx: Vec<usize> = (0..shown).collect();
        let preview = table.select_rows(&preview_idx);

        let numeric_columns = numeric_columns(table);
        let mut warnings = Vec::new();
        let plot = match session.selected_column() {
            Some(column) => Some(HistogramView {
                column: column.to_string(),
                bins: histogram(table, column, config.histogram_bins),
                color_index: numeric_columns.iter().position(|c| c == column).unwrap_or(0),
                palette_size: numeric_columns.len(),
            }),
            None => {
                warnings.push(Notice::warning("No numeric column found for the histogram."));
                None
            }
        };

        Some(Dashboard {
            file_name: session.file_name().unwrap_or("untitled").to_string(),
            shape,
            preview,
            hidden_rows: shape.rows - shown,
            numeric_columns,
            histogram: plot,
            description: describe(table),
            warnings,
        })
    }

    /// Descriptive statistics as pretty-printed JSON.
    pub fn stats_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::cleaner::CleaningAction;
    use crate::data::loader::UploadedFile;
    use crate::state::{Interaction, NoticeLevel};

    fn loaded(body: &str) -> Session {
        let mut session = Session::new();
        session.handle(Interaction::Upload(UploadedFile::new("data.csv", body.as_bytes().to_vec())));
        session
    }

    #[test]
    fn absent_without_table() {
        let session = Session::new();
        assert!(Dashboard::derive(&session, &AppConfig::default()).is_none());
    }

    #[test]
    fn absent_after_reset() {
        let mut session = loaded("a\n1\n");
        session.handle(Interaction::Reset);
        assert!(Dashboard::derive(&session, &AppConfig::default()).is_none());
    }

    #[test]
    fn preview_is_capped() {
        let body: String = std::iter::once("n\n".to_string())
            .chain((0..10).map(|i| format!("{i}\n")))
            .collect();
        let session = loaded(&body);
        let config = AppConfig { preview_rows: 4, ..AppConfig::default() };
        let dash = Dashboard::derive(&session, &config).unwrap();
        assert_eq!(dash.preview.n_rows(), 4);
        assert_eq!(dash.hidden_rows, 6);
        assert_eq!(dash.shape.rows, 10);
    }

    #[test]
    fn recomputed_from_cleaned_table() {
        let mut session = loaded("a,b\n1,x\n1,x\n3,y\n");
        let config = AppConfig::default();
        let before = Dashboard::derive(&session, &config).unwrap();
        assert_eq!(before.description.get("a").unwrap().count, 3);

        session.handle(Interaction::SelectCleaning(CleaningAction::DropDuplicateRows));
        let after = Dashboard::derive(&session, &config).unwrap();
        assert_eq!(after.shape.rows, 2);
        assert_eq!(after.description.get("a").unwrap().count, 2);
        let hist = after.histogram.unwrap();
        assert_eq!(hist.column, "a");
        assert_eq!(hist.bins.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn warns_when_nothing_to_plot() {
        let session = loaded("t\nx\n");
        let dash = Dashboard::derive(&session, &AppConfig::default()).unwrap();
        assert!(dash.histogram.is_none());
        assert!(dash.description.is_empty());
        assert_eq!(dash.warnings[0].level, NoticeLevel::Warning);
    }

    #[test]
    fn stats_json_is_keyed_by_column() {
        let session = loaded("t,v\nx,1\ny,3\n");
        let dash = Dashboard::derive(&session, &AppConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&dash.stats_json().unwrap()).unwrap();
        assert_eq!(value["v"]["mean"], 2.0);
        assert!(value.get("t").is_none());
    }
}
