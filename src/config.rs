use crate::data::export::EXPORT_FILE_NAME;
use crate::data::histogram::DEFAULT_BINS;

/// Application settings, fixed at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Number of histogram bins.
    pub histogram_bins: usize,
    /// Rows shown in the data preview.
    pub preview_rows: usize,
    /// Default name offered when saving the cleaned table.
    pub export_file_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Rusty Scrub – CSV Cleaning".to_string(),
            window_size: [1200.0, 800.0],
            min_window_size: [600.0, 400.0],
            histogram_bins: DEFAULT_BINS,
            preview_rows: 200,
            export_file_name: EXPORT_FILE_NAME.to_string(),
        }
    }
}
