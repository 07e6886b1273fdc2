use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use crate::color::column_color;
use crate::dashboard::HistogramView;

// ---------------------------------------------------------------------------
// Histogram (central panel)
// ---------------------------------------------------------------------------

/// Render the histogram of the selected numeric column.
pub fn histogram_plot(ui: &mut Ui, hist: &HistogramView) {
    ui.strong(format!("Histogram of {}", hist.column));

    if hist.bins.is_empty() {
        ui.label("The column has no values to plot.");
        return;
    }

    let color = column_color(hist.color_index, hist.palette_size);
    let bars: Vec<Bar> = hist
        .bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .name(format!("[{:.3}, {:.3}]", bin.start, bin.end))
        })
        .collect();

    let chart = BarChart::new(bars).color(color).name(&hist.column);

    Plot::new("histogram_plot")
        .height(280.0)
        .x_axis_label(hist.column.clone())
        .y_axis_label("Frequency")
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}
