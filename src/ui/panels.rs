use eframe::egui::{self, Button, RichText, Ui};

use super::{notice_label, Command};
use crate::app::RustyScrubApp;
use crate::data::cleaner::CleaningAction;
use crate::data::loader::UploadedFile;
use crate::state::{Interaction, Notice};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, app: &RustyScrubApp) -> Option<Command> {
    let mut command = None;
    let loaded = app.dashboard.is_some();

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                command = open_file_dialog();
                ui.close_menu();
            }
            if ui
                .add_enabled(loaded, Button::new("Save cleaned CSV…"))
                .clicked()
            {
                command = save_file_dialog(&app.config.export_file_name);
                ui.close_menu();
            }
        });

        ui.separator();

        if ui
            .add_enabled(loaded, Button::new("🔄 Reset dataset"))
            .clicked()
        {
            command = Some(Command::Interact(Interaction::Reset));
        }

        ui.separator();

        if let Some(dash) = &app.dashboard {
            ui.label(format!(
                "{}: {} rows × {} columns",
                dash.file_name, dash.shape.rows, dash.shape.columns
            ));
            ui.separator();
        }

        for notice in &app.notices {
            notice_label(ui, notice);
        }
    });

    command
}

// ---------------------------------------------------------------------------
// Left side panel – cleaning and histogram controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, app: &RustyScrubApp) -> Option<Command> {
    let mut command = None;

    ui.heading("Cleaning");
    ui.separator();

    let Some(dash) = &app.dashboard else {
        ui.label("No dataset loaded.");
        return None;
    };

    let current = app.session.action();
    let mut selected = current;
    for action in CleaningAction::ALL {
        ui.radio_value(&mut selected, action, action.to_string());
    }
    if selected != current {
        command = Some(Command::Interact(Interaction::SelectCleaning(selected)));
    }

    ui.add_space(8.0);
    ui.label(RichText::new(format!("Rows: {}", dash.shape.rows)).strong());
    ui.label(RichText::new(format!("Columns: {}", dash.shape.columns)).strong());

    ui.add_space(8.0);
    ui.heading("Histogram");
    ui.separator();

    match &dash.histogram {
        Some(hist) => {
            egui::ComboBox::from_id_salt("histogram_column")
                .selected_text(&hist.column)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &dash.numeric_columns {
                        if ui.selectable_label(hist.column == *col, col).clicked()
                            && hist.column != *col
                        {
                            command = Some(Command::Interact(Interaction::SelectColumn(col.clone())));
                        }
                    }
                });
        }
        None => {
            for warning in &dash.warnings {
                notice_label(ui, warning);
            }
        }
    }

    ui.add_space(8.0);
    ui.heading("Statistics");
    ui.separator();

    if ui
        .add_enabled(!dash.description.is_empty(), Button::new("Copy statistics as JSON"))
        .clicked()
    {
        let notice = match dash.stats_json() {
            Ok(json) => {
                ui.ctx().copy_text(json);
                Notice::info("Statistics copied to the clipboard.")
            }
            Err(e) => {
                log::error!("Failed to serialize statistics: {e}");
                Notice::error(format!("Error: {e}"))
            }
        };
        command = Some(Command::Notify(notice));
    }

    command
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog() -> Option<Command> {
    let path = rfd::FileDialog::new()
        .set_title("Open a CSV file")
        .add_filter("CSV", &["csv", "txt"])
        .pick_file()?;

    let command = match UploadedFile::read(&path) {
        Ok(upload) => Command::Interact(Interaction::Upload(upload)),
        Err(e) => {
            log::error!("Failed to read file: {e:#}");
            Command::Notify(Notice::error(format!("Error: {e:#}")))
        }
    };
    Some(command)
}

pub fn save_file_dialog(file_name: &str) -> Option<Command> {
    let path = rfd::FileDialog::new()
        .set_title("Save cleaned CSV")
        .set_file_name(file_name)
        .add_filter("CSV", &["csv"])
        .save_file()?;
    Some(Command::Interact(Interaction::Save(path)))
}
