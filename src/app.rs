use eframe::egui::{self, ScrollArea, Ui};

use crate::config::AppConfig;
use crate::dashboard::Dashboard;
use crate::state::{Interaction, Notice, Session};
use crate::ui::{panels, plot, table, Command};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyScrubApp {
    pub config: AppConfig,
    pub session: Session,
    /// Display data derived from the session after the last interaction.
    pub dashboard: Option<Dashboard>,
    /// Notices of the last interaction.
    pub notices: Vec<Notice>,
}

impl RustyScrubApp {
    pub fn new(config: AppConfig) -> Self {
        let session = Session::new();
        log::info!("Started {}", session.id());
        Self {
            config,
            session,
            dashboard: None,
            notices: Vec::new(),
        }
    }

    /// Hand one interaction to the session and rebuild the display from the
    /// resulting state.
    pub fn dispatch(&mut self, interaction: Interaction) {
        self.notices = self.session.handle(interaction).to_vec();
        self.dashboard = Dashboard::derive(&self.session, &self.config);
    }

    fn run(&mut self, command: Command) {
        match command {
            Command::Interact(interaction) => self.dispatch(interaction),
            Command::Notify(notice) => self.notices = vec![notice],
        }
    }
}

impl eframe::App for RustyScrubApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let app = &*self;

        // ---- Top panel: menu bar ----
        let top = egui::TopBottomPanel::top("top_bar")
            .show(ctx, |ui| panels::top_bar(ui, app))
            .inner;

        // ---- Left side panel: cleaning / histogram controls ----
        let side = egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| panels::side_panel(ui, app))
            .inner;

        // ---- Central panel: preview, histogram, statistics ----
        egui::CentralPanel::default().show(ctx, |ui| {
            central_panel(ui, app.dashboard.as_ref());
        });

        // One interaction per frame; the top bar wins.
        if let Some(command) = top.or(side) {
            self.run(command);
        }
    }
}

fn central_panel(ui: &mut Ui, dashboard: Option<&Dashboard>) {
    let Some(dash) = dashboard else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV file to start  (File → Open CSV…)");
        });
        return;
    };

    ScrollArea::vertical()
        .id_salt("central_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Data preview");
            table::preview_table(ui, &dash.preview, dash.hidden_rows);
            ui.separator();

            ui.heading("Visualization");
            match &dash.histogram {
                Some(hist) => plot::histogram_plot(ui, hist),
                None => {
                    for warning in &dash.warnings {
                        crate::ui::notice_label(ui, warning);
                    }
                }
            }
            ui.separator();

            ui.heading("Descriptive statistics");
            table::stats_grid(ui, &dash.description);
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::cleaner::CleaningAction;
    use crate::data::loader::UploadedFile;

    #[test]
    fn dispatch_rebuilds_dashboard() {
        let mut app = RustyScrubApp::new(AppConfig::default());
        assert!(app.dashboard.is_none());

        app.dispatch(Interaction::Upload(UploadedFile::new("d.csv", b"a\n1\n1\n".to_vec())));
        assert_eq!(app.dashboard.as_ref().unwrap().shape.rows, 2);

        app.dispatch(Interaction::SelectCleaning(CleaningAction::DropDuplicateRows));
        assert_eq!(app.dashboard.as_ref().unwrap().shape.rows, 1);
        assert_eq!(app.notices.len(), 1);

        app.dispatch(Interaction::Reset);
        assert!(app.dashboard.is_none());
    }

    #[test]
    fn notify_replaces_notices_without_touching_state() {
        let mut app = RustyScrubApp::new(AppConfig::default());
        app.dispatch(Interaction::Upload(UploadedFile::new("d.csv", b"a\n1\n".to_vec())));
        app.run(Command::Notify(Notice::error("boom")));
        assert_eq!(app.notices, vec![Notice::error("boom")]);
        assert!(app.dashboard.is_some());
    }
}
