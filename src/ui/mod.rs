//! Rendering. Panels only read the session's derived [`Dashboard`] and
//! report what the user did as a [`Command`]; state changes happen in
//! [`Session::handle`](crate::state::Session::handle).
//!
//! [`Dashboard`]: crate::dashboard::Dashboard

pub mod panels;
pub mod plot;
pub mod table;

use eframe::egui::{Color32, RichText, Ui};

use crate::state::{Interaction, Notice, NoticeLevel};

/// What a panel asks the app to do after this frame.
#[derive(Debug)]
pub enum Command {
    /// Hand an interaction to the session.
    Interact(Interaction),
    /// Show a notice that did not come from the session (dialog I/O, clipboard).
    Notify(Notice),
}

/// Render a notice coloured by its level.
pub fn notice_label(ui: &mut Ui, notice: &Notice) {
    let color = match notice.level {
        NoticeLevel::Info => ui.visuals().text_color(),
        NoticeLevel::Success => Color32::from_rgb(60, 170, 80),
        NoticeLevel::Warning => Color32::from_rgb(220, 160, 30),
        NoticeLevel::Error => Color32::RED,
    };
    ui.label(RichText::new(&notice.text).color(color));
}
