use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::data::cleaner::CleaningAction;
use crate::data::export;
use crate::data::histogram::select_column;
use crate::data::loader::UploadedFile;
use crate::data::model::Table;
use crate::data::store::{LoadOutcome, TableStore};

// ---------------------------------------------------------------------------
// Session identity
// ---------------------------------------------------------------------------

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

/// Identity of one user session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    fn next() -> Self {
        SessionId(NEXT_SESSION.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Interactions and notices
// ---------------------------------------------------------------------------

/// Something the user did. Exactly one is handled per update cycle.
#[derive(Debug, Clone)]
pub enum Interaction {
    Upload(UploadedFile),
    SelectCleaning(CleaningAction),
    SelectColumn(String),
    Save(PathBuf),
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A message shown to the user after an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Info, text: text.into() }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Success, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Warning, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Error, text: text.into() }
    }
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NoFile,
    Loaded,
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// The full state of one session, independent of rendering.
#[derive(Debug)]
pub struct Session {
    id: SessionId,

    /// Working table (absent until a file is loaded).
    store: TableStore,

    /// Cleaning step currently selected. Re-applied on every interaction.
    action: CleaningAction,

    /// Numeric column chosen for the histogram.
    selected_column: Option<String>,

    /// Notices produced by the last interaction.
    notices: Vec<Notice>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: SessionId::next(),
            store: TableStore::default(),
            action: CleaningAction::None,
            selected_column: None,
            notices: Vec::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn phase(&self) -> Phase {
        if self.store.is_loaded() {
            Phase::Loaded
        } else {
            Phase::NoFile
        }
    }

    pub fn table(&self) -> Option<&Table> {
        self.store.get()
    }

    pub fn action(&self) -> CleaningAction {
        self.action
    }

    pub fn selected_column(&self) -> Option<&str> {
        self.selected_column.as_deref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.store.source_name()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Handle one interaction to completion.
    ///
    /// The handler for the interaction runs first; then, if a table is
    /// loaded, the selected cleaning step is applied and written back.
    pub fn handle(&mut self, interaction: Interaction) -> &[Notice] {
        log::debug!("{}: handling {:?}", self.id, InteractionKind(&interaction));
        self.notices.clear();

        let proceed = match interaction {
            Interaction::Upload(upload) => self.on_upload(&upload),
            Interaction::SelectCleaning(action) => {
                self.action = action;
                true
            }
            Interaction::SelectColumn(column) => {
                self.selected_column = Some(column);
                true
            }
            Interaction::Save(path) => self.on_save(path),
            Interaction::Reset => {
                self.on_reset();
                false
            }
        };

        if proceed && self.store.is_loaded() {
            self.apply_cleaning();
        }
        self.sync_selected_column();
        &self.notices
    }

    fn on_upload(&mut self, upload: &UploadedFile) -> bool {
        match self.store.load(upload) {
            Ok(LoadOutcome::Parsed) => {
                if let Some(table) = self.store.get() {
                    log::info!(
                        "{}: loaded {} ({} rows, {} columns)",
                        self.id,
                        upload.name,
                        table.n_rows(),
                        table.n_columns()
                    );
                }
                self.selected_column = None;
                true
            }
            Ok(LoadOutcome::Reused) => {
                log::debug!("{}: {} already loaded, keeping current table", self.id, upload.name);
                true
            }
            Err(e) => {
                log::warn!("{}: rejected {}: {e}", self.id, upload.name);
                self.notices.push(Notice::error(format!("Could not read {}: {e}", upload.name)));
                false
            }
        }
    }

    fn on_save(&mut self, path: PathBuf) -> bool {
        let Some(table) = self.store.get() else {
            self.notices.push(Notice::warning("Nothing to save, open a CSV file first."));
            return false;
        };
        match export::save_csv(table, &path) {
            Ok(bytes) => {
                log::info!("{}: saved {bytes} bytes to {}", self.id, path.display());
                self.notices.push(Notice::info(format!("Saved {}", path.display())));
            }
            Err(e) => {
                log::error!("{}: failed to save: {e:#}", self.id);
                self.notices.push(Notice::error(format!("Error: {e:#}")));
            }
        }
        true
    }

    fn on_reset(&mut self) {
        self.store.clear();
        self.selected_column = None;
        log::info!("{}: dataset reset", self.id);
        self.notices.push(Notice::success("Dataset reset. Open the file again to continue."));
    }

    /// Run the selected cleaning step and store the result unconditionally.
    fn apply_cleaning(&mut self) {
        let Some(table) = self.store.get() else {
            return;
        };
        let before = table.n_rows();
        let cleaned = self.action.apply(table);
        let removed = before - cleaned.n_rows();
        self.store.replace(cleaned);

        if self.action != CleaningAction::None {
            log::debug!("{}: {} removed {removed} rows", self.id, self.action);
            let text = match self.action {
                CleaningAction::DropDuplicateRows => "Duplicate rows removed.",
                _ => "Rows with missing values removed.",
            };
            self.notices.push(Notice::success(text));
        }
    }

    /// Keep the histogram column pointing at an existing numeric column.
    fn sync_selected_column(&mut self) {
        self.selected_column = self
            .store
            .get()
            .and_then(|t| select_column(t, self.selected_column.as_deref()));
    }
}

/// Debug view of an interaction that leaves out uploaded bytes.
struct InteractionKind<'a>(&'a Interaction);

impl fmt::Debug for InteractionKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Interaction::Upload(u) => write!(f, "Upload({}, {} bytes)", u.name, u.bytes.len()),
            other => write!(f, "{other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Cell;

    fn upload(body: &str) -> Interaction {
        Interaction::Upload(UploadedFile::new("data.csv", body.as_bytes().to_vec()))
    }

    const MESSY: &str = "a,b\n1,x\n2,y\n2,y\n,z\n";

    #[test]
    fn starts_without_file() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::NoFile);
        assert!(session.table().is_none());
    }

    #[test]
    fn sessions_have_distinct_ids() {
        assert_ne!(Session::new().id(), Session::new().id());
    }

    #[test]
    fn upload_moves_to_loaded() {
        let mut session = Session::new();
        let notices = session.handle(upload(MESSY));
        assert!(notices.is_empty());
        assert_eq!(session.phase(), Phase::Loaded);
        assert_eq!(session.table().unwrap().n_rows(), 4);
        assert_eq!(session.file_name(), Some("data.csv"));
        assert_eq!(session.selected_column(), Some("a"));
    }

    #[test]
    fn malformed_upload_stays_without_file() {
        let mut session = Session::new();
        let notices = session.handle(upload("a,b\n1,2,3\n")).to_vec();
        assert_eq!(session.phase(), Phase::NoFile);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
    }

    #[test]
    fn cleaning_is_committed_and_survives_switching_back() {
        let mut session = Session::new();
        session.handle(upload(MESSY));

        let notices = session.handle(Interaction::SelectCleaning(CleaningAction::DropDuplicateRows));
        assert_eq!(notices[0].level, NoticeLevel::Success);
        assert_eq!(session.table().unwrap().n_rows(), 3);

        session.handle(Interaction::SelectCleaning(CleaningAction::DropEmptyRows));
        assert_eq!(session.table().unwrap().n_rows(), 2);

        session.handle(Interaction::SelectCleaning(CleaningAction::None));
        assert_eq!(session.table().unwrap().n_rows(), 2);
        assert!(session.notices().is_empty());
    }

    #[test]
    fn reselecting_a_cleaning_is_a_no_op() {
        let mut session = Session::new();
        session.handle(upload(MESSY));
        session.handle(Interaction::SelectCleaning(CleaningAction::DropDuplicateRows));
        let once = session.table().cloned();
        session.handle(Interaction::SelectCleaning(CleaningAction::DropDuplicateRows));
        assert_eq!(session.table().cloned(), once);
    }

    #[test]
    fn same_file_is_not_parsed_again() {
        let mut session = Session::new();
        session.handle(upload(MESSY));
        session.handle(Interaction::SelectCleaning(CleaningAction::DropDuplicateRows));
        session.handle(Interaction::SelectCleaning(CleaningAction::None));

        session.handle(upload(MESSY));
        assert_eq!(session.table().unwrap().n_rows(), 3);
    }

    #[test]
    fn active_cleaning_applies_to_a_new_upload() {
        let mut session = Session::new();
        session.handle(Interaction::SelectCleaning(CleaningAction::DropEmptyRows));
        assert_eq!(session.phase(), Phase::NoFile);

        session.handle(upload(MESSY));
        assert_eq!(session.table().unwrap().n_rows(), 3);
    }

    #[test]
    fn reset_clears_table_and_confirms() {
        let mut session = Session::new();
        session.handle(upload(MESSY));
        let notices = session.handle(Interaction::Reset).to_vec();

        assert_eq!(session.phase(), Phase::NoFile);
        assert!(session.table().is_none());
        assert!(session.selected_column().is_none());
        assert_eq!(notices, vec![Notice::success("Dataset reset. Open the file again to continue.")]);

        session.handle(upload(MESSY));
        assert_eq!(session.table().unwrap().n_rows(), 4);
    }

    #[test]
    fn column_selection_falls_back_to_first_numeric() {
        let mut session = Session::new();
        session.handle(upload("t,x,y\na,1,2.5\n"));
        session.handle(Interaction::SelectColumn("y".into()));
        assert_eq!(session.selected_column(), Some("y"));
        session.handle(Interaction::SelectColumn("t".into()));
        assert_eq!(session.selected_column(), Some("x"));
    }

    #[test]
    fn text_only_table_has_no_selected_column() {
        let mut session = Session::new();
        session.handle(upload("t\na\n"));
        assert_eq!(session.selected_column(), None);
        assert_eq!(session.table().unwrap().row(0), vec![&Cell::Text("a".into())]);
    }

    #[test]
    fn save_without_table_warns() {
        let mut session = Session::new();
        let notices = session.handle(Interaction::Save(PathBuf::from("out.csv")));
        assert_eq!(notices[0].level, NoticeLevel::Warning);
    }

    #[test]
    fn save_to_unwritable_path_reports_error() {
        let mut session = Session::new();
        session.handle(upload(MESSY));
        let path = std::env::temp_dir().join("rusty-scrub-missing-dir").join("nested").join("out.csv");
        let notices = session.handle(Interaction::Save(path)).to_vec();
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(session.phase(), Phase::Loaded);
    }

    #[test]
    fn save_writes_current_table() {
        let mut session = Session::new();
        session.handle(upload(MESSY));
        session.handle(Interaction::SelectCleaning(CleaningAction::DropDuplicateRows));

        let path = std::env::temp_dir().join(format!("rusty-scrub-{}.csv", session.id()));
        session.handle(Interaction::Save(path.clone()));
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(written, "a,b\n1,x\n2,y\n,z\n");
    }
}
