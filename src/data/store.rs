use super::loader::{UploadKey, UploadedFile};
use super::model::Table;
use crate::error::ParseError;

/// Outcome of [`TableStore::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The upload was parsed and is now the working table.
    Parsed,
    /// The same upload is already loaded; the stored table was kept.
    Reused,
}

/// Holder of the working table of one session.
#[derive(Debug, Default)]
pub struct TableStore {
    current: Option<Table>,
    /// Upload the current table came from.
    source: Option<UploadKey>,
    /// File name of that upload, for display.
    source_name: Option<String>,
}

impl TableStore {
    /// Make `upload` the working table, parsing it only if it is not the
    /// upload already held. On failure the store is left untouched.
    pub fn load(&mut self, upload: &UploadedFile) -> Result<LoadOutcome, ParseError> {
        let key = upload.key();
        if self.current.is_some() && self.source == Some(key) {
            return Ok(LoadOutcome::Reused);
        }
        let table = upload.parse()?;
        self.current = Some(table);
        self.source = Some(key);
        self.source_name = Some(upload.name.clone());
        Ok(LoadOutcome::Parsed)
    }

    pub fn get(&self) -> Option<&Table> {
        self.current.as_ref()
    }

    /// Overwrite the working table. The upload it came from is unchanged.
    pub fn replace(&mut self, table: Table) {
        self.current = Some(table);
    }

    /// Drop the working table and forget its upload.
    pub fn clear(&mut self) {
        self.current = None;
        self.source = None;
        self.source_name = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }
}
