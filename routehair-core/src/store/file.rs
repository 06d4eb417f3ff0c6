//! Slot backed by one UTF-8 JSON file.

use camino::{Utf8Path, Utf8PathBuf};

use super::{SlotError, SlotMedium};

/// A slot stored as a single file.
///
/// Writes replace the file atomically and create missing parent
/// directories. Removing the slot deletes the file.
///
/// # Examples
/// ```no_run
/// use routehair_core::{FileSlot, VisitStore};
///
/// let store = VisitStore::new(FileSlot::new("routehair_visits.json"));
/// println!("{} visits", store.get_all().len());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSlot {
    path: Utf8PathBuf,
}

impl FileSlot {
    /// A slot stored at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl SlotMedium for FileSlot {
    fn name(&self) -> &str {
        self.path.as_str()
    }

    fn read(&self) -> Result<Option<String>, SlotError> {
        routehair_fs::read_optional_utf8(&self.path).map_err(|err| SlotError::read(self.name(), err))
    }

    fn write(&mut self, payload: &str) -> Result<(), SlotError> {
        routehair_fs::write_atomic_utf8(&self.path, payload)
            .map_err(|err| SlotError::write(self.path.as_str(), err))
    }

    fn remove(&mut self) -> Result<(), SlotError> {
        let removed = routehair_fs::remove_if_exists(&self.path)
            .map_err(|err| SlotError::remove(self.path.as_str(), err))?;
        if removed {
            log::debug!("removed visit slot file {}", self.path);
        }
        Ok(())
    }
}
