//! Slot stored as one row of a SQLite table.
//!
//! Several named slots may share a database file; each occupies a row of
//! `slots(name TEXT PRIMARY KEY, payload TEXT NOT NULL)`.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use super::{SlotError, SlotMedium};

const CREATE_SLOTS_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS slots (name TEXT PRIMARY KEY, payload TEXT NOT NULL)";

/// Error raised while opening a [`SqliteSlot`].
#[derive(Debug, Error)]
pub enum SqliteSlotError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Creating the slot table failed.
    #[error("failed to prepare the slot table: {0}")]
    Schema(#[source] rusqlite::Error),
}

/// A named slot inside a SQLite database.
pub struct SqliteSlot {
    connection: Connection,
    name: String,
}

impl fmt::Debug for SqliteSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteSlot")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl SqliteSlot {
    /// Open (creating if needed) the database at `path` and address the slot
    /// called `name`.
    ///
    /// # Errors
    /// Returns [`SqliteSlotError`] when the database cannot be opened or the
    /// slot table cannot be created.
    pub fn open<P>(path: P, name: impl Into<String>) -> Result<Self, SqliteSlotError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let connection =
            Connection::open(path).map_err(|source| SqliteSlotError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        Self::with_connection(connection, name.into())
    }

    /// A slot in a private in-memory database.
    ///
    /// # Errors
    /// Returns [`SqliteSlotError`] when SQLite cannot allocate the database.
    ///
    /// # Examples
    /// ```
    /// use routehair_core::{SlotMedium, SqliteSlot};
    ///
    /// let mut slot = SqliteSlot::open_in_memory("visits")?;
    /// slot.write("[]")?;
    /// assert_eq!(slot.read()?.as_deref(), Some("[]"));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open_in_memory(name: impl Into<String>) -> Result<Self, SqliteSlotError> {
        let connection =
            Connection::open_in_memory().map_err(|source| SqliteSlotError::OpenDatabase {
                path: PathBuf::from(":memory:"),
                source,
            })?;
        Self::with_connection(connection, name.into())
    }

    fn with_connection(connection: Connection, name: String) -> Result<Self, SqliteSlotError> {
        connection
            .execute(CREATE_SLOTS_TABLE, [])
            .map_err(SqliteSlotError::Schema)?;
        Ok(Self { connection, name })
    }
}

impl SlotMedium for SqliteSlot {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<Option<String>, SlotError> {
        self.connection
            .query_row(
                "SELECT payload FROM slots WHERE name = ?1",
                params![self.name],
                |row| row.get(0),
            )
            .optional()
            .map_err(|err| SlotError::read(self.name.as_str(), err))
    }

    fn write(&mut self, payload: &str) -> Result<(), SlotError> {
        self.connection
            .execute(
                "INSERT INTO slots (name, payload) VALUES (?1, ?2) \
                 ON CONFLICT(name) DO UPDATE SET payload = excluded.payload",
                params![self.name, payload],
            )
            .map(drop)
            .map_err(|err| SlotError::write(self.name.as_str(), err))
    }

    fn remove(&mut self) -> Result<(), SlotError> {
        self.connection
            .execute("DELETE FROM slots WHERE name = ?1", params![self.name])
            .map(drop)
            .map_err(|err| SlotError::remove(self.name.as_str(), err))
    }
}
