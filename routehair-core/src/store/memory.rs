//! In-process slot used by tests and short-lived sessions.

use super::{SlotError, SlotMedium};

/// A slot held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySlot {
    name: String,
    payload: Option<String>,
}

impl MemorySlot {
    /// An empty slot called `name`.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: None,
        }
    }

    /// Seed the slot with raw text, valid or not.
    #[must_use]
    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Raw contents.
    #[must_use]
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl SlotMedium for MemorySlot {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<Option<String>, SlotError> {
        Ok(self.payload.clone())
    }

    fn write(&mut self, payload: &str) -> Result<(), SlotError> {
        self.payload = Some(payload.to_owned());
        Ok(())
    }

    fn remove(&mut self) -> Result<(), SlotError> {
        self.payload = None;
        Ok(())
    }
}
