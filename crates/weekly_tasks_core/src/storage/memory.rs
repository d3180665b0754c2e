//! In-memory backend used by tests and ephemeral sessions.

use super::{StorageBackend, StorageResult};
use std::cell::RefCell;

/// Record kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    raw: RefCell<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the record with an arbitrary payload, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: RefCell::new(Some(raw.into())),
        }
    }

    /// Returns a copy of the current raw payload.
    pub fn snapshot(&self) -> Option<String> {
        self.raw.borrow().clone()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self) -> StorageResult<Option<String>> {
        Ok(self.raw.borrow().clone())
    }

    fn write(&self, raw: &str) -> StorageResult<()> {
        *self.raw.borrow_mut() = Some(raw.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryBackend;
    use crate::storage::StorageBackend;

    #[test]
    fn empty_backend_reads_none() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.read().unwrap(), None);
    }

    #[test]
    fn write_replaces_previous_payload() {
        let backend = MemoryBackend::with_raw("[1]");
        backend.write("[]").unwrap();
        assert_eq!(backend.snapshot().as_deref(), Some("[]"));
    }
}
