use std::sync::Mutex;

use crate::CoreError;

/// A single durable key-value slot holding the serialized snapshot.
pub trait SnapshotSlot: Send + Sync {
    /// Returns the stored payload, or `None` when nothing was ever written.
    fn read(&self) -> Result<Option<String>, CoreError>;
    /// Overwrites the stored payload.
    fn write(&self, payload: &str) -> Result<(), CoreError>;
    /// Removes the stored payload.
    fn clear(&self) -> Result<(), CoreError>;
}

/// In-process slot, used by tests and hosts without durable storage.
#[derive(Debug, Default)]
pub struct MemorySlot {
    payload: Mutex<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Mutex::new(Some(payload.into())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.payload.lock().ok().and_then(|guard| guard.clone())
    }
}

impl SnapshotSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>, CoreError> {
        let guard = self
            .payload
            .lock()
            .map_err(|_| CoreError::Storage("memory slot poisoned".into()))?;
        Ok(guard.clone())
    }

    fn write(&self, payload: &str) -> Result<(), CoreError> {
        let mut guard = self
            .payload
            .lock()
            .map_err(|_| CoreError::Storage("memory slot poisoned".into()))?;
        *guard = Some(payload.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        let mut guard = self
            .payload
            .lock()
            .map_err(|_| CoreError::Storage("memory slot poisoned".into()))?;
        *guard = None;
        Ok(())
    }
}

impl<T: SnapshotSlot + ?Sized> SnapshotSlot for std::sync::Arc<T> {
    fn read(&self) -> Result<Option<String>, CoreError> {
        (**self).read()
    }

    fn write(&self, payload: &str) -> Result<(), CoreError> {
        (**self).write(payload)
    }

    fn clear(&self) -> Result<(), CoreError> {
        (**self).clear()
    }
}
