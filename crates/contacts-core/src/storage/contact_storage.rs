use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Errors produced by storage implementations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    /// Nothing has been saved at this location yet.
    #[error("no contacts file at {location}")]
    NotFound { location: String },
    /// Underlying read or write failure.
    #[error("storage failure: {reason}")]
    Io { reason: String },
}

/// Whole-document persistence for the contacts file.
///
/// Implementations acquire and release any handle inside each call.
pub trait ContactStorage {
    /// Read the full contents as raw bytes; decoding is left to the caller.
    fn read_all(&self) -> Result<Vec<u8>, StorageError>;

    /// Replace the full contents; never appends.
    fn write_all(&self, contents: &str) -> Result<(), StorageError>;

    /// Human-readable location for logs and warnings.
    fn describe(&self) -> String;
}

/// In-memory storage for tests and smoke runs. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStorage {
    inner: Arc<Mutex<Option<Vec<u8>>>>,
    read_only: bool,
}

impl InMemoryStorage {
    /// Storage with nothing saved yet; reads report `NotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self::with_bytes(contents.into())
    }

    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(bytes.into()))),
            read_only: false,
        }
    }

    /// Storage whose writes always fail.
    pub fn read_only(self) -> Self {
        Self {
            read_only: true,
            ..self
        }
    }

    /// Current contents, if anything has been written and it is valid UTF-8.
    pub fn contents(&self) -> Option<String> {
        let bytes = self.inner.lock().ok()?.clone()?;
        String::from_utf8(bytes).ok()
    }
}

impl ContactStorage for InMemoryStorage {
    fn read_all(&self) -> Result<Vec<u8>, StorageError> {
        let guard = self.inner.lock().map_err(|err| StorageError::Io {
            reason: format!("lock poisoned: {err}"),
        })?;
        guard.clone().ok_or_else(|| StorageError::NotFound {
            location: self.describe(),
        })
    }

    fn write_all(&self, contents: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Io {
                reason: "storage is read-only".to_string(),
            });
        }
        let mut guard = self.inner.lock().map_err(|err| StorageError::Io {
            reason: format!("lock poisoned: {err}"),
        })?;
        *guard = Some(contents.as_bytes().to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
