mod contact_storage;

pub use contact_storage::{ContactStorage, InMemoryStorage, StorageError};
