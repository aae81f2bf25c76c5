use contacts_storage::FileStorage;
use tracing::debug;

use crate::config::Config;

/// Build the file storage named by the config (or the default path).
pub fn storage_from_config(config: &Config) -> FileStorage {
    let path = config.contacts_path();
    debug!(?path, "using contacts file");
    FileStorage::new(path)
}

/// Helper for tests to construct storage inside a temp dir.
#[cfg(test)]
pub fn test_storage(root: &std::path::Path) -> FileStorage {
    FileStorage::new(root.join("contacts.txt"))
}
