use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use contacts_core::storage::{ContactStorage, StorageError};
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

/// Plain-text file implementing the shared `ContactStorage` contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContactStorage for FileStorage {
    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn read_all(&self) -> Result<Vec<u8>, StorageError> {
        match fs::read(&self.path) {
            Ok(contents) => {
                debug!(bytes = contents.len(), "read contacts file");
                Ok(contents)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Err(StorageError::NotFound {
                location: self.describe(),
            }),
            Err(err) => Err(storage_err(err)),
        }
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn write_all(&self, contents: &str) -> Result<(), StorageError> {
        write_replacing(&self.path, contents)?;
        debug!(bytes = contents.len(), "wrote contacts file");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn write_replacing(path: &Path, contents: &str) -> Result<(), StorageError> {
    // A bare file name has an empty parent.
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(storage_err)?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(storage_err)?;
    tmp.write_all(contents.as_bytes()).map_err(storage_err)?;
    tmp.flush().map_err(storage_err)?;
    // Temp files start owner-only; keep whatever mode the user gave the target.
    match fs::metadata(path) {
        Ok(existing) => tmp
            .as_file()
            .set_permissions(existing.permissions())
            .map_err(storage_err)?,
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => return Err(storage_err(err)),
    }
    tmp.persist(path).map_err(|e| storage_err(e.error))?;
    Ok(())
}

fn storage_err<E: ToString>(err: E) -> StorageError {
    StorageError::Io {
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use contacts_core::{Contact, ContactStore, LoadWarning};

    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().join("contacts.txt"));
        let err = storage.read_all().expect_err("should be missing");
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[test]
    fn write_overwrites_instead_of_appending() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("contacts.txt");
        let storage = FileStorage::new(&path);

        storage
            .write_all("Bob,111,b@x.com\nCarl,222,c@x.com\n")
            .expect("first write");
        storage.write_all("Carl,222,c@x.com\n").expect("second write");

        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            "Carl,222,c@x.com\n"
        );
    }

    #[test]
    fn write_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().join("nested/deeper/contacts.txt"));
        storage.write_all("a,b,c\n").expect("write");
        assert_eq!(storage.read_all().expect("read"), b"a,b,c\n");
    }

    #[test]
    fn directory_path_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path());
        let err = storage.read_all().expect_err("cannot read a directory");
        assert!(matches!(err, StorageError::Io { .. }));
    }

    #[test]
    fn load_from_nonexistent_path_yields_empty_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().join("nope.txt"));
        let loaded = ContactStore::load(&storage);
        assert!(loaded.store.is_empty());
        assert!(matches!(
            loaded.warnings.as_slice(),
            [LoadWarning::Unavailable(StorageError::NotFound { .. })]
        ));
    }

    #[test]
    fn load_delete_save_round_trip_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("contacts.txt");
        fs::write(&path, "Bob,111,b@x.com\nCarl,222,c@x.com").expect("seed");
        let storage = FileStorage::new(&path);

        let mut store = ContactStore::load(&storage).store;
        assert_eq!(store.len(), 2);
        store.delete("Bob").expect("delete");
        store.save(&storage).expect("save");

        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            "Carl,222,c@x.com\n"
        );
    }

    #[test]
    fn latin1_line_does_not_wipe_valid_records() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("contacts.txt");
        fs::write(&path, b"Bob,111,b@x.com\nJos\xE9,333,j@x.com\nCarl,222,c@x.com\n")
            .expect("seed");
        let storage = FileStorage::new(&path);

        let loaded = ContactStore::load(&storage);
        let names: Vec<_> = loaded.store.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Bob", "Carl"]);
        assert!(matches!(
            loaded.warnings.as_slice(),
            [LoadWarning::MalformedLine { line_number: 2, .. }]
        ));

        loaded.store.save(&storage).expect("save");
        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            "Bob,111,b@x.com\nCarl,222,c@x.com\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn save_keeps_existing_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("contacts.txt");
        fs::write(&path, "Bob,111,b@x.com\n").expect("seed");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).expect("chmod");

        let storage = FileStorage::new(&path);
        storage.write_all("Carl,222,c@x.com\n").expect("write");

        let mode = fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn saving_twice_is_byte_identical() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("contacts.txt");
        let storage = FileStorage::new(&path);
        let store: ContactStore = [
            Contact::new("Ann", "100", "ann@x.com"),
            Contact::new("Dee", "", "dee@x.com,alt@x.com"),
        ]
        .into_iter()
        .collect();

        store.save(&storage).expect("first save");
        let first = fs::read(&path).expect("read");
        store.save(&storage).expect("second save");
        assert_eq!(fs::read(&path).expect("read"), first);

        let reloaded = ContactStore::load(&storage).store;
        assert_eq!(reloaded, store);
    }
}
