use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::{
    codec::{self, CodecError},
    contact::{Contact, ContactPatch},
    storage::{ContactStorage, StorageError},
};

/// Lookup failures surfaced to the caller. State is never modified on error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("contact not found: {name}")]
    NotFound { name: String },
}

/// Non-fatal problems found while loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadWarning {
    /// The source could not be read; the store starts empty.
    #[error("could not read contacts: {0}")]
    Unavailable(#[from] StorageError),
    /// A line was skipped (too few fields or not UTF-8); the rest of the file still loaded.
    #[error("skipped line {line_number}: {source}")]
    MalformedLine {
        line_number: usize,
        source: CodecError,
    },
}

/// Result of [`ContactStore::load`]: always a usable store, plus anything worth reporting.
#[derive(Debug)]
pub struct Loaded {
    pub store: ContactStore,
    pub warnings: Vec<LoadWarning>,
}

/// Ordered, in-memory collection of contacts. Insertion order is the only ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactStore {
    contacts: Vec<Contact>,
}

impl ContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a contact. Duplicate names are allowed.
    pub fn add(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    /// Position of the first contact whose name matches exactly (case-sensitive).
    pub fn find_index(&self, name: &str) -> Option<usize> {
        self.contacts.iter().position(|c| c.name == name)
    }

    pub fn search(&self, name: &str) -> Option<&Contact> {
        self.find_index(name).map(|index| &self.contacts[index])
    }

    /// Apply `patch` to the first contact named `name`.
    pub fn edit(&mut self, name: &str, patch: ContactPatch) -> Result<&Contact, ContactError> {
        let index = self.find_index(name).ok_or_else(|| not_found(name))?;
        self.contacts[index].apply(patch);
        Ok(&self.contacts[index])
    }

    /// Remove the first contact named `name`, keeping the order of the rest.
    pub fn delete(&mut self, name: &str) -> Result<Contact, ContactError> {
        let index = self.find_index(name).ok_or_else(|| not_found(name))?;
        Ok(self.contacts.remove(index))
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contact> {
        self.contacts.iter()
    }

    pub fn as_slice(&self) -> &[Contact] {
        &self.contacts
    }

    /// Build a store from `storage`. Never fails: an unreadable source yields an
    /// empty store and malformed lines are skipped, both reported as warnings.
    #[instrument(skip_all, fields(storage = %storage.describe()))]
    pub fn load<S: ContactStorage + ?Sized>(storage: &S) -> Loaded {
        let contents = match storage.read_all() {
            Ok(contents) => contents,
            Err(err) => {
                warn!(%err, "contacts unavailable, starting empty");
                return Loaded {
                    store: Self::new(),
                    warnings: vec![err.into()],
                };
            }
        };

        let mut store = Self::new();
        let mut warnings = Vec::new();
        for (index, line) in split_lines(&contents).enumerate() {
            match codec::decode_line(line) {
                Ok(contact) => store.add(contact),
                Err(source) => {
                    warn!(line_number = index + 1, "skipping malformed line");
                    warnings.push(LoadWarning::MalformedLine {
                        line_number: index + 1,
                        source,
                    });
                }
            }
        }
        debug!(count = store.len(), "loaded contacts");
        Loaded { store, warnings }
    }

    /// Overwrite `storage` with every contact, one line each, in order.
    #[instrument(skip_all, fields(storage = %storage.describe(), count = self.len()))]
    pub fn save<S: ContactStorage + ?Sized>(&self, storage: &S) -> Result<(), StorageError> {
        storage.write_all(&self.to_text()).inspect_err(|err| {
            warn!(%err, "failed to save contacts");
        })
    }

    /// The on-disk representation: each serialized contact followed by `\n`.
    pub fn to_text(&self) -> String {
        self.contacts
            .iter()
            .map(|contact| codec::serialize(contact) + "\n")
            .collect()
    }
}

impl FromIterator<Contact> for ContactStore {
    fn from_iter<I: IntoIterator<Item = Contact>>(iter: I) -> Self {
        Self {
            contacts: iter.into_iter().collect(),
        }
    }
}

/// Split on `\n`, dropping a trailing `\r` per line and the empty piece after a final terminator.
fn split_lines(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let pieces = (!bytes.is_empty()).then(|| body.split(|&b| b == b'\n'));
    pieces
        .into_iter()
        .flatten()
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

fn not_found(name: &str) -> ContactError {
    ContactError::NotFound {
        name: name.to_string(),
    }
}
