//! Core of the contacts tool: the record model, the line codec, the in-memory
//! store and the storage contract it persists through.

pub mod codec;
pub mod contact;
pub mod storage;
pub mod store;

pub use contact::{Contact, ContactPatch};
pub use store::{ContactError, ContactStore, LoadWarning, Loaded};
