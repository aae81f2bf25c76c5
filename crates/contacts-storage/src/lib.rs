//! Concrete storage for the contacts file.
//! Writes go through a temp file in the same directory and replace the target in one step.

pub mod file_storage;

pub use file_storage::FileStorage;
