//! Line codec for the contacts file.
//!
//! One record per line: `name,phone_number,email`. Only the first two
//! delimiters are significant, so an email may contain commas but a name or
//! phone number may not. There is no escaping.

use thiserror::Error;

use crate::contact::Contact;

/// Field separator used on disk.
pub const DELIMITER: char = ',';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The line has fewer than two delimiters.
    #[error("expected name, phone and email separated by ',', got {line:?}")]
    MalformedLine { line: String },
    /// The line is not valid UTF-8, e.g. written by a Latin-1 editor.
    #[error("line is not valid UTF-8: {lossy:?}")]
    InvalidUtf8 { lossy: String },
}

/// Encode a contact as a single line (without terminator).
pub fn serialize(contact: &Contact) -> String {
    format!(
        "{}{DELIMITER}{}{DELIMITER}{}",
        contact.name, contact.phone_number, contact.email
    )
}

/// Decode a line produced by [`serialize`].
pub fn deserialize(line: &str) -> Result<Contact, CodecError> {
    let mut fields = line.splitn(3, DELIMITER);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(name), Some(phone_number), Some(email)) => {
            Ok(Contact::new(name, phone_number, email))
        }
        _ => Err(CodecError::MalformedLine {
            line: line.to_string(),
        }),
    }
}

/// Decode one raw line (terminator already removed) from the contacts file.
pub fn decode_line(bytes: &[u8]) -> Result<Contact, CodecError> {
    let line = std::str::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8 {
        lossy: String::from_utf8_lossy(bytes).into_owned(),
    })?;
    deserialize(line)
}
