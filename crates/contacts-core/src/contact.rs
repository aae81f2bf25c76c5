/// A single contact record.
///
/// `name` doubles as the lookup key but uniqueness is not enforced. None of the
/// fields may contain [`crate::codec::DELIMITER`]; callers are responsible for
/// that, since the on-disk format has no escaping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub phone_number: String,
    pub email: String,
}

impl Contact {
    pub fn new(
        name: impl Into<String>,
        phone_number: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone_number: phone_number.into(),
            email: email.into(),
        }
    }

    /// Overwrite phone and email with any non-empty values from `patch`.
    pub(crate) fn apply(&mut self, patch: ContactPatch) {
        if let Some(phone_number) = patch.phone_number.filter(|v| !v.is_empty()) {
            self.phone_number = phone_number;
        }
        if let Some(email) = patch.email.filter(|v| !v.is_empty()) {
            self.email = email;
        }
    }
}

/// Replacement values for an edit. The name is never editable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

impl ContactPatch {
    /// Build a patch from raw prompt answers; blank answers keep the current value.
    pub fn from_input(phone_number: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            phone_number: non_empty(phone_number.into()),
            email: non_empty(email.into()),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
