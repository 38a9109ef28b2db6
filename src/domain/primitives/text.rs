use std::ops::Deref;
use crate::domain::DomainAssertionError;

/// Text which is guaranteed to contain something besides whitespaces.
/// The value is stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    pub fn new(value: impl AsRef<str>) -> Result<Self, DomainAssertionError> {
        let value = value.as_ref().trim();
        if value.is_empty() {
            Err(DomainAssertionError::new(value.to_owned(), "must not be empty"))
        } else {
            Ok(Self(value.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for NonEmptyText {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}
