use derive_more::{AsRef, Display};

pub const MAX_NAME_LENGTH: usize = 64;

/// Display name of the user profile.
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(NameError::Empty);
        }

        let chars = name.chars().count();

        if chars > MAX_NAME_LENGTH {
            return Err(NameError::TooLong(chars));
        }

        Ok(Name(name.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Please enter your name")]
    Empty,
    #[error("Name must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
}
