use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::state::StoreError;

/// Why a generation request was refused
#[derive(Debug, Error)]
pub enum LuckyError {
    #[error("Please enter your birthdate.")]
    MissingBirthdate,
    #[error("Birthdate must be in YYYYMMDD format.")]
    InvalidBirthdate,
    #[error("Birth time must be in HHMM format.")]
    InvalidBirthtime,
    #[error("history could not be saved: {0}")]
    Store(#[from] StoreError),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        })
    }
}

/// Everything the user typed on the lucky number page.
///
/// Optional text fields are stored as empty strings rather than `None` so the
/// record compares equal to the same form submitted again.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GenerationInput {
    /// YYYYMMDD
    pub birthdate: String,
    /// HHMM or empty
    pub birthtime: String,
    pub name: String,
    pub gender: Option<Gender>,
    pub dream: String,
}

impl GenerationInput {
    /// Build an input from raw form fields, trimming whitespace
    pub fn from_form(
        birthdate: &str,
        birthtime: &str,
        name: &str,
        gender: Option<Gender>,
        dream: &str,
    ) -> Self {
        Self {
            birthdate: birthdate.trim().to_string(),
            birthtime: birthtime.trim().to_string(),
            name: name.trim().to_string(),
            gender,
            dream: dream.trim().to_string(),
        }
    }

    /// Check the date/time formats before anything is computed
    pub fn validate(&self) -> Result<(), LuckyError> {
        if self.birthdate.is_empty() {
            return Err(LuckyError::MissingBirthdate);
        }
        if !is_digits(&self.birthdate, 8) {
            return Err(LuckyError::InvalidBirthdate);
        }
        if !self.birthtime.is_empty() && !is_digits(&self.birthtime, 4) {
            return Err(LuckyError::InvalidBirthtime);
        }
        Ok(())
    }
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input() {
        let input = GenerationInput::from_form(" 19900515 ", "0730", "", None, "");
        assert_eq!(input.birthdate, "19900515");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_short_birthdate_rejected() {
        let input = GenerationInput::from_form("900515", "", "", None, "");
        assert!(matches!(input.validate(), Err(LuckyError::InvalidBirthdate)));
    }

    #[test]
    fn test_missing_birthdate_rejected() {
        let input = GenerationInput::from_form("   ", "", "", None, "");
        assert!(matches!(input.validate(), Err(LuckyError::MissingBirthdate)));
    }

    #[test]
    fn test_birthtime_format() {
        let bad = GenerationInput::from_form("19900515", "7:30", "", None, "");
        assert!(matches!(bad.validate(), Err(LuckyError::InvalidBirthtime)));

        // Full-width digits are not ASCII digits
        let wide = GenerationInput::from_form("１９９００５１５", "", "", None, "");
        assert!(matches!(wide.validate(), Err(LuckyError::InvalidBirthdate)));
    }

    #[test]
    fn test_gender_serializes_lowercase() {
        let json = serde_json::to_string(&Gender::Female).unwrap();
        assert_eq!(json, "\"female\"");
    }
}
