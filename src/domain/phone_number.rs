use std::str::FromStr;

use regex::Regex;

use super::ValidationError;

/// A user supplied phone number: digits with an optional leading `+`, spaces, hyphens and parentheses
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PhoneNumber(String);

impl FromStr for PhoneNumber {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        lazy_static::lazy_static! {
            static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9 \-()]+$").unwrap();
        }

        if !PHONE_REGEX.is_match(value) {
            return Err(ValidationError::InvalidPhone);
        }

        Ok(Self(value.to_string()))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
