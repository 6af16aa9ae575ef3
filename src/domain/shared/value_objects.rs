//! Shared value objects used across multiple bounded contexts

use super::error::{DomainError, Result};
use phonenumber::country;
use serde::Serialize;
use std::fmt;

/// Canonical (E.164) phone number, e.g. `+358401234567`.
///
/// Only the number normalizer produces values of this type, so holding one
/// means the number was parsed and validated for some region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub(crate) fn from_canonical(e164: String) -> Self {
        Self(e164)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Numbering region that local-format numbers are interpreted in (ISO 3166 alpha-2)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    id: country::Id,
    code: String,
}

impl Region {
    pub fn parse(code: &str) -> Result<Self> {
        let code = code.trim().to_ascii_uppercase();
        let id = code
            .parse::<country::Id>()
            .map_err(|_| DomainError::InvalidConfiguration(format!("unknown region: {}", code)))?;

        Ok(Self { id, code })
    }

    pub fn id(&self) -> country::Id {
        self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl Default for Region {
    fn default() -> Self {
        Self {
            id: country::Id::FI,
            code: "FI".to_string(),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}
