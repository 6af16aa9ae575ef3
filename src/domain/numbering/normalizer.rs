//! Region-local phone number parsing into canonical E.164 form

use crate::domain::shared::error::{DomainError, Result};
use crate::domain::shared::value_objects::{PhoneNumber, Region};
use phonenumber::Mode;
use tracing::debug;

/// Parses region-local phone numbers into canonical international numbers.
///
/// A number is accepted only if it parses for the configured region *and* is a
/// valid subscriber number there. `"040 123 4567"`, `"040-1234567"` and
/// `"+358 40 1234567"` all normalize to `+358401234567` for region `FI`.
#[derive(Debug, Clone, Default)]
pub struct NumberNormalizer {
    region: Region,
}

impl NumberNormalizer {
    pub fn new(region: Region) -> Self {
        Self { region }
    }

    /// Normalize a single raw number
    pub fn normalize(&self, raw: &str) -> Result<PhoneNumber> {
        let parsed = phonenumber::parse(Some(self.region.id()), raw).map_err(|e| {
            debug!("Failed to parse {:?} for region {}: {}", raw, self.region, e);
            DomainError::invalid_number(raw)
        })?;

        if !phonenumber::is_valid(&parsed) {
            debug!("{:?} parsed but is not a valid number for region {}", raw, self.region);
            return Err(DomainError::invalid_number(raw));
        }

        let e164 = parsed.format().mode(Mode::E164).to_string();
        Ok(PhoneNumber::from_canonical(e164))
    }

    /// Normalize a whole batch, all or nothing.
    ///
    /// Stops at the first invalid entry (left to right) and reports that raw
    /// value; no partial output is returned.
    pub fn normalize_all<S: AsRef<str>>(&self, raws: &[S]) -> Result<Vec<PhoneNumber>> {
        raws.iter()
            .map(|raw| self.normalize(raw.as_ref()))
            .collect()
    }
}
