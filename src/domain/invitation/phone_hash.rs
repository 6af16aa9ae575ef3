//! One-way hashing of phone numbers for storage

use crate::domain::shared::error::{DomainError, Result};
use crate::domain::shared::value_objects::PhoneNumber;

/// Hashes canonical numbers with bcrypt.
///
/// Hashing the canonical form means `040 123 4567` and `0401234567` verify
/// against the same stored hash. bcrypt runs on the blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct PhoneHasher {
    cost: u32,
}

impl PhoneHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub async fn hash(&self, number: &PhoneNumber) -> Result<String> {
        let number = number.as_str().to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(number, cost))
            .await
            .map_err(|e| DomainError::Internal(format!("hashing task failed: {}", e)))?
            .map_err(|e| DomainError::Internal(format!("failed to hash phone number: {}", e)))
    }
}
