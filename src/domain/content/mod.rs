//! Call script content

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("Content request failed: {0}")]
    Request(String),

    #[error("Content service returned status {0}")]
    Status(u16),

    #[error("Invalid content response: {0}")]
    InvalidResponse(String),
}

/// Source of dynamic text read out to call recipients
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_text(&self) -> Result<String, ContentError>;
}
