//! Callback URLs handed to the provider for each call

use crate::domain::shared::error::{DomainError, Result};
use url::Url;

/// Builds the URLs the provider fetches call instructions from.
///
/// The invitation context travels in the query string, so every call of one
/// batch carries the same URL.
#[derive(Debug, Clone)]
pub struct CallbackUrls {
    base: Url,
}

impl CallbackUrls {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|e| {
            DomainError::InvalidConfiguration(format!("invalid callback base url {:?}: {}", base_url, e))
        })?;

        if base.cannot_be_a_base() {
            return Err(DomainError::InvalidConfiguration(format!(
                "callback base url {:?} cannot be a base",
                base_url
            )));
        }

        Ok(Self { base })
    }

    /// URL for the invitation script: `{base}/twiml/come-bontho?name=..&place=..`
    pub fn invitation(&self, inviter: &str, place: &str) -> String {
        self.endpoint(&["twiml", "come-bontho"], &[("name", inviter), ("place", place)])
    }

    /// URL that reads `text` out to the recipient: `{base}/twiml/say?text=..`
    pub fn announcement(&self, text: &str) -> String {
        self.endpoint(&["twiml", "say"], &[("text", text)])
    }

    fn endpoint(&self, path: &[&str], params: &[(&str, &str)]) -> String {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path);
        }
        url.query_pairs_mut().extend_pairs(params);
        url.into()
    }
}
