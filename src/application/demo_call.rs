//! Demo call: read generated text out to one recipient

use crate::domain::content::ContentSource;
use crate::domain::dispatch::{CallDispatcher, CallResult, CallbackUrls};
use crate::domain::numbering::NumberNormalizer;
use crate::domain::shared::error::Result;
use std::sync::Arc;
use tracing::{error, info};

/// Calls one number and reads out text fetched from the content service.
///
/// Content failures do not stop the call; the error message is read out
/// instead. Demo calls are not recorded as invitations.
pub struct DemoCallService {
    normalizer: NumberNormalizer,
    dispatcher: Arc<CallDispatcher>,
    callbacks: CallbackUrls,
    content: Arc<dyn ContentSource>,
}

impl DemoCallService {
    pub fn new(
        normalizer: NumberNormalizer,
        dispatcher: Arc<CallDispatcher>,
        callbacks: CallbackUrls,
        content: Arc<dyn ContentSource>,
    ) -> Self {
        Self {
            normalizer,
            dispatcher,
            callbacks,
            content,
        }
    }

    pub async fn call(&self, raw_number: &str) -> Result<CallResult> {
        let number = self.normalizer.normalize(raw_number)?;

        let text = match self.content.fetch_text().await {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to fetch demo call content: {}", e);
                e.to_string()
            }
        };

        info!("Placing demo call to {}", number);
        let callback_url = self.callbacks.announcement(&text);
        let outcome = self.dispatcher.dispatch(&number, &callback_url).await;

        Ok(CallResult::new(raw_number, number, outcome))
    }
}
