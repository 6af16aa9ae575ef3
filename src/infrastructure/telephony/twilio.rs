//! Twilio REST adapter for placing outbound calls

use crate::domain::dispatch::{OutboundCallProvider, PlaceCall, PlacedCall, ProviderError};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"***REDACTED***")
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Call resource returned when a call is created
#[derive(Debug, Deserialize)]
struct CallResource {
    sid: String,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// Places calls through `POST /2010-04-01/Accounts/{sid}/Calls.json`
pub struct TwilioCallProvider {
    config: TwilioConfig,
    http_client: HttpClient,
}

impl TwilioCallProvider {
    pub fn new(config: TwilioConfig) -> Result<Self, ProviderError> {
        let http_client = HttpClient::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ProviderError::Configuration(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn calls_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.account_sid
        )
    }
}

#[async_trait]
impl OutboundCallProvider for TwilioCallProvider {
    async fn place(&self, request: PlaceCall) -> Result<PlacedCall, ProviderError> {
        debug!("Requesting call to {} via Twilio", request.to);

        let form = [
            ("Url", request.callback_url.as_str()),
            ("To", request.to.as_str()),
            ("From", request.from.as_str()),
        ];

        let response = self
            .http_client
            .post(self.calls_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&form)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                code: body.code,
                message: body
                    .message
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string()),
            });
        }

        let call: CallResource = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        Ok(PlacedCall {
            call_id: call.sid,
            error_code: call.error_code,
            error_message: call.error_message,
        })
    }
}
