//! Content + neural network HTTP client
//!
//! Fetches `{ "text": ... }` from the content service, feeds the text to the
//! neural network service and returns its (trimmed) plain-text output.

use crate::domain::content::{ContentError, ContentSource};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct HttpContentConfig {
    pub content_url: String,
    pub neural_net_url: String,
    pub request_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ContentBody {
    text: String,
}

pub struct HttpContentSource {
    config: HttpContentConfig,
    http_client: HttpClient,
}

impl HttpContentSource {
    pub fn new(config: HttpContentConfig) -> Result<Self, ContentError> {
        let http_client = HttpClient::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ContentError::Request(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    async fn fetch_seed_text(&self) -> Result<String, ContentError> {
        let response = self
            .http_client
            .get(&self.config.content_url)
            .send()
            .await
            .map_err(|e| ContentError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ContentError::Status(response.status().as_u16()));
        }

        let body: ContentBody = response
            .json()
            .await
            .map_err(|e| ContentError::InvalidResponse(e.to_string()))?;

        Ok(body.text)
    }

    async fn feed_neural_net(&self, text: String) -> Result<String, ContentError> {
        let response = self
            .http_client
            .post(&self.config.neural_net_url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(text)
            .send()
            .await
            .map_err(|e| ContentError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ContentError::Status(response.status().as_u16()));
        }

        let output = response
            .text()
            .await
            .map_err(|e| ContentError::InvalidResponse(e.to_string()))?;

        Ok(output.trim().to_string())
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch_text(&self) -> Result<String, ContentError> {
        let seed = self.fetch_seed_text().await?;
        debug!("Fetched {} bytes of seed text", seed.len());
        self.feed_neural_net(seed).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn source(base: &str) -> HttpContentSource {
        HttpContentSource::new(HttpContentConfig {
            content_url: format!("{}/content", base),
            neural_net_url: format!("{}/generate", base),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_text_pipes_through_neural_net() {
        let router = Router::new()
            .route("/content", get(|| async { Json(json!({ "text": "seed words" })) }))
            .route(
                "/generate",
                post(|body: String| async move { format!("  {} and more words\n", body) }),
            );
        let base = spawn_stub(router).await;

        let text = source(&base).fetch_text().await.unwrap();
        assert_eq!(text, "seed words and more words");
    }

    #[tokio::test]
    async fn test_content_service_error_status() {
        let router = Router::new().route(
            "/content",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        );
        let base = spawn_stub(router).await;

        let err = source(&base).fetch_text().await.unwrap_err();
        assert_eq!(err, ContentError::Status(503));
    }

    #[tokio::test]
    async fn test_content_missing_text() {
        let router = Router::new().route(
            "/content",
            get(|| async { Json::<Value>(json!({ "body": "no text field" })) }),
        );
        let base = spawn_stub(router).await;

        let err = source(&base).fetch_text().await.unwrap_err();
        assert!(matches!(err, ContentError::InvalidResponse(_)));
    }
}
