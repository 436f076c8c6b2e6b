//! PDF export through the headless-browser print service.
//!
//! The service receives a complete static HTML document plus page options
//! and answers with the PDF bytes. Nothing else in the crate talks to it.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("PDF service error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("PDF service returned an empty document")]
    EmptyBody,

    #[error("PDF service unavailable after {retries} attempts")]
    RetriesExhausted { retries: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfOptions {
    pub format: String,
    pub margin: String,
    pub print_background: bool,
    pub scale: f32,
}

impl Default for PdfOptions {
    fn default() -> Self {
        PdfOptions {
            format: "A4".to_string(),
            margin: "0.4in".to_string(),
            print_background: true,
            scale: 1.0,
        }
    }
}

#[derive(Debug, Serialize)]
struct PrintRequest<'a> {
    html: &'a str,
    options: &'a PdfOptions,
}

#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str, options: &PdfOptions) -> Result<Bytes, PdfError>;
}

#[derive(Clone)]
pub struct HttpPdfRenderer {
    client: Client,
    url: String,
    token: Option<String>,
}

impl HttpPdfRenderer {
    pub fn new(url: String, token: Option<String>) -> Result<Self, PdfError> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(60)).build()?,
            url,
            token,
        })
    }
}

fn is_retryable(status: reqwest::StatusCode) -> bool {
    status.as_u16() == 429 || status.is_server_error()
}

/// 1s, 2s, 4s, ...
fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(1000 * (1 << (attempt - 1)))
}

#[async_trait]
impl PdfRenderer for HttpPdfRenderer {
    /// Retries on 429 and 5xx with exponential backoff.
    async fn render(&self, html: &str, options: &PdfOptions) -> Result<Bytes, PdfError> {
        let body = PrintRequest { html, options };
        let mut last_error: Option<PdfError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = backoff(attempt);
                warn!(
                    "PDF render attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self.client.post(&self.url).json(&body);
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(PdfError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            if is_retryable(status) {
                let message = response.text().await.unwrap_or_default();
                warn!("PDF service returned {status}: {message}");
                last_error = Some(PdfError::Upstream {
                    status: status.as_u16(),
                    message,
                });
                continue;
            }
            if !status.is_success() {
                return Err(PdfError::Upstream {
                    status: status.as_u16(),
                    message: response.text().await.unwrap_or_default(),
                });
            }

            let pdf = response.bytes().await?;
            if pdf.is_empty() {
                return Err(PdfError::EmptyBody);
            }
            debug!("PDF rendered: {} bytes", pdf.len());
            return Ok(pdf);
        }

        Err(last_error.unwrap_or(PdfError::RetriesExhausted {
            retries: MAX_RETRIES,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let options = PdfOptions::default();
        let body = serde_json::to_value(PrintRequest {
            html: "<p>x</p>",
            options: &options,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({
                "html": "<p>x</p>",
                "options": {"format": "A4", "margin": "0.4in", "printBackground": true, "scale": 1.0}
            })
        );
    }

    #[test]
    fn test_only_throttling_and_server_errors_retry() {
        assert!(is_retryable(reqwest::StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(reqwest::StatusCode::BAD_GATEWAY));
        assert!(!is_retryable(reqwest::StatusCode::BAD_REQUEST));
        assert!(!is_retryable(reqwest::StatusCode::OK));
    }

    #[test]
    fn test_backoff_doubles() {
        assert_eq!(backoff(1), Duration::from_secs(1));
        assert_eq!(backoff(2), Duration::from_secs(2));
        assert_eq!(backoff(3), Duration::from_secs(4));
    }
}
