//! Outbound transactional email.
//!
//! The notify endpoint only sees [`EmailSender`]; [`ResendClient`] is the
//! production implementation talking to a Resend-compatible `/emails` API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_RESEND_BASE_URL: &str = "https://api.resend.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentEmail {
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("email API key is not configured")]
    MissingApiKey,
    #[error("invalid email API base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("email API rejected message with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("email API request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<SentEmail, MailerError>;
}

#[derive(Clone)]
pub struct ResendClient {
    http: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl ResendClient {
    /// Builds a client for `{base_url}/emails`.
    ///
    /// A missing `api_key` is accepted here and only surfaces when a send is attempted.
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, MailerError> {
        let invalid = |source| MailerError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        };
        let mut base = Url::parse(base_url.trim()).map_err(invalid)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join("emails").map_err(invalid)?;

        Ok(Self {
            http: Client::new(),
            endpoint,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl EmailSender for ResendClient {
    async fn send(&self, message: &EmailMessage) -> Result<SentEmail, MailerError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(MailerError::MissingApiKey);
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(api_key)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, subject = %message.subject, "email API rejected message");
            return Err(MailerError::Rejected { status, body });
        }

        let sent: SentEmail = response.json().await?;
        debug!(id = ?sent.id, subject = %message.subject, "email accepted by API");
        Ok(sent)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
