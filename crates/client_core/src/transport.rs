use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::ApiError,
    protocol::{NotifyRequest, NotifyResponse, NOTIFY_ROUTE},
};
use url::Url;

use crate::error::{TransportError, UNKNOWN_ERROR};

#[async_trait]
pub trait NotifyTransport: Send + Sync {
    async fn notify(&self, email: &str) -> Result<NotifyResponse, TransportError>;
}

#[derive(Clone)]
pub struct HttpNotifyTransport {
    http: Client,
    endpoint: Url,
}

impl HttpNotifyTransport {
    pub fn new(server_url: &str) -> Result<Self, TransportError> {
        let invalid = |source| TransportError::InvalidServerUrl {
            url: server_url.to_string(),
            source,
        };
        let mut base = Url::parse(server_url.trim()).map_err(invalid)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join(NOTIFY_ROUTE.trim_start_matches('/'))
            .map_err(invalid)?;

        Ok(Self {
            http: Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl NotifyTransport for HttpNotifyTransport {
    async fn notify(&self, email: &str) -> Result<NotifyResponse, TransportError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&NotifyRequest::new(email))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiError>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| UNKNOWN_ERROR.to_string());
            return Err(TransportError::Rejected { status, message });
        }

        Ok(response.json::<NotifyResponse>().await?)
    }
}
