use async_trait::async_trait;
use optimus_model::{ContactPayload, ContactRequest, ContactResponse};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("relay request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("relay rejected the inquiry ({status}): {message}")]
    Rejected { status: StatusCode, message: String },
}

/// Delivers a validated contact request to the mail relay.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRelay: Send + Sync {
    async fn submit(
        &self,
        request: &ContactRequest,
    ) -> Result<ContactResponse, RelayError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Posts inquiries as JSON to the relay endpoint.
#[derive(Debug, Clone)]
pub struct HttpContactRelay {
    client: Client,
    endpoint: Url,
}

impl HttpContactRelay {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ContactRelay for HttpContactRelay {
    async fn submit(
        &self,
        request: &ContactRequest,
    ) -> Result<ContactResponse, RelayError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&ContactPayload::from(request.clone()))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<ContactResponse>().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string(),
        };
        Err(RelayError::Rejected { status, message })
    }
}
