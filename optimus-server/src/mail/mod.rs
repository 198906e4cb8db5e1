pub mod compose;
mod smtp;

use async_trait::async_trait;
use optimus_model::ContactRequest;
use thiserror::Error;

pub use smtp::{SMTP_TIMEOUT, SmtpMailer};

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mailbox {value:?}")]
    Address {
        value: String,
        #[source]
        source: lettre::address::AddressError,
    },
    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
    #[error("smtp server did not accept the connection check")]
    Unverified,
}

/// Delivers a validated inquiry to the site's inbox.
#[async_trait]
pub trait ContactMailer: Send + Sync {
    async fn send(&self, request: &ContactRequest) -> Result<(), MailError>;

    /// Open a connection and authenticate without sending anything.
    async fn verify(&self) -> Result<(), MailError>;
}
