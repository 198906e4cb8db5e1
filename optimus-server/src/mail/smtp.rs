use std::{fmt, time::Duration};

use async_trait::async_trait;
use lettre::{
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};
use optimus_config::{ContactConfig, SmtpConfig, SmtpSecurity};
use optimus_model::ContactRequest;
use tracing::{debug, warn};

use super::{ContactMailer, MailError, compose};

/// Connection, greeting and command timeout for the relay.
pub const SMTP_TIMEOUT: Duration = Duration::from_secs(20);

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("from", &self.from.to_string())
            .field("to", &self.to.to_string())
            .finish_non_exhaustive()
    }
}

impl SmtpMailer {
    /// Build a mailer from the relay settings. Returns `Ok(None)` when no
    /// recipient is configured, since there is nowhere to deliver to.
    pub fn from_config(
        smtp: &SmtpConfig,
        contact: &ContactConfig,
    ) -> Result<Option<Self>, MailError> {
        let Some(recipient) = contact.recipient.as_deref() else {
            return Ok(None);
        };
        let to = parse_mailbox(recipient)?;
        let from = match contact.effective_sender() {
            Some(sender) => parse_mailbox(sender)?,
            None => to.clone(),
        };

        let builder = match smtp.security() {
            SmtpSecurity::Implicit => {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)?
            }
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(
                    &smtp.host,
                )?
            }
        };
        let transport = builder
            .port(smtp.port)
            .credentials(Credentials::new(
                smtp.username.clone(),
                smtp.password.clone(),
            ))
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        debug!(
            host = %smtp.host,
            port = smtp.port,
            security = ?smtp.security(),
            "smtp transport configured"
        );
        Ok(Some(Self { transport, from, to }))
    }

    pub fn message_for(
        &self,
        request: &ContactRequest,
    ) -> Result<Message, MailError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(compose::subject_line(request));

        // A malformed reply address should not cost the inquiry.
        match request.email.parse::<Address>() {
            Ok(address) => {
                builder = builder
                    .reply_to(Mailbox::new(Some(request.name.clone()), address));
            }
            Err(err) => {
                warn!(error = %err, "submitter email is not a valid reply-to address");
            }
        }

        Ok(builder.multipart(MultiPart::alternative_plain_html(
            compose::text_body(request),
            compose::html_body(request),
        ))?)
    }
}

#[async_trait]
impl ContactMailer for SmtpMailer {
    async fn send(&self, request: &ContactRequest) -> Result<(), MailError> {
        let message = self.message_for(request)?;
        let response = self.transport.send(message).await?;
        debug!(code = %response.code(), "smtp relay accepted inquiry");
        Ok(())
    }

    async fn verify(&self) -> Result<(), MailError> {
        if self.transport.test_connection().await? {
            Ok(())
        } else {
            Err(MailError::Unverified)
        }
    }
}

fn parse_mailbox(value: &str) -> Result<Mailbox, MailError> {
    value.parse::<Mailbox>().map_err(|source| MailError::Address {
        value: value.to_string(),
        source,
    })
}
