use optimus_model::ContactPayload;
use tracing::{error, info};

use super::relay::ContactRelay;

pub const SENDING_TEXT: &str = "Sending...";
pub const INVALID_TEXT: &str = "Please fill in all fields.";
pub const SENT_TEXT: &str = "Thank you! Your message has been sent.";
pub const FAILED_TEXT: &str =
    "Sorry, we couldn't send your message. Please try again.";

/// What the status line under the form shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Invalid,
    Sending,
    Sent,
    Failed,
}

impl FormStatus {
    pub fn text(&self) -> &'static str {
        match self {
            FormStatus::Idle => "",
            FormStatus::Invalid => INVALID_TEXT,
            FormStatus::Sending => SENDING_TEXT,
            FormStatus::Sent => SENT_TEXT,
            FormStatus::Failed => FAILED_TEXT,
        }
    }

    /// Extra class on the status element next to `form-status`.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            FormStatus::Sent => Some("success"),
            FormStatus::Invalid | FormStatus::Failed => Some("error"),
            FormStatus::Idle | FormStatus::Sending => None,
        }
    }
}

/// The contact form's fields and status line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    status: FormStatus,
}

impl ContactForm {
    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Validate locally and, if every field is filled in, send through
    /// `relay`. Nothing is sent when a field is blank. On success the fields
    /// are cleared.
    pub async fn submit<R>(&mut self, relay: &R) -> &FormStatus
    where
        R: ContactRelay + ?Sized,
    {
        let payload = ContactPayload {
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            subject: Some(self.subject.clone()),
            message: Some(self.message.clone()),
        };

        let request = match payload.validate() {
            Ok(request) => request,
            Err(err) => {
                info!(error = %err, "contact form blocked by local validation");
                self.status = FormStatus::Invalid;
                return &self.status;
            }
        };

        self.status = FormStatus::Sending;

        match relay.submit(&request).await {
            Ok(_) => {
                self.reset_fields();
                self.status = FormStatus::Sent;
            }
            Err(err) => {
                error!(error = %err, "contact form error");
                self.status = FormStatus::Failed;
            }
        }

        &self.status
    }

    fn reset_fields(&mut self) {
        self.name.clear();
        self.email.clear();
        self.subject.clear();
        self.message.clear();
    }
}
