use crate::error::{ModelError, Result};

/// Contact form body as it arrives on the wire. Every field is optional so
/// that a partial body still parses and can be rejected with a validation
/// error instead of a decode error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactPayload {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub email: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub subject: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub message: Option<String>,
}

/// A contact request with all four fields present and non-blank. Values are
/// stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactPayload {
    pub fn validate(self) -> Result<ContactRequest> {
        Ok(ContactRequest {
            name: required("name", self.name)?,
            email: required("email", self.email)?,
            subject: required("subject", self.subject)?,
            message: required("message", self.message)?,
        })
    }
}

impl From<ContactRequest> for ContactPayload {
    fn from(request: ContactRequest) -> Self {
        Self {
            name: Some(request.name),
            email: Some(request.email),
            subject: Some(request.subject),
            message: Some(request.message),
        }
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => {
            Ok(value.trim().to_string())
        }
        _ => Err(ModelError::MissingField(field)),
    }
}

/// Success body returned by the relay endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactResponse {
    pub success: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub message: Option<String>,
}
