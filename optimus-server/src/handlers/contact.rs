use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use optimus_model::{ContactPayload, ContactResponse, ModelError};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    infra::{
        app_state::AppState,
        errors::{AppError, AppResult},
    },
    mail::MailError,
};

pub const FIELDS_REQUIRED: &str = "All fields are required.";
pub const CONFIGURATION_ERROR: &str = "Server configuration error.";
pub const INQUIRY_SENT: &str = "Inquiry sent successfully.";

/// Which of the two relay endpoints took the request. They differ only in
/// the wording of a delivery failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayRoute {
    SelfHosted,
    Hosted,
}

impl RelayRoute {
    pub fn delivery_failure(self) -> &'static str {
        match self {
            RelayRoute::SelfHosted => {
                "Failed to send inquiry. Please try again later."
            }
            RelayRoute::Hosted => "Failed to send inquiry.",
        }
    }
}

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("malformed inquiry body: {0}")]
    Malformed(String),
    #[error("invalid inquiry: {0}")]
    Invalid(#[from] ModelError),
    #[error("contact relay is not configured")]
    NotConfigured,
    #[error(transparent)]
    Delivery(#[from] MailError),
}

impl ContactError {
    /// Map to the response body. Delivery details never leave the server.
    fn into_app_error(self, route: RelayRoute) -> AppError {
        match self {
            ContactError::Malformed(_) | ContactError::Invalid(_) => {
                AppError::bad_request(FIELDS_REQUIRED)
            }
            ContactError::NotConfigured => {
                AppError::internal(CONFIGURATION_ERROR)
            }
            ContactError::Delivery(_) => {
                AppError::internal(route.delivery_failure())
            }
        }
    }
}

pub async fn submit_inquiry(
    State(state): State<AppState>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> AppResult<Json<ContactResponse>> {
    relay_inquiry(&state, payload, RelayRoute::SelfHosted).await
}

pub async fn submit_hosted_inquiry(
    State(state): State<AppState>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> AppResult<Json<ContactResponse>> {
    relay_inquiry(&state, payload, RelayRoute::Hosted).await
}

/// Plain `OPTIONS` answer; CORS preflights are handled by the CORS layer
/// before reaching here.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed()
}

async fn relay_inquiry(
    state: &AppState,
    payload: Result<Json<ContactPayload>, JsonRejection>,
    route: RelayRoute,
) -> AppResult<Json<ContactResponse>> {
    match deliver(state, payload).await {
        Ok(()) => {
            info!(route = ?route, "inquiry relayed");
            Ok(Json(ContactResponse {
                success: true,
                message: Some(INQUIRY_SENT.to_string()),
            }))
        }
        Err(err) => {
            match &err {
                ContactError::Malformed(_) | ContactError::Invalid(_) => {
                    warn!(route = ?route, error = %err, "inquiry rejected")
                }
                ContactError::NotConfigured => {
                    error!(route = ?route, "missing SMTP or recipient configuration")
                }
                ContactError::Delivery(source) => {
                    error!(route = ?route, error = %source, "error sending email")
                }
            }
            Err(err.into_app_error(route))
        }
    }
}

async fn deliver(
    state: &AppState,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> Result<(), ContactError> {
    let Json(payload) =
        payload.map_err(|rejection| ContactError::Malformed(rejection.body_text()))?;
    let request = payload.validate()?;

    let mailer = state.mailer.as_ref().ok_or(ContactError::NotConfigured)?;
    mailer.send(&request).await?;
    Ok(())
}
