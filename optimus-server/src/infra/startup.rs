use anyhow::Result;
use async_trait::async_trait;
use tracing::{error, info, warn};

use super::app_state::AppState;

#[async_trait]
pub trait StartupHooks: Send + Sync {
    async fn run(&self, state: &AppState) -> Result<()>;
}

/// Checks the SMTP relay once at boot. A failed check is logged and the
/// server keeps running; submissions will fail until the relay recovers.
#[derive(Debug, Default)]
pub struct ProdStartupHooks;

#[async_trait]
impl StartupHooks for ProdStartupHooks {
    async fn run(&self, state: &AppState) -> Result<()> {
        let Some(mailer) = state.mailer.as_ref() else {
            warn!("contact relay disabled; inquiries will return a configuration error");
            return Ok(());
        };

        match mailer.verify().await {
            Ok(()) => info!("SMTP server is ready to take messages"),
            Err(err) => error!(error = %err, "SMTP configuration error"),
        }

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct NoopStartupHooks;

#[async_trait]
impl StartupHooks for NoopStartupHooks {
    async fn run(&self, _state: &AppState) -> Result<()> {
        Ok(())
    }
}
