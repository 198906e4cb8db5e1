use std::{fmt, sync::Arc};

use anyhow::Context;
use optimus_config::Config;
use optimus_core::gallery::{Catalog, CatalogError};
use tracing::{error, info, warn};

use crate::mail::{ContactMailer, SmtpMailer};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<Catalog>,
    /// `None` when SMTP or the recipient is not configured.
    pub mailer: Option<Arc<dyn ContactMailer>>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("catalog_items", &self.catalog.len())
            .field("mailer", &self.mailer.is_some())
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        catalog: Arc<Catalog>,
        mailer: Option<Arc<dyn ContactMailer>>,
    ) -> Self {
        Self {
            config,
            catalog,
            mailer,
        }
    }

    /// Load the gallery catalog and build the SMTP mailer.
    ///
    /// A missing catalog file gives an empty gallery and a broken one is a
    /// startup error. Mail settings that cannot form a mailer disable the
    /// relay instead of stopping the server.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let catalog_path = &config.site.catalog_path;
        let catalog = match Catalog::load(catalog_path) {
            Ok(catalog) => {
                info!(
                    path = %catalog_path.display(),
                    items = catalog.len(),
                    "gallery catalog loaded"
                );
                catalog
            }
            Err(CatalogError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                warn!(path = %catalog_path.display(), "gallery catalog not found; gallery is empty");
                Catalog::from_items(Vec::new())
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to load gallery catalog {}", catalog_path.display())
                });
            }
        };

        let mailer: Option<Arc<dyn ContactMailer>> = match config.smtp.as_ref() {
            Some(smtp) => match SmtpMailer::from_config(smtp, &config.contact) {
                Ok(Some(mailer)) => Some(Arc::new(mailer)),
                Ok(None) => None,
                Err(err) => {
                    error!(error = %err, "invalid mail settings; contact relay disabled");
                    None
                }
            },
            None => None,
        };

        Ok(Self::new(Arc::new(config), Arc::new(catalog), mailer))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
