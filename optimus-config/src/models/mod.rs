pub mod sources;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::IMPLICIT_TLS_PORT;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub smtp: Option<SmtpConfig>,
    pub contact: ContactConfig,
    pub cors: CorsConfig,
    pub dev_mode: bool,
    pub metadata: ConfigMetadata,
}

impl Config {
    /// Canonicalize the site directories that exist so request handlers can
    /// compare resolved paths against them directly.
    pub fn normalize_paths(&mut self) -> anyhow::Result<()> {
        self.site.normalize_paths()
    }

    /// True when both the SMTP transport and a recipient are configured.
    pub fn mail_relay_enabled(&self) -> bool {
        self.smtp.is_some() && self.contact.recipient.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where the site's files live on disk.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub root: PathBuf,
    pub static_dir: PathBuf,
    pub images_dir: PathBuf,
    pub profile_dir: PathBuf,
    pub catalog_path: PathBuf,
}

impl SiteConfig {
    fn normalize_paths(&mut self) -> anyhow::Result<()> {
        for dir in [
            &mut self.root,
            &mut self.static_dir,
            &mut self.images_dir,
            &mut self.profile_dir,
        ] {
            if dir.exists() {
                *dir = std::fs::canonicalize(&*dir)?;
            }
        }
        Ok(())
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    pub fn profile_dir(&self) -> &Path {
        &self.profile_dir
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// TLS from the first byte (port 465).
    Implicit,
    /// Plain connection upgraded with STARTTLS, which is required.
    StartTls,
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl SmtpConfig {
    pub fn security(&self) -> SmtpSecurity {
        if self.port == IMPLICIT_TLS_PORT {
            SmtpSecurity::Implicit
        } else {
            SmtpSecurity::StartTls
        }
    }
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactConfig {
    pub recipient: Option<String>,
    pub sender: Option<String>,
}

impl ContactConfig {
    /// Address used in `From`; falls back to the recipient.
    pub fn effective_sender(&self) -> Option<&str> {
        self.sender.as_deref().or(self.recipient.as_deref())
    }
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn is_wildcard_included(&self) -> bool {
        self.allowed_origins.is_empty()
            || self
                .allowed_origins
                .iter()
                .any(|origin| origin.trim() == "*")
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
    pub smtp_password_from_file: bool,
}
