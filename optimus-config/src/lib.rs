//! Configuration library for the Optimus site server.
//!
//! Settings come from three layers: built-in defaults, an optional
//! `optimus.toml`, and the environment (including a `.env` file). The
//! environment wins over the file, and the file wins over defaults.
#![allow(missing_docs)]

pub mod constants;
pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError};
pub use models::{
    Config, ConfigMetadata, ContactConfig, CorsConfig, ServerConfig,
    SiteConfig, SmtpConfig, SmtpSecurity,
};
pub use validation::{ConfigWarning, ConfigWarnings};
