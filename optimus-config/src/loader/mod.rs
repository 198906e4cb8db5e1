pub mod error;
mod secrets;

use once_cell::sync::Lazy;
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::{
    constants::{
        DEFAULT_CATALOG_FILE, DEFAULT_HOST, DEFAULT_IMAGES_DIR, DEFAULT_PORT,
        DEFAULT_PROFILE_DIR, DEFAULT_SMTP_PORT, DEFAULT_STATIC_DIR,
    },
    models::{
        Config, ConfigMetadata, ContactConfig, CorsConfig, ServerConfig,
        SiteConfig, SmtpConfig,
        sources::{EnvConfig, FileConfig, FileSmtpConfig},
    },
    util::{non_blank, under_root},
    validation::{self, ConfigWarnings},
};
use error::ConfigLoadError;
use secrets::read_secret_file;

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("optimus.toml"),
        PathBuf::from("config/optimus.toml"),
    ]
});

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

/// A composed configuration plus everything worth telling the operator.
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Load `.env`, read the process environment and compose.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        self.load_from(EnvConfig::gather(), env_file_loaded)
    }

    /// Compose from an already-gathered environment without touching the
    /// process environment or `.env`.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        self.load_from(env, false)
    }

    fn load_from(
        &self,
        env: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let config_present = config_path.is_some();

        let (config, mut warnings) = self.compose_config(
            file_config,
            env,
            config_path,
            env_file_loaded,
        )?;

        if !config_present {
            warnings.push_with_hint(
                "No optimus.toml detected; using environment variables and defaults",
                "Create optimus.toml or pass --config to set site paths explicitly",
            );
        }
        warnings.extend(validation::check(&config));

        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        // An explicitly named file must exist; the default locations are
        // only probed.
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(found) => found.clone(),
                None => return Ok((None, None)),
            },
        };

        let contents =
            fs::read_to_string(&path).map_err(|err| ConfigLoadError::Io {
                path: path.clone(),
                source: err,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|err| {
                ConfigLoadError::Parse {
                    path: path.clone(),
                    source: err,
                }
            })?;

        debug!(path = %path.display(), "loaded configuration file");
        Ok((Some(file_config), Some(path)))
    }

    fn compose_config(
        &self,
        file_config: Option<FileConfig>,
        env: EnvConfig,
        config_path: Option<PathBuf>,
        env_file_loaded: bool,
    ) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
        let mut warnings = ConfigWarnings::default();

        let FileConfig {
            server: file_server,
            site: file_site,
            smtp: file_smtp,
            contact: file_contact,
            cors: file_cors,
            dev_mode: file_dev_mode,
        } = file_config.unwrap_or_default();

        let server = ServerConfig {
            host: env
                .server_host
                .clone()
                .or(file_server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: env.server_port.or(file_server.port).unwrap_or(DEFAULT_PORT),
        };

        let root = env
            .site_root
            .clone()
            .or(file_site.root)
            .unwrap_or_else(|| PathBuf::from("."));
        let site_path = |env_value: Option<PathBuf>,
                         file_value: Option<PathBuf>,
                         default: &str| {
            under_root(
                &root,
                env_value
                    .or(file_value)
                    .unwrap_or_else(|| PathBuf::from(default)),
            )
        };
        let site = SiteConfig {
            static_dir: site_path(
                env.static_dir.clone(),
                file_site.static_dir,
                DEFAULT_STATIC_DIR,
            ),
            images_dir: site_path(
                env.images_dir.clone(),
                file_site.images_dir,
                DEFAULT_IMAGES_DIR,
            ),
            profile_dir: site_path(
                env.profile_dir.clone(),
                file_site.profile_dir,
                DEFAULT_PROFILE_DIR,
            ),
            catalog_path: site_path(
                env.catalog_path.clone(),
                file_site.catalog,
                DEFAULT_CATALOG_FILE,
            ),
            root: root.clone(),
        };

        let (smtp, password_from_file) =
            Self::resolve_smtp(&env, file_smtp.unwrap_or_default(), &mut warnings)?;

        let contact = ContactConfig {
            recipient: env
                .contact_recipient
                .clone()
                .or_else(|| non_blank(file_contact.recipient)),
            sender: env
                .contact_sender
                .clone()
                .or_else(|| non_blank(file_contact.sender)),
        };

        let cors = CorsConfig {
            allowed_origins: env
                .cors_allowed_origins
                .clone()
                .or(file_cors.allowed_origins)
                .filter(|origins| !origins.is_empty())
                .unwrap_or_else(|| vec!["*".to_string()]),
        };

        let config = Config {
            server,
            site,
            smtp,
            contact,
            cors,
            dev_mode: env.dev_mode.or(file_dev_mode).unwrap_or(false),
            metadata: ConfigMetadata {
                config_path,
                env_file_loaded,
                smtp_password_from_file: password_from_file,
            },
        };

        Ok((config, warnings))
    }

    /// SMTP is all-or-nothing: a relay missing its host, user or password is
    /// dropped with a warning so the rest of the site keeps serving.
    fn resolve_smtp(
        env: &EnvConfig,
        file: FileSmtpConfig,
        warnings: &mut ConfigWarnings,
    ) -> Result<(Option<SmtpConfig>, bool), ConfigLoadError> {
        let host = env.smtp_host.clone().or_else(|| non_blank(file.host));
        let username = env.smtp_user.clone().or_else(|| non_blank(file.username));
        let port = env.smtp_port.or(file.port).unwrap_or(DEFAULT_SMTP_PORT);

        let mut from_file = false;
        let password = match (&env.smtp_pass, &env.smtp_pass_file) {
            (Some(pass), _) => Some(pass.clone()),
            (None, Some(path)) => {
                from_file = true;
                read_secret_file(path)?
            }
            (None, None) => match (non_blank(file.password), file.password_file) {
                (Some(pass), _) => Some(pass),
                (None, Some(path)) => {
                    from_file = true;
                    read_secret_file(&path)?
                }
                (None, None) => None,
            },
        };

        match (host, username, password) {
            (Some(host), Some(username), Some(password)) => Ok((
                Some(SmtpConfig {
                    host,
                    port,
                    username,
                    password,
                }),
                from_file,
            )),
            (None, None, None) => Ok((None, false)),
            (host, username, password) => {
                let missing: Vec<&str> = [
                    host.is_none().then_some("SMTP_HOST"),
                    username.is_none().then_some("SMTP_USER"),
                    password.is_none().then_some("SMTP_PASS"),
                ]
                .into_iter()
                .flatten()
                .collect();
                warnings.push_with_hint(
                    format!("SMTP partially configured; missing {}", missing.join(", ")),
                    "Set every SMTP variable or none of them",
                );
                Ok((None, false))
            }
        }
    }
}
