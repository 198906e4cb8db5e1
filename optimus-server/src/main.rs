use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args as ClapArgs, Parser, Subcommand};
use optimus_config::{Config, ConfigLoad, ConfigLoader, ConfigLoaderOptions};
use optimus_server::{
    AppState, ProdStartupHooks, StartupHooks, create_app,
    mail::{ContactMailer, SmtpMailer},
    site_build::build_site,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "optimus-server")]
#[command(about = "Site server and contact mail relay for Optimus")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Path to optimus.toml (overrides OPTIMUS_CONFIG and default locations)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Alternate .env file to load before reading the environment
    #[arg(long, env = "OPTIMUS_ENV_FILE", global = true)]
    env_file: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long)]
    host: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the site (default)
    Serve,
    /// Copy Images/ and Profile/ into the static directory and exit
    Build,
    /// Connect and authenticate to the SMTP relay, then exit
    CheckSmtp,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_runtime_config(&cli.serve)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_server(config).await,
        Command::Build => run_build(&config),
        Command::CheckSmtp => run_check_smtp(&config).await,
    }
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let ConfigLoad {
        mut config,
        warnings,
    } = ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: args.config.clone(),
        env_file: args.env_file.clone(),
    })
    .load()
    .context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = config.metadata.config_path.as_ref() {
        info!(path = %path.display(), "configuration file loaded");
    }
    if config.metadata.smtp_password_from_file {
        info!("SMTP password read from secret file");
    }

    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => {
                warn!(message = %warning.message, "configuration warning")
            }
        }
    }

    config
        .normalize_paths()
        .context("failed to resolve site directories")?;

    Ok(config)
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState::from_config(config)?;
    ProdStartupHooks
        .run(&state)
        .await
        .context("startup hooks failed")?;

    let router = create_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("Optimus site server listening on http://{addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn run_build(config: &Config) -> anyhow::Result<()> {
    let report = build_site(&config.site)?;
    info!(
        files = report.files_copied,
        skipped = report.skipped.len(),
        target = %config.site.static_dir.display(),
        "site build complete"
    );
    Ok(())
}

async fn run_check_smtp(config: &Config) -> anyhow::Result<()> {
    let Some(smtp) = config.smtp.as_ref() else {
        bail!("SMTP relay is not configured");
    };
    let Some(mailer) = SmtpMailer::from_config(smtp, &config.contact)? else {
        bail!("CONTACT_RECIPIENT is not configured");
    };

    mailer
        .verify()
        .await
        .with_context(|| format!("SMTP check against {}:{} failed", smtp.host, smtp.port))?;
    info!(host = %smtp.host, port = smtp.port, "SMTP server is ready to take messages");
    Ok(())
}
