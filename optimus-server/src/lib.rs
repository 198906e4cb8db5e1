//! Site server for Optimus: static pages and images, profile downloads,
//! the gallery API and the contact form mail relay.

pub mod handlers;
pub mod infra;
pub mod mail;
pub mod routes;
pub mod site_build;

pub use infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
    startup::{NoopStartupHooks, ProdStartupHooks, StartupHooks},
};
pub use routes::create_app;
