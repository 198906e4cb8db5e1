use std::convert::Infallible;

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use optimus_model::routes::{self, assets, contact, gallery};
use tower::service_fn;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::warn;

use crate::{
    handlers::{
        assets::{profile_entry, serve_with_extensions},
        contact::{
            method_not_allowed, preflight, submit_hosted_inquiry,
            submit_inquiry,
        },
        gallery::{gallery_categories, gallery_view},
        health::{health_handler, ping_handler},
    },
    infra::app_state::AppState,
};

pub fn create_app(state: AppState) -> Router {
    let site = &state.config().site;

    let images_root = site.images_dir.clone();
    let images = ServeDir::new(&images_root).fallback(service_fn(
        move |request: Request| {
            let root = images_root.clone();
            async move {
                Ok::<_, Infallible>(serve_with_extensions(root, request).await)
            }
        },
    ));
    let static_files = ServeDir::new(site.static_dir());

    Router::new()
        .route(routes::PING, get(ping_handler))
        .route(routes::HEALTH, get(health_handler))
        .route(
            contact::SUBMIT,
            post(submit_inquiry)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            contact::HOSTED_SUBMIT,
            post(submit_hosted_inquiry)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(gallery::VIEW, get(gallery_view))
        .route(gallery::CATEGORIES, get(gallery_categories))
        .route(assets::PROFILE_PATH, get(profile_entry))
        .nest_service(assets::IMAGES, images)
        .fallback_service(static_files)
        .layer(cors_layer(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let cors = &state.config().cors;

    let origins = if cors.is_wildcard_included() {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = cors
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!(origin = %origin, error = %err, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
