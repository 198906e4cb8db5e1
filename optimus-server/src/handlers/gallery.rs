use axum::{
    Json,
    extract::{Query, State},
};
use optimus_model::{CategoryKey, CategorySummary, GalleryView};
use serde::Deserialize;
use tracing::debug;

use crate::infra::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct GalleryQuery {
    #[serde(rename = "type")]
    pub category: Option<String>,
}

/// Rendered view for `?type=`. A missing or unknown key yields the landing
/// view, the same fallback the page applies to its own URL.
pub async fn gallery_view(
    State(state): State<AppState>,
    Query(query): Query<GalleryQuery>,
) -> Json<GalleryView> {
    let Some(raw) = query.category.as_deref() else {
        return Json(GalleryView::Landing);
    };

    match CategoryKey::parse(raw) {
        Some(category) => Json(state.catalog.render(category)),
        None => {
            debug!(requested = raw, "unknown gallery category; showing landing");
            Json(GalleryView::Landing)
        }
    }
}

pub async fn gallery_categories(
    State(state): State<AppState>,
) -> Json<Vec<CategorySummary>> {
    Json(state.catalog.summaries())
}
