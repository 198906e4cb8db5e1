use std::path::{Path, PathBuf};

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use optimus_model::routes::assets;
use thiserror::Error;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};
use tracing::warn;

use crate::infra::app_state::AppState;

/// Extensions tried, in order, when an `/Images` path has no exact match.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "svg", "webp"];

/// Refusals for profile downloads, answered as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DownloadError {
    #[error("Invalid filename")]
    InvalidFilename,
    #[error("Access denied")]
    AccessDenied,
    #[error("File not found")]
    NotFound,
}

impl DownloadError {
    pub fn status(self) -> StatusCode {
        match self {
            DownloadError::InvalidFilename => StatusCode::BAD_REQUEST,
            DownloadError::AccessDenied => StatusCode::FORBIDDEN,
            DownloadError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for DownloadError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Resolve a requested profile document to a file inside `profile_dir`.
///
/// The name must be a single path component. After resolving symlinks the
/// file must still live under the directory.
pub async fn resolve_profile_file(
    profile_dir: &Path,
    filename: &str,
) -> Result<PathBuf, DownloadError> {
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return Err(DownloadError::InvalidFilename);
    }

    let root = tokio::fs::canonicalize(profile_dir)
        .await
        .map_err(|_| DownloadError::NotFound)?;
    let resolved = tokio::fs::canonicalize(root.join(filename))
        .await
        .map_err(|_| DownloadError::NotFound)?;

    if !resolved.starts_with(&root) {
        return Err(DownloadError::AccessDenied);
    }

    match tokio::fs::metadata(&resolved).await {
        Ok(meta) if meta.is_file() => Ok(resolved),
        _ => Err(DownloadError::NotFound),
    }
}

/// `/Profile/{*path}`. A single raw segment is a document download, so an
/// encoded `%2F` still counts as a separator inside the filename. Deeper
/// paths are served from the profile tree without a disposition header.
pub async fn profile_entry(
    State(state): State<AppState>,
    request: Request,
) -> Response {
    let raw = request
        .uri()
        .path()
        .strip_prefix(assets::PROFILE)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or_default()
        .to_owned();
    let profile_dir = state.config().site.profile_dir();

    if raw.contains('/') {
        return serve_profile_tree(profile_dir, &raw, request).await;
    }

    match urlencoding::decode(&raw) {
        Ok(filename) => profile_download(profile_dir, &filename, request).await,
        Err(_) => DownloadError::InvalidFilename.into_response(),
    }
}

async fn serve_profile_tree(
    profile_dir: &Path,
    raw: &str,
    mut request: Request,
) -> Response {
    match Uri::try_from(format!("/{raw}")) {
        Ok(uri) => *request.uri_mut() = uri,
        Err(_) => return StatusCode::NOT_FOUND.into_response(),
    }
    let Ok(response) = ServeDir::new(profile_dir).oneshot(request).await;
    response.map(Body::new)
}

async fn profile_download(
    profile_dir: &Path,
    filename: &str,
    request: Request,
) -> Response {
    let resolved = match resolve_profile_file(profile_dir, filename).await {
        Ok(path) => path,
        Err(err) => {
            warn!(filename = %filename, error = %err, "profile download refused");
            return err.into_response();
        }
    };

    let Ok(response) = ServeFile::new(&resolved).oneshot(request).await;
    let mut response = response.map(Body::new);

    if response.status().is_success() {
        match HeaderValue::from_str(&attachment_disposition(filename)) {
            Ok(value) => {
                response
                    .headers_mut()
                    .insert(header::CONTENT_DISPOSITION, value);
            }
            Err(err) => {
                warn!(error = %err, "could not encode content-disposition")
            }
        }
    }

    response
}

/// Fallback for `/Images`: retry the request path with each of
/// [`IMAGE_EXTENSIONS`] appended, so `/Images/hero` serves `hero.jpg`.
pub async fn serve_with_extensions(root: PathBuf, request: Request) -> Response {
    let Some(relative) = relative_request_path(request.uri().path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    for extension in IMAGE_EXTENSIONS {
        let mut candidate = root.join(&relative).into_os_string();
        candidate.push(".");
        candidate.push(extension);
        let candidate = PathBuf::from(candidate);

        let is_file = tokio::fs::metadata(&candidate)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if is_file {
            let Ok(response) = ServeFile::new(&candidate).oneshot(request).await;
            return response.map(Body::new);
        }
    }

    StatusCode::NOT_FOUND.into_response()
}

fn relative_request_path(path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(path).ok()?;
    let mut relative = PathBuf::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return None,
            s if s.contains('\\') || s.contains('\0') => return None,
            s => relative.push(s),
        }
    }
    if relative.as_os_str().is_empty() {
        None
    } else {
        Some(relative)
    }
}

/// `attachment` disposition keeping the original name. Names outside
/// printable ASCII get an RFC 5987 `filename*` next to a sanitized
/// `filename`.
fn attachment_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if fallback == filename {
        return format!("attachment; filename=\"{filename}\"");
    }

    let encoded = urlencoding::encode(filename);
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}
