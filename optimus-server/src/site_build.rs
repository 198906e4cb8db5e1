//! Assemble the deployable site: copy the image and profile trees into the
//! static directory so a plain file host can serve everything from one root.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use optimus_config::SiteConfig;
use optimus_model::routes::assets;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub files_copied: usize,
    /// Source trees that did not exist.
    pub skipped: Vec<PathBuf>,
}

pub fn build_site(site: &SiteConfig) -> Result<BuildReport> {
    let mut report = BuildReport::default();

    fs::create_dir_all(site.static_dir()).with_context(|| {
        format!("failed to create {}", site.static_dir().display())
    })?;

    for (source, prefix) in [
        (site.images_dir(), assets::IMAGES),
        (site.profile_dir(), assets::PROFILE),
    ] {
        let target = site.static_dir().join(prefix.trim_start_matches('/'));

        if !source.is_dir() {
            warn!(source = %source.display(), "source tree missing; skipping");
            report.skipped.push(source.to_path_buf());
            continue;
        }

        let copied = copy_tree(source, &target)?;
        info!(
            source = %source.display(),
            target = %target.display(),
            files = copied,
            "copied site assets"
        );
        report.files_copied += copied;
    }

    Ok(report)
}

/// Recursively copy `source` into `target`, overwriting existing files.
fn copy_tree(source: &Path, target: &Path) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.with_context(|| {
            format!("failed to walk {}", source.display())
        })?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .with_context(|| format!("{} escaped its root", entry.path().display()))?;
        let destination = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination).with_context(|| {
                format!("failed to create {}", destination.display())
            })?;
            continue;
        }

        fs::copy(entry.path(), &destination).with_context(|| {
            format!(
                "failed to copy {} to {}",
                entry.path().display(),
                destination.display()
            )
        })?;
        debug!(file = %destination.display(), "copied");
        copied += 1;
    }

    Ok(copied)
}
