use std::collections::BTreeSet;

use crate::{category::CategoryKey, media_kind::MediaKind};

/// One entry of the static gallery catalog.
///
/// Items are built once when the catalog is loaded and never mutated after.
/// The serialized field names follow the catalog file format (`src`, `alt`,
/// `kind`, `group`, `client`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GalleryItem {
    #[cfg_attr(feature = "serde", serde(rename = "src"))]
    pub source: String,
    #[cfg_attr(feature = "serde", serde(rename = "alt", default))]
    pub alt_text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub caption: String,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "kind", alias = "type", default)
    )]
    pub media_kind: MediaKind,
    pub categories: BTreeSet<CategoryKey>,
    #[cfg_attr(feature = "serde", serde(rename = "group"))]
    pub group_label: String,
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "client",
            default,
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub client_label: Option<String>,
}

impl GalleryItem {
    pub fn in_category(&self, category: CategoryKey) -> bool {
        self.categories.contains(&category)
    }

    pub fn is_video(&self) -> bool {
        self.media_kind.is_video()
    }
}
