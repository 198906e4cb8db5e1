use std::{
    collections::{BTreeSet, HashMap},
    fs,
    path::{Path, PathBuf},
};

use optimus_model::{
    CategoryKey, CategorySummary, GalleryCard, GalleryGroup, GalleryItem,
    GalleryView, MediaKind, NO_ITEMS_PLACEHOLDER,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("catalog item {index}: {reason}")]
    InvalidItem { index: usize, reason: String },
}

/// On-disk shape of `catalog.toml`. Category keys stay strings here so a
/// bad key can be reported against the item that carries it.
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    src: String,
    #[serde(default)]
    alt: String,
    #[serde(default)]
    caption: String,
    #[serde(default, alias = "type")]
    kind: MediaKind,
    #[serde(default)]
    categories: Vec<String>,
    group: String,
    #[serde(default)]
    client: Option<String>,
}

impl RawItem {
    fn validate(self, index: usize) -> Result<GalleryItem, CatalogError> {
        let invalid = |reason: String| CatalogError::InvalidItem { index, reason };

        if self.src.trim().is_empty() {
            return Err(invalid("`src` must not be empty".into()));
        }
        if self.group.trim().is_empty() {
            return Err(invalid("`group` must not be empty".into()));
        }
        if self.categories.is_empty() {
            return Err(invalid("at least one category is required".into()));
        }

        let mut categories = BTreeSet::new();
        for raw in &self.categories {
            let key = CategoryKey::parse(raw).ok_or_else(|| {
                invalid(format!("unknown category key `{raw}`"))
            })?;
            categories.insert(key);
        }

        Ok(GalleryItem {
            source: self.src.trim().to_string(),
            alt_text: self.alt,
            caption: self.caption,
            media_kind: self.kind,
            categories,
            group_label: self.group.trim().to_string(),
            client_label: self
                .client
                .map(|client| client.trim().to_string())
                .filter(|client| !client.is_empty()),
        })
    }
}

/// The immutable gallery catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<GalleryItem>,
}

impl Catalog {
    pub fn from_items(items: Vec<GalleryItem>) -> Self {
        Self { items }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(contents)?;
        let items = file
            .items
            .into_iter()
            .enumerate()
            .map(|(index, raw)| raw.validate(index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { items })
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents =
            fs::read_to_string(path).map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let catalog = Self::from_toml_str(&contents)?;
        debug!(
            path = %path.display(),
            items = catalog.len(),
            "gallery catalog loaded"
        );
        Ok(catalog)
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count_in(&self, category: CategoryKey) -> usize {
        self.items
            .iter()
            .filter(|item| item.in_category(category))
            .count()
    }

    pub fn summaries(&self) -> Vec<CategorySummary> {
        CategoryKey::ALL
            .into_iter()
            .map(|key| CategorySummary {
                key,
                name: key.display_name().to_string(),
                count: self.count_in(key),
            })
            .collect()
    }

    /// Render the gallery for one category.
    ///
    /// Matching items are grouped by label in first-seen order, keeping
    /// catalog order inside each group. Card indices run over the grouped
    /// order so they line up with [`GalleryView::display_sequence`].
    pub fn render(&self, category: CategoryKey) -> GalleryView {
        let title = category.display_name().to_string();

        let mut groups: Vec<GalleryGroup> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for item in self.items.iter().filter(|item| item.in_category(category))
        {
            let slot = *positions
                .entry(item.group_label.as_str())
                .or_insert_with(|| {
                    groups.push(GalleryGroup {
                        label: item.group_label.clone(),
                        cards: Vec::new(),
                    });
                    groups.len() - 1
                });
            groups[slot].cards.push(GalleryCard {
                index: 0,
                item: item.clone(),
            });
        }

        if groups.is_empty() {
            return GalleryView::Empty {
                category,
                title,
                message: NO_ITEMS_PLACEHOLDER.to_string(),
            };
        }

        let mut next_index = 0;
        for card in groups.iter_mut().flat_map(|group| group.cards.iter_mut())
        {
            card.index = next_index;
            next_index += 1;
        }

        GalleryView::Groups {
            category,
            title,
            groups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(src: &str, group: &str, categories: &[CategoryKey]) -> GalleryItem {
        GalleryItem {
            source: src.into(),
            alt_text: String::new(),
            caption: String::new(),
            media_kind: MediaKind::Image,
            categories: categories.iter().copied().collect(),
            group_label: group.into(),
            client_label: None,
        }
    }

    #[test]
    fn single_wash_item_renders_one_group() {
        let catalog = Catalog::from_items(vec![item(
            "Images/borehole.jpg",
            "Chongwe Borehole",
            &[CategoryKey::WashProjects],
        )]);

        match catalog.render(CategoryKey::WashProjects) {
            GalleryView::Groups { groups, .. } => {
                assert_eq!(groups.len(), 1);
                assert_eq!(groups[0].label, "Chongwe Borehole");
                assert_eq!(groups[0].cards.len(), 1);
                assert_eq!(groups[0].cards[0].item.source, "Images/borehole.jpg");
            }
            other => panic!("expected groups, got {other:?}"),
        }

        match catalog.render(CategoryKey::Residential) {
            GalleryView::Empty { message, .. } => {
                assert_eq!(message, NO_ITEMS_PLACEHOLDER)
            }
            other => panic!("expected placeholder, got {other:?}"),
        }
    }

    #[test]
    fn groups_keep_first_seen_order_and_indices_follow_display_order() {
        let cat = [CategoryKey::Commercial];
        let catalog = Catalog::from_items(vec![
            item("a1", "Mall", &cat),
            item("b1", "Office", &cat),
            item("skip", "Mall", &[CategoryKey::Residential]),
            item("a2", "Mall", &cat),
            item("b2", "Office", &cat),
        ]);

        let view = catalog.render(CategoryKey::Commercial);
        let GalleryView::Groups { groups, .. } = &view else {
            panic!("expected groups");
        };
        let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, ["Mall", "Office"]);

        let order: Vec<_> = groups
            .iter()
            .flat_map(|g| g.cards.iter())
            .map(|c| (c.index, c.item.source.as_str()))
            .collect();
        assert_eq!(order, [(0, "a1"), (1, "a2"), (2, "b1"), (3, "b2")]);

        let sequence: Vec<_> = view
            .display_sequence()
            .into_iter()
            .map(|i| i.source)
            .collect();
        assert_eq!(sequence, ["a1", "a2", "b1", "b2"]);
    }

    #[test]
    fn toml_catalog_parses_kinds_and_clients() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[items]]
            src = "Images/site.mp4"
            alt = "Site walk"
            kind = "video"
            categories = ["industrial", "commercial"]
            group = "Kafue Warehouse"
            client = " Zambeef "

            [[items]]
            src = "Images/slab.jpg"
            categories = ["industrial"]
            group = "Kafue Warehouse"
            client = ""
            "#,
        )
        .expect("catalog parses");

        assert_eq!(catalog.len(), 2);
        let video = &catalog.items()[0];
        assert!(video.is_video());
        assert_eq!(video.client_label.as_deref(), Some("Zambeef"));
        assert!(video.in_category(CategoryKey::Commercial));
        assert_eq!(catalog.items()[1].client_label, None);
        assert_eq!(catalog.count_in(CategoryKey::Industrial), 2);
    }

    #[test]
    fn unknown_category_names_the_item() {
        let err = Catalog::from_toml_str(
            r#"
            [[items]]
            src = "Images/ok.jpg"
            categories = ["residential"]
            group = "Ok"

            [[items]]
            src = "Images/bad.jpg"
            categories = ["bridges"]
            group = "Bad"
            "#,
        )
        .unwrap_err();

        match err {
            CatalogError::InvalidItem { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("bridges"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn items_without_categories_or_source_are_rejected() {
        let no_categories = Catalog::from_toml_str(
            "[[items]]\nsrc = \"a.jpg\"\ngroup = \"G\"\n",
        );
        assert!(matches!(
            no_categories,
            Err(CatalogError::InvalidItem { index: 0, .. })
        ));

        let blank_source = Catalog::from_toml_str(
            "[[items]]\nsrc = \" \"\ngroup = \"G\"\ncategories = [\"residential\"]\n",
        );
        assert!(matches!(
            blank_source,
            Err(CatalogError::InvalidItem { index: 0, .. })
        ));
    }

    #[test]
    fn summaries_cover_every_key() {
        let catalog = Catalog::from_items(vec![item(
            "x",
            "G",
            &[CategoryKey::CivilWorks, CategoryKey::Residential],
        )]);
        let summaries = catalog.summaries();
        assert_eq!(summaries.len(), CategoryKey::ALL.len());
        let civil = summaries
            .iter()
            .find(|s| s.key == CategoryKey::CivilWorks)
            .unwrap();
        assert_eq!(civil.count, 1);
        assert_eq!(civil.name, "Civil Works");
    }
}
