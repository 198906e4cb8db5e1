use crate::{category::CategoryKey, gallery::GalleryItem};

/// Text shown in place of the card grid when a category has no items.
pub const NO_ITEMS_PLACEHOLDER: &str = "No projects found in this category yet.";

/// Result of a render pass for the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "view", rename_all = "snake_case")
)]
pub enum GalleryView {
    Landing,
    /// Terminal, non-error state for a category without matching items.
    Empty {
        category: CategoryKey,
        title: String,
        message: String,
    },
    Groups {
        category: CategoryKey,
        title: String,
        groups: Vec<GalleryGroup>,
    },
}

/// Items sharing a group label, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GalleryGroup {
    pub label: String,
    pub cards: Vec<GalleryCard>,
}

/// A rendered item. `index` addresses the display sequence handed to the
/// lightbox, so it follows the grouped order on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GalleryCard {
    pub index: usize,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub item: GalleryItem,
}

impl GalleryView {
    pub fn category(&self) -> Option<CategoryKey> {
        match self {
            GalleryView::Landing => None,
            GalleryView::Empty { category, .. }
            | GalleryView::Groups { category, .. } => Some(*category),
        }
    }

    pub fn card_count(&self) -> usize {
        match self {
            GalleryView::Groups { groups, .. } => {
                groups.iter().map(|group| group.cards.len()).sum()
            }
            _ => 0,
        }
    }

    /// Items in the order their cards appear on screen.
    pub fn display_sequence(&self) -> Vec<GalleryItem> {
        match self {
            GalleryView::Groups { groups, .. } => groups
                .iter()
                .flat_map(|group| group.cards.iter())
                .map(|card| card.item.clone())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Landing-page entry for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategorySummary {
    pub key: CategoryKey,
    pub name: String,
    pub count: usize,
}
