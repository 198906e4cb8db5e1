//! Core data model definitions shared across Optimus crates.
#![allow(missing_docs)]

pub mod category;
pub mod contact;
pub mod error;
pub mod gallery;
pub mod media_kind;
pub mod routes;
pub mod view;

pub use category::CategoryKey;
pub use contact::{ContactPayload, ContactRequest, ContactResponse};
pub use error::{ModelError, Result as ModelResult};
pub use gallery::GalleryItem;
pub use media_kind::MediaKind;
pub use view::{
    CategorySummary, GalleryCard, GalleryGroup, GalleryView,
    NO_ITEMS_PLACEHOLDER,
};
