//! Gallery catalog, render contract and the client view-state machine.

pub mod catalog;
pub mod controller;
pub mod lightbox;
pub mod view_state;

pub use catalog::{Catalog, CatalogError};
pub use controller::{Effect, Event, GalleryController, Key, Rejection};
pub use lightbox::{Lightbox, LightboxError};
pub use view_state::ViewState;
