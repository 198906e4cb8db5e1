//! # Optimus Core
//!
//! Host-independent logic for the Optimus construction company site.
//!
//! ## Overview
//!
//! - **Catalog**: the static gallery catalog, loaded once from `catalog.toml`
//!   and validated against the fixed category key set
//! - **Gallery view-state machine**: landing vs. category view, URL
//!   synchronisation through the `type` query parameter, lightbox and mobile
//!   menu, all driven through one `update` entry point
//! - **Reveal observers**: visibility decisions for scroll animations
//! - **Contact flow**: local validation and submission through a
//!   [`contact::ContactRelay`]
//!
//! Nothing in this crate touches a DOM. The controller returns
//! [`gallery::Effect`] values and the presentation host applies them.
//!
//! ```no_run
//! use std::sync::Arc;
//! use optimus_core::gallery::{Catalog, Event, GalleryController};
//! use url::Url;
//!
//! let catalog = Arc::new(Catalog::default());
//! let url = Url::parse("https://optimusbcc.co.zm/gallery.html?type=residential").unwrap();
//! let (mut controller, _effects) = GalleryController::load(catalog, url);
//! let _effects = controller.update(Event::GoBack);
//! assert!(controller.url().query().is_none());
//! ```
#![allow(missing_docs)]

pub mod contact;
pub mod gallery;
pub mod reveal;

pub use optimus_model as model;
