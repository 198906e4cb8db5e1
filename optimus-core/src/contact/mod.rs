//! Client side of the contact form: local validation, status line and the
//! relay seam.

pub mod form;
pub mod relay;

pub use form::{ContactForm, FormStatus};
pub use relay::{ContactRelay, HttpContactRelay, RelayError};
