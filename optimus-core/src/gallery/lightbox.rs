use optimus_model::GalleryItem;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LightboxError {
    #[error("cannot open a lightbox over an empty item list")]
    Empty,

    #[error("index {index} is out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Full-screen viewer over an ordered, non-empty item sequence.
///
/// `index` is always in `0..items.len()` and moves with wraparound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lightbox {
    items: Vec<GalleryItem>,
    index: usize,
}

impl Lightbox {
    pub fn open(
        items: Vec<GalleryItem>,
        index: usize,
    ) -> Result<Self, LightboxError> {
        if items.is_empty() {
            return Err(LightboxError::Empty);
        }
        if index >= items.len() {
            return Err(LightboxError::IndexOutOfRange {
                index,
                len: items.len(),
            });
        }
        Ok(Self { items, index })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn current(&self) -> &GalleryItem {
        &self.items[self.index]
    }

    pub fn next(&mut self) -> &GalleryItem {
        self.index = (self.index + 1) % self.items.len();
        self.current()
    }

    pub fn prev(&mut self) -> &GalleryItem {
        let len = self.items.len();
        self.index = (self.index + len - 1) % len;
        self.current()
    }
}
