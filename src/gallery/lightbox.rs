//! Lightbox: the full-size image overlay opened by clicking a gallery card.

use super::model::GalleryItem;

/// Open/closed state of the gallery lightbox.
///
/// Opening while already open replaces the displayed image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lightbox {
    current: Option<GalleryItem>,
}

impl Lightbox {
    /// Create a closed lightbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `item`.
    pub fn open(&mut self, item: GalleryItem) {
        self.current = Some(item);
    }

    /// Hide the overlay. Returns the item that was shown, if any.
    pub fn close(&mut self) -> Option<GalleryItem> {
        self.current.take()
    }

    /// Whether the overlay is visible.
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// The item currently shown.
    pub fn current(&self) -> Option<&GalleryItem> {
        self.current.as_ref()
    }
}
