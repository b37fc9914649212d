//! Gallery definition: tabs, items, and the image lightbox.

pub mod lightbox;
pub mod model;

pub use lightbox::Lightbox;
pub use model::{Gallery, GalleryError, GalleryItem, GalleryTab, TabId};
