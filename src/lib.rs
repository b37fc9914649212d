//! # folio-carousel
//!
//! Tab-scoped carousel lifecycle and autoplay supervision for a bilingual
//! portfolio gallery.
//!
//! A portfolio page shows one gallery tab at a time. Each tab owns at most
//! one looping slider; sliders on hidden tabs are paused, the visible one
//! autoplays, and a periodic supervisor puts autoplay back on whenever it
//! drifts. Everything runs on a single thread against an injectable clock,
//! so the whole lifecycle is deterministic under test.
//!
//! ## Core Systems
//!
//! - **[`time`]**: Timestamps, clocks, and a cancellable timer queue
//! - **[`dom`]**: Slotmap-backed page arena with class queries and the gallery [`Page`](dom::Page)
//! - **[`gallery`]**: Gallery definitions (tabs, items) and the lightbox
//! - **[`carousel`]**: Engine trait, handle state machine, registry, and supervisor
//! - **[`event`]**: Inbound page events and outbound notices
//! - **[`locale`]**: English/Arabic language state and text direction
//! - **[`contact`]**: `mailto:` hand-off for the contact form
//! - **[`controller`]**: Tab selection, interaction routing, timers
//! - **[`runtime`]**: Tokio driver for wall-clock operation
//! - **[`testing`]**: Fake engines, `Pilot`, and snapshot helpers

// Foundation
pub mod time;

// Page model
pub mod dom;
pub mod gallery;

// Carousels
pub mod carousel;

// Events and page state
pub mod contact;
pub mod event;
pub mod locale;

// Application
pub mod controller;
pub mod runtime;

// Test support
pub mod testing;

pub use carousel::{CarouselError, CarouselHandle, HandleState, PauseCause, Registry};
pub use controller::{ControllerConfig, GalleryController, Selection};
pub use gallery::{Gallery, GalleryItem, GalleryTab, TabId};
