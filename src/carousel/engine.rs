//! The slider engine capability.
//!
//! The core never talks to a concrete slider directly. It drives engines
//! through [`CarouselEngine`] and builds them through an [`EngineFactory`],
//! so the built-in [`SlideEngine`](super::SlideEngine) and test fakes are
//! interchangeable.

use std::fmt;
use std::time::Duration;

use crate::dom::NodeId;
use crate::gallery::TabId;
use crate::time::Timestamp;

use super::config::{CarouselConfig, Layout};

/// A manual slide change from the arrows or the pagination bullets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The "next" arrow.
    Next,
    /// The "previous" arrow.
    Prev,
    /// A pagination bullet.
    To(usize),
}

/// Lifecycle and autoplay control of one slider instance.
pub trait CarouselEngine: fmt::Debug {
    /// Start autoplay. The first advance happens one delay after `now`.
    /// Starting a running engine is a no-op.
    fn start(&mut self, now: Timestamp);

    /// Stop autoplay. Stopping a stopped engine is a no-op.
    fn stop(&mut self);

    /// Whether autoplay is currently running.
    fn is_running(&self) -> bool;

    /// The current autoplay delay.
    fn delay(&self) -> Duration;

    /// Change the autoplay delay. Takes effect from the next start.
    fn set_delay(&mut self, delay: Duration);

    /// Advance autoplay up to `now`. Returns the new slide index if it changed.
    fn poll(&mut self, now: Timestamp) -> Option<usize>;

    /// When the next automatic advance is due, if autoplay is running.
    fn next_deadline(&self) -> Option<Timestamp>;

    /// Index of the active slide.
    fn active_index(&self) -> usize;

    /// Change slide by hand. Autoplay is not disabled: a running engine
    /// reschedules its next advance one delay after `now`. Returns the new
    /// index if it changed.
    fn navigate(&mut self, navigation: Navigation, now: Timestamp) -> Option<usize>;

    /// Re-layout after a viewport or direction change.
    fn refresh(&mut self, layout: &Layout);

    /// Release the engine. A disposed engine never runs again.
    fn dispose(&mut self);
}

/// Everything a factory needs to attach an engine to a rendered container.
#[derive(Debug, Clone, Copy)]
pub struct AttachRequest<'a> {
    /// Tab that owns the carousel.
    pub tab: &'a TabId,
    /// The `.swiper` container node.
    pub container: NodeId,
    /// Number of slides in the container.
    pub slide_count: usize,
    /// Carousel configuration.
    pub config: &'a CarouselConfig,
    /// Initial resolved layout.
    pub layout: Layout,
}

/// Failure reported by a factory while attaching an engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct AttachError(pub String);

impl AttachError {
    /// Create an error with a human-readable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Builds engines for tab containers.
pub trait EngineFactory {
    /// Attach a new, stopped engine to `request.container`.
    fn attach(&mut self, request: AttachRequest<'_>) -> Result<Box<dyn CarouselEngine>, AttachError>;
}
