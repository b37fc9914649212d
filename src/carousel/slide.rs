//! SlideEngine: the built-in looping slider.
//!
//! Autoplay advances one slide per delay. Looping is unconditional: the index
//! wraps even when the tab has fewer slides than the breakpoint shows at once,
//! so a two-card tab on a three-up layout keeps cycling instead of stalling.

use std::time::Duration;

use tracing::debug;

use crate::dom::NodeId;
use crate::gallery::TabId;
use crate::time::Timestamp;

use super::config::Layout;
use super::engine::{AttachError, AttachRequest, CarouselEngine, EngineFactory, Navigation};

/// Smallest delay autoplay honours, so a zero delay cannot spin.
const MIN_DELAY: Duration = Duration::from_millis(1);

// ---------------------------------------------------------------------------
// SlideEngine
// ---------------------------------------------------------------------------

/// A looping, autoplaying slider bound to one container.
#[derive(Debug)]
pub struct SlideEngine {
    tab: TabId,
    container: NodeId,
    slide_count: usize,
    index: usize,
    delay: Duration,
    next_advance: Option<Timestamp>,
    layout: Layout,
    disposed: bool,
}

impl SlideEngine {
    /// Create a stopped engine from an attach request.
    pub fn new(request: AttachRequest<'_>) -> Self {
        Self {
            tab: request.tab.clone(),
            container: request.container,
            slide_count: request.slide_count,
            index: 0,
            delay: request.config.autoplay.delay,
            next_advance: None,
            layout: request.layout,
            disposed: false,
        }
    }

    /// The container this engine is attached to.
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// The current layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Whether [`dispose`](CarouselEngine::dispose) was called.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Move to the next slide, wrapping at the end.
    pub fn slide_next(&mut self) {
        if self.slide_count > 0 {
            self.index = (self.index + 1) % self.slide_count;
        }
    }

    /// Move to the previous slide, wrapping at the start.
    pub fn slide_prev(&mut self) {
        if self.slide_count > 0 {
            self.index = (self.index + self.slide_count - 1) % self.slide_count;
        }
    }
}

impl CarouselEngine for SlideEngine {
    fn start(&mut self, now: Timestamp) {
        if self.disposed || self.next_advance.is_some() {
            return;
        }
        self.next_advance = Some(now + self.delay.max(MIN_DELAY));
        debug!(tab = %self.tab, "slider autoplay started");
    }

    fn stop(&mut self) {
        if self.next_advance.take().is_some() {
            debug!(tab = %self.tab, "slider autoplay stopped");
        }
    }

    fn is_running(&self) -> bool {
        self.next_advance.is_some()
    }

    fn delay(&self) -> Duration {
        self.delay
    }

    fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    fn poll(&mut self, now: Timestamp) -> Option<usize> {
        let mut advanced = false;
        while let Some(due) = self.next_advance.filter(|&due| due <= now) {
            self.slide_next();
            self.next_advance = Some(due + self.delay.max(MIN_DELAY));
            advanced = true;
        }
        (advanced && self.slide_count > 0).then_some(self.index)
    }

    fn next_deadline(&self) -> Option<Timestamp> {
        self.next_advance
    }

    fn active_index(&self) -> usize {
        self.index
    }

    fn navigate(&mut self, navigation: Navigation, now: Timestamp) -> Option<usize> {
        if self.disposed || self.slide_count == 0 {
            return None;
        }
        let before = self.index;
        match navigation {
            Navigation::Next => self.slide_next(),
            Navigation::Prev => self.slide_prev(),
            Navigation::To(index) if index < self.slide_count => self.index = index,
            Navigation::To(_) => return None,
        }
        if self.next_advance.is_some() {
            self.next_advance = Some(now + self.delay.max(MIN_DELAY));
        }
        debug!(tab = %self.tab, ?navigation, index = self.index, "slider navigated");
        (self.index != before).then_some(self.index)
    }

    fn refresh(&mut self, layout: &Layout) {
        if self.layout.breakpoint != layout.breakpoint || self.layout.direction != layout.direction {
            debug!(
                tab = %self.tab,
                breakpoint = ?layout.breakpoint,
                direction = ?layout.direction,
                "slider layout refreshed"
            );
        }
        self.layout = *layout;
    }

    fn dispose(&mut self) {
        self.stop();
        self.disposed = true;
    }
}

// ---------------------------------------------------------------------------
// SlideEngineFactory
// ---------------------------------------------------------------------------

/// Factory producing [`SlideEngine`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct SlideEngineFactory;

impl EngineFactory for SlideEngineFactory {
    fn attach(&mut self, request: AttachRequest<'_>) -> Result<Box<dyn CarouselEngine>, AttachError> {
        Ok(Box::new(SlideEngine::new(request)))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
