//! Carousel configuration: autoplay timings and responsive breakpoints.
//!
//! Two parts of the policy are fixed rather than configurable: every
//! breakpoint centres its slides, and every carousel loops infinitely even
//! when it has fewer slides than fit on screen. [`Layout`] always reports both
//! as `true`.

use std::time::Duration;

use crate::locale::Direction;

/// Delay between automatic slide advances.
pub const AUTOPLAY_DELAY: Duration = Duration::from_millis(3_000);
/// How long autoplay stays paused after the pointer leaves a card.
pub const HOVER_RESUME_DELAY: Duration = Duration::from_millis(500);
/// How long autoplay stays paused after a touch ends.
pub const TOUCH_RESUME_DELAY: Duration = Duration::from_millis(1_000);
/// Duration of one slide transition.
pub const TRANSITION_SPEED: Duration = Duration::from_millis(1_000);

// ---------------------------------------------------------------------------
// AutoplayConfig
// ---------------------------------------------------------------------------

/// Autoplay cadence and the bounded resume delays after interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoplayConfig {
    /// Delay between automatic advances. The supervisor enforces this value.
    pub delay: Duration,
    /// Resume delay after pointer-leave.
    pub hover_resume: Duration,
    /// Resume delay after touch-end.
    pub touch_resume: Duration,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            delay: AUTOPLAY_DELAY,
            hover_resume: HOVER_RESUME_DELAY,
            touch_resume: TOUCH_RESUME_DELAY,
        }
    }
}

impl AutoplayConfig {
    /// Set the autoplay delay (builder).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the hover resume delay (builder).
    pub fn with_hover_resume(mut self, delay: Duration) -> Self {
        self.hover_resume = delay;
        self
    }

    /// Set the touch resume delay (builder).
    pub fn with_touch_resume(mut self, delay: Duration) -> Self {
        self.touch_resume = delay;
        self
    }
}

// ---------------------------------------------------------------------------
// Breakpoints
// ---------------------------------------------------------------------------

/// Viewport width class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    /// Width ≤ 768 px.
    Narrow,
    /// 768 px < width ≤ 1024 px.
    Medium,
    /// Width > 1024 px.
    Wide,
}

impl Breakpoint {
    /// Classify a viewport width in CSS pixels.
    ///
    /// Bounds are inclusive upper limits: exactly 768 px is `Narrow` and
    /// exactly 1024 px is `Medium`. A min-width breakpoint table (as Swiper
    /// uses) would put those two widths one class higher.
    pub fn for_width(width: u32) -> Self {
        match width {
            0..=768 => Self::Narrow,
            769..=1024 => Self::Medium,
            _ => Self::Wide,
        }
    }
}

/// Slide geometry for one breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakpointSpec {
    /// Slides visible at once.
    pub slides_per_view: u32,
    /// Gap between slides in pixels.
    pub space_between: u32,
    /// Extra cloned slides on each side of the loop.
    pub loop_additional_slides: u32,
}

impl BreakpointSpec {
    /// Geometry for one breakpoint.
    pub const fn new(slides_per_view: u32, space_between: u32, loop_additional_slides: u32) -> Self {
        Self {
            slides_per_view,
            space_between,
            loop_additional_slides,
        }
    }
}

/// Per-breakpoint slide geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoints {
    pub narrow: BreakpointSpec,
    pub medium: BreakpointSpec,
    pub wide: BreakpointSpec,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            narrow: BreakpointSpec::new(1, 20, 2),
            medium: BreakpointSpec::new(2, 30, 3),
            wide: BreakpointSpec::new(3, 40, 3),
        }
    }
}

impl Breakpoints {
    /// The geometry for `breakpoint`.
    pub fn spec(&self, breakpoint: Breakpoint) -> BreakpointSpec {
        match breakpoint {
            Breakpoint::Narrow => self.narrow,
            Breakpoint::Medium => self.medium,
            Breakpoint::Wide => self.wide,
        }
    }
}

// ---------------------------------------------------------------------------
// CarouselConfig
// ---------------------------------------------------------------------------

/// Configuration shared by every carousel on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselConfig {
    /// Autoplay cadence and resume delays.
    pub autoplay: AutoplayConfig,
    /// Responsive slide geometry.
    pub breakpoints: Breakpoints,
    /// Slide transition duration.
    pub speed: Duration,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay: AutoplayConfig::default(),
            breakpoints: Breakpoints::default(),
            speed: TRANSITION_SPEED,
        }
    }
}

impl CarouselConfig {
    /// The default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the autoplay settings (builder).
    pub fn with_autoplay(mut self, autoplay: AutoplayConfig) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Replace the breakpoint table (builder).
    pub fn with_breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    /// Set the transition speed (builder).
    pub fn with_speed(mut self, speed: Duration) -> Self {
        self.speed = speed;
        self
    }

    /// Resolve the layout for a viewport width and text direction.
    pub fn layout(&self, viewport_width: u32, direction: Direction) -> Layout {
        let breakpoint = Breakpoint::for_width(viewport_width);
        Layout {
            breakpoint,
            spec: self.breakpoints.spec(breakpoint),
            direction,
            speed: self.speed,
            centered: true,
            looped: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// A fully resolved slider layout handed to engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// The active breakpoint.
    pub breakpoint: Breakpoint,
    /// Geometry for that breakpoint.
    pub spec: BreakpointSpec,
    /// Slide order direction.
    pub direction: Direction,
    /// Transition duration.
    pub speed: Duration,
    /// Slides are centred. Always `true`.
    pub centered: bool,
    /// Infinite looping. Always `true`, regardless of slide count.
    pub looped: bool,
}

// ===========================================================================
// Tests
// ===========================================================================
