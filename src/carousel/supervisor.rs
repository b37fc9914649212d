//! Autoplay supervisor: a periodic, idempotent correction pass.
//!
//! Many interaction paths pause autoplay. Rather than trusting each of them to
//! schedule a matching resume, the supervisor walks every live handle once
//! per period and repairs two kinds of drift:
//!
//! 1. a handle that should be running but is not (state or engine stopped),
//! 2. an autoplay delay that differs from the required one.
//!
//! A handle that is already correct is left completely untouched: no stop, no
//! restart, no delay write. Handles held by a [`PauseCause`] that
//! [`is_held`](PauseCause::is_held) are never resumed; only their delay is
//! repaired, without starting them.

use std::time::Duration;

use tracing::{debug, warn};

use crate::time::Timestamp;

use super::config::AUTOPLAY_DELAY;
use super::handle::{CarouselHandle, HandleState, PauseCause};
use super::registry::Registry;

/// What a correction pass did to one handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Correction {
    /// Autoplay was restarted.
    pub resumed: bool,
    /// The autoplay delay was reset to the required value.
    pub delay_reset: bool,
}

impl Correction {
    /// Whether the pass left the handle untouched.
    pub fn is_noop(&self) -> bool {
        !self.resumed && !self.delay_reset
    }
}

/// Correct one handle against `required_delay`.
pub fn correct(handle: &mut CarouselHandle, required_delay: Duration, now: Timestamp) -> Correction {
    let mut correction = Correction::default();
    if !handle.is_live() {
        return correction;
    }

    let held = handle.pause_cause().is_some_and(PauseCause::is_held);
    let stopped = handle.state() != HandleState::Running || !handle.engine().is_running();
    if stopped && !held {
        correction.resumed = handle.resume(now);
    }

    if handle.engine().delay() != required_delay {
        handle.reset_delay(required_delay, now);
        correction.delay_reset = true;
    }

    correction
}

/// Outcome of one supervisor tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupervisorReport {
    /// Handles inspected.
    pub inspected: usize,
    /// Handles whose autoplay was restarted.
    pub resumed: usize,
    /// Handles whose delay was reset.
    pub delay_reset: usize,
}

impl SupervisorReport {
    /// Whether the tick changed nothing.
    pub fn is_noop(&self) -> bool {
        self.resumed == 0 && self.delay_reset == 0
    }
}

/// The periodic backstop guaranteeing that visible carousels keep advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Supervisor {
    period: Duration,
    required_delay: Duration,
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new(AUTOPLAY_DELAY, AUTOPLAY_DELAY)
    }
}

impl Supervisor {
    /// Create a supervisor ticking every `period` and enforcing `required_delay`.
    pub fn new(period: Duration, required_delay: Duration) -> Self {
        Self {
            period,
            required_delay,
        }
    }

    /// Time between ticks.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// The delay every handle is corrected to.
    pub fn required_delay(&self) -> Duration {
        self.required_delay
    }

    /// Run one correction pass over every live handle.
    pub fn pass(&self, registry: &mut Registry, now: Timestamp) -> SupervisorReport {
        let mut report = SupervisorReport::default();
        for (_, handle) in registry.iter_mut() {
            report.inspected += 1;
            let correction = correct(handle, self.required_delay, now);
            if correction.resumed {
                warn!(tab = %handle.tab(), "supervisor restarted stalled autoplay");
                report.resumed += 1;
            }
            if correction.delay_reset {
                warn!(tab = %handle.tab(), "supervisor reset drifted autoplay delay");
                report.delay_reset += 1;
            }
        }
        debug!(inspected = report.inspected, at = %now, "supervisor tick");
        report
    }
}

// ===========================================================================
// Tests
// ===========================================================================
