//! CarouselHandle: one tab's engine plus its lifecycle state machine.
//!
//! ```text
//! Uninitialized ──start──▶ Running ◀──resume── Paused
//!                             │ ──pause──▶       │
//!                             └──dispose──▶ Disposed ◀──dispose──┘
//! ```
//!
//! Every accepted transition is recorded as a [`Transition`] that can be
//! drained, in order of occurrence, with [`CarouselHandle::drain_transitions`].

use std::fmt;
use std::time::Duration;

use slotmap::new_key_type;
use tracing::debug;

use crate::dom::NodeId;
use crate::gallery::TabId;
use crate::time::Timestamp;

use super::config::CarouselConfig;
use super::engine::{CarouselEngine, Navigation};

new_key_type! {
    /// Registry key of a carousel handle. Generational, so an id kept by a
    /// stale timer never resolves to a newer handle for the same tab.
    pub struct HandleId;
}

// ---------------------------------------------------------------------------
// HandleState / PauseCause
// ---------------------------------------------------------------------------

/// Lifecycle state of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleState {
    /// Engine attached, autoplay not yet started.
    Uninitialized,
    /// Autoplay is advancing slides.
    Running,
    /// Autoplay is stopped; see [`PauseCause`].
    Paused,
    /// Engine released. Terminal.
    Disposed,
}

impl fmt::Display for HandleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Disposed => "disposed",
        })
    }
}

/// Why a handle is paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PauseCause {
    /// Another tab was selected.
    TabHidden,
    /// The pointer is over, or just left, a card.
    Hover,
    /// A touch is in progress or just ended.
    Touch,
    /// Paused for any other reason. The supervisor overrides these.
    External,
}

impl PauseCause {
    /// Whether the supervisor must leave a handle paused for this cause.
    ///
    /// Hidden tabs stay paused until reselected; hover and touch pauses
    /// carry their own bounded resume.
    pub fn is_held(self) -> bool {
        !matches!(self, Self::External)
    }
}

impl fmt::Display for PauseCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TabHidden => "tab-hidden",
            Self::Hover => "hover",
            Self::Touch => "touch",
            Self::External => "external",
        })
    }
}

/// A recorded state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: HandleState,
    pub to: HandleState,
    pub at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// CarouselHandle
// ---------------------------------------------------------------------------

/// Runtime wrapper binding one slider engine to one gallery tab.
#[derive(Debug)]
pub struct CarouselHandle {
    tab: TabId,
    container: NodeId,
    config: CarouselConfig,
    engine: Box<dyn CarouselEngine>,
    state: HandleState,
    pause_cause: Option<PauseCause>,
    transitions: Vec<Transition>,
}

impl CarouselHandle {
    /// Wrap a freshly attached engine. The handle starts `Uninitialized`.
    pub fn new(
        tab: TabId,
        container: NodeId,
        config: CarouselConfig,
        engine: Box<dyn CarouselEngine>,
    ) -> Self {
        Self {
            tab,
            container,
            config,
            engine,
            state: HandleState::Uninitialized,
            pause_cause: None,
            transitions: Vec::new(),
        }
    }

    /// Start or resume autoplay.
    ///
    /// `Uninitialized`/`Paused` → `Running`. Also restarts an engine that
    /// stopped on its own while the handle believed it was running. Returns
    /// `true` if anything changed.
    pub fn resume(&mut self, now: Timestamp) -> bool {
        match self.state {
            HandleState::Disposed => false,
            HandleState::Running => {
                if self.engine.is_running() {
                    return false;
                }
                self.engine.start(now);
                true
            }
            HandleState::Uninitialized | HandleState::Paused => {
                self.engine.start(now);
                self.pause_cause = None;
                self.transition(HandleState::Running, Some(now));
                true
            }
        }
    }

    /// Pause autoplay for `cause`.
    ///
    /// `Running`/`Uninitialized` → `Paused`. Pausing an already paused handle
    /// only updates the cause. Returns `true` if the state changed.
    pub fn pause(&mut self, cause: PauseCause) -> bool {
        match self.state {
            HandleState::Disposed => false,
            HandleState::Paused => {
                self.pause_cause = Some(cause);
                false
            }
            HandleState::Running | HandleState::Uninitialized => {
                self.engine.stop();
                self.pause_cause = Some(cause);
                self.transition(HandleState::Paused, None);
                true
            }
        }
    }

    /// Release the engine. Only `Running` and `Paused` handles can be
    /// disposed; returns `true` if the handle is now `Disposed`.
    pub fn dispose(&mut self) -> bool {
        if !self.is_live() {
            return false;
        }
        self.engine.dispose();
        self.pause_cause = None;
        self.transition(HandleState::Disposed, None);
        true
    }

    /// Stop, replace the autoplay delay, and restart if the handle is running.
    pub fn reset_delay(&mut self, delay: Duration, now: Timestamp) {
        let was_running = self.engine.is_running();
        self.engine.stop();
        self.engine.set_delay(delay);
        if was_running || self.state == HandleState::Running {
            self.engine.start(now);
        }
    }

    /// Advance autoplay up to `now`; returns the new slide index if it changed.
    pub fn poll(&mut self, now: Timestamp) -> Option<usize> {
        if self.state != HandleState::Running {
            return None;
        }
        self.engine.poll(now)
    }

    /// The tab this handle belongs to.
    pub fn tab(&self) -> &TabId {
        &self.tab
    }

    /// The carousel container node.
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// The configuration the handle was created with.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Current lifecycle state.
    pub fn state(&self) -> HandleState {
        self.state
    }

    /// Why the handle is paused, if it is.
    pub fn pause_cause(&self) -> Option<PauseCause> {
        self.pause_cause
    }

    /// `Running` or `Paused`.
    pub fn is_live(&self) -> bool {
        matches!(self.state, HandleState::Running | HandleState::Paused)
    }

    /// Change slide by hand. Leaves the state and autoplay untouched;
    /// returns the new index if it changed.
    pub fn navigate(&mut self, navigation: Navigation, now: Timestamp) -> Option<usize> {
        if !self.is_live() {
            return None;
        }
        self.engine.navigate(navigation, now)
    }

    /// Active slide index.
    pub fn active_index(&self) -> usize {
        self.engine.active_index()
    }

    /// Read access to the engine.
    pub fn engine(&self) -> &dyn CarouselEngine {
        self.engine.as_ref()
    }

    /// Mutable access to the engine.
    pub fn engine_mut(&mut self) -> &mut dyn CarouselEngine {
        self.engine.as_mut()
    }

    /// Drain recorded transitions, oldest first.
    pub fn drain_transitions(&mut self) -> Vec<Transition> {
        std::mem::take(&mut self.transitions)
    }

    fn transition(&mut self, to: HandleState, at: Option<Timestamp>) {
        debug!(tab = %self.tab, from = %self.state, to = %to, "carousel state change");
        self.transitions.push(Transition {
            from: self.state,
            to,
            at,
        });
        self.state = to;
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeEngine;
    use slotmap::SlotMap;

    fn at(millis: u64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    fn handle() -> (CarouselHandle, crate::testing::FakeProbe) {
        let mut nodes: SlotMap<NodeId, ()> = SlotMap::with_key();
        let (engine, probe) = FakeEngine::new(Duration::from_millis(3_000));
        let handle = CarouselHandle::new(
            "salla".into(),
            nodes.insert(()),
            CarouselConfig::new(),
            Box::new(engine),
        );
        (handle, probe)
    }

    // ── Transitions ──────────────────────────────────────────────────

    #[test]
    fn new_handle_is_uninitialized() {
        let (handle, probe) = handle();
        assert_eq!(handle.state(), HandleState::Uninitialized);
        assert!(!handle.is_live());
        assert!(!probe.is_running());
    }

    #[test]
    fn start_pause_resume_sequence() {
        let (mut handle, probe) = handle();
        assert!(handle.resume(at(0)));
        assert!(handle.pause(PauseCause::Hover));
        assert_eq!(handle.pause_cause(), Some(PauseCause::Hover));
        assert!(!probe.is_running());
        assert!(handle.resume(at(700)));
        assert!(probe.is_running());
        assert_eq!(handle.pause_cause(), None);

        let states: Vec<_> = handle.drain_transitions().iter().map(|t| t.to).collect();
        assert_eq!(
            states,
            vec![HandleState::Running, HandleState::Paused, HandleState::Running]
        );
        assert!(handle.drain_transitions().is_empty());
    }

    #[test]
    fn resume_running_is_noop() {
        let (mut handle, probe) = handle();
        handle.resume(at(0));
        assert!(!handle.resume(at(100)));
        assert_eq!(probe.starts(), 1);
    }

    #[test]
    fn resume_restarts_engine_that_stopped_itself() {
        let (mut handle, probe) = handle();
        handle.resume(at(0));
        probe.force_stop();
        assert!(handle.resume(at(50)));
        assert!(probe.is_running());
        assert_eq!(handle.state(), HandleState::Running);
    }

    #[test]
    fn pause_paused_updates_cause_only() {
        let (mut handle, _) = handle();
        handle.resume(at(0));
        handle.pause(PauseCause::Hover);
        assert!(!handle.pause(PauseCause::Touch));
        assert_eq!(handle.pause_cause(), Some(PauseCause::Touch));
    }

    // ── Disposal ─────────────────────────────────────────────────────

    #[test]
    fn dispose_is_terminal() {
        let (mut handle, probe) = handle();
        handle.resume(at(0));
        assert!(handle.dispose());
        assert!(probe.is_disposed());
        assert!(!handle.resume(at(10)));
        assert!(!handle.pause(PauseCause::Hover));
        assert!(!handle.dispose());
        assert_eq!(handle.state(), HandleState::Disposed);
        assert!(!probe.is_running());
    }

    #[test]
    fn uninitialized_cannot_be_disposed() {
        let (mut handle, probe) = handle();
        assert!(!handle.dispose());
        assert!(!probe.is_disposed());
    }

    #[test]
    fn paused_handle_does_not_poll() {
        let (mut handle, _) = handle();
        handle.resume(at(0));
        handle.pause(PauseCause::TabHidden);
        assert_eq!(handle.poll(at(10_000)), None);
    }

    // ── Delay reset ──────────────────────────────────────────────────

    #[test]
    fn reset_delay_restarts_running_engine() {
        let (mut handle, probe) = handle();
        handle.resume(at(0));
        probe.force_delay(Duration::from_millis(5_000));
        handle.reset_delay(Duration::from_millis(3_000), at(100));
        assert_eq!(probe.delay(), Duration::from_millis(3_000));
        assert!(probe.is_running());
        assert_eq!(probe.starts(), 2);
        assert_eq!(probe.stops(), 1);
    }

    #[test]
    fn reset_delay_leaves_paused_engine_stopped() {
        let (mut handle, probe) = handle();
        handle.resume(at(0));
        handle.pause(PauseCause::TabHidden);
        probe.force_delay(Duration::from_millis(1_000));
        handle.reset_delay(Duration::from_millis(3_000), at(100));
        assert!(!probe.is_running());
        assert_eq!(probe.delay(), Duration::from_millis(3_000));
    }

    // ── Navigation ───────────────────────────────────────────────────

    #[test]
    fn navigate_keeps_state() {
        let mut nodes: SlotMap<NodeId, ()> = SlotMap::with_key();
        let (engine, recorder) = FakeEngine::with_slides(Duration::from_millis(3_000), 4);
        let mut handle = CarouselHandle::new("zid".into(), nodes.insert(()), CarouselConfig::new(), Box::new(engine));
        assert_eq!(handle.navigate(Navigation::Next, at(0)), None);

        handle.resume(at(0));
        handle.drain_transitions();
        assert_eq!(handle.navigate(Navigation::Next, at(10)), Some(1));
        assert_eq!(handle.navigate(Navigation::To(3), at(20)), Some(3));
        assert_eq!(handle.state(), HandleState::Running);
        assert!(handle.drain_transitions().is_empty());
        assert_eq!(recorder.navigations(), 2);

        handle.dispose();
        assert_eq!(handle.navigate(Navigation::Prev, at(30)), None);
    }

    #[test]
    fn cause_held_flags() {
        assert!(PauseCause::TabHidden.is_held());
        assert!(PauseCause::Hover.is_held());
        assert!(PauseCause::Touch.is_held());
        assert!(!PauseCause::External.is_held());
    }
}
