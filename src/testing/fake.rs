//! Fake slider engines that record every call.
//!
//! A [`FakeEngine`] never advances slides on its own; it only tracks autoplay
//! state and counts effective calls. Its [`FakeProbe`] shares that state, so a
//! test can keep observing an engine after it has been boxed into a handle
//! and even after the handle has been disposed.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::Duration;

use crate::carousel::config::Layout;
use crate::carousel::engine::{AttachError, AttachRequest, CarouselEngine, EngineFactory, Navigation};
use crate::gallery::TabId;
use crate::time::Timestamp;

/// Observable state of a fake engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeState {
    pub running: bool,
    pub delay: Duration,
    pub starts: usize,
    pub stops: usize,
    pub delay_writes: usize,
    pub refreshes: usize,
    pub disposed: bool,
    pub last_start: Option<Timestamp>,
    pub layout: Option<Layout>,
    pub slide_count: usize,
    pub index: usize,
    pub navigations: usize,
}

// ---------------------------------------------------------------------------
// FakeEngine / FakeProbe
// ---------------------------------------------------------------------------

/// A recording [`CarouselEngine`].
#[derive(Debug)]
pub struct FakeEngine {
    state: Rc<RefCell<FakeState>>,
}

impl FakeEngine {
    /// Create a stopped, slideless engine with the given autoplay delay,
    /// plus its probe.
    pub fn new(delay: Duration) -> (Self, FakeProbe) {
        Self::with_slides(delay, 0)
    }

    /// Create a stopped engine over `slide_count` slides.
    pub fn with_slides(delay: Duration, slide_count: usize) -> (Self, FakeProbe) {
        let state = Rc::new(RefCell::new(FakeState {
            delay,
            slide_count,
            ..FakeState::default()
        }));
        (
            Self {
                state: Rc::clone(&state),
            },
            FakeProbe { state },
        )
    }
}

impl CarouselEngine for FakeEngine {
    fn start(&mut self, now: Timestamp) {
        let mut state = self.state.borrow_mut();
        if state.disposed || state.running {
            return;
        }
        state.running = true;
        state.starts += 1;
        state.last_start = Some(now);
    }

    fn stop(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.running {
            state.running = false;
            state.stops += 1;
        }
    }

    fn is_running(&self) -> bool {
        self.state.borrow().running
    }

    fn delay(&self) -> Duration {
        self.state.borrow().delay
    }

    fn set_delay(&mut self, delay: Duration) {
        let mut state = self.state.borrow_mut();
        state.delay = delay;
        state.delay_writes += 1;
    }

    fn poll(&mut self, _now: Timestamp) -> Option<usize> {
        None
    }

    fn next_deadline(&self) -> Option<Timestamp> {
        None
    }

    fn active_index(&self) -> usize {
        self.state.borrow().index
    }

    fn navigate(&mut self, navigation: Navigation, _now: Timestamp) -> Option<usize> {
        let mut state = self.state.borrow_mut();
        if state.disposed || state.slide_count == 0 {
            return None;
        }
        let count = state.slide_count;
        let target = match navigation {
            Navigation::Next => (state.index + 1) % count,
            Navigation::Prev => (state.index + count - 1) % count,
            Navigation::To(index) if index < count => index,
            Navigation::To(_) => return None,
        };
        state.navigations += 1;
        let changed = target != state.index;
        state.index = target;
        changed.then_some(target)
    }

    fn refresh(&mut self, layout: &Layout) {
        let mut state = self.state.borrow_mut();
        state.refreshes += 1;
        state.layout = Some(*layout);
    }

    fn dispose(&mut self) {
        let mut state = self.state.borrow_mut();
        state.running = false;
        state.disposed = true;
    }
}

/// Shared view onto a [`FakeEngine`].
#[derive(Debug, Clone)]
pub struct FakeProbe {
    state: Rc<RefCell<FakeState>>,
}

impl FakeProbe {
    /// A copy of the current state.
    pub fn snapshot(&self) -> FakeState {
        self.state.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().running
    }

    pub fn is_disposed(&self) -> bool {
        self.state.borrow().disposed
    }

    pub fn delay(&self) -> Duration {
        self.state.borrow().delay
    }

    pub fn starts(&self) -> usize {
        self.state.borrow().starts
    }

    pub fn stops(&self) -> usize {
        self.state.borrow().stops
    }

    pub fn delay_writes(&self) -> usize {
        self.state.borrow().delay_writes
    }

    pub fn refreshes(&self) -> usize {
        self.state.borrow().refreshes
    }

    pub fn navigations(&self) -> usize {
        self.state.borrow().navigations
    }

    pub fn index(&self) -> usize {
        self.state.borrow().index
    }

    pub fn last_start(&self) -> Option<Timestamp> {
        self.state.borrow().last_start
    }

    pub fn layout(&self) -> Option<Layout> {
        self.state.borrow().layout
    }

    /// Stop the engine behind the handle's back, without counting a stop.
    pub fn force_stop(&self) {
        self.state.borrow_mut().running = false;
    }

    /// Change the delay behind the handle's back, without counting a write.
    pub fn force_delay(&self, delay: Duration) {
        self.state.borrow_mut().delay = delay;
    }
}

// ---------------------------------------------------------------------------
// FakeEngineFactory
// ---------------------------------------------------------------------------

/// Factory producing [`FakeEngine`]s and remembering a probe per attach.
#[derive(Debug, Default)]
pub struct FakeEngineFactory {
    shared: FakeProbes,
}

impl FakeEngineFactory {
    /// Create a factory that always succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every attach for `tab` fail.
    pub fn fail_for(&self, tab: impl Into<TabId>) {
        self.shared.fail_for(tab);
    }

    /// Let attaches for `tab` succeed again.
    pub fn heal(&self, tab: &TabId) {
        self.shared.heal(tab);
    }

    /// A handle onto the probes recorded by this factory, usable after the
    /// factory has been moved into a controller.
    pub fn probes(&self) -> FakeProbes {
        self.shared.clone()
    }

    /// Probe of the most recent engine attached for `tab`.
    pub fn probe(&self, tab: &TabId) -> Option<FakeProbe> {
        self.shared.latest(tab)
    }

    /// Number of engines attached for `tab`.
    pub fn attach_count(&self, tab: &TabId) -> usize {
        self.shared.attach_count(tab)
    }
}

impl EngineFactory for FakeEngineFactory {
    fn attach(&mut self, request: AttachRequest<'_>) -> Result<Box<dyn CarouselEngine>, AttachError> {
        let mut shared = self.shared.inner.borrow_mut();
        if shared.failing.contains(request.tab) {
            return Err(AttachError::new(format!("engine refused `{}`", request.tab)));
        }
        let (engine, probe) = FakeEngine::with_slides(request.config.autoplay.delay, request.slide_count);
        shared.probes.entry(request.tab.clone()).or_default().push(probe);
        Ok(Box::new(engine))
    }
}

#[derive(Debug, Default)]
struct Shared {
    failing: HashSet<TabId>,
    probes: HashMap<TabId, Vec<FakeProbe>>,
}

/// Shared view onto a [`FakeEngineFactory`]: the probes it handed out and
/// the tabs it refuses.
#[derive(Debug, Clone, Default)]
pub struct FakeProbes {
    inner: Rc<RefCell<Shared>>,
}

impl FakeProbes {
    /// Probe of the most recent engine attached for `tab`.
    pub fn latest(&self, tab: &TabId) -> Option<FakeProbe> {
        self.inner.borrow().probes.get(tab).and_then(|v| v.last().cloned())
    }

    /// Every probe attached for `tab`, oldest first.
    pub fn all(&self, tab: &TabId) -> Vec<FakeProbe> {
        self.inner.borrow().probes.get(tab).cloned().unwrap_or_default()
    }

    /// Number of engines attached for `tab`.
    pub fn attach_count(&self, tab: &TabId) -> usize {
        self.inner.borrow().probes.get(tab).map_or(0, Vec::len)
    }

    /// Make every later attach for `tab` fail.
    pub fn fail_for(&self, tab: impl Into<TabId>) {
        self.inner.borrow_mut().failing.insert(tab.into());
    }

    /// Let attaches for `tab` succeed again.
    pub fn heal(&self, tab: &TabId) {
        self.inner.borrow_mut().failing.remove(tab);
    }
}
