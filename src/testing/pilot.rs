//! Pilot: drive a gallery controller on a virtual clock.
//!
//! The `Pilot` wires a [`GalleryController`] to a [`ManualClock`] and a
//! [`FakeEngineFactory`], then offers a high-level API for selecting tabs,
//! hovering and touching cards, and moving time forward deadline by deadline.

use std::time::Duration;

use crate::carousel::handle::{HandleState, PauseCause};
use crate::controller::{ControllerConfig, GalleryController, Selection};
use crate::dom::page::{NAV_NEXT, NAV_PREV, PAGINATION};
use crate::dom::{NodeId, Page};
use crate::event::{Notice, PageEvent};
use crate::gallery::{Gallery, TabId};
use crate::time::{Clock, ManualClock, Timestamp};

use super::fake::{FakeEngineFactory, FakeProbe, FakeProbes};
use super::snapshot;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A virtual-time controller driver for testing.
///
/// # Examples
///
/// ```ignore
/// use folio_carousel::testing::Pilot;
/// use std::time::Duration;
///
/// let mut pilot = Pilot::new();
/// pilot.init();
/// let card = pilot.hover("wordpress", 0);
/// pilot.unhover_node(card);
/// pilot.advance(Duration::from_millis(500));
/// assert!(pilot.probe("wordpress").unwrap().is_running());
/// ```
pub struct Pilot {
    controller: GalleryController<ManualClock>,
    clock: ManualClock,
    probes: FakeProbes,
}

impl Pilot {
    /// A pilot over the built-in portfolio with default settings.
    pub fn new() -> Self {
        Self::with_config(ControllerConfig::default())
    }

    /// A pilot over the built-in portfolio with `config`.
    pub fn with_config(config: ControllerConfig) -> Self {
        Self::with_gallery(Gallery::portfolio(), config)
    }

    /// A pilot over an arbitrary gallery.
    pub fn with_gallery(gallery: Gallery, config: ControllerConfig) -> Self {
        let clock = ManualClock::new();
        let factory = FakeEngineFactory::new();
        let probes = factory.probes();
        let controller =
            GalleryController::new(Page::build(gallery), Box::new(factory), clock.clone(), config);
        Self {
            controller,
            clock,
            probes,
        }
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Run the controller's `init`.
    pub fn init(&mut self) -> Option<Selection> {
        self.controller.init()
    }

    /// Click the tab button for `tab`.
    pub fn select(&mut self, tab: &str) -> Selection {
        self.controller.select_tab(tab)
    }

    /// Move the pointer onto card `index` of `tab`. Returns the card node.
    ///
    /// # Panics
    ///
    /// Panics if the tab has no such card.
    pub fn hover(&mut self, tab: &str, index: usize) -> NodeId {
        let card = self.card(tab, index);
        self.controller.pointer_enter(card);
        card
    }

    /// Move the pointer off card `index` of `tab`.
    pub fn unhover(&mut self, tab: &str, index: usize) {
        let card = self.card(tab, index);
        self.controller.pointer_leave(card);
    }

    /// Move the pointer off `node`.
    pub fn unhover_node(&mut self, node: NodeId) {
        self.controller.pointer_leave(node);
    }

    /// Start a touch on card `index` of `tab`. Returns the card node.
    pub fn touch(&mut self, tab: &str, index: usize) -> NodeId {
        let card = self.card(tab, index);
        self.controller.touch_start(card);
        card
    }

    /// End a touch on card `index` of `tab`.
    pub fn release(&mut self, tab: &str, index: usize) {
        let card = self.card(tab, index);
        self.controller.touch_end(card);
    }

    /// Click the next arrow of `tab`'s carousel.
    pub fn next(&mut self, tab: &str) {
        let arrow = self.control(tab, NAV_NEXT);
        self.controller.handle_event(PageEvent::NextSlide(arrow));
    }

    /// Click the previous arrow of `tab`'s carousel.
    pub fn prev(&mut self, tab: &str) {
        let arrow = self.control(tab, NAV_PREV);
        self.controller.handle_event(PageEvent::PrevSlide(arrow));
    }

    /// Click pagination bullet `index` of `tab`'s carousel.
    pub fn go_to(&mut self, tab: &str, index: usize) {
        let node = self.control(tab, PAGINATION);
        self.controller.handle_event(PageEvent::GoToSlide { node, index });
    }

    /// Feed a raw page event.
    pub fn send(&mut self, event: PageEvent) {
        self.controller.handle_event(event);
    }

    // ── Time ─────────────────────────────────────────────────────────

    /// Move the clock forward by `by`, stopping at every deadline on the
    /// way so timers fire at their exact due time.
    pub fn advance(&mut self, by: Duration) {
        let target = self.clock.now() + by;
        while let Some(deadline) = self.controller.next_deadline() {
            if deadline > target || deadline < self.clock.now() {
                break;
            }
            self.clock.set(deadline);
            self.controller.poll();
            if self.controller.next_deadline() == Some(deadline) {
                break;
            }
        }
        self.clock.set(target);
        self.controller.poll();
    }

    /// Shorthand for [`advance`](Self::advance) in milliseconds.
    pub fn advance_ms(&mut self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    /// Current virtual time.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Borrow the controller immutably.
    pub fn controller(&self) -> &GalleryController<ManualClock> {
        &self.controller
    }

    /// Borrow the controller mutably.
    pub fn controller_mut(&mut self) -> &mut GalleryController<ManualClock> {
        &mut self.controller
    }

    /// Shared view of every fake engine attached so far.
    pub fn probes(&self) -> &FakeProbes {
        &self.probes
    }

    /// Probe of the newest engine attached for `tab`.
    pub fn probe(&self, tab: &str) -> Option<FakeProbe> {
        self.probes.latest(&TabId::from(tab))
    }

    /// Handle state of `tab`'s carousel, if it has one.
    pub fn state(&self, tab: &str) -> Option<HandleState> {
        self.controller.registry().get(&TabId::from(tab)).map(|h| h.state())
    }

    /// Pause cause of `tab`'s carousel, if it is paused.
    pub fn cause(&self, tab: &str) -> Option<PauseCause> {
        self.controller
            .registry()
            .get(&TabId::from(tab))
            .and_then(|h| h.pause_cause())
    }

    /// Card `index` of `tab`.
    ///
    /// # Panics
    ///
    /// Panics if the tab has no such card.
    pub fn card(&self, tab: &str, index: usize) -> NodeId {
        let cards = self.controller.page().tab_cards(&TabId::from(tab));
        match cards.get(index) {
            Some(card) => *card,
            None => panic!("tab `{tab}` has no card {index}"),
        }
    }

    fn control(&self, tab: &str, class: &str) -> NodeId {
        match self.controller.page().carousel_control(&TabId::from(tab), class) {
            Some(node) => node,
            None => panic!("tab `{tab}` has no `{class}` control"),
        }
    }

    /// Take every notice emitted so far.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.controller.drain_notices()
    }

    /// Text dump of every tab, see [`snapshot::describe`].
    pub fn describe(&self) -> String {
        snapshot::describe(&self.controller)
    }
}

impl Default for Pilot {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
