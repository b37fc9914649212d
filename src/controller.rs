//! GalleryController: tab selection, interaction routing, timers.
//!
//! [`GalleryController`] owns the page, the carousel [`Registry`], the timer
//! queue, and the supervisor. All of it is single-threaded: every public
//! method runs to completion, and time only moves when [`poll`] is called
//! against the injected [`Clock`].
//!
//! Selecting a tab:
//!
//! 1. marks its view active and every other view inactive,
//! 2. pauses every other carousel and cancels their pending timers,
//! 3. looks up or creates the tab's carousel,
//! 4. schedules a settle timer that ensures autoplay is running,
//! 5. emits a reveal request for the tab's cards.
//!
//! [`poll`]: GalleryController::poll

use std::fmt;
use std::time::Duration;

use slotmap::SecondaryMap;
use tracing::{debug, info, warn};

use crate::carousel::config::{CarouselConfig, Layout, AUTOPLAY_DELAY};
use crate::carousel::engine::{EngineFactory, Navigation};
use crate::carousel::error::CarouselError;
use crate::carousel::handle::{HandleId, HandleState, PauseCause};
use crate::carousel::registry::{Mount, Registry};
use crate::carousel::supervisor::{Supervisor, SupervisorReport};
use crate::dom::{NodeId, Page};
use crate::event::message::{REVEAL_DURATION, REVEAL_STAGGER};
use crate::event::{Notice, NoticeQueue, PageEvent, RevealRequest};
use crate::gallery::{Lightbox, TabId};
use crate::locale::{Direction, Locale};
use crate::time::{Clock, TimerQueue, Timestamp};

/// Delay between selecting a tab and forcing its autoplay on.
pub const SETTLE_DELAY: Duration = Duration::from_millis(200);
/// Viewport width assumed until the host reports one.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1440;

// ---------------------------------------------------------------------------
// ControllerConfig
// ---------------------------------------------------------------------------

/// Configuration for the gallery controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Settings shared by every carousel.
    pub carousel: CarouselConfig,
    /// Delay before autoplay is forced on for a newly selected tab.
    pub settle_delay: Duration,
    /// Time between supervisor passes.
    pub supervisor_period: Duration,
    /// Tab selected by [`GalleryController::init`]. Defaults to the first tab.
    pub initial_tab: Option<TabId>,
    /// Initial viewport width in CSS pixels.
    pub viewport_width: u32,
    /// Stagger between cards of a reveal.
    pub reveal_stagger: Duration,
    /// Duration of each card's reveal.
    pub reveal_duration: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            carousel: CarouselConfig::default(),
            settle_delay: SETTLE_DELAY,
            supervisor_period: AUTOPLAY_DELAY,
            initial_tab: None,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            reveal_stagger: REVEAL_STAGGER,
            reveal_duration: REVEAL_DURATION,
        }
    }
}

impl ControllerConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the carousel config (builder).
    pub fn with_carousel(mut self, carousel: CarouselConfig) -> Self {
        self.carousel = carousel;
        self
    }

    /// Set the settle delay (builder).
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Set the supervisor period (builder).
    pub fn with_supervisor_period(mut self, period: Duration) -> Self {
        self.supervisor_period = period;
        self
    }

    /// Set the initially selected tab (builder).
    pub fn with_initial_tab(mut self, tab: impl Into<TabId>) -> Self {
        self.initial_tab = Some(tab.into());
        self
    }

    /// Set the initial viewport width (builder).
    pub fn with_viewport_width(mut self, width: u32) -> Self {
        self.viewport_width = width;
        self
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Outcome of [`GalleryController::select_tab`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The tab is active and has a carousel.
    Carousel {
        handle: HandleId,
        /// Whether the carousel was built by this selection.
        created: bool,
    },
    /// The tab is active but shows static content; a later selection retries.
    StaticContent { error: CarouselError },
    /// The selection was refused and nothing changed.
    Rejected { error: CarouselError },
}

impl Selection {
    /// The carousel handle, if the tab has one.
    pub fn handle(&self) -> Option<HandleId> {
        match self {
            Self::Carousel { handle, .. } => Some(*handle),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Timers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    /// Ensure a freshly selected tab is running.
    Settle(HandleId),
    /// End of the bounded pause after the last interaction.
    Resume(HandleId),
    /// Periodic supervisor pass.
    Supervisor,
}

impl TimerKind {
    fn owner(&self) -> Option<HandleId> {
        match *self {
            Self::Settle(handle) | Self::Resume(handle) => Some(handle),
            Self::Supervisor => None,
        }
    }
}

/// Pointer and touch interactions in progress on one carousel.
///
/// Hover and touch can overlap; autoplay stays paused until both have ended,
/// and never resumes before the latest bound any of them set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Interactions {
    hover: bool,
    touch: bool,
    resume_at: Option<Timestamp>,
}

impl Interactions {
    fn flag(&mut self, cause: PauseCause) -> Option<&mut bool> {
        match cause {
            PauseCause::Hover => Some(&mut self.hover),
            PauseCause::Touch => Some(&mut self.touch),
            PauseCause::TabHidden | PauseCause::External => None,
        }
    }

    fn in_progress(&self) -> Option<PauseCause> {
        if self.touch {
            Some(PauseCause::Touch)
        } else if self.hover {
            Some(PauseCause::Hover)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// GalleryController
// ---------------------------------------------------------------------------

/// Owns the gallery page and every carousel on it.
pub struct GalleryController<C: Clock> {
    config: ControllerConfig,
    clock: C,
    page: Page,
    registry: Registry,
    factory: Box<dyn EngineFactory>,
    timers: TimerQueue<TimerKind>,
    interactions: SecondaryMap<HandleId, Interactions>,
    supervisor: Supervisor,
    locale: Locale,
    viewport_width: u32,
    lightbox: Lightbox,
    notices: NoticeQueue,
    initialized: bool,
}

impl<C: Clock> GalleryController<C> {
    /// Create a controller. Nothing runs until [`init`](Self::init).
    pub fn new(page: Page, factory: Box<dyn EngineFactory>, clock: C, config: ControllerConfig) -> Self {
        let supervisor = Supervisor::new(config.supervisor_period, config.carousel.autoplay.delay);
        Self {
            viewport_width: config.viewport_width,
            config,
            clock,
            page,
            registry: Registry::new(),
            factory,
            timers: TimerQueue::new(),
            interactions: SecondaryMap::new(),
            supervisor,
            locale: Locale::new(),
            lightbox: Lightbox::new(),
            notices: NoticeQueue::new(),
            initialized: false,
        }
    }

    /// Start the supervisor and select the initial tab.
    ///
    /// Returns `None` if the gallery has no tabs. Calling `init` again
    /// without a [`teardown`](Self::teardown) in between only reselects.
    pub fn init(&mut self) -> Option<Selection> {
        if !self.initialized {
            let now = self.clock.now();
            self.timers.schedule(now + self.supervisor.period(), TimerKind::Supervisor);
            self.initialized = true;
            debug!(period = ?self.supervisor.period(), "autoplay supervisor started");
        }
        let initial = self
            .config
            .initial_tab
            .clone()
            .or_else(|| self.page.gallery().first().map(|tab| tab.id.clone()))?;
        Some(self.select_tab(initial))
    }

    /// Release every carousel and cancel every timer.
    pub fn teardown(&mut self) {
        self.timers.clear();
        self.interactions.clear();
        let released = self.registry.dispose_all();
        self.lightbox.close();
        self.initialized = false;
        info!(carousels = released.len(), "gallery torn down");
    }

    // ── Tab selection ────────────────────────────────────────────────

    /// Make `tab` the visible tab and bring its carousel up.
    ///
    /// Carousel failures are logged and reported as
    /// [`Selection::StaticContent`]; they never abort the selection.
    pub fn select_tab(&mut self, tab: impl Into<TabId>) -> Selection {
        let tab = tab.into();
        let now = self.clock.now();

        if !self.page.set_active_tab(&tab) {
            warn!(tab = %tab, "ignoring selection of unknown tab");
            return Selection::Rejected {
                error: CarouselError::UnknownTab { tab },
            };
        }

        let others: Vec<HandleId> = self
            .registry
            .iter()
            .filter(|(_, handle)| handle.tab() != &tab)
            .map(|(id, _)| id)
            .collect();
        for id in others {
            self.cancel_timers_of(id);
            self.interactions.remove(id);
            if let Some(handle) = self.registry.handle_mut(id) {
                handle.pause(PauseCause::TabHidden);
            }
        }

        let selection = match self.registry.id_of(&tab) {
            Some(id) => Selection::Carousel {
                handle: id,
                created: false,
            },
            None => match self.create_carousel(&tab, now) {
                Ok(id) => Selection::Carousel {
                    handle: id,
                    created: true,
                },
                Err(error) => {
                    warn!(tab = %tab, %error, "carousel unavailable, showing static content");
                    Selection::StaticContent { error }
                }
            },
        };

        if let Some(id) = selection.handle() {
            self.timers.cancel_where(|kind| *kind == TimerKind::Settle(id));
            self.timers.schedule(now + self.config.settle_delay, TimerKind::Settle(id));
        }

        self.notices.push(Notice::Reveal(RevealRequest {
            items: self.page.tab_cards(&tab),
            tab: tab.clone(),
            stagger: self.config.reveal_stagger,
            duration: self.config.reveal_duration,
        }));
        info!(tab = %tab, "gallery tab selected");
        selection
    }

    /// Dispose `tab`'s carousel and cancel its pending timers.
    ///
    /// Returns `false` if the tab had no carousel.
    pub fn dispose_tab(&mut self, tab: &TabId) -> bool {
        let Some(id) = self.registry.id_of(tab) else {
            return false;
        };
        self.cancel_timers_of(id);
        self.interactions.remove(id);
        self.registry.dispose(tab).is_some()
    }

    // ── Interactions ─────────────────────────────────────────────────

    /// Pointer entered a carousel: pause autoplay until the pointer leaves.
    ///
    /// Returns `true` if the carousel is now held for the interaction.
    pub fn pointer_enter(&mut self, node: NodeId) -> bool {
        self.begin_interaction(node, PauseCause::Hover)
    }

    /// Pointer left a card: resume after the hover resume delay.
    pub fn pointer_leave(&mut self, node: NodeId) -> bool {
        let delay = self.config.carousel.autoplay.hover_resume;
        self.end_interaction(node, PauseCause::Hover, delay)
    }

    /// Touch started: pause autoplay until the touch ends.
    pub fn touch_start(&mut self, node: NodeId) -> bool {
        self.begin_interaction(node, PauseCause::Touch)
    }

    /// Touch ended: resume after the touch resume delay.
    pub fn touch_end(&mut self, node: NodeId) -> bool {
        let delay = self.config.carousel.autoplay.touch_resume;
        self.end_interaction(node, PauseCause::Touch, delay)
    }

    /// Arrow or pagination click inside a carousel. Autoplay keeps its
    /// state; the slide change is announced as [`Notice::SlideChanged`].
    ///
    /// Returns the new slide index if it changed.
    pub fn navigate(&mut self, node: NodeId, navigation: Navigation) -> Option<usize> {
        let id = self.handle_for_node(node)?;
        let now = self.clock.now();
        let handle = self.registry.handle_mut(id)?;
        let index = handle.navigate(navigation, now)?;
        self.notices.push(Notice::SlideChanged {
            tab: handle.tab().clone(),
            index,
        });
        Some(index)
    }

    /// Open the lightbox on the clicked card.
    pub fn click_card(&mut self, node: NodeId) -> bool {
        let Some(item) = self.page.card_item(node).cloned() else {
            return false;
        };
        self.lightbox.open(item.clone());
        self.notices.push(Notice::LightboxOpened { item });
        true
    }

    /// Close the lightbox.
    pub fn close_lightbox(&mut self) -> bool {
        let closed = self.lightbox.close().is_some();
        if closed {
            self.notices.push(Notice::LightboxClosed);
        }
        closed
    }

    /// Re-resolve the breakpoint for a new viewport width and refresh every
    /// carousel layout.
    pub fn resize(&mut self, width: u32) {
        self.viewport_width = width;
        self.refresh_layouts();
    }

    /// Switch language, announce the new direction, and refresh every
    /// carousel so slides flow the right way.
    pub fn toggle_language(&mut self) -> Direction {
        let direction = self.locale.toggle();
        info!(lang = %self.locale.lang(), %direction, "language toggled");
        self.notices.push(Notice::DirectionChanged { direction });
        self.refresh_layouts();
        direction
    }

    /// Dispatch a page event to the matching handler.
    pub fn handle_event(&mut self, event: PageEvent) {
        debug!(event = event.name(), "page event");
        match event {
            PageEvent::SelectTab(tab) => {
                self.select_tab(tab);
            }
            PageEvent::PointerEnter(node) => {
                self.pointer_enter(node);
            }
            PageEvent::PointerLeave(node) => {
                self.pointer_leave(node);
            }
            PageEvent::TouchStart(node) => {
                self.touch_start(node);
            }
            PageEvent::TouchEnd(node) => {
                self.touch_end(node);
            }
            PageEvent::CardClick(node) => {
                self.click_card(node);
            }
            PageEvent::NextSlide(node) => {
                self.navigate(node, Navigation::Next);
            }
            PageEvent::PrevSlide(node) => {
                self.navigate(node, Navigation::Prev);
            }
            PageEvent::GoToSlide { node, index } => {
                self.navigate(node, Navigation::To(index));
            }
            PageEvent::CloseLightbox => {
                self.close_lightbox();
            }
            PageEvent::Resize { width } => self.resize(width),
            PageEvent::ToggleLanguage => {
                self.toggle_language();
            }
        }
    }

    // ── Time ─────────────────────────────────────────────────────────

    /// Fire every timer due by now and advance running carousels.
    pub fn poll(&mut self) {
        let now = self.clock.now();
        while let Some((_, kind)) = self.timers.pop_due(now) {
            self.fire(kind, now);
        }
        for (_, handle) in self.registry.iter_mut() {
            if let Some(index) = handle.poll(now) {
                self.notices.push(Notice::SlideChanged {
                    tab: handle.tab().clone(),
                    index,
                });
            }
        }
    }

    /// The earliest moment [`poll`](Self::poll) has work to do.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        let engines = self
            .registry
            .iter()
            .filter(|(_, handle)| handle.state() == HandleState::Running)
            .filter_map(|(_, handle)| handle.engine().next_deadline());
        self.timers.next_deadline().into_iter().chain(engines).min()
    }

    /// Run one supervisor pass immediately.
    pub fn supervise(&mut self) -> SupervisorReport {
        let now = self.clock.now();
        self.supervisor.pass(&mut self.registry, now)
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Drain the notices emitted since the last drain.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    /// The tab whose view is active.
    pub fn active_tab(&self) -> Option<TabId> {
        self.page.active_tab()
    }

    /// The layout carousels currently use.
    pub fn layout(&self) -> Layout {
        self.config
            .carousel
            .layout(self.viewport_width, self.locale.direction())
    }

    /// Number of timers waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    // ── Internals ────────────────────────────────────────────────────

    fn create_carousel(&mut self, tab: &TabId, now: Timestamp) -> Result<HandleId, CarouselError> {
        let mount = Mount {
            container: self.page.carousel_container(tab),
            slide_count: self.page.tab_cards(tab).len(),
            layout: self.layout(),
        };
        self.registry
            .create(tab, self.config.carousel, mount, self.factory.as_mut(), now)
    }

    fn fire(&mut self, kind: TimerKind, now: Timestamp) {
        match kind {
            TimerKind::Settle(id) => {
                let active = self.page.active_tab();
                if let Some(handle) = self.registry.handle_mut(id) {
                    let interacting = matches!(
                        handle.pause_cause(),
                        Some(PauseCause::Hover | PauseCause::Touch)
                    );
                    if active.as_ref() == Some(handle.tab()) && !interacting {
                        handle.resume(now);
                    }
                }
            }
            TimerKind::Resume(id) => {
                let active = self.page.active_tab();
                let idle = self
                    .interactions
                    .get(id)
                    .map_or(true, |interactions| interactions.in_progress().is_none());
                if let Some(handle) = self.registry.handle_mut(id) {
                    let interaction_pause = matches!(
                        handle.pause_cause(),
                        Some(PauseCause::Hover | PauseCause::Touch)
                    );
                    if idle && interaction_pause && active.as_ref() == Some(handle.tab()) {
                        handle.resume(now);
                        self.interactions.remove(id);
                        debug!(tab = %handle.tab(), "autoplay resumed after interaction");
                    }
                }
            }
            TimerKind::Supervisor => {
                self.supervisor.pass(&mut self.registry, now);
                self.timers.schedule(now + self.supervisor.period(), TimerKind::Supervisor);
            }
        }
    }

    fn cancel_timers_of(&mut self, id: HandleId) {
        self.timers.cancel_where(|kind| kind.owner() == Some(id));
    }

    fn cancel_resume(&mut self, id: HandleId) {
        self.timers
            .cancel_where(|kind| *kind == TimerKind::Resume(id));
    }

    fn handle_for_node(&self, node: NodeId) -> Option<HandleId> {
        let tab = self.page.owning_tab(node)?;
        self.registry.id_of(&tab)
    }

    fn begin_interaction(&mut self, node: NodeId, cause: PauseCause) -> bool {
        let Some(id) = self.handle_for_node(node) else {
            return false;
        };
        let active = self.page.active_tab();
        let Some(handle) = self.registry.handle_mut(id) else {
            return false;
        };
        let accepted = match (handle.state(), handle.pause_cause()) {
            (HandleState::Running, _) => true,
            (HandleState::Paused, Some(PauseCause::Hover | PauseCause::Touch)) => true,
            // Reselected tab still waiting for its settle timer.
            (HandleState::Paused, Some(PauseCause::TabHidden)) => active.as_ref() == Some(handle.tab()),
            _ => false,
        };
        if !accepted {
            return false;
        }
        handle.pause(cause);
        self.cancel_resume(id);
        if self.interactions.get(id).is_none() {
            self.interactions.insert(id, Interactions::default());
        }
        if let Some(flag) = self.interactions.get_mut(id).and_then(|i| i.flag(cause)) {
            *flag = true;
        }
        true
    }

    fn end_interaction(&mut self, node: NodeId, cause: PauseCause, delay: Duration) -> bool {
        let Some(id) = self.handle_for_node(node) else {
            return false;
        };
        let now = self.clock.now();
        let Some(interactions) = self.interactions.get_mut(id) else {
            return false;
        };
        match interactions.flag(cause) {
            Some(flag) if *flag => *flag = false,
            _ => return false,
        }
        let bound = now + delay;
        let resume_at = interactions.resume_at.map_or(bound, |at| at.max(bound));
        interactions.resume_at = Some(resume_at);

        match interactions.in_progress() {
            Some(other) => {
                if let Some(handle) = self.registry.handle_mut(id) {
                    handle.pause(other);
                }
            }
            None => {
                self.cancel_resume(id);
                self.timers.schedule(resume_at, TimerKind::Resume(id));
            }
        }
        true
    }

    fn refresh_layouts(&mut self) {
        let layout = self.layout();
        for (_, handle) in self.registry.iter_mut() {
            handle.engine_mut().refresh(&layout);
        }
    }
}

impl<C: Clock> fmt::Debug for GalleryController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GalleryController")
            .field("active_tab", &self.page.active_tab())
            .field("carousels", &self.registry.len())
            .field("pending_timers", &self.timers.len())
            .field("lang", &self.locale.lang())
            .field("viewport_width", &self.viewport_width)
            .field("initialized", &self.initialized)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
