//! Integration tests for folio-carousel.
//!
//! These tests drive the public API from outside the crate through the
//! `Pilot`, verifying that the registry, supervisor, and controller keep
//! carousel lifecycles consistent across tab switches and interactions.

use std::time::Duration;

use folio_carousel::carousel::{CarouselError, HandleState, PauseCause};
use folio_carousel::contact::{ContactError, ContactForm, Mailto};
use folio_carousel::controller::{ControllerConfig, Selection};
use folio_carousel::event::{Notice, PageEvent};
use folio_carousel::gallery::{Gallery, TabId};
use folio_carousel::locale::{Direction, Lang};
use folio_carousel::testing::{describe_notices, Pilot};
use pretty_assertions::assert_eq;

fn live_handles(pilot: &Pilot, tab: &str) -> usize {
    let tab = TabId::from(tab);
    pilot
        .controller()
        .registry()
        .iter()
        .filter(|(_, handle)| handle.tab() == &tab && handle.is_live())
        .count()
}

// ---------------------------------------------------------------------------
// Registry uniqueness
// ---------------------------------------------------------------------------

#[test]
fn test_at_most_one_handle_per_tab() {
    let mut pilot = Pilot::new();
    pilot.init();
    for tab in ["salla", "wordpress", "salla", "zid", "salla", "opencart", "salla"] {
        pilot.select(tab);
        pilot.advance_ms(50);
    }
    for tab in ["wordpress", "salla", "zid", "opencart"] {
        assert_eq!(live_handles(&pilot, tab), 1, "tab {tab}");
        assert_eq!(pilot.probes().attach_count(&TabId::from(tab)), 1, "tab {tab}");
    }
}

#[test]
fn test_exactly_one_running_after_switches() {
    let mut pilot = Pilot::new();
    pilot.init();
    pilot.select("zid");
    pilot.select("opencart");
    pilot.advance_ms(300);
    let running: Vec<String> = pilot
        .controller()
        .registry()
        .iter()
        .filter(|(_, h)| h.state() == HandleState::Running)
        .map(|(_, h)| h.tab().to_string())
        .collect();
    assert_eq!(running, vec!["opencart".to_owned()]);
}

// ---------------------------------------------------------------------------
// Tab switch sequence
// ---------------------------------------------------------------------------

#[test]
fn test_switch_away_and_back() {
    let mut pilot = Pilot::new();
    pilot.init();
    pilot.advance_ms(300);
    pilot.select("salla");
    pilot.advance_ms(300);
    pilot.select("wordpress");
    pilot.advance_ms(300);

    insta::assert_snapshot!(pilot.describe(), @r"
wordpress: running slide=0 (active)
salla: paused(tab-hidden) slide=0
zid: -
opencart: -
");
    let wordpress = pilot.probe("wordpress").unwrap();
    assert_eq!(wordpress.starts(), 2);
    assert_eq!(wordpress.stops(), 1);
    assert_eq!(pilot.probes().attach_count(&TabId::from("wordpress")), 1);
}

#[test]
fn test_unknown_tab_is_ignored() {
    let mut pilot = Pilot::new();
    pilot.init();
    let before = pilot.describe();
    assert_eq!(
        pilot.select("magento"),
        Selection::Rejected {
            error: CarouselError::UnknownTab {
                tab: TabId::from("magento")
            }
        }
    );
    assert_eq!(pilot.describe(), before);
}

// ---------------------------------------------------------------------------
// Interaction pauses
// ---------------------------------------------------------------------------

#[test]
fn test_hover_resume_exactly_after_500ms() {
    let mut pilot = Pilot::new();
    pilot.init();
    pilot.advance_ms(1_000);
    pilot.hover("wordpress", 2);
    assert_eq!(pilot.cause("wordpress"), Some(PauseCause::Hover));
    pilot.advance_ms(4_000);
    assert_eq!(pilot.state("wordpress"), Some(HandleState::Paused));

    pilot.unhover("wordpress", 2);
    pilot.advance_ms(499);
    assert_eq!(pilot.state("wordpress"), Some(HandleState::Paused));
    pilot.advance_ms(1);
    assert_eq!(pilot.state("wordpress"), Some(HandleState::Running));
}

#[test]
fn test_touch_resume_after_1000ms() {
    let mut pilot = Pilot::new();
    pilot.init();
    pilot.select("salla");
    pilot.advance_ms(300);
    pilot.touch("salla", 0);
    pilot.release("salla", 0);
    pilot.advance_ms(999);
    assert_eq!(pilot.cause("salla"), Some(PauseCause::Touch));
    pilot.advance_ms(1);
    assert_eq!(pilot.state("salla"), Some(HandleState::Running));
}

#[test]
fn test_switch_during_hover_keeps_hidden_tab_paused() {
    let mut pilot = Pilot::new();
    pilot.init();
    pilot.advance_ms(300);
    pilot.hover("wordpress", 0);
    pilot.unhover("wordpress", 0);
    pilot.select("zid");
    pilot.advance_ms(5_000);
    assert_eq!(pilot.cause("wordpress"), Some(PauseCause::TabHidden));
    assert!(!pilot.probe("wordpress").unwrap().is_running());
    assert_eq!(pilot.state("zid"), Some(HandleState::Running));
}

#[test]
fn test_touch_outlasts_hover() {
    let mut pilot = Pilot::new();
    pilot.init();
    pilot.advance_ms(300);
    pilot.touch("wordpress", 0);
    pilot.hover("wordpress", 0);
    pilot.unhover("wordpress", 0);
    pilot.advance_ms(2_000);
    assert_eq!(pilot.cause("wordpress"), Some(PauseCause::Touch));
    assert!(!pilot.probe("wordpress").unwrap().is_running());

    pilot.release("wordpress", 0);
    pilot.advance_ms(999);
    assert_eq!(pilot.state("wordpress"), Some(HandleState::Paused));
    pilot.advance_ms(1);
    assert_eq!(pilot.state("wordpress"), Some(HandleState::Running));
}

#[test]
fn test_hover_during_settle_window() {
    let mut pilot = Pilot::new();
    pilot.init();
    pilot.advance_ms(300);
    pilot.select("salla");
    pilot.select("wordpress");
    let card = pilot.hover("wordpress", 0);
    pilot.advance_ms(250);
    assert_eq!(pilot.cause("wordpress"), Some(PauseCause::Hover));

    pilot.unhover_node(card);
    pilot.advance_ms(499);
    assert_eq!(pilot.state("wordpress"), Some(HandleState::Paused));
    pilot.advance_ms(1);
    assert_eq!(pilot.state("wordpress"), Some(HandleState::Running));
}

// ---------------------------------------------------------------------------
// Manual navigation
// ---------------------------------------------------------------------------

#[test]
fn test_manual_navigation_keeps_autoplay() {
    let mut pilot = Pilot::new();
    pilot.init();
    pilot.advance_ms(300);
    pilot.drain_notices();

    pilot.prev("wordpress");
    pilot.next("wordpress");
    pilot.go_to("wordpress", 4);
    assert_eq!(
        pilot.drain_notices(),
        vec![
            Notice::SlideChanged { tab: TabId::from("wordpress"), index: 5 },
            Notice::SlideChanged { tab: TabId::from("wordpress"), index: 0 },
            Notice::SlideChanged { tab: TabId::from("wordpress"), index: 4 },
        ]
    );
    let engine = pilot.probe("wordpress").unwrap();
    assert_eq!(engine.navigations(), 3);
    assert_eq!(engine.index(), 4);
    assert!(engine.is_running());
    assert_eq!(pilot.state("wordpress"), Some(HandleState::Running));
}

#[test]
fn test_navigation_on_hidden_carousel_is_ignored() {
    let mut pilot = Pilot::new();
    pilot.init();
    pilot.drain_notices();
    // No carousel has been built for zid yet.
    pilot.next("zid");
    assert!(pilot.drain_notices().is_empty());
    assert_eq!(pilot.state("zid"), None);
}

// ---------------------------------------------------------------------------
// Disposal
// ---------------------------------------------------------------------------

#[test]
fn test_dispose_cancels_pending_resume() {
    let mut pilot = Pilot::new();
    pilot.init();
    pilot.advance_ms(300);
    pilot.hover("wordpress", 0);
    pilot.unhover("wordpress", 0);
    assert!(pilot.controller_mut().dispose_tab(&TabId::from("wordpress")));
    pilot.advance_ms(10_000);

    let probe = pilot.probe("wordpress").unwrap();
    assert!(probe.is_disposed());
    assert!(!probe.is_running());
    assert_eq!(pilot.state("wordpress"), None);
}

#[test]
fn test_teardown_releases_all_engines() {
    let mut pilot = Pilot::new();
    pilot.init();
    pilot.select("salla");
    pilot.select("zid");
    pilot.controller_mut().teardown();
    pilot.advance_ms(10_000);
    for tab in ["wordpress", "salla", "zid"] {
        let probe = pilot.probe(tab).unwrap();
        assert!(probe.is_disposed(), "tab {tab}");
        assert!(!probe.is_running(), "tab {tab}");
    }
    assert!(pilot.controller().registry().is_empty());
    assert_eq!(pilot.controller().pending_timers(), 0);
}

#[test]
fn test_reselect_after_dispose_builds_fresh_handle() {
    let mut pilot = Pilot::new();
    pilot.init();
    pilot.controller_mut().dispose_tab(&TabId::from("wordpress"));
    let selection = pilot.select("wordpress");
    assert!(matches!(selection, Selection::Carousel { created: true, .. }));
    assert_eq!(pilot.probes().attach_count(&TabId::from("wordpress")), 2);
    assert_eq!(live_handles(&pilot, "wordpress"), 1);
}

// ---------------------------------------------------------------------------
// Supervisor
// ---------------------------------------------------------------------------

#[test]
fn test_supervisor_is_idempotent_on_correct_state() {
    let mut pilot = Pilot::new();
    pilot.init();
    pilot.advance_ms(300);
    let probe = pilot.probe("wordpress").unwrap();
    let before = probe.snapshot();
    pilot.advance_ms(9_000);
    assert_eq!(probe.snapshot(), before);
}

#[test]
fn test_supervisor_recovers_within_one_period() {
    let mut pilot = Pilot::new();
    pilot.init();
    pilot.advance_ms(3_100);
    let probe = pilot.probe("wordpress").unwrap();
    probe.force_stop();
    probe.force_delay(Duration::from_millis(7_000));
    pilot.advance_ms(2_899);
    assert!(!probe.is_running());
    pilot.advance_ms(1);
    assert!(probe.is_running());
    assert_eq!(probe.delay(), Duration::from_millis(3_000));
}

// ---------------------------------------------------------------------------
// Failure isolation
// ---------------------------------------------------------------------------

#[test]
fn test_missing_container_then_retry() {
    let mut pilot = Pilot::new();
    pilot.init();
    let zid = TabId::from("zid");
    assert!(pilot.controller_mut().page_mut().remove_carousel_container(&zid));

    let selection = pilot.select("zid");
    assert_eq!(
        selection,
        Selection::StaticContent {
            error: CarouselError::ContainerNotFound { tab: zid.clone() }
        }
    );
    assert_eq!(pilot.controller().active_tab(), Some(zid.clone()));
    assert_eq!(pilot.state("zid"), None);

    // Other tabs keep working.
    assert!(matches!(pilot.select("salla"), Selection::Carousel { .. }));
}

#[test]
fn test_attach_failure_then_retry_succeeds() {
    let mut pilot = Pilot::new();
    pilot.init();
    pilot.probes().fail_for("opencart");
    let selection = pilot.select("opencart");
    let Selection::StaticContent { error } = selection else {
        panic!("expected static content, got {selection:?}");
    };
    assert!(matches!(error, CarouselError::EngineAttachFailure { .. }));
    assert!(error.is_retryable());
    assert_eq!(pilot.state("opencart"), None);

    pilot.probes().heal(&TabId::from("opencart"));
    pilot.select("wordpress");
    assert!(matches!(
        pilot.select("opencart"),
        Selection::Carousel { created: true, .. }
    ));
    pilot.advance_ms(200);
    assert_eq!(pilot.state("opencart"), Some(HandleState::Running));
}

// ---------------------------------------------------------------------------
// Page features
// ---------------------------------------------------------------------------

#[test]
fn test_language_toggle_and_resize_refresh_layouts() {
    let mut pilot = Pilot::with_config(ControllerConfig::new().with_viewport_width(1200));
    pilot.init();
    pilot.send(PageEvent::ToggleLanguage);
    pilot.send(PageEvent::Resize { width: 800 });

    let layout = pilot.probe("wordpress").unwrap().layout().unwrap();
    assert_eq!(layout.direction, Direction::Rtl);
    assert_eq!(layout.spec.slides_per_view, 2);
    assert!(layout.looped);
    assert_eq!(pilot.controller().locale().lang(), Lang::Ar);
    assert_eq!(pilot.controller().locale().toggle_label(), "English");
}

#[test]
fn test_lightbox_and_notices() {
    let mut pilot = Pilot::new();
    pilot.init();
    let card = pilot.card("salla", 1);
    pilot.send(PageEvent::SelectTab(TabId::from("salla")));
    pilot.send(PageEvent::CardClick(card));
    pilot.send(PageEvent::CloseLightbox);

    insta::assert_snapshot!(describe_notices(&pilot.drain_notices()), @r#"
reveal wordpress cards=6 over=1100ms
reveal salla cards=4 over=900ms
lightbox open "Salla Project 2"
lightbox closed
"#);
    assert!(!pilot.controller().lightbox().is_open());
}

#[test]
fn test_reveal_is_emitted_on_every_selection() {
    let mut pilot = Pilot::new();
    pilot.init();
    pilot.select("zid");
    pilot.select("wordpress");
    let reveals = pilot
        .drain_notices()
        .into_iter()
        .filter(|n| matches!(n, Notice::Reveal(_)))
        .count();
    assert_eq!(reveals, 3);
}

#[test]
fn test_gallery_from_json_drives_controller() {
    let json = r#"{"tabs": [
        {"id": "shopify", "label_en": "Shopify", "label_ar": "شوبيفاي",
         "items": [{"image": "s1.webp", "title": "Store 1"}]},
        {"id": "wix", "label_en": "Wix", "label_ar": "ويكس", "items": []}
    ]}"#;
    let gallery = Gallery::from_json(json).unwrap();
    let mut pilot = Pilot::with_gallery(gallery, ControllerConfig::new());
    assert!(matches!(pilot.init(), Some(Selection::Carousel { .. })));
    assert_eq!(pilot.controller().active_tab(), Some(TabId::from("shopify")));
    pilot.select("wix");
    assert_eq!(pilot.state("wix"), Some(HandleState::Running));
}

#[test]
fn test_contact_mailto() {
    let mailto = Mailto::new("hello@example.com", "example.com");
    let form = ContactForm {
        full_name: "Omar".into(),
        phone: String::new(),
        email: "omar@example.com".into(),
        message: "Let's talk".into(),
    };
    let link = mailto.link(&form, Lang::En).unwrap();
    assert!(link.starts_with("mailto:hello%40example.com?subject=Message%20from%20Personal%20Website&body="));
    assert!(link.contains("Let%27s%20talk"));

    let empty = ContactForm::default();
    assert_eq!(mailto.link(&empty, Lang::Ar), Err(ContactError::MissingField("fullName")));
}
