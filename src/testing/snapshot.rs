//! Snapshot helpers.
//!
//! Plain-text dumps of controller state and emitted notices, suitable for
//! `insta` inline snapshots and quick assertions.

use crate::controller::GalleryController;
use crate::event::Notice;
use crate::time::Clock;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Describe every gallery tab, one line each, in gallery order.
///
/// A tab without a carousel prints as `tab: -`. Otherwise the line carries
/// the handle state, the pause cause when paused, and the slide index. The
/// active tab is suffixed with ` (active)`. Lines are joined with `'\n'` and
/// the last line has no trailing newline.
///
/// ```ignore
/// wordpress: paused(tab-hidden) slide=0
/// salla: running slide=2 (active)
/// zid: -
/// opencart: -
/// ```
pub fn describe<C: Clock>(controller: &GalleryController<C>) -> String {
    let active = controller.active_tab();
    controller
        .page()
        .gallery()
        .tabs()
        .iter()
        .map(|tab| {
            let mut line = match controller.registry().get(&tab.id) {
                None => format!("{}: -", tab.id),
                Some(handle) => {
                    let state = match handle.pause_cause() {
                        Some(cause) => format!("{}({cause})", handle.state()),
                        None => handle.state().to_string(),
                    };
                    format!("{}: {state} slide={}", tab.id, handle.active_index())
                }
            };
            if active.as_ref() == Some(&tab.id) {
                line.push_str(" (active)");
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Describe a batch of notices, one line each.
pub fn describe_notices(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|notice| match notice {
            Notice::Reveal(reveal) => format!(
                "reveal {} cards={} over={}ms",
                reveal.tab,
                reveal.items.len(),
                reveal.total_duration().as_millis()
            ),
            Notice::SlideChanged { tab, index } => format!("slide {tab} -> {index}"),
            Notice::DirectionChanged { direction } => format!("direction {direction}"),
            Notice::LightboxOpened { item } => format!("lightbox open \"{}\"", item.title),
            Notice::LightboxClosed => "lightbox closed".to_owned(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Pilot;

    #[test]
    fn describe_fresh_page() {
        let pilot = Pilot::new();
        insta::assert_snapshot!(describe(pilot.controller()), @r"
wordpress: -
salla: -
zid: -
opencart: -
");
    }

    #[test]
    fn describe_after_switch() {
        let mut pilot = Pilot::new();
        pilot.init();
        pilot.select("zid");
        insta::assert_snapshot!(describe(pilot.controller()), @r"
wordpress: paused(tab-hidden) slide=0
salla: -
zid: running slide=0 (active)
opencart: -
");
    }

    #[test]
    fn describe_notice_batch() {
        let mut pilot = Pilot::new();
        pilot.init();
        pilot.controller_mut().toggle_language();
        let notices = pilot.drain_notices();
        insta::assert_snapshot!(describe_notices(&notices), @r"
reveal wordpress cards=6 over=1100ms
direction rtl
");
    }
}
