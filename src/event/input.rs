//! Inbound page events.

use crate::dom::NodeId;
use crate::gallery::TabId;

/// A user-input callback forwarded by the host page.
///
/// Pointer and touch events carry the node they fired on; the controller
/// resolves the owning tab through the node's closest `.tab-content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// A tab button was clicked.
    SelectTab(TabId),
    /// The pointer entered a gallery card.
    PointerEnter(NodeId),
    /// The pointer left a gallery card.
    PointerLeave(NodeId),
    /// A touch started on a carousel.
    TouchStart(NodeId),
    /// A touch ended on a carousel.
    TouchEnd(NodeId),
    /// A gallery card was clicked.
    CardClick(NodeId),
    /// A carousel's "next" arrow was clicked.
    NextSlide(NodeId),
    /// A carousel's "previous" arrow was clicked.
    PrevSlide(NodeId),
    /// A pagination bullet was clicked.
    GoToSlide { node: NodeId, index: usize },
    /// The lightbox close button or backdrop was clicked.
    CloseLightbox,
    /// The viewport was resized to this width in CSS pixels.
    Resize { width: u32 },
    /// The language toggle was clicked.
    ToggleLanguage,
}

impl PageEvent {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectTab(_) => "select-tab",
            Self::PointerEnter(_) => "pointer-enter",
            Self::PointerLeave(_) => "pointer-leave",
            Self::TouchStart(_) => "touch-start",
            Self::TouchEnd(_) => "touch-end",
            Self::CardClick(_) => "card-click",
            Self::NextSlide(_) => "next-slide",
            Self::PrevSlide(_) => "prev-slide",
            Self::GoToSlide { .. } => "go-to-slide",
            Self::CloseLightbox => "close-lightbox",
            Self::Resize { .. } => "resize",
            Self::ToggleLanguage => "toggle-language",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert_eq!(PageEvent::SelectTab("zid".into()).name(), "select-tab");
        assert_eq!(PageEvent::Resize { width: 800 }.name(), "resize");
        assert_eq!(PageEvent::ToggleLanguage.name(), "toggle-language");
    }
}
