//! Outbound notices for presentational collaborators.

use std::time::Duration;

use crate::dom::NodeId;
use crate::gallery::{GalleryItem, TabId};
use crate::locale::Direction;

/// Stagger between consecutive cards of a reveal.
pub const REVEAL_STAGGER: Duration = Duration::from_millis(100);
/// Duration of each card's reveal tween.
pub const REVEAL_DURATION: Duration = Duration::from_millis(600);

/// "Animate these newly visible items": fade/slide/scale each card in,
/// starting `stagger` apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealRequest {
    /// Tab whose cards became visible.
    pub tab: TabId,
    /// Cards to animate, in display order.
    pub items: Vec<NodeId>,
    /// Delay between consecutive cards.
    pub stagger: Duration,
    /// Duration of each card's tween.
    pub duration: Duration,
}

impl RevealRequest {
    /// Start offset of the card at `position`.
    pub fn offset_of(&self, position: usize) -> Duration {
        self.stagger * u32::try_from(position).unwrap_or(u32::MAX)
    }

    /// Time until the last card finishes.
    pub fn total_duration(&self) -> Duration {
        match self.items.len() {
            0 => Duration::ZERO,
            n => self.offset_of(n - 1) + self.duration,
        }
    }
}

/// A fire-and-forget request from the carousel core. Collaborators are never
/// awaited and cannot fail the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Reveal the cards of a freshly activated tab.
    Reveal(RevealRequest),
    /// A carousel moved to a new slide; pulse its active card.
    SlideChanged { tab: TabId, index: usize },
    /// The page text direction changed.
    DirectionChanged { direction: Direction },
    /// The lightbox opened on this item.
    LightboxOpened { item: GalleryItem },
    /// The lightbox closed.
    LightboxClosed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn request(cards: usize) -> RevealRequest {
        let mut nodes: SlotMap<NodeId, ()> = SlotMap::with_key();
        RevealRequest {
            tab: "salla".into(),
            items: (0..cards).map(|_| nodes.insert(())).collect(),
            stagger: REVEAL_STAGGER,
            duration: REVEAL_DURATION,
        }
    }

    #[test]
    fn offsets_are_staggered() {
        let reveal = request(4);
        assert_eq!(reveal.offset_of(0), Duration::ZERO);
        assert_eq!(reveal.offset_of(3), Duration::from_millis(300));
    }

    #[test]
    fn total_duration() {
        assert_eq!(request(0).total_duration(), Duration::ZERO);
        assert_eq!(request(1).total_duration(), Duration::from_millis(600));
        assert_eq!(request(4).total_duration(), Duration::from_millis(900));
    }
}
