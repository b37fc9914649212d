//! The gallery page: tab buttons, tab views, carousel containers, cards.
//!
//! [`Page`] is the presentation side the carousel core talks to. It answers
//! "does the carousel container for tab X exist?" and applies "mark view X
//! active". Everything else the page shows is outside the core.
//!
//! The tree built from a [`Gallery`] looks like:
//!
//! ```text
//! body
//!  └─ section.gallery-section
//!      ├─ div.portfolio-tabs
//!      │   └─ button.tab-button[data-tab=<id>]      (one per tab)
//!      └─ div#<id>.tab-content                      (one per tab)
//!          └─ div.swiper
//!              ├─ div.gallery-card                  (one per item)
//!              ├─ div.swiper-button-prev
//!              ├─ div.swiper-button-next
//!              └─ div.swiper-pagination
//! ```

use crate::gallery::{Gallery, GalleryItem, TabId};

use super::node::{NodeData, NodeId};
use super::tree::Dom;

/// Class toggled on the selected tab's button and view.
pub const ACTIVE: &str = "active";
/// Class of a tab's content view.
pub const TAB_CONTENT: &str = "tab-content";
/// Class of a tab button.
pub const TAB_BUTTON: &str = "tab-button";
/// Class of the element a carousel engine attaches to.
pub const CAROUSEL_CONTAINER: &str = "swiper";
/// Class of an image card.
pub const GALLERY_CARD: &str = "gallery-card";
/// Class of a carousel's "previous slide" arrow.
pub const NAV_PREV: &str = "swiper-button-prev";
/// Class of a carousel's "next slide" arrow.
pub const NAV_NEXT: &str = "swiper-button-next";
/// Class of a carousel's clickable pagination bullets.
pub const PAGINATION: &str = "swiper-pagination";

/// The rendered gallery section.
#[derive(Debug)]
pub struct Page {
    dom: Dom,
    gallery: Gallery,
}

impl Page {
    /// Render every tab of `gallery` into a fresh tree. No tab starts active.
    pub fn build(gallery: Gallery) -> Self {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        let section = dom.insert_child(body, NodeData::new("section").with_class("gallery-section"));

        if let Some(section) = section {
            let buttons = dom.insert_child(section, NodeData::new("div").with_class("portfolio-tabs"));
            for tab in gallery.tabs() {
                if let Some(buttons) = buttons {
                    dom.insert_child(
                        buttons,
                        NodeData::new("button")
                            .with_class(TAB_BUTTON)
                            .with_data_tab(tab.id.clone()),
                    );
                }
                let view = dom.insert_child(
                    section,
                    NodeData::new("div").with_id(tab.id.as_str()).with_class(TAB_CONTENT),
                );
                let container = view.and_then(|view| {
                    dom.insert_child(view, NodeData::new("div").with_class(CAROUSEL_CONTAINER))
                });
                if let Some(container) = container {
                    for item in &tab.items {
                        dom.insert_child(
                            container,
                            NodeData::new("div")
                                .with_class(GALLERY_CARD)
                                .with_item(item.clone()),
                        );
                    }
                    for control in [NAV_PREV, NAV_NEXT, PAGINATION] {
                        dom.insert_child(container, NodeData::new("div").with_class(control));
                    }
                }
            }
        }

        Self { dom, gallery }
    }

    /// The gallery this page renders.
    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Read access to the underlying tree.
    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// Mutable access to the underlying tree.
    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    /// The content view of `tab`, if rendered.
    pub fn tab_view(&self, tab: &TabId) -> Option<NodeId> {
        self.dom
            .query_by_id(tab.as_str())
            .filter(|&id| self.has_class(id, TAB_CONTENT))
    }

    /// The carousel container inside `tab`'s view, if rendered.
    pub fn carousel_container(&self, tab: &TabId) -> Option<NodeId> {
        let view = self.tab_view(tab)?;
        self.dom.query_within(view, CAROUSEL_CONTAINER).into_iter().next()
    }

    /// The gallery cards of `tab`, in display order.
    pub fn tab_cards(&self, tab: &TabId) -> Vec<NodeId> {
        self.tab_view(tab)
            .map(|view| self.dom.query_within(view, GALLERY_CARD))
            .unwrap_or_default()
    }

    /// The navigation control with class `control` inside `tab`'s carousel.
    pub fn carousel_control(&self, tab: &TabId, control: &str) -> Option<NodeId> {
        let container = self.carousel_container(tab)?;
        self.dom.query_within(container, control).into_iter().next()
    }

    /// The tab button for `tab`.
    pub fn tab_button(&self, tab: &TabId) -> Option<NodeId> {
        self.dom
            .query_all(|data| data.has_class(TAB_BUTTON) && data.data_tab.as_ref() == Some(tab))
            .into_iter()
            .next()
    }

    /// Make `tab` the only active tab: its button and view gain `active`,
    /// every other button and view loses it.
    ///
    /// Returns `false` (and changes nothing) if `tab` has no rendered view.
    pub fn set_active_tab(&mut self, tab: &TabId) -> bool {
        let Some(view) = self.tab_view(tab) else {
            return false;
        };
        let button = self.tab_button(tab);

        let mut toggled = self.dom.query_by_class(TAB_CONTENT);
        toggled.extend(self.dom.query_by_class(TAB_BUTTON));
        for id in toggled {
            if let Some(data) = self.dom.get_mut(id) {
                data.remove_class(ACTIVE);
            }
        }
        for id in std::iter::once(view).chain(button) {
            if let Some(data) = self.dom.get_mut(id) {
                data.add_class(ACTIVE);
            }
        }
        true
    }

    /// The tab whose view is currently active.
    pub fn active_tab(&self) -> Option<TabId> {
        self.dom
            .query_all(|data| data.has_class(TAB_CONTENT) && data.has_class(ACTIVE))
            .into_iter()
            .next()
            .and_then(|id| self.dom.get(id))
            .and_then(|data| data.id.as_deref())
            .map(TabId::from)
    }

    /// The tab owning `node`, found through the closest `.tab-content` ancestor.
    pub fn owning_tab(&self, node: NodeId) -> Option<TabId> {
        let view = self.dom.closest(node, TAB_CONTENT)?;
        self.dom.get(view)?.id.as_deref().map(TabId::from)
    }

    /// The gallery item shown by the card at or above `node`.
    pub fn card_item(&self, node: NodeId) -> Option<&GalleryItem> {
        let card = self.dom.closest(node, GALLERY_CARD)?;
        self.dom.get(card)?.item.as_ref()
    }

    /// Drop `tab`'s carousel container, as if the view had not rendered it yet.
    ///
    /// Returns `true` if a container was removed.
    pub fn remove_carousel_container(&mut self, tab: &TabId) -> bool {
        match self.carousel_container(tab) {
            Some(container) => self.dom.remove(container).is_some(),
            None => false,
        }
    }

    fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.dom.get(id).is_some_and(|data| data.has_class(class))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
