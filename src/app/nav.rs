//! Site navigation: the mobile menu and in-page anchors.

use crate::ui::Surface;

/// Region ids of the navigation chrome.
pub const MENU_TOGGLE: &str = "menu-toggle";
pub const NAV_MENU: &str = "nav-menu";
pub const BODY: &str = "body";

/// Clicks the menu reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    ToggleClicked,
    /// A click anywhere on the page. `inside` is true when it landed on the
    /// menu or the toggle.
    PageClicked { inside: bool },
    LinkClicked,
}

/// Open/closed state of the mobile menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    pub open: bool,
}

impl MenuState {
    /// Applies a click. Returns true if the menu changed.
    pub fn handle(&mut self, event: NavEvent) -> bool {
        let open = match event {
            NavEvent::ToggleClicked => !self.open,
            NavEvent::PageClicked { inside: true } => self.open,
            NavEvent::PageClicked { inside: false } | NavEvent::LinkClicked => false,
        };
        let changed = open != self.open;
        self.open = open;
        tracing::debug!(?event, open, changed, "menu event");
        changed
    }

    /// Mirrors the state onto the toggle, the menu and the page body.
    pub fn apply<S: Surface + ?Sized>(self, surface: &mut S) {
        surface.set_class(MENU_TOGGLE, "active", self.open);
        surface.set_class(NAV_MENU, "active", self.open);
        surface.set_class(BODY, "menu-open", self.open);
    }
}

/// Id of the element an in-page link should scroll to.
///
/// `None` for external links and for the bare `#` placeholder.
#[must_use]
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}
