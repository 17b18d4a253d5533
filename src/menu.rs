//! Overlay menu state machine.
//!
//! ```text
//! Closed ──open──▶ Open(Idle) ──request──▶ Open(Loading) ──resolve──▶ Open(Showing)
//!    ▲                 ▲                                                   │
//!    └──close── any    └────────────────────reset──────────────────────────┘
//! ```
//!
//! Each request carries a [`RequestId`]. A response is applied only when the
//! menu is still loading that same request, so a reply that arrives after a
//! close (or a close and reopen) is dropped.

use std::cell::RefCell;
use std::rc::Weak;

use crate::config::Prompt;
use crate::explain::{Explainer, TextGenerator};

/// Identifies one explanation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// Text revealed one character at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reveal {
    text: String,
    /// Byte offset of the end of the visible prefix; always a char boundary.
    shown: usize,
}

impl Reveal {
    #[must_use]
    pub fn new(text: String) -> Self {
        Self { text, shown: 0 }
    }

    /// Show one more character. Returns `false` once everything is visible.
    pub fn advance(&mut self) -> bool {
        match self.text[self.shown..].chars().next() {
            Some(c) => {
                self.shown += c.len_utf8();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn visible(&self) -> &str {
        &self.text[..self.shown]
    }

    #[must_use]
    pub fn full_text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.shown == self.text.len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Panel {
    Idle,
    Loading(RequestId),
    Showing(Reveal),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open(Panel),
}

#[derive(Debug, Default)]
pub struct Menu {
    state: MenuState,
    next_request: u64,
}

impl Menu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &MenuState {
        &self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, MenuState::Open(_))
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, MenuState::Open(Panel::Loading(_)))
    }

    /// Only the idle panel accepts a request.
    #[must_use]
    pub fn can_request(&self) -> bool {
        matches!(self.state, MenuState::Open(Panel::Idle))
    }

    #[must_use]
    pub fn reveal(&self) -> Option<&Reveal> {
        match &self.state {
            MenuState::Open(Panel::Showing(reveal)) => Some(reveal),
            _ => None,
        }
    }

    /// The part of the received text currently on screen.
    #[must_use]
    pub fn revealed_text(&self) -> Option<&str> {
        self.reveal().map(Reveal::visible)
    }

    /// Returns `false` if the menu was already open.
    pub fn open(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        self.state = MenuState::Open(Panel::Idle);
        true
    }

    /// Close from any panel, dropping any text and orphaning any request.
    pub fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.state = MenuState::Closed;
        true
    }

    /// Start a request. `None` unless the idle panel is showing.
    pub fn request(&mut self) -> Option<RequestId> {
        if !self.can_request() {
            return None;
        }
        let id = RequestId(self.next_request);
        self.next_request += 1;
        self.state = MenuState::Open(Panel::Loading(id));
        Some(id)
    }

    /// Apply the response to request `id`. Returns `false` and drops `text`
    /// if that request is no longer pending.
    pub fn resolve(&mut self, id: RequestId, text: String) -> bool {
        if self.state != MenuState::Open(Panel::Loading(id)) {
            log::debug!("discarding stale response to {id:?}");
            return false;
        }
        self.state = MenuState::Open(Panel::Showing(Reveal::new(text)));
        true
    }

    /// Back from the text to the idle panel.
    pub fn reset(&mut self) -> bool {
        if self.reveal().is_none() {
            return false;
        }
        self.state = MenuState::Open(Panel::Idle);
        true
    }

    /// Reveal one more character. `false` when there is nothing (left) to
    /// reveal.
    pub fn advance_reveal(&mut self) -> bool {
        match &mut self.state {
            MenuState::Open(Panel::Showing(reveal)) => reveal.advance(),
            _ => false,
        }
    }
}

/// Fetch the explanation for request `id` and hand it to the menu.
///
/// The menu is held weakly across the await. Returns `true` if the text was
/// applied; `false` if the menu was dropped or moved on meanwhile.
pub async fn fulfil<G: TextGenerator>(
    menu: &Weak<RefCell<Menu>>,
    id: RequestId,
    explainer: &Explainer<G>,
    prompt: &Prompt,
) -> bool {
    let text = explainer.explain(prompt).await;
    let Some(menu) = menu.upgrade() else {
        log::debug!("menu gone before response to {id:?} arrived");
        return false;
    };
    let applied = menu.borrow_mut().resolve(id, text);
    applied
}

#[cfg(test)]
mod tests {
    use super::*;

    fn showing(menu: &mut Menu, text: &str) {
        menu.open();
        let id = menu.request().unwrap();
        assert!(menu.resolve(id, text.to_owned()));
    }

    #[test]
    fn starts_closed() {
        let menu = Menu::new();
        assert_eq!(*menu.state(), MenuState::Closed);
        assert!(!menu.can_request());
    }

    #[test]
    fn open_then_close_leaves_no_text() {
        let mut menu = Menu::new();
        assert!(menu.open());
        assert_eq!(*menu.state(), MenuState::Open(Panel::Idle));
        assert!(menu.close());
        assert!(menu.open());
        assert_eq!(*menu.state(), MenuState::Open(Panel::Idle));
        assert_eq!(menu.revealed_text(), None);
    }

    #[test]
    fn open_twice_is_noop() {
        let mut menu = Menu::new();
        assert!(menu.open());
        assert!(!menu.open());
        assert!(!Menu::new().close());
    }

    #[test]
    fn request_locks_until_resolved() {
        let mut menu = Menu::new();
        menu.open();
        let id = menu.request().unwrap();
        assert!(menu.is_loading());
        assert!(!menu.can_request());
        assert_eq!(menu.request(), None);
        assert!(menu.resolve(id, "ok".into()));
        assert!(!menu.is_loading());
        assert_eq!(menu.reveal().map(Reveal::full_text), Some("ok"));
    }

    #[test]
    fn request_needs_open_menu() {
        let mut menu = Menu::new();
        assert_eq!(menu.request(), None);
    }

    #[test]
    fn close_while_loading_discards_reply() {
        let mut menu = Menu::new();
        menu.open();
        let id = menu.request().unwrap();
        menu.close();
        assert!(!menu.resolve(id, "late".into()));
        assert_eq!(*menu.state(), MenuState::Closed);

        // Reopen and ask again: the old reply still must not land.
        menu.open();
        let fresh = menu.request().unwrap();
        assert_ne!(fresh, id);
        assert!(!menu.resolve(id, "late".into()));
        assert!(menu.is_loading());
        assert!(menu.resolve(fresh, "fresh".into()));
    }

    #[test]
    fn close_from_showing_clears_text() {
        let mut menu = Menu::new();
        showing(&mut menu, "text");
        menu.close();
        menu.open();
        assert_eq!(menu.reveal(), None);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut menu = Menu::new();
        showing(&mut menu, "text");
        assert!(menu.reset());
        assert_eq!(*menu.state(), MenuState::Open(Panel::Idle));
        assert_eq!(menu.revealed_text(), None);
        assert!(!menu.reset());
        assert!(menu.can_request());
    }

    #[test]
    fn reveal_walks_characters_not_bytes() {
        let mut reveal = Reveal::new("π∞x".into());
        assert_eq!(reveal.visible(), "");
        assert!(reveal.advance());
        assert_eq!(reveal.visible(), "π");
        assert!(reveal.advance());
        assert_eq!(reveal.visible(), "π∞");
        assert!(reveal.advance());
        assert!(reveal.is_complete());
        assert!(!reveal.advance());
        assert_eq!(reveal.visible(), "π∞x");
    }

    #[test]
    fn advance_only_while_showing() {
        let mut menu = Menu::new();
        assert!(!menu.advance_reveal());
        showing(&mut menu, "ab");
        assert!(menu.advance_reveal());
        assert_eq!(menu.revealed_text(), Some("a"));
        assert!(menu.advance_reveal());
        assert!(!menu.advance_reveal());
        assert_eq!(menu.revealed_text(), Some("ab"));
    }
}
