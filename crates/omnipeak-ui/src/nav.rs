#![forbid(unsafe_code)]

//! Mobile navigation toggle.
//!
//! The open state is mirrored on two elements: a class on the toggle control
//! and on the menu list, plus `aria-expanded` on the control and
//! `aria-hidden` on the list. Every write goes through [`NavMenu::apply`], so
//! the class and ARIA views of the state cannot drift apart.

use tracing::trace;

use crate::config::Classes;
use crate::element::{ElementHandle, aria_bool};

pub const ARIA_EXPANDED: &str = "aria-expanded";
pub const ARIA_HIDDEN: &str = "aria-hidden";

#[derive(Debug, Clone)]
pub struct NavMenu<E> {
    toggle: E,
    list: E,
    toggle_open_class: String,
    list_open_class: String,
}

impl<E: ElementHandle> NavMenu<E> {
    #[must_use]
    pub fn new(toggle: E, list: E, classes: &Classes) -> Self {
        Self {
            toggle,
            list,
            toggle_open_class: classes.toggle_open.clone(),
            list_open_class: classes.list_open.clone(),
        }
    }

    /// Build the component only if both elements exist.
    #[must_use]
    pub fn from_parts(toggle: Option<E>, list: Option<E>, classes: &Classes) -> Option<Self> {
        Some(Self::new(toggle?, list?, classes))
    }

    #[must_use]
    pub fn toggle_element(&self) -> &E {
        &self.toggle
    }

    #[must_use]
    pub fn list_element(&self) -> &E {
        &self.list
    }

    /// The list's class is authoritative.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.list.has_class(&self.list_open_class)
    }

    /// Activation of the toggle control. Returns the new state.
    pub fn toggle(&self) -> bool {
        let open = !self.is_open();
        self.apply(open);
        trace!(open, "nav menu toggled");
        open
    }

    /// Force the closed state.
    pub fn close(&self) {
        self.apply(false);
    }

    /// A link inside the menu was activated.
    pub fn on_link_click(&self) {
        self.close();
    }

    /// A click landed somewhere in the document. `inside` is true when the
    /// click target lies within the toggle control or the list.
    ///
    /// Returns whether the menu was closed.
    pub fn on_document_click(&self, inside: bool) -> bool {
        if inside || !self.is_open() {
            return false;
        }
        self.close();
        trace!("nav menu closed by outside click");
        true
    }

    fn apply(&self, open: bool) {
        self.toggle.set_class(&self.toggle_open_class, open);
        self.list.set_class(&self.list_open_class, open);
        self.toggle.set_attribute(ARIA_EXPANDED, aria_bool(open));
        self.list.set_attribute(ARIA_HIDDEN, aria_bool(!open));
    }
}
