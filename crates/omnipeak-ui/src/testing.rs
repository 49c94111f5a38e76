#![forbid(unsafe_code)]

//! In-memory element used by native tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::element::{ElementHandle, SubmitControl};

#[derive(Debug, Default)]
struct FakeState {
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    disabled: bool,
}

/// Shared-state fake DOM node. Clones alias the same node, and equality is
/// node identity, matching `===` on real elements.
#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    state: Rc<RefCell<FakeState>>,
}

impl FakeElement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_classes(classes: &[&str]) -> Self {
        let el = Self::new();
        for class in classes {
            el.add_class(class);
        }
        el
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.state.borrow().attributes.get(name).cloned()
    }

    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        self.state.borrow().classes.iter().cloned().collect()
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.state.borrow().text.clone()
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.state.borrow().disabled
    }
}

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl Eq for FakeElement {}

impl ElementHandle for FakeElement {
    fn has_class(&self, class: &str) -> bool {
        self.state.borrow().classes.contains(class)
    }

    fn add_class(&self, class: &str) {
        self.state.borrow_mut().classes.insert(class.to_owned());
    }

    fn remove_class(&self, class: &str) {
        self.state.borrow_mut().classes.remove(class);
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .attributes
            .insert(name.to_owned(), value.to_owned());
    }

    fn set_text(&self, text: &str) {
        text.clone_into(&mut self.state.borrow_mut().text);
    }
}

impl SubmitControl for FakeElement {
    fn set_disabled(&self, disabled: bool) {
        self.state.borrow_mut().disabled = disabled;
    }

    fn set_label(&self, label: &str) {
        self.set_text(label);
    }
}
