#![forbid(unsafe_code)]

//! `web-sys` implementations of the element seams, plus query helpers.

use omnipeak_ui::{ElementHandle, SubmitControl};
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlButtonElement, HtmlInputElement, HtmlTextAreaElement};

/// A DOM element driven through [`ElementHandle`]. Equality is node identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement(pub Element);

impl DomElement {
    #[must_use]
    pub fn element(&self) -> &Element {
        &self.0
    }
}

impl ElementHandle for DomElement {
    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        if let Err(err) = self.0.class_list().add_1(class) {
            warn!(class, ?err, "classList.add failed");
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(err) = self.0.class_list().remove_1(class) {
            warn!(class, ?err, "classList.remove failed");
        }
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(err) = self.0.set_attribute(name, value) {
            warn!(name, ?err, "setAttribute failed");
        }
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }
}

/// A `<button>` locked while the form is handed off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomButton(pub HtmlButtonElement);

impl SubmitControl for DomButton {
    fn set_disabled(&self, disabled: bool) {
        self.0.set_disabled(disabled);
    }

    fn set_label(&self, label: &str) {
        self.0.set_text_content(Some(label));
    }
}

/// First descendant of `root` matching `selector`. Invalid selectors are
/// logged and treated as no match.
pub(crate) fn query(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector)
        .inspect_err(|err| warn!(selector, ?err, "querySelector failed"))
        .ok()
        .flatten()
}

/// Every descendant of `root` matching `selector`, in document order.
pub(crate) fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(nodes) = root
        .query_selector_all(selector)
        .inspect_err(|err| warn!(selector, ?err, "querySelectorAll failed"))
    else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|idx| nodes.item(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Current value of an `<input>` or `<textarea>`; empty for anything else.
pub(crate) fn field_value(field: &Element) -> String {
    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        return input.value();
    }
    if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
        return area.value();
    }
    String::new()
}
