#![forbid(unsafe_code)]

//! Element seams implemented by the host.
//!
//! Handles take `&self`: a DOM element is a shared reference, and writing a
//! class through one handle is visible through every other handle to the
//! same node.

/// The subset of element operations the site behaviors need.
pub trait ElementHandle {
    fn has_class(&self, class: &str) -> bool;

    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    /// Add `class` when `on`, remove it otherwise.
    fn set_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    fn set_attribute(&self, name: &str, value: &str);

    /// Replace the element's text content.
    fn set_text(&self, text: &str);
}

/// A form control that can be locked while a submission is in flight.
pub trait SubmitControl {
    fn set_disabled(&self, disabled: bool);

    /// Replace the visible label.
    fn set_label(&self, label: &str);
}

/// ARIA boolean values are the strings `"true"` / `"false"`.
#[must_use]
pub const fn aria_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
