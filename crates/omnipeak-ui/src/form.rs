#![forbid(unsafe_code)]

//! Contact form presentation feedback.
//!
//! Field focus and fill state is shown on the field's group wrapper. On
//! submit the control is locked and relabelled; the browser then posts the
//! form natively to the external form processor.

use tracing::trace;

use crate::config::{Classes, FormConfig};
use crate::element::{ElementHandle, SubmitControl};

/// Whether a field's value counts as filled in.
#[must_use]
pub fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

#[derive(Debug, Clone)]
pub struct FormEnhancer {
    focused_class: String,
    filled_class: String,
    sending_label: String,
}

impl FormEnhancer {
    #[must_use]
    pub fn new(classes: &Classes, form: &FormConfig) -> Self {
        Self {
            focused_class: classes.field_focused.clone(),
            filled_class: classes.field_filled.clone(),
            sending_label: form.sending_label.clone(),
        }
    }

    pub fn on_focus<E: ElementHandle>(&self, group: &E) {
        group.add_class(&self.focused_class);
    }

    pub fn on_blur<E: ElementHandle>(&self, group: &E, value: &str) {
        group.remove_class(&self.focused_class);
        group.set_class(&self.filled_class, is_filled(value));
    }

    /// Lock the submit control, if the form has one. Never blocks submission.
    pub fn on_submit<C: SubmitControl>(&self, control: Option<&C>) {
        let Some(control) = control else {
            trace!("form submitted without a submit control");
            return;
        };
        control.set_disabled(true);
        control.set_label(&self.sending_label);
    }
}
