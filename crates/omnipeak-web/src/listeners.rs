#![forbid(unsafe_code)]

//! Owned event-listener registrations.
//!
//! Closures live exactly as long as their [`Listeners`] set. Dropping the set
//! detaches every listener first, so the browser never calls into a freed
//! closure.
//!
//! Installers stage their registrations in a local set and
//! [`Listeners::absorb`] it only once every `listen` succeeded; an early `?`
//! drops the staging set and detaches whatever it already attached.

use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

use crate::MountError;

struct Registration {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

#[derive(Default)]
pub(crate) struct Listeners {
    registrations: Vec<Registration>,
}

impl Listeners {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Attach `handler` for `kind` events on `target`.
    pub(crate) fn listen<F>(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        handler: F,
    ) -> Result<(), MountError>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(MountError::js)?;
        self.registrations.push(Registration {
            target: target.clone(),
            kind,
            closure,
        });
        Ok(())
    }

    /// Take over every registration of `staged`.
    pub(crate) fn absorb(&mut self, mut staged: Listeners) {
        self.registrations
            .extend(std::mem::take(&mut staged.registrations));
    }

    pub(crate) fn len(&self) -> usize {
        self.registrations.len()
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        for reg in self.registrations.drain(..) {
            if let Err(err) = reg
                .target
                .remove_event_listener_with_callback(reg.kind, reg.closure.as_ref().unchecked_ref())
            {
                warn!(kind = reg.kind, ?err, "removeEventListener failed");
            }
        }
    }
}
