#![forbid(unsafe_code)]

//! One-shot entrance animations driven by viewport intersection.
//!
//! Each observed element moves `Unseen -> Animated` exactly once. The host
//! stops observing an element as soon as [`RevealTracker::on_entry`] reports
//! [`RevealOutcome::Animated`]; the tracker also refuses a second transition
//! on its own, so stray late notifications are harmless.

use tracing::trace;

use crate::config::Classes;
use crate::element::ElementHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Unseen,
    /// Terminal.
    Animated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Trigger class added; stop observing this element.
    Animated,
    Ignored,
}

#[derive(Debug, Clone)]
pub struct RevealTracker<E> {
    entries: Vec<(E, RevealPhase)>,
    trigger_class: String,
}

impl<E: ElementHandle + PartialEq> RevealTracker<E> {
    /// Returns `None` when there is nothing to observe.
    #[must_use]
    pub fn new(elements: Vec<E>, classes: &Classes) -> Option<Self> {
        if elements.is_empty() {
            return None;
        }
        Some(Self {
            entries: elements
                .into_iter()
                .map(|el| (el, RevealPhase::Unseen))
                .collect(),
            trigger_class: classes.reveal_trigger.clone(),
        })
    }

    pub fn elements(&self) -> impl Iterator<Item = &E> {
        self.entries.iter().map(|(el, _)| el)
    }

    #[must_use]
    pub fn phase(&self, target: &E) -> Option<RevealPhase> {
        self.entries
            .iter()
            .find(|(el, _)| el == target)
            .map(|(_, phase)| *phase)
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, phase)| *phase == RevealPhase::Unseen)
            .count()
    }

    /// Intersection notification for `target`.
    pub fn on_entry(&mut self, target: &E, is_intersecting: bool) -> RevealOutcome {
        if !is_intersecting {
            return RevealOutcome::Ignored;
        }
        let Some((el, phase)) = self.entries.iter_mut().find(|(el, _)| el == target) else {
            return RevealOutcome::Ignored;
        };
        if *phase == RevealPhase::Animated {
            return RevealOutcome::Ignored;
        }
        el.add_class(&self.trigger_class);
        *phase = RevealPhase::Animated;
        trace!("reveal animation triggered");
        RevealOutcome::Animated
    }
}
