#![forbid(unsafe_code)]

//! Header scroll watcher with per-frame throttling.
//!
//! Scroll events can fire many times per frame. [`FrameThrottle`] lets the
//! host schedule at most one recomputation per animation frame; the
//! recomputation itself is [`HeaderWatcher::update`].

use tracing::trace;

use crate::config::{Classes, ScrollConfig};
use crate::element::ElementHandle;

/// Keeps the header's "scrolled" class in sync with the vertical offset.
#[derive(Debug, Clone)]
pub struct HeaderWatcher<E> {
    header: E,
    scrolled_class: String,
    threshold_px: f64,
    last_scroll_y: f64,
}

impl<E: ElementHandle> HeaderWatcher<E> {
    /// Create the watcher and run the initial check against `initial_scroll_y`,
    /// so a page that loads already scrolled gets the right style at once.
    #[must_use]
    pub fn new(header: E, classes: &Classes, scroll: &ScrollConfig, initial_scroll_y: f64) -> Self {
        let mut watcher = Self {
            header,
            scrolled_class: classes.header_scrolled.clone(),
            threshold_px: scroll.threshold_px,
            last_scroll_y: initial_scroll_y,
        };
        watcher.update(initial_scroll_y);
        watcher
    }

    #[must_use]
    pub fn header(&self) -> &E {
        &self.header
    }

    #[must_use]
    pub fn last_scroll_y(&self) -> f64 {
        self.last_scroll_y
    }

    #[must_use]
    pub fn is_scrolled(scroll_y: f64, threshold_px: f64) -> bool {
        scroll_y > threshold_px
    }

    /// Recompute the class for the current offset. Returns the flag.
    pub fn update(&mut self, scroll_y: f64) -> bool {
        let scrolled = Self::is_scrolled(scroll_y, self.threshold_px);
        self.header.set_class(&self.scrolled_class, scrolled);
        self.last_scroll_y = scroll_y;
        scrolled
    }
}

/// One-pending-frame gate for scroll updates.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameThrottle {
    ticking: bool,
}

impl FrameThrottle {
    #[must_use]
    pub const fn new() -> Self {
        Self { ticking: false }
    }

    /// A scroll event arrived. Returns `true` when the caller must request an
    /// animation frame now; `false` when one is already pending.
    pub fn on_scroll(&mut self) -> bool {
        if self.ticking {
            return false;
        }
        self.ticking = true;
        trace!("header update scheduled");
        true
    }

    /// The scheduled frame ran; the next scroll may schedule again.
    pub fn on_frame(&mut self) {
        self.ticking = false;
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.ticking
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeElement;
    use proptest::prelude::*;

    const CLASS: &str = "header--scrolled";

    fn watcher(initial: f64) -> (HeaderWatcher<FakeElement>, FakeElement) {
        let header = FakeElement::new();
        let watcher = HeaderWatcher::new(
            header.clone(),
            &Classes::default(),
            &ScrollConfig::default(),
            initial,
        );
        (watcher, header)
    }

    #[test]
    fn boundary_is_strict() {
        let (mut w, header) = watcher(0.0);
        assert!(!w.update(10.0));
        assert!(!header.has_class(CLASS));
        assert!(w.update(11.0));
        assert!(header.has_class(CLASS));
    }

    #[test]
    fn initial_check_applies_loaded_offset() {
        let (_, header) = watcher(300.0);
        assert!(header.has_class(CLASS));

        let (_, header) = watcher(0.0);
        assert!(!header.has_class(CLASS));
    }

    #[test]
    fn scrolling_back_up_removes_class() {
        let (mut w, header) = watcher(500.0);
        w.update(3.0);
        assert!(!header.has_class(CLASS));
        assert_eq!(w.last_scroll_y(), 3.0);
    }

    #[test]
    fn throttle_schedules_once_per_frame() {
        let mut t = FrameThrottle::new();
        assert!(t.on_scroll());
        assert!(!t.on_scroll());
        assert!(!t.on_scroll());
        assert!(t.is_pending());

        t.on_frame();
        assert!(!t.is_pending());
        assert!(t.on_scroll());
    }

    proptest! {
        #[test]
        fn class_tracks_threshold(offset in -100.0f64..10_000.0) {
            let (mut w, header) = watcher(0.0);
            w.update(offset);
            prop_assert_eq!(header.has_class(CLASS), offset > 10.0);
        }

        #[test]
        fn burst_of_scrolls_schedules_one_frame(burst in 1usize..200) {
            let mut t = FrameThrottle::new();
            let scheduled = (0..burst).filter(|_| t.on_scroll()).count();
            prop_assert_eq!(scheduled, 1);
        }
    }
}
