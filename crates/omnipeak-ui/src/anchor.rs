#![forbid(unsafe_code)]

//! Smooth scrolling for same-page fragment links.

use crate::config::AnchorConfig;

/// Host decision for one fragment-link activation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorAction {
    /// Leave the click alone; native navigation proceeds.
    Passthrough,
    /// Suppress default navigation and smooth-scroll to this document offset.
    ScrollTo(f64),
}

/// Id referenced by an in-page link, or `None` for a bare `"#"` and for
/// hrefs that are not fragments.
#[must_use]
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Geometry read from the page at click time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollGeometry {
    /// Target's top edge relative to the viewport.
    pub target_rect_top: f64,
    /// Current vertical scroll offset.
    pub scroll_y: f64,
    /// Rendered header height, `None` when the page has no header.
    pub header_height: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorScroller {
    margin_px: f64,
}

impl AnchorScroller {
    #[must_use]
    pub fn new(config: &AnchorConfig) -> Self {
        Self {
            margin_px: config.margin_px,
        }
    }

    /// Document offset that places the target just below the header.
    #[must_use]
    pub fn target_top(&self, geometry: ScrollGeometry) -> f64 {
        geometry.target_rect_top + geometry.scroll_y
            - geometry.header_height.unwrap_or(0.0)
            - self.margin_px
    }

    /// Decide how to handle a click on `href`. `lookup` resolves a fragment id
    /// to the target's geometry and returns `None` when no element has it.
    pub fn resolve<F>(&self, href: &str, lookup: F) -> AnchorAction
    where
        F: FnOnce(&str) -> Option<ScrollGeometry>,
    {
        let Some(id) = fragment_id(href) else {
            return AnchorAction::Passthrough;
        };
        match lookup(id) {
            Some(geometry) => AnchorAction::ScrollTo(self.target_top(geometry)),
            None => AnchorAction::Passthrough,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroller() -> AnchorScroller {
        AnchorScroller::new(&AnchorConfig::default())
    }

    #[test]
    fn bare_hash_is_not_a_target() {
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id("services.html"), None);
        assert_eq!(fragment_id("#contact"), Some("contact"));
    }

    #[test]
    fn bare_hash_never_intercepts() {
        let action = scroller().resolve("#", |_| panic!("lookup must not run for '#'"));
        assert_eq!(action, AnchorAction::Passthrough);
    }

    #[test]
    fn offset_subtracts_header_and_margin() {
        let geometry = ScrollGeometry {
            target_rect_top: 500.0,
            scroll_y: 0.0,
            header_height: Some(80.0),
        };
        assert_eq!(scroller().target_top(geometry), 400.0);
    }

    #[test]
    fn offset_includes_current_scroll() {
        let geometry = ScrollGeometry {
            target_rect_top: 500.0,
            scroll_y: 1200.0,
            header_height: Some(80.0),
        };
        assert_eq!(scroller().target_top(geometry), 1600.0);
    }

    #[test]
    fn missing_header_counts_as_zero_height() {
        let geometry = ScrollGeometry {
            target_rect_top: 500.0,
            scroll_y: 0.0,
            header_height: None,
        };
        assert_eq!(scroller().target_top(geometry), 480.0);
    }

    #[test]
    fn existing_target_scrolls() {
        let action = scroller().resolve("#services", |id| {
            assert_eq!(id, "services");
            Some(ScrollGeometry {
                target_rect_top: 500.0,
                scroll_y: 0.0,
                header_height: Some(80.0),
            })
        });
        assert_eq!(action, AnchorAction::ScrollTo(400.0));
    }

    #[test]
    fn missing_target_falls_through() {
        let action = scroller().resolve("#nowhere", |_| None);
        assert_eq!(action, AnchorAction::Passthrough);
    }
}
