#![forbid(unsafe_code)]

//! Marks the navigation link for the current page.
//!
//! Matching is a plain suffix test on the path, so `/my-services.html` also
//! matches an href of `services.html`. Multi-page navigation only: this runs
//! once per page load.

use crate::config::{ActiveLinkConfig, Classes};
use crate::element::ElementHandle;

/// Whether a link with `href` points at `current_path`.
#[must_use]
pub fn is_active(current_path: &str, href: &str, home_page: &str) -> bool {
    current_path.ends_with(href) || (current_path.ends_with('/') && href == home_page)
}

#[derive(Debug, Clone)]
pub struct ActiveLinkMarker {
    active_class: String,
    home_page: String,
}

impl ActiveLinkMarker {
    #[must_use]
    pub fn new(classes: &Classes, config: &ActiveLinkConfig) -> Self {
        Self {
            active_class: classes.link_active.clone(),
            home_page: config.home_page.clone(),
        }
    }

    /// Set or clear the active class on every link. A link without an href
    /// never matches. Returns how many links were marked.
    pub fn mark<'a, E, I>(&self, current_path: &str, links: I) -> usize
    where
        E: ElementHandle + 'a,
        I: IntoIterator<Item = (&'a E, Option<&'a str>)>,
    {
        let mut marked = 0;
        for (link, href) in links {
            let active = href.is_some_and(|href| is_active(current_path, href, &self.home_page));
            link.set_class(&self.active_class, active);
            marked += usize::from(active);
        }
        marked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeElement;

    const HOME: &str = "index.html";
    const ACTIVE: &str = "nav__link--active";

    #[test]
    fn root_matches_home_page() {
        assert!(is_active("/", "index.html", HOME));
        assert!(!is_active("/", "about.html", HOME));
    }

    #[test]
    fn directory_path_matches_home_page() {
        assert!(is_active("/services/", "index.html", HOME));
        assert!(!is_active("/services/", "services.html", HOME));
    }

    #[test]
    fn exact_page_matches() {
        assert!(is_active("/about.html", "about.html", HOME));
        assert!(is_active("/site/about.html", "about.html", HOME));
        assert!(!is_active("/about.html", "services.html", HOME));
    }

    // Known limitation: suffix matching does not respect path segments.
    #[test]
    fn suffix_match_yields_false_positive() {
        assert!(is_active("/my-services.html", "services.html", HOME));
    }

    #[test]
    fn mark_sets_and_clears_classes() {
        let home = FakeElement::with_classes(&[ACTIVE]);
        let about = FakeElement::new();
        let bare = FakeElement::with_classes(&[ACTIVE]);
        let marker = ActiveLinkMarker::new(&Classes::default(), &ActiveLinkConfig::default());

        let links = [
            (&home, Some("index.html")),
            (&about, Some("about.html")),
            (&bare, None),
        ];
        let marked = marker.mark("/about.html", links);

        assert_eq!(marked, 1);
        assert!(!home.has_class(ACTIVE));
        assert!(about.has_class(ACTIVE));
        assert!(!bare.has_class(ACTIVE));
    }
}
