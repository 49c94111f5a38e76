#![forbid(unsafe_code)]

//! Site configuration: selectors, class names, and tuning constants.
//!
//! [`SiteConfig::default`] reproduces the document contract the site's
//! markup ships with. Hosts can override any subset by passing JSON to
//! [`SiteConfig::from_json`]; omitted fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must be a finite, non-negative pixel value (got {value})")]
    InvalidPixels { field: &'static str, value: f64 },

    #[error("reveal threshold must lie in [0, 1] (got {0})")]
    InvalidThreshold(f64),

    #[error("{field} must not be empty")]
    EmptyValue { field: &'static str },
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// CSS selectors used to locate each component's elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub nav_toggle: String,
    pub nav_list: String,
    /// Evaluated both inside the menu list and document-wide.
    pub nav_link: String,
    pub header: String,
    pub anchor_link: String,
    pub contact_form: String,
    /// Evaluated inside the contact form.
    pub form_field: String,
    /// Evaluated inside the contact form.
    pub submit_button: String,
    pub animate_on_scroll: String,
    pub current_year: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            nav_toggle: ".nav__toggle".into(),
            nav_list: ".nav__list".into(),
            nav_link: ".nav__link".into(),
            header: ".header".into(),
            anchor_link: r##"a[href^="#"]"##.into(),
            contact_form: ".contact-form".into(),
            form_field: "input, textarea".into(),
            submit_button: r#"button[type="submit"]"#.into(),
            animate_on_scroll: ".animate-on-scroll".into(),
            current_year: ".current-year".into(),
        }
    }
}

/// Presentation classes written by the behaviors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Classes {
    pub toggle_open: String,
    pub list_open: String,
    pub header_scrolled: String,
    pub field_focused: String,
    pub field_filled: String,
    pub link_active: String,
    pub reveal_trigger: String,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            toggle_open: "nav__toggle--open".into(),
            list_open: "nav__list--open".into(),
            header_scrolled: "header--scrolled".into(),
            field_focused: "form-group--focused".into(),
            field_filled: "form-group--filled".into(),
            link_active: "nav__link--active".into(),
            reveal_trigger: "animate-fade-in-up".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// The header is "scrolled" strictly past this offset.
    pub threshold_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { threshold_px: 10.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    /// Visual gap kept between the header and the scrolled-to target.
    pub margin_px: f64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self { margin_px: 20.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Label shown on the submit control once the form is handed off.
    pub sending_label: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            sending_label: "Sending...".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveLinkConfig {
    /// Filename that directory-style paths (`/`, `/about/`) resolve to.
    pub home_page: String,
}

impl Default for ActiveLinkConfig {
    fn default() -> Self {
        Self {
            home_page: "index.html".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    /// Contraction of the viewport's bottom edge.
    pub bottom_margin_px: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            bottom_margin_px: 50.0,
        }
    }
}

impl RevealConfig {
    /// `rootMargin` string for the intersection observer.
    #[must_use]
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin_px)
    }
}

// ---------------------------------------------------------------------------
// Root
// ---------------------------------------------------------------------------

/// Complete site configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub selectors: Selectors,
    pub classes: Classes,
    pub scroll: ScrollConfig,
    pub anchor: AnchorConfig,
    pub form: FormConfig,
    pub active_link: ActiveLinkConfig,
    pub reveal: RevealConfig,
}

impl SiteConfig {
    /// Parse a (possibly partial) JSON override and validate the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_pixels("scroll.threshold_px", self.scroll.threshold_px)?;
        check_pixels("anchor.margin_px", self.anchor.margin_px)?;
        check_pixels("reveal.bottom_margin_px", self.reveal.bottom_margin_px)?;

        let threshold = self.reveal.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidThreshold(threshold));
        }

        let s = &self.selectors;
        let c = &self.classes;
        let required: [(&'static str, &str); 18] = [
            ("selectors.nav_toggle", s.nav_toggle.as_str()),
            ("selectors.nav_list", s.nav_list.as_str()),
            ("selectors.nav_link", s.nav_link.as_str()),
            ("selectors.header", s.header.as_str()),
            ("selectors.anchor_link", s.anchor_link.as_str()),
            ("selectors.contact_form", s.contact_form.as_str()),
            ("selectors.form_field", s.form_field.as_str()),
            ("selectors.submit_button", s.submit_button.as_str()),
            ("selectors.animate_on_scroll", s.animate_on_scroll.as_str()),
            ("selectors.current_year", s.current_year.as_str()),
            ("classes.toggle_open", c.toggle_open.as_str()),
            ("classes.list_open", c.list_open.as_str()),
            ("classes.header_scrolled", c.header_scrolled.as_str()),
            ("classes.field_focused", c.field_focused.as_str()),
            ("classes.field_filled", c.field_filled.as_str()),
            ("classes.link_active", c.link_active.as_str()),
            ("classes.reveal_trigger", c.reveal_trigger.as_str()),
            ("active_link.home_page", self.active_link.home_page.as_str()),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ConfigError::EmptyValue { field: *field });
        }
        Ok(())
    }
}

fn check_pixels(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidPixels { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_validate() {
        SiteConfig::default().validate().expect("defaults are valid");
    }

    #[test]
    fn default_root_margin_contracts_bottom_edge() {
        assert_eq!(RevealConfig::default().root_margin(), "0px 0px -50px 0px");
    }

    #[test]
    fn empty_json_is_default() {
        let config = SiteConfig::from_json("{}").expect("empty object parses");
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = SiteConfig::from_json(
            r#"{"scroll":{"threshold_px":40},"classes":{"link_active":"is-current"}}"#,
        )
        .expect("partial config parses");

        let mut expected = SiteConfig::default();
        expected.scroll.threshold_px = 40.0;
        expected.classes.link_active = "is-current".into();
        assert_eq!(config, expected);
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = SiteConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn negative_margin_is_rejected() {
        let err = SiteConfig::from_json(r#"{"anchor":{"margin_px":-1}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidPixels {
                field: "anchor.margin_px",
                ..
            }
        ));
    }

    #[test]
    fn threshold_out_of_range_is_rejected() {
        let err = SiteConfig::from_json(r#"{"reveal":{"threshold":1.5}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThreshold(t) if t == 1.5));
    }

    #[test]
    fn blank_class_is_rejected() {
        let err = SiteConfig::from_json(r#"{"classes":{"header_scrolled":"  "}}"#).unwrap_err();
        assert_eq!(err.to_string(), "classes.header_scrolled must not be empty");
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = SiteConfig::default();
        let json = serde_json::to_string(&config).expect("serialize");
        assert_eq!(SiteConfig::from_json(&json).expect("parse"), config);
    }
}
