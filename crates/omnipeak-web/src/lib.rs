#![forbid(unsafe_code)]

//! WASM binding for the Omnipeak site behaviors.
//!
//! This crate locates the page's elements, subscribes to DOM events, and
//! forwards them to the platform-independent models in `omnipeak-ui`. Each
//! component installs independently: a missing element disables only that
//! component.
//!
//! With the default `autostart` feature the site mounts itself as soon as the
//! document is parsed. Hosts that disable it call `SiteController.mount()` or
//! `SiteController.mountWithConfig(json)` and keep the returned controller
//! alive for the page's lifetime. A page holds at most one mounted
//! controller; a second mount fails with [`MountError::AlreadyMounted`] until
//! the first is dropped (or, under `autostart`, released with
//! `unmountSite()`).

mod error;

pub use error::MountError;

#[cfg(target_arch = "wasm32")]
mod debounce;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod listeners;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use debounce::Debounced;
#[cfg(target_arch = "wasm32")]
pub use dom::{DomButton, DomElement};
#[cfg(target_arch = "wasm32")]
pub use wasm::SiteController;
#[cfg(all(target_arch = "wasm32", feature = "autostart"))]
pub use wasm::unmount_site;

/// Names reported by `SiteController::mounted_components`.
pub mod component {
    pub const NAV_TOGGLE: &str = "nav-toggle";
    pub const HEADER_SCROLL: &str = "header-scroll";
    pub const ANCHOR_SCROLL: &str = "anchor-scroll";
    pub const CONTACT_FORM: &str = "contact-form";
    pub const ACTIVE_LINK: &str = "active-link";
    pub const SCROLL_REVEAL: &str = "scroll-reveal";
    pub const FOOTER_YEAR: &str = "footer-year";
}
