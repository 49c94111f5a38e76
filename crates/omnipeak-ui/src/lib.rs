#![forbid(unsafe_code)]

//! Platform-independent behavior models for the Omnipeak marketing site.
//!
//! Design goals:
//! - **Host-driven**: the embedding environment (the `omnipeak-web` binding)
//!   locates elements, subscribes to DOM events, and forwards them here.
//! - **DOM is the source of truth**: presentation state lives in classes and
//!   ARIA attributes, written through the [`element::ElementHandle`] seam.
//! - **No JS types**: everything in this crate compiles and tests natively.
//!
//! Each behavior is independent. A missing element disables only the
//! component that needed it.

pub mod active_link;
pub mod anchor;
pub mod config;
pub mod debounce;
pub mod element;
pub mod footer;
pub mod form;
pub mod header;
pub mod nav;
pub mod reveal;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ConfigError, SiteConfig};
pub use element::{ElementHandle, SubmitControl};
