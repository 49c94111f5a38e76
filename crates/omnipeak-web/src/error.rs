#![forbid(unsafe_code)]

use omnipeak_ui::ConfigError;
use thiserror::Error;

/// Environment-level failure that prevents mounting altogether.
///
/// Missing page elements are not errors; they only disable a component.
#[derive(Debug, Error)]
pub enum MountError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JS error: {0}")]
    Js(String),

    #[error("site already mounted on this page")]
    AlreadyMounted,
}

impl MountError {
    /// Wrap a thrown JS value, keeping its debug rendering.
    #[must_use]
    pub fn js(value: impl core::fmt::Debug) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

/// One `console.error` line: `[omnipeak] <context>: <detail>`.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn console_line(context: &str, detail: &dyn core::fmt::Display) -> String {
    format!("[omnipeak] {context}: {detail}")
}

#[cfg(target_arch = "wasm32")]
impl From<MountError> for wasm_bindgen::JsValue {
    fn from(err: MountError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
