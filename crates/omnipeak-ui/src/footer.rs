#![forbid(unsafe_code)]

//! Footer copyright year.

use crate::element::ElementHandle;

/// Write `year` into the footer's year span.
pub fn stamp_year<E: ElementHandle>(span: &E, year: u32) {
    span.set_text(&year.to_string());
}
