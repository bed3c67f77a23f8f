#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

//! Child-frame side of a visual editor integration: keeps a hosted page's data
//! in sync with its editor window, toggles quick-edit overlays, and reports
//! which field was clicked.

pub mod domain;
pub mod infrastructure;
