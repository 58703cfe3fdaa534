//! Error handling using `thiserror` and `anyhow`.
//!
//! Domain errors describe what went wrong inside the preference layer;
//! operational helpers attach context and report errors at the edges.

pub mod domain;
pub mod operational;

pub use {
    domain::{PreferenceError, Result},
    operational::{ErrorReporter, ResultExt},
};
