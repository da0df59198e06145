//! Utility functions.
//!
//! - [`text`]: string helpers (`slugify`, `interpolate`).

pub mod text;
