//! Common types shared across the CSP injection crates.

pub mod error;

pub use error::{CspError, CspResult};
