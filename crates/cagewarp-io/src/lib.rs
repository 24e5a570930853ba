#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// cage anchor point file loading.
pub mod cage;

/// error types for the io module.
pub mod error;

/// png image encoding and decoding.
pub mod png;

pub use crate::error::IoError;
