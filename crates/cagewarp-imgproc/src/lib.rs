#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// cage-based deformation with mean value coordinates.
pub mod deform;

/// utilities to draw on images.
pub mod draw;

/// 2D point types.
pub mod point;

/// scanline polygon interior enumeration.
pub mod scanline;
