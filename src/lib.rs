//! Rotation-invariant local binary patterns and static background
//! subtraction, built on the [image] crate.
//!
//! Frames are passed around as [`PixelGrid`](definitions::PixelGrid)s, which
//! tag an image buffer with its sample depth so that the kernels can dispatch
//! on it:
//!
//! * [`local_binary_patterns`] reduces an 8-bit image to texture classes in `0..=9`.
//! * [`contrast`] thresholds grids of every supported depth.
//! * [`background_subtraction`] marks the pixels of a frame that differ from
//!   a fixed reference frame.
//!
//! Decoding, colour conversion and resizing are left to the image crate, see
//! [`source`] for the helpers the `static_frame` binary uses.
//!
//! [image]: https://github.com/image-rs/image
#![deny(missing_docs)]
#![cfg_attr(all(test, feature = "benchmarks"), feature(test))]
#![allow(
    clippy::cast_lossless,
    clippy::needless_range_loop,
    clippy::needless_doctest_main,
    clippy::trivially_copy_pass_by_ref,
    clippy::many_single_char_names
)]

#[cfg(all(test, feature = "benchmarks"))]
extern crate test;

#[macro_use]
pub mod utils;
pub mod background_subtraction;
pub mod config;
pub mod contrast;
pub mod definitions;
pub mod error;
pub mod local_binary_patterns;
pub mod pixelops;
#[cfg(test)]
mod proptest_utils;
pub mod source;

pub use crate::error::{Error, Result};
