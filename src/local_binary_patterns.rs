//! Functions for computing rotation-invariant uniform
//! [local binary patterns](https://en.wikipedia.org/wiki/Local_binary_patterns).
//!
//! Every interior pixel of an 8bpp image is compared with its eight neighbors
//! and the resulting byte is collapsed by [`UNIFORM_CLASS`] into one of ten
//! classes: the number of set bits for uniform patterns, or
//! [`NON_UNIFORM_CLASS`] for everything else.

use crate::definitions::PixelGrid;
use crate::error::{Error, Result};
use image::{GenericImageView, GrayImage, Luma};
use std::cmp;

/// Number of distinct values produced by [`uniform_class`].
pub const CLASS_COUNT: usize = 10;

/// Class assigned to patterns with more than two circular bit transitions.
pub const NON_UNIFORM_CLASS: u8 = 9;

/// Computes the basic local binary pattern of a pixel, or None
/// if it's too close to the image boundary.
///
/// Bits are assigned clockwise from the top left neighbor, most significant
/// first, so the neighbor labelled n sets bit n of the pattern:
///
/// <pre>
/// 7  6  5
/// 0  p  4
/// 1  2  3
/// </pre>
///
/// A bit is 1 if the neighbor is strictly brighter than p.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate bgsub;
/// # fn main() {
/// use bgsub::local_binary_patterns::local_binary_pattern;
///
/// let image = gray_image!(
///     06, 11, 14;
///     09, 10, 10;
///     19, 00, 22);
///
/// let expected = 0b01101010;
/// let pattern = local_binary_pattern(&image, 1, 1).unwrap();
/// assert_eq!(pattern, expected);
/// # }
/// ```
pub fn local_binary_pattern<I>(image: &I, x: u32, y: u32) -> Option<u8>
where
    I: GenericImageView<Pixel = Luma<u8>>,
{
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    if x == 0 || x >= width - 1 || y == 0 || y >= height - 1 {
        return None;
    }

    // x and y are at least one pixel away from every border.
    let (center, neighbors) = unsafe {
        (
            image.unsafe_get_pixel(x, y)[0],
            [
                image.unsafe_get_pixel(x - 1, y)[0],
                image.unsafe_get_pixel(x - 1, y + 1)[0],
                image.unsafe_get_pixel(x, y + 1)[0],
                image.unsafe_get_pixel(x + 1, y + 1)[0],
                image.unsafe_get_pixel(x + 1, y)[0],
                image.unsafe_get_pixel(x + 1, y - 1)[0],
                image.unsafe_get_pixel(x, y - 1)[0],
                image.unsafe_get_pixel(x - 1, y - 1)[0],
            ],
        )
    };

    let mut pattern = 0u8;
    for (i, &neighbor) in neighbors.iter().enumerate() {
        pattern |= ((neighbor > center) as u8) << i;
    }

    Some(pattern)
}

/// Returns the least value of all rotations of a byte.
///
/// # Examples
/// ```
/// use bgsub::local_binary_patterns::min_shift;
///
/// let byte = 0b10110100;
/// assert_eq!(min_shift(byte), 0b00101101);
/// ```
pub fn min_shift(byte: u8) -> u8 {
    let mut min = byte;
    for i in 1..8 {
        min = cmp::min(min, byte.rotate_right(i));
    }
    min
}

/// Number of bit transitions in a byte, counting the last and final bits as adjacent.
///
/// # Examples
/// ```
/// use bgsub::local_binary_patterns::count_transitions;
///
/// let a = 0b11110000;
/// assert_eq!(count_transitions(a), 2);
/// let b = 0b00000000;
/// assert_eq!(count_transitions(b), 0);
/// let c = 0b10011001;
/// assert_eq!(count_transitions(c), 4);
/// let d = 0b10110010;
/// assert_eq!(count_transitions(d), 6);
/// ```
pub const fn count_transitions(byte: u8) -> u32 {
    (byte ^ byte.rotate_right(1)).count_ones()
}

/// Rotation-invariant uniform class of a pattern: the number of set bits if the
/// pattern has at most two circular bit transitions, [`NON_UNIFORM_CLASS`] otherwise.
///
/// # Examples
/// ```
/// use bgsub::local_binary_patterns::uniform_class;
///
/// assert_eq!(uniform_class(0b00001111), 4);
/// assert_eq!(uniform_class(0b11000011), 4);
/// assert_eq!(uniform_class(0b01010101), 9);
/// ```
pub const fn uniform_class(pattern: u8) -> u8 {
    if count_transitions(pattern) <= 2 {
        pattern.count_ones() as u8
    } else {
        NON_UNIFORM_CLASS
    }
}

const fn uniform_class_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = uniform_class(i as u8);
        i += 1;
    }
    table
}

/// Maps every 8-bit pattern to its [`uniform_class`]. Evaluated at compile time.
pub static UNIFORM_CLASS: [u8; 256] = uniform_class_table();

#[inline(always)]
fn classify_row(above: &[u8], row: &[u8], below: &[u8], out: &mut [u8]) {
    let width = row.len();
    for x in 1..width - 1 {
        let c = row[x];
        let pattern = ((above[x - 1] > c) as u8) << 7
            | ((above[x] > c) as u8) << 6
            | ((above[x + 1] > c) as u8) << 5
            | ((row[x + 1] > c) as u8) << 4
            | ((below[x + 1] > c) as u8) << 3
            | ((below[x] > c) as u8) << 2
            | ((below[x - 1] > c) as u8) << 1
            | ((row[x - 1] > c) as u8);
        out[x] = UNIFORM_CLASS[pattern as usize];
    }
}

/// Replaces every interior pixel with the [`uniform_class`] of its
/// [`local_binary_pattern`]. Border pixels are set to 0.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate bgsub;
/// # fn main() {
/// use bgsub::local_binary_patterns::rotation_invariant_uniform_patterns;
///
/// let image = gray_image!(
///     9, 9, 9, 9;
///     9, 1, 5, 1;
///     1, 1, 1, 1);
///
/// let expected = gray_image!(
///     0, 0, 0, 0;
///     0, 5, 3, 0;
///     0, 0, 0, 0);
///
/// assert_pixels_eq!(rotation_invariant_uniform_patterns(&image), expected);
/// # }
/// ```
pub fn rotation_invariant_uniform_patterns(image: &GrayImage) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut out = GrayImage::new(width, height);
    if width < 3 || height < 3 {
        return out;
    }

    let w = width as usize;
    let src = image.as_raw();
    for (y, out_row) in out
        .chunks_exact_mut(w)
        .enumerate()
        .skip(1)
        .take(height as usize - 2)
    {
        classify_row(
            &src[(y - 1) * w..y * w],
            &src[y * w..(y + 1) * w],
            &src[(y + 1) * w..(y + 2) * w],
            out_row,
        );
    }
    out
}

/// Same as [`rotation_invariant_uniform_patterns`], classifying rows in parallel.
#[cfg(feature = "rayon")]
pub fn rotation_invariant_uniform_patterns_parallel(image: &GrayImage) -> GrayImage {
    use rayon::prelude::*;

    let (width, height) = image.dimensions();
    let mut out = GrayImage::new(width, height);
    if width < 3 || height < 3 {
        return out;
    }

    let (w, h) = (width as usize, height as usize);
    let src = image.as_raw();
    out.par_chunks_exact_mut(w)
        .enumerate()
        .filter(|(y, _)| *y > 0 && *y < h - 1)
        .for_each(|(y, out_row)| {
            classify_row(
                &src[(y - 1) * w..y * w],
                &src[y * w..(y + 1) * w],
                &src[(y + 1) * w..(y + 2) * w],
                out_row,
            );
        });
    out
}

/// Computes the texture descriptor grid of a single channel 8-bit grid.
///
/// Returns [`Error::InvalidInput`] for any other depth or channel count.
pub fn describe(grid: &PixelGrid) -> Result<PixelGrid> {
    match grid {
        PixelGrid::Gray8(image) => Ok(PixelGrid::Gray8(rotation_invariant_uniform_patterns(
            image,
        ))),
        other => Err(Error::InvalidInput(format!(
            "texture descriptors need a single channel 8U grid, got {} with {} channel(s)",
            other.depth(),
            other.channels()
        ))),
    }
}

/// Counts how many interior pixels of `image` fall into each uniform class.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate bgsub;
/// # fn main() {
/// use bgsub::local_binary_patterns::pattern_histogram;
///
/// // A flat image: no neighbor is ever brighter than its center.
/// let image = gray_image!(
///     3, 3, 3, 3;
///     3, 3, 3, 3;
///     3, 3, 3, 3);
///
/// let hist = pattern_histogram(&image);
/// assert_eq!(hist[0], 2);
/// assert_eq!(hist.iter().sum::<u32>(), 2);
/// # }
/// ```
pub fn pattern_histogram(image: &GrayImage) -> [u32; CLASS_COUNT] {
    let mut hist = [0u32; CLASS_COUNT];
    let (width, height) = image.dimensions();
    if width < 3 || height < 3 {
        return hist;
    }

    let classes = rotation_invariant_uniform_patterns(image);
    for row in classes.rows().skip(1).take(height as usize - 2) {
        for p in row.skip(1).take(width as usize - 2) {
            hist[p[0] as usize] += 1;
        }
    }
    hist
}
