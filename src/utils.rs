//! Utils for testing and debugging.

use image::{GrayImage, Luma};

/// Helper for defining greyscale images.
///
/// Columns are separated by commas and rows by semi-colons.
/// By default a subpixel type of `u8` is used but this can be
/// overridden, as shown in the examples.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate bgsub;
/// # fn main() {
/// use image::{GrayImage, ImageBuffer, Luma};
///
/// // An empty grayscale image with pixel type Luma<u8>
/// let empty = gray_image!();
///
/// assert_eq!(
///     empty,
///     GrayImage::from_raw(0, 0, vec![]).unwrap()
/// );
///
/// // A single pixel grayscale image with pixel type Luma<i16>
/// let single_pixel = gray_image!(type: i16, 1);
///
/// assert_eq!(
///     single_pixel,
///     ImageBuffer::<Luma<i16>, Vec<i16>>::from_raw(1, 1, vec![1]).unwrap()
/// );
///
/// // A 3x2 grayscale image with pixel type Luma<u8>
/// let image = gray_image!(
///     1, 2, 3;
///     4, 5, 6);
///
/// let equivalent = GrayImage::from_raw(3, 2, vec![
///     1, 2, 3,
///     4, 5, 6
/// ]).unwrap();
///
/// assert_eq!(image, equivalent);
/// # }
/// ```
#[macro_export]
macro_rules! gray_image {
    // Empty image with default channel type u8
    () => {
        gray_image!(type: u8)
    };
    // Empty image with the given channel type
    (type: $channel_type:ty) => {
        {
            ::image::ImageBuffer::<::image::Luma<$channel_type>, Vec<$channel_type>>::new(0, 0)
        }
    };
    // Non-empty image of default channel type u8
    ($( $( $x: expr ),*);*) => {
        gray_image!(type: u8, $( $( $x ),*);*)
    };
    // Non-empty image of given channel type
    (type: $channel_type:ty, $( $( $x: expr ),*);*) => {
        {
            let nested_array = [ $( [ $($x),* ] ),* ];
            let height = nested_array.len() as u32;
            let width = nested_array[0].len() as u32;

            let flat_array: Vec<$channel_type> = nested_array.iter()
                .flat_map(|row| row.iter())
                .cloned()
                .collect();

            ::image::ImageBuffer::<::image::Luma<$channel_type>, Vec<$channel_type>>::from_raw(width, height, flat_array)
                .unwrap()
        }
    }
}

/// Panics if any pixels differ between the two input images.
#[macro_export]
macro_rules! assert_pixels_eq {
    ($actual:expr, $expected:expr) => {{
        match (&$actual, &$expected) {
            (actual, expected) => $crate::assert_pixels_eq!(@bound actual, expected),
        }
    }};
    (@bound $actual:ident, $expected:ident) => {{
        let actual_dim = $actual.dimensions();
        let expected_dim = $expected.dimensions();

        if actual_dim != expected_dim {
            panic!(
                "dimensions do not match. actual: {:?}, expected: {:?}",
                actual_dim, expected_dim
            )
        }

        let diffs = $actual
            .enumerate_pixels()
            .zip($expected.enumerate_pixels())
            .filter(|&(p, q)| p != q)
            .collect::<Vec<_>>();

        if !diffs.is_empty() {
            let diff_messages = diffs
                .iter()
                .take(5)
                .map(|d| format!("\nactual: {:?}, expected {:?} ", d.0, d.1))
                .collect::<Vec<_>>()
                .join("");

            panic!("pixels do not match. {}", diff_messages)
        }
    }};
}

/// Gray image to use in benchmarks. This is neither noise nor
/// similar to natural images - it's just a convenience method
/// to produce an image that's not constant.
pub fn gray_bench_image(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| Luma([(x % 7 + y % 6) as u8]))
}

/// Gray image with a deterministic pseudo-random texture, for tests that need
/// every local pattern class to show up.
pub fn gray_noise_image(width: u32, height: u32, seed: u32) -> GrayImage {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    GrayImage::from_fn(width, height, |_, _| {
        // xorshift32
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        Luma([(state >> 24) as u8])
    })
}
