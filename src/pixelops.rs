//! Pixel manipulations.

use crate::definitions::{Clamp, Image, PixelGrid};
use crate::error::{Error, Result};
use image::Pixel;

fn zip_subpixels<P, F>(lhs: &Image<P>, rhs: &Image<P>, f: F) -> Image<P>
where
    P: Pixel,
    F: Fn(P::Subpixel, P::Subpixel) -> P::Subpixel,
{
    let mut out = lhs.clone();
    for (o, &r) in out.iter_mut().zip(rhs.iter()) {
        *o = f(*o, r);
    }
    out
}

/// Computes `|lhs - rhs|` for every sample of two grids with the same layout.
///
/// Differences of signed samples saturate at the type maximum, so the result
/// always has the depth of the inputs. Fails with [`Error::InvalidInput`] if the
/// grids differ in dimensions, depth or channel count.
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate bgsub;
/// # fn main() {
/// use bgsub::definitions::PixelGrid;
/// use bgsub::pixelops::absolute_difference;
///
/// let lhs = PixelGrid::from(gray_image!(10, 200; 0, 7));
/// let rhs = PixelGrid::from(gray_image!(30, 100; 0, 9));
///
/// let diff = absolute_difference(&lhs, &rhs).unwrap();
/// assert_eq!(diff, PixelGrid::from(gray_image!(20, 100; 0, 2)));
/// # }
/// ```
pub fn absolute_difference(lhs: &PixelGrid, rhs: &PixelGrid) -> Result<PixelGrid> {
    let diff = match (lhs, rhs) {
        (PixelGrid::Gray8(a), PixelGrid::Gray8(b)) if a.dimensions() == b.dimensions() => {
            PixelGrid::Gray8(zip_subpixels(a, b, u8::abs_diff))
        }
        (PixelGrid::Gray16(a), PixelGrid::Gray16(b)) if a.dimensions() == b.dimensions() => {
            PixelGrid::Gray16(zip_subpixels(a, b, u16::abs_diff))
        }
        (PixelGrid::GrayI16(a), PixelGrid::GrayI16(b)) if a.dimensions() == b.dimensions() => {
            PixelGrid::GrayI16(zip_subpixels(a, b, |p, q| {
                <i16 as Clamp<i32>>::clamp((p as i32 - q as i32).abs())
            }))
        }
        (PixelGrid::GrayI32(a), PixelGrid::GrayI32(b)) if a.dimensions() == b.dimensions() => {
            PixelGrid::GrayI32(zip_subpixels(a, b, |p, q| {
                <i32 as Clamp<i64>>::clamp((p as i64 - q as i64).abs())
            }))
        }
        (PixelGrid::Gray32F(a), PixelGrid::Gray32F(b)) if a.dimensions() == b.dimensions() => {
            PixelGrid::Gray32F(zip_subpixels(a, b, |p, q| (p - q).abs()))
        }
        (PixelGrid::Gray64F(a), PixelGrid::Gray64F(b)) if a.dimensions() == b.dimensions() => {
            PixelGrid::Gray64F(zip_subpixels(a, b, |p, q| (p - q).abs()))
        }
        (PixelGrid::Rgb8(a), PixelGrid::Rgb8(b)) if a.dimensions() == b.dimensions() => {
            PixelGrid::Rgb8(zip_subpixels(a, b, u8::abs_diff))
        }
        _ => {
            return Err(Error::InvalidInput(format!(
                "cannot difference a {}x{} {} grid with {} channel(s) against a {}x{} {} grid with {} channel(s)",
                lhs.width(),
                lhs.height(),
                lhs.depth(),
                lhs.channels(),
                rhs.width(),
                rhs.height(),
                rhs.depth(),
                rhs.channels(),
            )))
        }
    };
    Ok(diff)
}


#[cfg(not(miri))]
#[cfg(test)]
mod proptests {
    use super::*;
    use crate::proptest_utils::arbitrary_grid_pair;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn proptest_difference_is_symmetric((a, b) in arbitrary_grid_pair(0..20, 0..20)) {
            let ab = absolute_difference(&a, &b).unwrap();
            prop_assert!(ab.same_layout(&a));
            prop_assert_eq!(ab, absolute_difference(&b, &a).unwrap());
        }

        #[test]
        fn proptest_difference_with_self_is_zero((a, _) in arbitrary_grid_pair(0..20, 0..20)) {
            prop_assert_eq!(absolute_difference(&a, &a).unwrap().count_non_zero(), 0);
        }
    }
}
