//! Proptest strategies for images and grids.

use crate::definitions::{Image, PixelGrid};
use image::{Luma, Pixel};
use proptest::{
    arbitrary::{any, Arbitrary},
    prop_oneof,
    sample::SizeRange,
    strategy::{BoxedStrategy, Strategy},
};
use std::{fmt, ops::RangeInclusive};

/// Images with dimensions in the given ranges and arbitrary samples.
pub(crate) fn arbitrary_image<P>(
    width_range: impl Into<SizeRange>,
    height_range: impl Into<SizeRange>,
) -> BoxedStrategy<Image<P>>
where
    P: Pixel + fmt::Debug + 'static,
    P::Subpixel: Arbitrary + fmt::Debug,
    <P::Subpixel as Arbitrary>::Strategy: 'static,
{
    dims(width_range, height_range)
        .prop_flat_map(|(w, h)| image_from::<P, _>(w, h, any::<P::Subpixel>()))
        .boxed()
}

/// Pairs of single channel grids sharing dimensions and depth, one pair per
/// depth the threshold kernels accept. Float samples lie in `[0, 1]`.
pub(crate) fn arbitrary_grid_pair(
    width_range: impl Into<SizeRange>,
    height_range: impl Into<SizeRange>,
) -> BoxedStrategy<(PixelGrid, PixelGrid)> {
    dims(width_range, height_range)
        .prop_flat_map(|(w, h)| {
            prop_oneof![
                grid_pair::<Luma<u8>, _>(w, h, any::<u8>()),
                grid_pair::<Luma<u16>, _>(w, h, any::<u16>()),
                grid_pair::<Luma<i16>, _>(w, h, any::<i16>()),
                grid_pair::<Luma<i32>, _>(w, h, any::<i32>()),
                grid_pair::<Luma<f32>, _>(w, h, 0.0f32..=1.0),
            ]
        })
        .boxed()
}

fn grid_pair<P, S>(width: u32, height: u32, samples: S) -> BoxedStrategy<(PixelGrid, PixelGrid)>
where
    P: Pixel + fmt::Debug + 'static,
    P::Subpixel: fmt::Debug,
    S: Strategy<Value = P::Subpixel> + Clone + 'static,
    Image<P>: Into<PixelGrid>,
{
    (
        image_from::<P, _>(width, height, samples.clone()),
        image_from::<P, _>(width, height, samples),
    )
        .prop_map(|(a, b)| (a.into(), b.into()))
        .boxed()
}

fn image_from<P, S>(width: u32, height: u32, samples: S) -> BoxedStrategy<Image<P>>
where
    P: Pixel + fmt::Debug + 'static,
    P::Subpixel: fmt::Debug,
    S: Strategy<Value = P::Subpixel> + 'static,
{
    let len = (width * height * P::CHANNEL_COUNT as u32) as usize;
    proptest::collection::vec(samples, len)
        .prop_map(move |v| Image::from_vec(width, height, v).unwrap())
        .boxed()
}

fn dims(width: impl Into<SizeRange>, height: impl Into<SizeRange>) -> BoxedStrategy<(u32, u32)> {
    let width = dim(width);
    let height = dim(height);
    width
        .prop_flat_map(move |w| height.clone().prop_map(move |h| (w, h)))
        .boxed()
}

fn dim(range: impl Into<SizeRange>) -> RangeInclusive<u32> {
    let range = range.into();
    range.start() as u32..=range.end_incl() as u32
}

#[cfg(not(miri))]
#[cfg(test)]
mod proptests {
    use super::*;
    use crate::contrast::is_thresholdable;
    use image::Rgb;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_arbitrary_fixed_rgb(img in arbitrary_image::<Rgb<u8>>(3, 7)) {
            assert_eq!(img.dimensions(), (3, 7));
        }

        #[test]
        fn test_arbitrary_gray(img in arbitrary_image::<Luma<u8>>(1..30, 2..=150)) {
            assert!((1..30).contains(&img.width()));
            assert!((2..=150).contains(&img.height()));
        }

        #[test]
        fn test_grid_pairs_share_layout((a, b) in arbitrary_grid_pair(0..12, 0..12)) {
            assert!(a.same_layout(&b));
            assert!(is_thresholdable(&a));
            assert!(a.width() < 12 && a.height() < 12);
        }
    }
}
