//! Functions for thresholding images of every supported sample depth.
//!
//! [`threshold`] dispatches on the depth of a [`PixelGrid`]: 8-bit and 32-bit
//! float images take a native path ([`threshold_u8`], [`threshold_f32`]), the
//! remaining integer depths go through [`threshold_integer`]. All paths apply
//! the same rule, so equal sample values threshold to equal outputs.

use crate::definitions::{Clamp, Image, PixelGrid};
use crate::error::{Error, Result};
use image::{GrayImage, Luma, Primitive};
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a sample is rewritten depending on whether it is strictly above the threshold.
///
/// | type | `v > thresh` | otherwise |
/// |---|---|---|
/// | `Binary` | `maxval` | 0 |
/// | `BinaryInverted` | 0 | `maxval` |
/// | `Truncate` | `thresh` | `v` |
/// | `ToZero` | `v` | 0 |
/// | `ToZeroInverted` | 0 | `v` |
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThresholdType {
    /// `maxval` above the threshold, 0 elsewhere.
    Binary,
    /// 0 above the threshold, `maxval` elsewhere.
    BinaryInverted,
    /// Clips samples above the threshold to the threshold.
    Truncate,
    /// Zeroes samples that are not above the threshold.
    ToZero,
    /// Zeroes samples above the threshold.
    ToZeroInverted,
}

impl ThresholdType {
    /// All threshold types, in declaration order.
    pub const ALL: [ThresholdType; 5] = [
        ThresholdType::Binary,
        ThresholdType::BinaryInverted,
        ThresholdType::Truncate,
        ThresholdType::ToZero,
        ThresholdType::ToZeroInverted,
    ];

    #[inline(always)]
    fn select<T>(self, value: T, above: bool, thresh: T, maxval: T, zero: T) -> T {
        match (self, above) {
            (ThresholdType::Binary, true) => maxval,
            (ThresholdType::Binary, false) => zero,
            (ThresholdType::BinaryInverted, true) => zero,
            (ThresholdType::BinaryInverted, false) => maxval,
            (ThresholdType::Truncate, true) => thresh,
            (ThresholdType::Truncate, false) => value,
            (ThresholdType::ToZero, true) => value,
            (ThresholdType::ToZero, false) => zero,
            (ThresholdType::ToZeroInverted, true) => zero,
            (ThresholdType::ToZeroInverted, false) => value,
        }
    }
}

impl fmt::Display for ThresholdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ThresholdType::Binary => "binary",
            ThresholdType::BinaryInverted => "binary-inverted",
            ThresholdType::Truncate => "truncate",
            ThresholdType::ToZero => "to-zero",
            ThresholdType::ToZeroInverted => "to-zero-inverted",
        };
        f.write_str(name)
    }
}

impl FromStr for ThresholdType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ThresholdType::ALL
            .into_iter()
            .find(|t| t.to_string() == s)
            .ok_or_else(|| format!("unknown threshold type '{s}'"))
    }
}

/// Lookup table mapping every 8-bit value to its thresholded value.
fn u8_lookup_table(kind: ThresholdType, thresh: f64, maxval: f64) -> [u8; 256] {
    let t = <u8 as Clamp<f64>>::clamp(thresh.floor());
    let m = <u8 as Clamp<f64>>::clamp(maxval.round());
    let mut lut = [0u8; 256];
    for (v, entry) in lut.iter_mut().enumerate() {
        let v = v as u8;
        *entry = kind.select(v, v as f64 > thresh, t, m, 0);
    }
    lut
}

/// Thresholds an 8bpp image in place.
///
/// `thresh` is compared exactly against each sample; [`ThresholdType::Truncate`]
/// writes `floor(thresh)` and `maxval` is rounded, both saturated to `0..=255`.
pub fn threshold_mut(image: &mut GrayImage, kind: ThresholdType, thresh: f64, maxval: f64) {
    let lut = u8_lookup_table(kind, thresh, maxval);
    for p in image.iter_mut() {
        *p = lut[*p as usize];
    }
}

/// Returns a thresholded copy of an 8bpp image. See [`threshold_mut`].
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate bgsub;
/// # fn main() {
/// use bgsub::contrast::{threshold_u8, ThresholdType};
///
/// let image = gray_image!(
///     10, 80, 20;
///     50, 90, 70);
///
/// let binary = gray_image!(
///     0, 255, 0;
///     0, 255, 255);
/// assert_pixels_eq!(threshold_u8(&image, ThresholdType::Binary, 50.0, 255.0), binary);
///
/// let truncated = gray_image!(
///     10, 50, 20;
///     50, 50, 50);
/// assert_pixels_eq!(threshold_u8(&image, ThresholdType::Truncate, 50.0, 255.0), truncated);
/// # }
/// ```
pub fn threshold_u8(image: &GrayImage, kind: ThresholdType, thresh: f64, maxval: f64) -> GrayImage {
    let mut out = image.clone();
    threshold_mut(&mut out, kind, thresh, maxval);
    out
}

/// Thresholds a 32-bit float image. `thresh` and `maxval` are used as `f32`.
pub fn threshold_f32(
    image: &Image<Luma<f32>>,
    kind: ThresholdType,
    thresh: f64,
    maxval: f64,
) -> Image<Luma<f32>> {
    let (t, m) = (thresh as f32, maxval as f32);
    let mut out = image.clone();
    for p in out.iter_mut() {
        *p = kind.select(*p, *p > t, t, m, 0.0);
    }
    out
}

/// Thresholds an integer image of any depth that losslessly widens to `f64`.
///
/// Samples are compared exactly against `thresh`. [`ThresholdType::Truncate`]
/// writes `floor(thresh)` and `maxval` is rounded, both saturated to the range of `T`.
pub fn threshold_integer<T>(
    image: &Image<Luma<T>>,
    kind: ThresholdType,
    thresh: f64,
    maxval: f64,
) -> Image<Luma<T>>
where
    T: Primitive + Into<f64> + Clamp<f64>,
{
    let t = <T as Clamp<f64>>::clamp(thresh.floor());
    let m = <T as Clamp<f64>>::clamp(maxval.round());
    let zero = <T as Clamp<f64>>::clamp(0.0);
    let mut out = image.clone();
    for p in out.iter_mut() {
        let v = *p;
        *p = kind.select(v, Into::<f64>::into(v) > thresh, t, m, zero);
    }
    out
}

/// True if [`threshold`] has defined semantics for grids laid out like `grid`.
pub fn is_thresholdable(grid: &PixelGrid) -> bool {
    match grid {
        PixelGrid::Gray8(_)
        | PixelGrid::Gray16(_)
        | PixelGrid::GrayI16(_)
        | PixelGrid::GrayI32(_)
        | PixelGrid::Gray32F(_) => true,
        PixelGrid::Gray64F(_) | PixelGrid::Rgb8(_) => false,
    }
}

/// Thresholds a grid of any supported depth, returning a grid of the same
/// depth and dimensions.
///
/// Single channel 8U, 16U, 16S, 32S and 32F grids are supported; anything else
/// fails with [`Error::UnsupportedType`].
///
/// # Examples
/// ```
/// # extern crate image;
/// # #[macro_use]
/// # extern crate bgsub;
/// # fn main() {
/// use bgsub::contrast::{threshold, ThresholdType};
/// use bgsub::definitions::PixelGrid;
///
/// let grid = PixelGrid::from(gray_image!(type: i16,
///     -300, 5, 12;
///     700, 3, -1));
///
/// let out = threshold(&grid, ThresholdType::ToZero, 4.0, 1.0).unwrap();
/// assert_eq!(out, PixelGrid::from(gray_image!(type: i16,
///     0, 5, 12;
///     700, 0, 0)));
/// # }
/// ```
pub fn threshold(grid: &PixelGrid, kind: ThresholdType, thresh: f64, maxval: f64) -> Result<PixelGrid> {
    let out = match grid {
        PixelGrid::Gray8(image) => {
            trace!("{kind} threshold at {thresh}: native 8U path");
            PixelGrid::Gray8(threshold_u8(image, kind, thresh, maxval))
        }
        PixelGrid::Gray32F(image) => {
            trace!("{kind} threshold at {thresh}: native 32F path");
            PixelGrid::Gray32F(threshold_f32(image, kind, thresh, maxval))
        }
        PixelGrid::Gray16(image) => {
            trace!("{kind} threshold at {thresh}: generic 16U path");
            PixelGrid::Gray16(threshold_integer(image, kind, thresh, maxval))
        }
        PixelGrid::GrayI16(image) => {
            trace!("{kind} threshold at {thresh}: generic 16S path");
            PixelGrid::GrayI16(threshold_integer(image, kind, thresh, maxval))
        }
        PixelGrid::GrayI32(image) => {
            trace!("{kind} threshold at {thresh}: generic 32S path");
            PixelGrid::GrayI32(threshold_integer(image, kind, thresh, maxval))
        }
        PixelGrid::Gray64F(_) | PixelGrid::Rgb8(_) => {
            return Err(Error::UnsupportedType {
                depth: grid.depth(),
                channels: grid.channels(),
            })
        }
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::gray_noise_image;
    use image::{ImageBuffer, RgbImage};

    fn widen<T: Primitive>(image: &GrayImage, f: impl Fn(u8) -> T) -> Image<Luma<T>> {
        ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
            Luma([f(image.get_pixel(x, y)[0])])
        })
    }

    #[test]
    #[rustfmt::skip]
    fn test_threshold_binary() {
        let original: GrayImage = ImageBuffer::from_raw(26, 1,
            vec![0u8, 10u8, 20u8, 30u8, 40u8, 50u8, 60u8, 70u8,
                80u8, 90u8, 100u8, 110u8, 120u8, 130u8, 140u8,
                150u8, 160u8, 170u8, 180u8, 190u8, 200u8,  210u8,
                220u8,  230u8,  240u8,  250u8]).unwrap();
        let expected: GrayImage = ImageBuffer::from_raw(26, 1,
            vec![0u8, 0u8, 0u8, 0u8, 0u8, 0u8, 0u8, 0u8,
                0u8, 0u8, 0u8, 0u8, 0u8, 255u8, 255u8,
                255u8, 255u8, 255u8, 255u8, 255u8, 255u8,  255u8,
                255u8,  255u8,  255u8,  255u8]).unwrap();

        let actual = threshold_u8(&original, ThresholdType::Binary, 125.0, 255.0);
        assert_pixels_eq!(actual, expected);
    }

    #[test]
    fn test_threshold_mut_matches_copy() {
        let original = gray_noise_image(13, 9, 4);
        for kind in ThresholdType::ALL {
            let mut image = original.clone();
            threshold_mut(&mut image, kind, 100.0, 200.0);
            assert_pixels_eq!(image, threshold_u8(&original, kind, 100.0, 200.0));
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let image = gray_image!(4, 5, 6);
        assert_pixels_eq!(
            threshold_u8(&image, ThresholdType::Binary, 5.0, 255.0),
            gray_image!(0, 0, 255)
        );
        assert_pixels_eq!(
            threshold_u8(&image, ThresholdType::BinaryInverted, 5.0, 255.0),
            gray_image!(255, 255, 0)
        );
    }

    #[test]
    fn test_threshold_all_types_u8() {
        let image = gray_image!(0, 3, 7, 200);
        let expected = [
            (ThresholdType::Binary, gray_image!(0, 0, 9, 9)),
            (ThresholdType::BinaryInverted, gray_image!(9, 9, 0, 0)),
            (ThresholdType::Truncate, gray_image!(0, 3, 5, 5)),
            (ThresholdType::ToZero, gray_image!(0, 0, 7, 200)),
            (ThresholdType::ToZeroInverted, gray_image!(0, 3, 0, 0)),
        ];
        for (kind, expected) in expected {
            assert_pixels_eq!(threshold_u8(&image, kind, 5.0, 9.0), expected);
        }
    }

    #[test]
    fn test_fractional_threshold() {
        let image = gray_image!(2, 3);
        assert_pixels_eq!(
            threshold_u8(&image, ThresholdType::Truncate, 2.5, 255.0),
            gray_image!(2, 2)
        );
        assert_pixels_eq!(
            threshold_u8(&image, ThresholdType::Binary, 2.5, 254.6),
            gray_image!(0, 255)
        );
    }

    #[test]
    fn test_out_of_range_parameters_saturate() {
        let image = gray_image!(0, 128, 255);
        assert_pixels_eq!(
            threshold_u8(&image, ThresholdType::Binary, -1.0, 1000.0),
            gray_image!(255, 255, 255)
        );
        assert_pixels_eq!(
            threshold_u8(&image, ThresholdType::ToZero, 300.0, 255.0),
            gray_image!(0, 0, 0)
        );

        let image = gray_image!(type: i16, -32768, -5, 0, 9);
        assert_pixels_eq!(
            threshold_integer(&image, ThresholdType::Truncate, -10.0, 1.0),
            gray_image!(type: i16, -32768, -10, -10, -10)
        );
        assert_pixels_eq!(
            threshold_integer(&image, ThresholdType::Binary, -1e9, 1e9),
            gray_image!(type: i16, 32767, 32767, 32767, 32767)
        );
    }

    #[test]
    fn test_threshold_f32() {
        let image = gray_image!(type: f32, 0.25, 0.5, 0.75);
        assert_pixels_eq!(
            threshold_f32(&image, ThresholdType::Binary, 0.5, 1.0),
            gray_image!(type: f32, 0.0, 0.0, 1.0)
        );
        assert_pixels_eq!(
            threshold_f32(&image, ThresholdType::Truncate, 0.3, 1.0),
            gray_image!(type: f32, 0.25, 0.3, 0.3)
        );
    }

    #[test]
    fn test_native_and_generic_paths_agree() {
        let image = gray_noise_image(31, 17, 4);
        for kind in ThresholdType::ALL {
            for &(thresh, maxval) in &[(0.0, 255.0), (100.0, 255.0), (127.5, 200.0), (254.0, 1.0)] {
                let native = threshold_u8(&image, kind, thresh, maxval);
                let as_u16 = threshold_integer(&widen(&image, u16::from), kind, thresh, maxval);
                let as_i16 = threshold_integer(&widen(&image, i16::from), kind, thresh, maxval);
                let as_i32 = threshold_integer(&widen(&image, i32::from), kind, thresh, maxval);
                let as_f32 = threshold_f32(&widen(&image, f32::from), kind, thresh.floor(), maxval.round());

                assert_pixels_eq!(widen(&native, u16::from), as_u16);
                assert_pixels_eq!(widen(&native, i16::from), as_i16);
                assert_pixels_eq!(widen(&native, i32::from), as_i32);
                assert_pixels_eq!(widen(&native, f32::from), as_f32);
            }
        }
    }

    #[test]
    fn test_binary_types_are_complementary() {
        let image = widen(&gray_noise_image(20, 20, 8), |v| v as i32 * 1000 - 100_000);
        let binary = threshold_integer(&image, ThresholdType::Binary, 3.0, 70_000.0);
        let inverted = threshold_integer(&image, ThresholdType::BinaryInverted, 3.0, 70_000.0);
        for (a, b) in binary.iter().zip(inverted.iter()) {
            assert_eq!(a + b, 70_000);
        }
    }

    #[test]
    fn test_dispatch_preserves_layout() {
        let image = gray_noise_image(9, 4, 2);
        let grids = [
            PixelGrid::from(image.clone()),
            PixelGrid::from(widen(&image, u16::from)),
            PixelGrid::from(widen(&image, i16::from)),
            PixelGrid::from(widen(&image, i32::from)),
            PixelGrid::from(widen(&image, f32::from)),
        ];
        for grid in &grids {
            let out = threshold(grid, ThresholdType::Binary, 128.0, 1.0).unwrap();
            assert!(out.same_layout(grid));
        }
    }

    #[test]
    fn test_dispatch_rejects_unsupported() {
        let f64_grid = PixelGrid::from(widen(&gray_image!(1, 2), f64::from));
        assert_eq!(
            threshold(&f64_grid, ThresholdType::Binary, 1.0, 1.0),
            Err(Error::UnsupportedType {
                depth: crate::definitions::Depth::F64,
                channels: 1
            })
        );
        assert!(!is_thresholdable(&f64_grid));

        let rgb = PixelGrid::from(RgbImage::new(2, 2));
        assert!(matches!(
            threshold(&rgb, ThresholdType::Truncate, 1.0, 1.0),
            Err(Error::UnsupportedType { channels: 3, .. })
        ));
    }

    #[test]
    fn test_threshold_type_names() {
        for kind in ThresholdType::ALL {
            assert_eq!(kind.to_string().parse::<ThresholdType>(), Ok(kind));
        }
        assert!("otsu".parse::<ThresholdType>().is_err());
        let parsed: ThresholdType = serde_json::from_str("\"to-zero-inverted\"").unwrap();
        assert_eq!(parsed, ThresholdType::ToZeroInverted);
    }
}
