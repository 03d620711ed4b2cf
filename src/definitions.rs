//! Trait definitions and type aliases.

use image::{GrayImage, ImageBuffer, Luma, Pixel, RgbImage};
use std::fmt;

/// An `ImageBuffer` containing Pixels of type P with storage `Vec<P::Subpixel>`.
/// Most operations in this library only support inputs of this type.
pub type Image<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;

/// The numeric storage type of a single sample.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Depth {
    /// 8-bit unsigned.
    U8,
    /// 16-bit unsigned.
    U16,
    /// 16-bit signed.
    I16,
    /// 32-bit signed.
    I32,
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
}

impl Depth {
    /// The conventional "foreground" value for a sample of this depth: the type
    /// maximum for integers and `1.0` for floats, whose frames are normalized.
    pub fn max_value(self) -> f64 {
        match self {
            Depth::U8 => u8::MAX as f64,
            Depth::U16 => u16::MAX as f64,
            Depth::I16 => i16::MAX as f64,
            Depth::I32 => i32::MAX as f64,
            Depth::F32 | Depth::F64 => 1.0,
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Depth::U8 => "8U",
            Depth::U16 => "16U",
            Depth::I16 => "16S",
            Depth::I32 => "32S",
            Depth::F32 => "32F",
            Depth::F64 => "64F",
        };
        f.write_str(name)
    }
}

/// A 2D grid of samples whose depth and channel count are only known at runtime.
///
/// Each variant wraps an [`Image`] of the corresponding pixel type, so matching
/// on a grid gives statically typed access to its samples.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelGrid {
    /// Single channel, 8-bit unsigned.
    Gray8(GrayImage),
    /// Single channel, 16-bit unsigned.
    Gray16(Image<Luma<u16>>),
    /// Single channel, 16-bit signed.
    GrayI16(Image<Luma<i16>>),
    /// Single channel, 32-bit signed.
    GrayI32(Image<Luma<i32>>),
    /// Single channel, 32-bit float.
    Gray32F(Image<Luma<f32>>),
    /// Single channel, 64-bit float.
    Gray64F(Image<Luma<f64>>),
    /// Three channels, 8-bit unsigned.
    Rgb8(RgbImage),
}

impl PixelGrid {
    /// Sample depth of this grid.
    pub fn depth(&self) -> Depth {
        match self {
            PixelGrid::Gray8(_) | PixelGrid::Rgb8(_) => Depth::U8,
            PixelGrid::Gray16(_) => Depth::U16,
            PixelGrid::GrayI16(_) => Depth::I16,
            PixelGrid::GrayI32(_) => Depth::I32,
            PixelGrid::Gray32F(_) => Depth::F32,
            PixelGrid::Gray64F(_) => Depth::F64,
        }
    }

    /// Number of channels per pixel.
    pub fn channels(&self) -> u8 {
        match self {
            PixelGrid::Rgb8(_) => 3,
            _ => 1,
        }
    }

    /// `(width, height)` of this grid, i.e. `(columns, rows)`.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            PixelGrid::Gray8(image) => image.dimensions(),
            PixelGrid::Gray16(image) => image.dimensions(),
            PixelGrid::GrayI16(image) => image.dimensions(),
            PixelGrid::GrayI32(image) => image.dimensions(),
            PixelGrid::Gray32F(image) => image.dimensions(),
            PixelGrid::Gray64F(image) => image.dimensions(),
            PixelGrid::Rgb8(image) => image.dimensions(),
        }
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.dimensions().0
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.dimensions().1
    }

    /// True if `other` has the same dimensions, depth and channel count.
    pub fn same_layout(&self, other: &PixelGrid) -> bool {
        self.dimensions() == other.dimensions()
            && self.depth() == other.depth()
            && self.channels() == other.channels()
    }

    /// The wrapped image, if this is a single channel 8-bit grid.
    pub fn as_gray8(&self) -> Option<&GrayImage> {
        match self {
            PixelGrid::Gray8(image) => Some(image),
            _ => None,
        }
    }

    /// Counts samples that are not zero.
    pub fn count_non_zero(&self) -> usize {
        match self {
            PixelGrid::Gray8(image) => image.iter().filter(|&&v| v != 0).count(),
            PixelGrid::Gray16(image) => image.iter().filter(|&&v| v != 0).count(),
            PixelGrid::GrayI16(image) => image.iter().filter(|&&v| v != 0).count(),
            PixelGrid::GrayI32(image) => image.iter().filter(|&&v| v != 0).count(),
            PixelGrid::Gray32F(image) => image.iter().filter(|&&v| v != 0.0).count(),
            PixelGrid::Gray64F(image) => image.iter().filter(|&&v| v != 0.0).count(),
            PixelGrid::Rgb8(image) => image.iter().filter(|&&v| v != 0).count(),
        }
    }
}

macro_rules! impl_grid_from {
    ($image:ty, $variant:ident) => {
        impl From<$image> for PixelGrid {
            fn from(image: $image) -> Self {
                PixelGrid::$variant(image)
            }
        }
    };
}

impl_grid_from!(GrayImage, Gray8);
impl_grid_from!(Image<Luma<u16>>, Gray16);
impl_grid_from!(Image<Luma<i16>>, GrayI16);
impl_grid_from!(Image<Luma<i32>>, GrayI32);
impl_grid_from!(Image<Luma<f32>>, Gray32F);
impl_grid_from!(Image<Luma<f64>>, Gray64F);
impl_grid_from!(RgbImage, Rgb8);

/// A type to which we can clamp a value of type T.
/// Implementations are not required to handle NaNs gracefully.
pub trait Clamp<T> {
    /// Clamp `x` to a valid value for this type.
    fn clamp(x: T) -> Self;
}

/// Creates an implementation of Clamp<From> for type To.
macro_rules! implement_clamp {
    ($from:ty, $to:ty, $min:expr, $max:expr, $min_from:expr, $max_from:expr) => {
        impl Clamp<$from> for $to {
            fn clamp(x: $from) -> $to {
                if x < $max_from as $from {
                    if x > $min_from as $from {
                        x as $to
                    } else {
                        $min
                    }
                } else {
                    $max
                }
            }
        }
    };
}

implement_clamp!(f64, u8, u8::MIN, u8::MAX, u8::MIN as f64, u8::MAX as f64);
implement_clamp!(f64, u16, u16::MIN, u16::MAX, u16::MIN as f64, u16::MAX as f64);
implement_clamp!(f64, i16, i16::MIN, i16::MAX, i16::MIN as f64, i16::MAX as f64);
implement_clamp!(f64, i32, i32::MIN, i32::MAX, i32::MIN as f64, i32::MAX as f64);
implement_clamp!(i32, i16, i16::MIN, i16::MAX, i16::MIN as i32, i16::MAX as i32);
implement_clamp!(i64, i32, i32::MIN, i32::MAX, i32::MIN as i64, i32::MAX as i64);
