//! Sources of video frames and conversion of frames into subtractor input.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, ImageError, ImageFormat};
use log::{debug, trace};
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};

/// Width frames are scaled to before subtraction unless configured otherwise.
pub const DEFAULT_SCALE_WIDTH: u32 = 512;

/// A producer of successive frames.
pub trait FrameSource {
    /// Returns the next frame, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> Option<Result<DynamicImage, ImageError>>;

    /// Borrows the source as an iterator over its remaining frames.
    fn frames(&mut self) -> Frames<'_, Self>
    where
        Self: Sized,
    {
        Frames { source: self }
    }
}

/// Iterator returned by [`FrameSource::frames`].
#[derive(Debug)]
pub struct Frames<'a, S> {
    source: &'a mut S,
}

impl<S: FrameSource> Iterator for Frames<'_, S> {
    type Item = Result<DynamicImage, ImageError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.source.next_frame()
    }
}

/// Frames read from the image files of a directory, in lexical order of their
/// file names.
///
/// Files whose extension does not name a format the `image` crate was built
/// to decode are skipped.
#[derive(Debug, Clone)]
pub struct ImageSequence {
    paths: VecDeque<PathBuf>,
}

impl ImageSequence {
    /// Lists the readable image files in `dir`.
    pub fn open(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in dir.read_dir()? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            match ImageFormat::from_path(&path) {
                Ok(format) if format.reading_enabled() => paths.push(path),
                _ => trace!("skipping {}", path.display()),
            }
        }
        paths.sort();
        debug!("{} frame(s) in {}", paths.len(), dir.display());
        Ok(ImageSequence {
            paths: paths.into(),
        })
    }

    /// Number of frames not yet read.
    pub fn remaining(&self) -> usize {
        self.paths.len()
    }
}

impl FrameSource for ImageSequence {
    fn next_frame(&mut self) -> Option<Result<DynamicImage, ImageError>> {
        let path = self.paths.pop_front()?;
        trace!("reading {}", path.display());
        Some(image::open(path))
    }
}

/// Frames held in memory, yielded in insertion order.
#[derive(Debug, Clone, Default)]
pub struct FrameQueue {
    frames: VecDeque<DynamicImage>,
}

impl FrameQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a frame.
    pub fn push(&mut self, frame: impl Into<DynamicImage>) {
        self.frames.push_back(frame.into());
    }
}

impl<F: Into<DynamicImage>> FromIterator<F> for FrameQueue {
    fn from_iter<T: IntoIterator<Item = F>>(iter: T) -> Self {
        FrameQueue {
            frames: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl FrameSource for FrameQueue {
    fn next_frame(&mut self) -> Option<Result<DynamicImage, ImageError>> {
        self.frames.pop_front().map(Ok)
    }
}

/// Converts a frame to 8-bit grayscale.
pub fn gray_frame(frame: &DynamicImage) -> GrayImage {
    frame.to_luma8()
}

/// Converts a frame to 8-bit grayscale and resizes it to `width` columns with
/// linear filtering, keeping the aspect ratio.
///
/// Frames that already have the requested width, and empty frames, are only
/// converted. The scaled height is rounded and never less than 1.
///
/// # Examples
/// ```
/// use bgsub::source::scale_frame;
/// use image::{DynamicImage, RgbImage};
///
/// let frame = DynamicImage::from(RgbImage::new(1024, 768));
/// let scaled = scale_frame(&frame, 512);
/// assert_eq!(scaled.dimensions(), (512, 384));
/// ```
pub fn scale_frame(frame: &DynamicImage, width: u32) -> GrayImage {
    let gray = gray_frame(frame);
    let (w, h) = gray.dimensions();
    if w == 0 || h == 0 || width == 0 || w == width {
        return gray;
    }
    let height = ((h as f64 * width as f64 / w as f64).round() as u32).max(1);
    imageops::resize(&gray, width, height, FilterType::Triangle)
}
