//! Static background subtraction.
//!
//! A [`StaticBackgroundSubtractor`] holds a fixed reference frame. Each call to
//! [`apply`](StaticBackgroundSubtractor::apply) marks the samples of a new frame
//! that differ from the reference by strictly more than the threshold.

use crate::contrast::{is_thresholdable, threshold, ThresholdType};
use crate::definitions::PixelGrid;
use crate::error::{Error, Result};
use crate::pixelops::absolute_difference;
use log::debug;
use std::sync::Arc;

/// Foreground detector against a background that never adapts.
///
/// The background is reference counted, so cloning a subtractor to hand one to
/// each worker thread shares the reference frame instead of copying it. Each
/// clone keeps its own mask.
#[derive(Debug, Clone)]
pub struct StaticBackgroundSubtractor {
    background: Arc<PixelGrid>,
    threshold: f64,
    max_value: f64,
    mask: Option<PixelGrid>,
}

impl StaticBackgroundSubtractor {
    /// Creates a subtractor for `background`.
    ///
    /// Foreground samples are set to the maximum value of the background's
    /// depth, see [`Depth::max_value`](crate::definitions::Depth::max_value).
    /// Fails with [`Error::InvalidInput`] if `threshold` is negative or NaN.
    ///
    /// # Examples
    /// ```
    /// # extern crate image;
    /// # #[macro_use]
    /// # extern crate bgsub;
    /// # fn main() {
    /// use bgsub::background_subtraction::StaticBackgroundSubtractor;
    /// use bgsub::definitions::PixelGrid;
    ///
    /// let background = PixelGrid::from(gray_image!(
    ///     10, 10, 10;
    ///     10, 10, 10));
    /// let mut subtractor = StaticBackgroundSubtractor::new(background, 2.0).unwrap();
    ///
    /// let frame = PixelGrid::from(gray_image!(
    ///     10, 12, 13;
    ///      7, 10, 80));
    /// let mask = subtractor.apply(&frame).unwrap();
    ///
    /// assert_eq!(mask, &PixelGrid::from(gray_image!(
    ///       0,   0, 255;
    ///     255,   0, 255)));
    /// # }
    /// ```
    pub fn new(background: impl Into<Arc<PixelGrid>>, threshold: f64) -> Result<Self> {
        if threshold.is_nan() || threshold < 0.0 {
            return Err(Error::InvalidInput(format!(
                "threshold must be a non-negative number, got {threshold}"
            )));
        }
        let background: Arc<PixelGrid> = background.into();
        let max_value = background.depth().max_value();
        debug!(
            "static background {}x{} {}, threshold {}",
            background.width(),
            background.height(),
            background.depth(),
            threshold
        );
        Ok(StaticBackgroundSubtractor {
            background,
            threshold,
            max_value,
            mask: None,
        })
    }

    /// Replaces the value written to foreground samples.
    ///
    /// The value is rounded and saturated to the sample type when applied.
    pub fn with_max_value(mut self, max_value: f64) -> Self {
        self.max_value = max_value;
        self
    }

    /// Computes the foreground mask of `frame` and caches it, replacing any
    /// previous mask.
    ///
    /// A sample is foreground when `|frame - background| > threshold`. The mask
    /// has the layout of the background. Fails with [`Error::InvalidInput`] if
    /// `frame` is laid out differently from the background, and with
    /// [`Error::UnsupportedType`] if the background layout cannot be
    /// thresholded. The cached mask is left untouched on failure.
    pub fn apply(&mut self, frame: &PixelGrid) -> Result<&PixelGrid> {
        if !self.background.same_layout(frame) {
            return Err(Error::InvalidInput(format!(
                "frame is {}x{} {} with {} channel(s), background is {}x{} {} with {} channel(s)",
                frame.width(),
                frame.height(),
                frame.depth(),
                frame.channels(),
                self.background.width(),
                self.background.height(),
                self.background.depth(),
                self.background.channels(),
            )));
        }
        if !is_thresholdable(&self.background) {
            return Err(Error::UnsupportedType {
                depth: self.background.depth(),
                channels: self.background.channels(),
            });
        }

        let diff = absolute_difference(frame, &self.background)?;
        let mask = threshold(&diff, ThresholdType::Binary, self.threshold, self.max_value)?;
        debug!(
            "foreground mask: {} of {} samples set",
            mask.count_non_zero(),
            mask.width() as usize * mask.height() as usize
        );
        Ok(&*self.mask.insert(mask))
    }

    /// The mask produced by the most recent successful [`apply`](Self::apply).
    pub fn mask(&self) -> Option<&PixelGrid> {
        self.mask.as_ref()
    }

    /// The reference frame.
    pub fn background(&self) -> &PixelGrid {
        &self.background
    }

    /// Differences strictly above this value are foreground.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Value written to foreground samples.
    pub fn max_value(&self) -> f64 {
        self.max_value
    }
}
