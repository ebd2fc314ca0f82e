use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use filtra_image::{Image, ImageError};
use log::debug;

/// A pixel rule: computes the output color for one pixel of the result.
///
/// Implementations are immutable after construction, so one filter value can
/// be reused across any number of runs, including concurrent runs over
/// different images.
pub trait PixelFilter: Send + Sync {
    /// Compute the output color for pixel `(x, y)` of the source image.
    ///
    /// `x` and `y` are always in range for `src`; any neighbor the rule
    /// samples must go through [`Image::pixel_clamped`] so that no
    /// out-of-bounds memory is ever read.
    fn pixel(&self, src: &Image<u8, 3>, x: usize, y: usize) -> [u8; 3];
}

impl<F: PixelFilter + ?Sized> PixelFilter for &F {
    fn pixel(&self, src: &Image<u8, 3>, x: usize, y: usize) -> [u8; 3] {
        (**self).pixel(src, x, y)
    }
}

impl<F: PixelFilter + ?Sized> PixelFilter for Box<F> {
    fn pixel(&self, src: &Image<u8, 3>, x: usize, y: usize) -> [u8; 3] {
        (**self).pixel(src, x, y)
    }
}

/// A cloneable handle to cooperatively cancel a running filter.
///
/// The engine polls the token once per scan column, so a set token is
/// observed within one column's worth of work.
///
/// # Examples
///
/// ```
/// use filtra_imgproc::engine::CancelToken;
///
/// let token = CancelToken::new();
/// assert!(!token.is_cancelled());
///
/// let remote = token.clone();
/// remote.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a new, unset token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the run holding this token.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// The result of a filter run: a complete image, or the cancellation signal.
///
/// Cancellation is a first-class outcome, not an error; a cancelled run
/// produces no image at all and the caller keeps its prior one.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterOutcome {
    /// The scan ran to completion.
    Completed(Image<u8, 3>),
    /// The scan was cancelled; no partial image is exposed.
    Cancelled,
}

impl FilterOutcome {
    /// Return the completed image, or `None` if the run was cancelled.
    pub fn completed(self) -> Option<Image<u8, 3>> {
        match self {
            FilterOutcome::Completed(image) => Some(image),
            FilterOutcome::Cancelled => None,
        }
    }

    /// Whether the run was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FilterOutcome::Cancelled)
    }
}

/// Apply a pixel filter over a whole image.
///
/// Scans the output grid column by column (outer loop over x, inner loop
/// over y), invoking the filter once per output pixel. At the top of each
/// column the engine reports the truncated percentage of columns completed
/// through `progress` and then polls `cancel`; a set token aborts the run
/// with [`FilterOutcome::Cancelled`] before the column is computed.
///
/// The progress callback is invoked synchronously on the scanning thread and
/// must not block; values are in `[0, 100]` and non-decreasing within a run.
/// The source image is never mutated; the result is a newly allocated image
/// of identical dimensions.
///
/// # Examples
///
/// ```
/// use filtra_image::{Image, ImageSize};
/// use filtra_imgproc::engine::{apply_filter, CancelToken, FilterOutcome};
/// use filtra_imgproc::filter::Median;
///
/// let src = Image::<u8, 3>::from_size_val(ImageSize { width: 4, height: 4 }, 128).unwrap();
/// let median = Median::new(3).unwrap();
///
/// let outcome = apply_filter(&median, &src, |_pct| {}, &CancelToken::new()).unwrap();
/// let dst = outcome.completed().unwrap();
/// assert_eq!(dst.size(), src.size());
/// ```
pub fn apply_filter<F>(
    filter: &F,
    src: &Image<u8, 3>,
    mut progress: impl FnMut(u8),
    cancel: &CancelToken,
) -> Result<FilterOutcome, ImageError>
where
    F: PixelFilter + ?Sized,
{
    let size = src.size();
    let mut dst = Image::<u8, 3>::from_size_val(size, 0)?;

    debug!("filter run started over {}x{} image", size.width, size.height);

    for x in 0..size.width {
        progress((x * 100 / size.width) as u8);

        if cancel.is_cancelled() {
            debug!("filter run cancelled at column {x}");
            return Ok(FilterOutcome::Cancelled);
        }

        for y in 0..size.height {
            let color = filter.pixel(src, x, y);
            let idx = (y * size.width + x) * 3;
            dst.as_slice_mut()[idx..idx + 3].copy_from_slice(&color);
        }
    }

    debug!("filter run completed");

    Ok(FilterOutcome::Completed(dst))
}
