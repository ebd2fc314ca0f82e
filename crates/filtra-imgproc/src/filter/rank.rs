use filtra_image::Image;

use super::FilterError;
use crate::engine::PixelFilter;

/// A median rank filter over an odd `size x size` window.
///
/// For each pixel, all `size²` clamped neighbor samples are gathered into
/// three per-channel arrays, each sorted ascending, and the element at rank
/// `(size² + 1) / 2` is selected per channel. The selected rank sits one past
/// the true middle element; it is kept as-is because downstream visual output
/// depends on it. No averaging takes place, so the output channels may come
/// from three different source pixels.
///
/// # Examples
///
/// ```
/// use filtra_imgproc::filter::Median;
///
/// let median = Median::new(5).unwrap();
/// assert!(Median::new(4).is_err());
/// ```
pub struct Median {
    size: usize,
}

impl Median {
    /// Create a median filter over a `size x size` window.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is even or zero.
    pub fn new(size: usize) -> Result<Self, FilterError> {
        if size == 0 || size % 2 == 0 {
            return Err(FilterError::InvalidWindowSize(size));
        }

        Ok(Self { size })
    }

    /// The window size along one axis.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl PixelFilter for Median {
    fn pixel(&self, src: &Image<u8, 3>, x: usize, y: usize) -> [u8; 3] {
        let r = (self.size / 2) as isize;
        let count = self.size * self.size;

        let mut channels: [Vec<u8>; 3] =
            std::array::from_fn(|_| Vec::with_capacity(count));

        for l in -r..=r {
            for k in -r..=r {
                let neighbor = src.pixel_clamped(x as isize + k, y as isize + l);
                for c in 0..3 {
                    channels[c].push(neighbor[c]);
                }
            }
        }

        // rank one past the middle; capped so the 1x1 window stays valid
        let rank = ((count + 1) / 2).min(count - 1);

        std::array::from_fn(|c| {
            channels[c].sort_unstable();
            channels[c][rank]
        })
    }
}
