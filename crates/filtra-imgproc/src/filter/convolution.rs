use filtra_image::Image;

use super::kernels::{self, Kernel};
use super::FilterError;
use crate::engine::PixelFilter;

/// Accumulate the kernel-weighted sum of clamped neighbor samples, per channel.
///
/// This is the shared arithmetic of every convolution-family filter: for each
/// offset in the kernel window the neighbor coordinate is clamped to the edge
/// on both axes, sampled, and each channel accumulates `value * weight`.
pub(crate) fn accumulate(src: &Image<u8, 3>, x: usize, y: usize, kernel: &Kernel) -> [f32; 3] {
    let rx = kernel.radius_x() as isize;
    let ry = kernel.radius_y() as isize;

    let mut acc = [0.0f32; 3];
    for l in -ry..=ry {
        for k in -rx..=rx {
            let w = kernel.get((k + rx) as usize, (l + ry) as usize);
            let neighbor = src.pixel_clamped(x as isize + k, y as isize + l);
            for c in 0..3 {
                acc[c] += neighbor[c] as f32 * w;
            }
        }
    }
    acc
}

/// Round an accumulated channel value and clamp it to the valid range.
pub(crate) fn to_channel(value: f32) -> u8 {
    (value.round() as i32).clamp(0, 255) as u8
}

/// A generic convolution filter over a weight matrix.
///
/// Accumulates `neighbor * weight` per channel across the kernel window,
/// divides by the configured divisor, rounds and clamps to `[0, 255]`.
///
/// # Examples
///
/// ```
/// use filtra_imgproc::filter::kernels::Kernel;
/// use filtra_imgproc::filter::Convolution;
///
/// // the 1x1 unit kernel is the identity transform
/// let identity = Convolution::new(Kernel::new(1, 1, vec![1.0]).unwrap());
/// ```
#[derive(Debug)]
pub struct Convolution {
    kernel: Kernel,
    divisor: f32,
}

impl Convolution {
    /// Create a convolution filter over the given kernel.
    pub fn new(kernel: Kernel) -> Self {
        Self {
            kernel,
            divisor: 1.0,
        }
    }

    /// Create a convolution filter whose accumulation is divided by
    /// `divisor` before rounding and clamping.
    pub fn with_divisor(kernel: Kernel, divisor: f32) -> Self {
        Self { kernel, divisor }
    }

    /// The 3x3 all-ones box smoothing filter (divisor 9).
    pub fn box_smoothing() -> Self {
        Self::with_divisor(kernels::box3(), 9.0)
    }

    /// The 3x3 binomial smoothing filter (divisor 16).
    pub fn weighted_smoothing() -> Self {
        Self::with_divisor(kernels::binomial3(), 16.0)
    }

    /// The kernel this filter convolves with.
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }
}

impl PixelFilter for Convolution {
    fn pixel(&self, src: &Image<u8, 3>, x: usize, y: usize) -> [u8; 3] {
        let acc = accumulate(src, x, y, &self.kernel);
        std::array::from_fn(|c| to_channel(acc[c] / self.divisor))
    }
}

/// A gaussian blur filter.
///
/// Builds a normalized gaussian kernel at construction and applies the
/// generic convolution arithmetic.
///
/// # Examples
///
/// ```
/// use filtra_imgproc::filter::GaussianBlur;
///
/// let blur = GaussianBlur::new(2, 3.0).unwrap();
/// let defaulted = GaussianBlur::default();
/// assert_eq!(blur.kernel().width(), defaulted.kernel().width());
/// ```
#[derive(Debug)]
pub struct GaussianBlur {
    inner: Convolution,
}

impl GaussianBlur {
    /// Create a gaussian blur with the given radius and sigma.
    ///
    /// # Errors
    ///
    /// Returns an error if `sigma` is not positive.
    pub fn new(radius: usize, sigma: f32) -> Result<Self, FilterError> {
        Ok(Self {
            inner: Convolution::new(Kernel::gaussian(radius, sigma)?),
        })
    }

    /// The gaussian kernel this filter convolves with.
    pub fn kernel(&self) -> &Kernel {
        self.inner.kernel()
    }
}

impl Default for GaussianBlur {
    /// Radius 2, sigma 3.
    fn default() -> Self {
        Self {
            inner: Convolution::new(kernels::gaussian_grid(2, 3.0)),
        }
    }
}

impl PixelFilter for GaussianBlur {
    fn pixel(&self, src: &Image<u8, 3>, x: usize, y: usize) -> [u8; 3] {
        self.inner.pixel(src, x, y)
    }
}

/// A sobel edge-magnitude filter.
///
/// Accumulates both 3x3 sobel kernels per channel and combines them as
/// `sqrt(gx² + gy²)`, truncated and clamped to `[0, 255]`. The result is an
/// edge-magnitude image; no thresholding or binarization is applied.
pub struct Sobel {
    kernel_x: Kernel,
    kernel_y: Kernel,
}

impl Sobel {
    /// Create a sobel filter.
    pub fn new() -> Self {
        Self {
            kernel_x: kernels::sobel_x(),
            kernel_y: kernels::sobel_y(),
        }
    }
}

impl Default for Sobel {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelFilter for Sobel {
    fn pixel(&self, src: &Image<u8, 3>, x: usize, y: usize) -> [u8; 3] {
        let gx = accumulate(src, x, y, &self.kernel_x);
        let gy = accumulate(src, x, y, &self.kernel_y);
        std::array::from_fn(|c| {
            let magnitude = (gx[c] * gx[c] + gy[c] * gy[c]).sqrt();
            (magnitude as i32).clamp(0, 255) as u8
        })
    }
}
