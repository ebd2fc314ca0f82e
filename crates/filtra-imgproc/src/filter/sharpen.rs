use filtra_image::Image;

use super::convolution::accumulate;
use super::kernels::{self, Kernel};
use crate::engine::PixelFilter;

/// Which discrete laplacian kernel a [`LaplacianSharpen`] filter uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaplacianKind {
    /// The 4-neighbor laplacian {0,1,0; 1,-4,1; 0,1,0}.
    FourNeighbor,
    /// The 8-neighbor laplacian {1,1,1; 1,-8,1; 1,1,1}.
    EightNeighbor,
}

/// A laplacian sharpening filter.
///
/// Convolves a discrete laplacian kernel over the clamped neighborhood to
/// obtain a per-channel response `L`, then outputs
/// `clamp(round(original + c * L), 0, 255)` where the original center pixel
/// is sampled directly, outside the convolution sum.
///
/// # Examples
///
/// ```
/// use filtra_imgproc::filter::{LaplacianKind, LaplacianSharpen};
///
/// let sharpen = LaplacianSharpen::new(LaplacianKind::FourNeighbor, -1.0);
/// let defaulted = LaplacianSharpen::with_default_strength(LaplacianKind::EightNeighbor);
/// assert_eq!(defaulted.strength(), LaplacianSharpen::DEFAULT_STRENGTH);
/// ```
pub struct LaplacianSharpen {
    kernel: Kernel,
    strength: f64,
}

impl LaplacianSharpen {
    /// The default sharpening strength.
    pub const DEFAULT_STRENGTH: f64 = -1.0;

    /// Create a laplacian sharpening filter with the given strength `c`.
    pub fn new(kind: LaplacianKind, strength: f64) -> Self {
        let kernel = match kind {
            LaplacianKind::FourNeighbor => kernels::laplacian4(),
            LaplacianKind::EightNeighbor => kernels::laplacian8(),
        };

        Self { kernel, strength }
    }

    /// Create a laplacian sharpening filter with the default strength.
    pub fn with_default_strength(kind: LaplacianKind) -> Self {
        Self::new(kind, Self::DEFAULT_STRENGTH)
    }

    /// The sharpening strength `c`.
    pub fn strength(&self) -> f64 {
        self.strength
    }
}

impl PixelFilter for LaplacianSharpen {
    fn pixel(&self, src: &Image<u8, 3>, x: usize, y: usize) -> [u8; 3] {
        let response = accumulate(src, x, y, &self.kernel);
        let original = src.pixel_clamped(x as isize, y as isize);

        std::array::from_fn(|c| {
            let v = f64::from(original[c]) + self.strength * f64::from(response[c]);
            (v.round() as i32).clamp(0, 255) as u8
        })
    }
}

/// An unsharp-mask filter, parametrized by strength `k`.
///
/// Internally convolves a fixed gaussian kernel (radius 2, sigma 10) to get a
/// per-channel blurred estimate `B` as a raw accumulated float, then outputs
/// `clamp(round(original + k * (original - B)), 0, 255)`: the high-frequency
/// residual, amplified by `k`, added back to the original.
///
/// # Examples
///
/// ```
/// use filtra_imgproc::filter::UnsharpMask;
///
/// let sharpen = UnsharpMask::new(1.5);
/// assert_eq!(sharpen.strength(), 1.5);
/// ```
pub struct UnsharpMask {
    kernel: Kernel,
    strength: f64,
}

impl UnsharpMask {
    /// Create an unsharp-mask filter with the given strength `k`.
    pub fn new(strength: f64) -> Self {
        Self {
            kernel: kernels::gaussian_grid(2, 10.0),
            strength,
        }
    }

    /// The sharpening strength `k`.
    pub fn strength(&self) -> f64 {
        self.strength
    }
}

impl PixelFilter for UnsharpMask {
    fn pixel(&self, src: &Image<u8, 3>, x: usize, y: usize) -> [u8; 3] {
        // the blurred estimate stays a raw float; only the final value is
        // rounded and clamped
        let blurred = accumulate(src, x, y, &self.kernel);
        let original = src.pixel_clamped(x as isize, y as isize);

        std::array::from_fn(|c| {
            let orig = f64::from(original[c]);
            let v = orig + self.strength * (orig - f64::from(blurred[c]));
            (v.round() as i32).clamp(0, 255) as u8
        })
    }
}
