use super::FilterError;

/// A rectangular matrix of filter weights with odd width and odd height.
///
/// The weights are stored row-major; `get(kx, ky)` addresses column `kx` and
/// row `ky`. Odd dimensions guarantee a center cell and a symmetric radius
/// `(dimension - 1) / 2` along each axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    weights: Vec<f32>,
    width: usize,
    height: usize,
}

impl Kernel {
    /// Create a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is even or zero, or if the
    /// weights length does not equal `width * height`.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtra_imgproc::filter::kernels::Kernel;
    ///
    /// let kernel = Kernel::new(3, 1, vec![0.25, 0.5, 0.25]).unwrap();
    /// assert_eq!(kernel.radius_x(), 1);
    /// assert_eq!(kernel.radius_y(), 0);
    /// ```
    pub fn new(width: usize, height: usize, weights: Vec<f32>) -> Result<Self, FilterError> {
        if width % 2 == 0 || height % 2 == 0 {
            return Err(FilterError::EvenKernelSize(width, height));
        }
        if weights.len() != width * height {
            return Err(FilterError::InvalidKernelLength(weights.len(), width, height));
        }

        Ok(Self {
            weights,
            width,
            height,
        })
    }

    /// Create a normalized gaussian kernel of size `(2 * radius + 1)²`.
    ///
    /// Cell `(i, j)` for offsets `i, j` in `[-radius, radius]` is
    /// `exp(-(i² + j²) / σ²)`; the whole grid is then normalized so the
    /// weights sum to 1. This is a gaussian sampled on a grid, not the
    /// continuous gaussian integral, so the weights deviate slightly from
    /// the textbook values.
    ///
    /// # Errors
    ///
    /// Returns an error if `sigma` is not positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtra_imgproc::filter::kernels::Kernel;
    ///
    /// let kernel = Kernel::gaussian(2, 3.0).unwrap();
    /// let sum: f32 = kernel.weights().iter().sum();
    /// assert!((sum - 1.0).abs() < 1e-5);
    /// ```
    pub fn gaussian(radius: usize, sigma: f32) -> Result<Self, FilterError> {
        if sigma <= 0.0 {
            return Err(FilterError::InvalidSigma(sigma));
        }

        Ok(gaussian_grid(radius, sigma))
    }

    /// Get the kernel width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the kernel height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the kernel radius along the x axis.
    pub fn radius_x(&self) -> usize {
        (self.width - 1) / 2
    }

    /// Get the kernel radius along the y axis.
    pub fn radius_y(&self) -> usize {
        (self.height - 1) / 2
    }

    /// Get the weight at column `kx` and row `ky`.
    pub fn get(&self, kx: usize, ky: usize) -> f32 {
        self.weights[ky * self.width + kx]
    }

    /// Get the weights as a flat row-major slice.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

/// Build the gaussian grid for parameters already known to be valid.
pub(crate) fn gaussian_grid(radius: usize, sigma: f32) -> Kernel {
    let size = 2 * radius + 1;
    let r = radius as isize;
    let sigma_sq = sigma * sigma;

    let mut weights = Vec::with_capacity(size * size);
    for j in -r..=r {
        for i in -r..=r {
            weights.push((-((i * i + j * j) as f32) / sigma_sq).exp());
        }
    }

    let norm: f32 = weights.iter().sum();
    weights.iter_mut().for_each(|w| *w /= norm);

    Kernel {
        weights,
        width: size,
        height: size,
    }
}

fn fixed3(weights: [f32; 9]) -> Kernel {
    Kernel {
        weights: weights.to_vec(),
        width: 3,
        height: 3,
    }
}

/// The 3x3 sobel kernel for the horizontal gradient.
pub fn sobel_x() -> Kernel {
    fixed3([-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0])
}

/// The 3x3 sobel kernel for the vertical gradient.
pub fn sobel_y() -> Kernel {
    fixed3([-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0])
}

/// The 3x3 all-ones box smoothing kernel (un-normalized, divisor 9).
pub fn box3() -> Kernel {
    fixed3([1.0; 9])
}

/// The 3x3 binomial smoothing kernel (un-normalized, divisor 16).
pub fn binomial3() -> Kernel {
    fixed3([1.0, 2.0, 1.0, 2.0, 4.0, 2.0, 1.0, 2.0, 1.0])
}

/// The 4-neighbor discrete laplacian kernel.
pub fn laplacian4() -> Kernel {
    fixed3([0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0])
}

/// The 8-neighbor discrete laplacian kernel.
pub fn laplacian8() -> Kernel {
    fixed3([1.0, 1.0, 1.0, 1.0, -8.0, 1.0, 1.0, 1.0, 1.0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn kernel_rejects_even_dimensions() {
        assert_eq!(
            Kernel::new(2, 3, vec![0.0; 6]),
            Err(FilterError::EvenKernelSize(2, 3))
        );
        assert_eq!(
            Kernel::new(3, 0, vec![]),
            Err(FilterError::EvenKernelSize(3, 0))
        );
    }

    #[test]
    fn kernel_rejects_length_mismatch() {
        assert_eq!(
            Kernel::new(3, 3, vec![0.0; 8]),
            Err(FilterError::InvalidKernelLength(8, 3, 3))
        );
    }

    #[test]
    fn kernel_radius() {
        let kernel = Kernel::new(5, 3, vec![0.0; 15]).unwrap();
        assert_eq!(kernel.radius_x(), 2);
        assert_eq!(kernel.radius_y(), 1);
    }

    #[test]
    fn gaussian_rejects_non_positive_sigma() {
        assert_eq!(
            Kernel::gaussian(2, 0.0),
            Err(FilterError::InvalidSigma(0.0))
        );
        assert_eq!(
            Kernel::gaussian(2, -1.5),
            Err(FilterError::InvalidSigma(-1.5))
        );
    }

    #[test]
    fn gaussian_weights_sum_to_one() -> Result<(), FilterError> {
        for (radius, sigma) in [(0, 1.0), (1, 0.5), (2, 3.0), (3, 10.0), (5, 2.0)] {
            let kernel = Kernel::gaussian(radius, sigma)?;
            let sum: f32 = kernel.weights().iter().sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-5);
        }

        Ok(())
    }

    #[test]
    fn gaussian_radius_zero_is_identity() -> Result<(), FilterError> {
        let kernel = Kernel::gaussian(0, 3.0)?;
        assert_eq!(kernel.weights(), &[1.0]);

        Ok(())
    }

    #[test]
    fn gaussian_is_symmetric_and_peaked() -> Result<(), FilterError> {
        let kernel = Kernel::gaussian(2, 3.0)?;
        for ky in 0..5 {
            for kx in 0..5 {
                assert_eq!(kernel.get(kx, ky), kernel.get(4 - kx, 4 - ky));
                assert!(kernel.get(kx, ky) <= kernel.get(2, 2));
            }
        }

        Ok(())
    }

    #[test]
    fn fixed_kernels() {
        assert_eq!(box3().weights().iter().sum::<f32>(), 9.0);
        assert_eq!(binomial3().weights().iter().sum::<f32>(), 16.0);
        assert_eq!(sobel_x().weights().iter().sum::<f32>(), 0.0);
        assert_eq!(sobel_y().weights().iter().sum::<f32>(), 0.0);
        assert_eq!(laplacian4().weights().iter().sum::<f32>(), 0.0);
        assert_eq!(laplacian8().weights().iter().sum::<f32>(), 0.0);
        assert_eq!(laplacian4().get(1, 1), -4.0);
        assert_eq!(laplacian8().get(1, 1), -8.0);
        assert_eq!(sobel_x().get(0, 1), -2.0);
        assert_eq!(sobel_y().get(1, 0), -2.0);
    }
}
