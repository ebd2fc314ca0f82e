//! Filter operations
//!
//! This module provides the concrete pixel filters and their kernels.

/// Filter kernels
pub mod kernels;

/// Convolution-family filters
mod convolution;
pub use convolution::*;

/// Rank filters
mod rank;
pub use rank::*;

/// Sharpening filters
mod sharpen;
pub use sharpen::*;

/// Errors that can occur when constructing a filter.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// The kernel dimensions must be odd and non-zero.
    #[error("kernel dimensions must be odd and non-zero, got {0}x{1}")]
    EvenKernelSize(usize, usize),

    /// The kernel data length must match its dimensions.
    #[error("kernel data length ({0}) does not match {1}x{2}")]
    InvalidKernelLength(usize, usize, usize),

    /// The gaussian sigma must be positive.
    #[error("sigma must be positive, got {0}")]
    InvalidSigma(f32),

    /// The rank filter window size must be odd and non-zero.
    #[error("window size must be odd and non-zero, got {0}")]
    InvalidWindowSize(usize),
}
