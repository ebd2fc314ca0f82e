use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use filtra_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents an image with pixel data.
///
/// The pixel data is stored contiguously in (H, W, C) order, where H is the
/// height of the image, W the width and C the number of channels.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image in (H, W, C) order.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtra_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        if data.len() != size.width * size.height * CHANNELS {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                size.width * size.height * CHANNELS,
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size filled with a single value.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtra_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::from_size_val(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     0u8,
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.width * size.height * CHANNELS];
        Image::new(size, data)
    }

    /// Cast the pixel data of the image to a different type.
    ///
    /// # Errors
    ///
    /// If a pixel value cannot be represented in the target type, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtra_image::{Image, ImageSize};
    ///
    /// let image_u8 = Image::<u8, 3>::new(
    ///     ImageSize {
    ///         width: 1,
    ///         height: 2,
    ///     },
    ///     vec![0, 1, 2, 3, 4, 5],
    /// ).unwrap();
    ///
    /// let image_f32 = image_u8.cast::<f32>().unwrap();
    /// assert_eq!(image_f32.pixel(0, 1).unwrap(), [3.0, 4.0, 5.0]);
    /// ```
    pub fn cast<U>(&self) -> Result<Image<U, CHANNELS>, ImageError>
    where
        U: num_traits::NumCast,
        T: num_traits::NumCast + Copy,
    {
        let casted_data = self
            .data
            .iter()
            .map(|&x| U::from(x).ok_or(ImageError::CastError))
            .collect::<Result<Vec<U>, ImageError>>()?;

        Image::new(self.size, casted_data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the pixel data as a flat slice in (H, W, C) order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a mutable flat slice in (H, W, C) order.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return the pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS>
where
    T: Copy,
{
    /// Get the pixel values at the given coordinates.
    ///
    /// # Errors
    ///
    /// If the coordinates are out of bounds, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtra_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///     ImageSize {
    ///         width: 2,
    ///         height: 1,
    ///     },
    ///     vec![0, 1, 2, 3, 4, 5],
    /// ).unwrap();
    ///
    /// assert_eq!(image.pixel(1, 0).unwrap(), [3, 4, 5]);
    /// ```
    pub fn pixel(&self, x: usize, y: usize) -> Result<[T; CHANNELS], ImageError> {
        if x >= self.size.width || y >= self.size.height {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.size.width,
                self.size.height,
            ));
        }

        let idx = (y * self.size.width + x) * CHANNELS;
        Ok(std::array::from_fn(|c| self.data[idx + c]))
    }

    /// Get the pixel values at the given coordinates with clamp-to-edge
    /// boundary handling.
    ///
    /// Out-of-range coordinates are pulled, independently per axis, to the
    /// nearest valid coordinate before sampling. This is the single boundary
    /// policy shared by every neighborhood filter; no filter reads
    /// out-of-bounds memory.
    ///
    /// The image must be non-empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use filtra_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///     ImageSize {
    ///         width: 2,
    ///         height: 1,
    ///     },
    ///     vec![0, 1, 2, 3, 4, 5],
    /// ).unwrap();
    ///
    /// // both coordinates replicate the nearest edge pixel
    /// assert_eq!(image.pixel_clamped(-5, 0), [0, 1, 2]);
    /// assert_eq!(image.pixel_clamped(7, 3), [3, 4, 5]);
    /// ```
    pub fn pixel_clamped(&self, x: isize, y: isize) -> [T; CHANNELS] {
        debug_assert!(self.size.width > 0 && self.size.height > 0);

        let x = x.clamp(0, self.size.width as isize - 1) as usize;
        let y = y.clamp(0, self.size.height as isize - 1) as usize;

        let idx = (y * self.size.width + x) * CHANNELS;
        std::array::from_fn(|c| self.data[idx + c])
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ImageError;
    use crate::image::{Image, ImageSize};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(ImageSize::from([3, 4]), ImageSize { width: 3, height: 4 });
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);

        Ok(())
    }

    #[test]
    fn image_data_mismatch() {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0u8; 11],
        );
        assert_eq!(image, Err(ImageError::InvalidChannelShape(11, 12)));
    }

    #[test]
    fn image_from_size_val() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 2,
                height: 3,
            },
            7u8,
        )?;
        assert_eq!(image.as_slice().len(), 2 * 3 * 3);
        assert!(image.as_slice().iter().all(|&v| v == 7));

        Ok(())
    }

    #[test]
    fn image_cast() -> Result<(), ImageError> {
        let image_u8 = Image::<u8, 3>::new(
            ImageSize {
                width: 1,
                height: 2,
            },
            vec![0, 1, 2, 3, 4, 5],
        )?;
        let image_i32: Image<i32, 3> = image_u8.cast()?;
        assert_eq!(image_i32.pixel(0, 1)?, [3, 4, 5]);

        Ok(())
    }

    #[test]
    fn image_pixel_out_of_bounds() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0u8,
        )?;
        assert_eq!(
            image.pixel(2, 0),
            Err(ImageError::PixelIndexOutOfBounds(2, 0, 2, 2))
        );

        Ok(())
    }

    #[test]
    fn image_pixel_clamped_in_range() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![0, 1, 2, 3, 4, 5],
        )?;

        // in-range coordinates are untouched
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(
                    image.pixel_clamped(x as isize, y as isize),
                    image.pixel(x, y)?
                );
            }
        }

        Ok(())
    }

    #[test]
    fn image_pixel_clamped_edges() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![0, 1, 2, 3, 4, 5],
        )?;

        assert_eq!(image.pixel_clamped(-1, -1), [0]);
        assert_eq!(image.pixel_clamped(5, -3), [2]);
        assert_eq!(image.pixel_clamped(-2, 9), [3]);
        assert_eq!(image.pixel_clamped(100, 100), [5]);
        // axes clamp independently
        assert_eq!(image.pixel_clamped(1, 9), [4]);

        Ok(())
    }
}
