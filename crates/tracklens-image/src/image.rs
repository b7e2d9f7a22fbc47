use crate::error::ImageError;

/// Size of a canvas in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Returns true if the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
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

impl From<ImageSize> for [u32; 2] {
    fn from(size: ImageSize) -> Self {
        [size.width as u32, size.height as u32]
    }
}

/// A frame-local drawing canvas.
///
/// Pixels are stored contiguously, row by row, with the `CHANNELS` values of a pixel
/// next to each other. Camera frames use `Image<u8, 3>` and occupancy masks
/// `Image<f32, 1>`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Wrap decoded pixel data into a canvas.
    ///
    /// # Errors
    ///
    /// Fails when `data` does not hold exactly `width * height * CHANNELS` values.
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = size.width * size.height * CHANNELS;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self { size, data })
    }

    /// Allocate a canvas filled with a constant value.
    ///
    /// ```
    /// use tracklens_image::{Image, ImageSize};
    ///
    /// let mask = Image::<f32, 1>::from_size_val(ImageSize { width: 4, height: 2 }, 0.0)?;
    /// assert_eq!(mask.as_slice(), &[0.0; 8]);
    /// # Ok::<(), tracklens_image::ImageError>(())
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        Image::new(size, vec![val; size.width * size.height * CHANNELS])
    }

    /// The canvas size in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Number of pixel columns.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Number of pixel rows.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// The raw pixel values.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The raw pixel values, mutable.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Read one channel of the pixel at column `x`, row `y`.
    pub fn get_pixel(&self, x: usize, y: usize, ch: usize) -> Result<T, ImageError>
    where
        T: Copy,
    {
        if x >= self.cols() || y >= self.rows() {
            return Err(ImageError::PixelIndexOutOfBounds(x, y, self.cols(), self.rows()));
        }
        if ch >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, CHANNELS));
        }

        Ok(self.data[(y * self.cols() + x) * CHANNELS + ch])
    }

    /// Multiply every value by `scale` and convert it to `U`.
    ///
    /// Used to turn a float mask into an 8-bit image for display.
    ///
    /// # Errors
    ///
    /// Fails with [`ImageError::CastError`] on the first value `U` cannot represent.
    pub fn cast_and_scale<U>(&self, scale: T) -> Result<Image<U, CHANNELS>, ImageError>
    where
        T: num_traits::NumCast + std::ops::Mul<Output = T> + Copy,
        U: num_traits::NumCast,
    {
        let data = self
            .data
            .iter()
            .map(|&v| U::from(v * scale).ok_or(ImageError::CastError))
            .collect::<Result<Vec<U>, ImageError>>()?;

        Image::new(self.size, data)
    }
}
