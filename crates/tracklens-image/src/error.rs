/// Errors raised while building or reading a canvas.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// The data length does not match the size and channel count.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// A pixel read outside the canvas.
    #[error("Pixel coordinates ({0}, {1}) are out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// A channel index past the channel count.
    #[error("Channel index ({0}) is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// A value does not fit the target type of a cast.
    #[error("Failed to cast image data")]
    CastError,
}
