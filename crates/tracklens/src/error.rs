use tracklens_image::{ImageError, ImageSize};

/// An error type for malformed track rows.
#[derive(thiserror::Error, Debug)]
pub enum TrackError {
    /// The row does not have the expected arity or field types.
    #[error("Track row {index} is malformed. {source}")]
    MalformedRow {
        /// Position of the row in the frame.
        index: usize,
        /// The underlying parsing error.
        source: serde_json::Error,
    },

    /// A numeric field is NaN or infinite.
    #[error("Track field `{0}` is not finite")]
    NonFiniteValue(&'static str),

    /// A box extent is negative.
    #[error("Track extent `{0}` is negative ({1})")]
    NegativeExtent(&'static str, f32),
}

/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to decode the image.
    #[error("Failed to decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] ImageError),

    /// Error to parse a frame sequence.
    #[error("Failed to parse the frame sequence. {0}")]
    SequenceParseError(#[from] serde_json::Error),
}

/// An error type for a single frame of the pipeline.
///
/// Any of these aborts the frame it happened in; the next frame is unaffected.
#[derive(thiserror::Error, Debug)]
pub enum FrameError {
    /// A track row of the frame is malformed.
    #[error(transparent)]
    Track(#[from] TrackError),

    /// The image of the frame could not be acquired.
    #[error(transparent)]
    Io(#[from] IoError),

    /// The canvas has no pixels.
    #[error("Canvas is empty: {0}")]
    EmptyCanvas(ImageSize),

    /// The image and mask canvases do not have the same size.
    #[error("Mask size {mask} does not match the image size {image}")]
    CanvasSizeMismatch {
        /// Size of the image canvas.
        image: ImageSize,
        /// Size of the mask canvas.
        mask: ImageSize,
    },

    /// The mask canvas could not be allocated.
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// An error type for loading the overlay configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Error to read the configuration file.
    #[error("Failed to read the configuration. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to parse the configuration.
    #[error("Failed to parse the configuration. {0}")]
    ParseError(#[from] serde_json::Error),

    /// The calibration section is not usable.
    #[error(transparent)]
    Calibration(#[from] tracklens_3d::CalibrationError),
}
