#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Pipeline
//!
//! Every frame goes through the same steps:
//!
//! 1. the [`RoiFilter`] drops rows outside the region of interest,
//! 2. each remaining row becomes an [`ObjectInstance`] projected with the fixed
//!    [`CalibrationModel`],
//! 3. instances are sorted near to far and the ones not fully visible are dropped,
//! 4. the survivors are drawn as wireframes on the image and as filled convex hulls
//!    on the mask.
//!
//! ```
//! use tracklens::{CalibrationMatrices, CalibrationModel, FrameProcessor, Image, ImageSize, TrackRow};
//!
//! let calibration = CalibrationModel::new(&CalibrationMatrices::front_camera())?;
//! let processor = FrameProcessor::new(&calibration);
//!
//! let rows: Vec<TrackRow> = serde_json::from_str("[[0, 7, 15.0, 0.5, 0.8, 4.0, 1.8, 1.5, 0.1]]")?;
//!
//! let size = ImageSize { width: 1280, height: 480 };
//! let mut image = Image::<u8, 3>::from_size_val(size, 0)?;
//! let mut mask = Image::<f32, 1>::from_size_val(size, 0.0)?;
//!
//! let summary = processor.process(&rows, &mut image, &mut mask)?;
//! assert_eq!(summary.instances.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Overlay configuration loaded from disk.
pub mod config;

/// Error types for the overlay pipeline.
pub mod error;

/// Per-frame projection, filtering and rendering.
pub mod frame;

/// Image loading utilities.
pub mod io;

/// Wireframe and mask rendering of object instances.
pub mod render;

/// Region of interest filtering of raw track rows.
pub mod roi;

/// Frame sequence driver with a continue/stop gate.
pub mod sequence;

/// Track row schema produced by the tracker.
pub mod track;

pub use config::OverlayConfig;
pub use error::{ConfigError, FrameError, IoError, TrackError};
pub use frame::{FrameProcessor, FrameSummary};
pub use render::RenderStyle;
pub use roi::RoiFilter;
pub use sequence::{FrameControl, FrameGate, OverlaySession, RenderedFrame, RunSummary};
pub use track::{FrameRecord, ObjectClass, TrackRow};

pub use tracklens_3d::{CalibrationError, CalibrationMatrices, CalibrationModel, ObjectInstance};
pub use tracklens_image::{Image, ImageError, ImageSize};
