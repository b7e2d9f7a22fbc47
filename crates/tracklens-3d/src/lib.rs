#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Oriented bounding box geometry and the corner/edge tables.
pub mod bbox;

/// Fixed camera calibration and point projection.
pub mod calibration;

/// Error types for the 3d module.
pub mod error;

/// Per-frame tracked object instances.
pub mod instance;

pub use bbox::{CornerSign, OrientedBox, BOX_CORNERS, BOX_EDGES, FRONT_FACE_EDGES};
pub use calibration::{CalibrationMatrices, CalibrationModel, RIGID_DETERMINANT_TOLERANCE};
pub use error::CalibrationError;
pub use instance::{ObjectInstance, NEAR_PLANE_GUARD};

#[cfg(test)]
pub(crate) mod test_utils;
