/// An error type for the calibration model.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CalibrationError {
    /// The extrinsic transform is not a proper rigid motion.
    #[error("Extrinsic transform is not rigid (determinant {0}, expected 1)")]
    NonRigidExtrinsics(f32),

    /// A calibration matrix holds a NaN or infinite entry.
    #[error("Calibration matrix {0} holds a non-finite value")]
    NonFiniteValue(&'static str),
}
