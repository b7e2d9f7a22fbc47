use crate::calibration::CalibrationMatrices;

/// Camera at the origin looking down the world x axis, x right = -y, y down = -z.
#[rustfmt::skip]
pub(crate) fn forward_camera() -> CalibrationMatrices {
    CalibrationMatrices {
        intrinsics: [
            [100.0, 0.0, 50.0],
            [0.0, 100.0, 40.0],
            [0.0, 0.0, 1.0],
        ],
        extrinsics: [
            [0.0, 0.0, 1.0, 0.0],
            [-1.0, 0.0, 0.0, 0.0],
            [0.0, -1.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    }
}
