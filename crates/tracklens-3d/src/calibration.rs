use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::CalibrationError;

/// Largest accepted deviation of `det(RT)` from `1`.
///
/// The reference extrinsics are rounded to six decimals and land within `1e-6`.
pub const RIGID_DETERMINANT_TOLERANCE: f32 = 1e-3;

/// Raw calibration matrices of a single camera, stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationMatrices {
    /// The 3x3 intrinsic matrix `K` with the focal lengths and principal point.
    pub intrinsics: [[f32; 3]; 3],
    /// The 4x4 rigid transform `RT` from the camera frame to the world/ego frame.
    pub extrinsics: [[f32; 4]; 4],
}

impl CalibrationMatrices {
    /// Calibration of the forward looking 1280x480 camera of the reference vehicle.
    #[rustfmt::skip]
    pub fn front_camera() -> Self {
        Self {
            intrinsics: [
                [819.162645, 0.0, 640.0],
                [0.0, 819.162645, 240.0],
                [0.0, 0.0, 1.0],
            ],
            extrinsics: [
                [-0.005317, 0.003402, 0.999980, 1.624150],
                [-0.999920, -0.011526, -0.005277, 0.296660],
                [0.011508, -0.999928, 0.003463, 1.457150],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }
}

impl Default for CalibrationMatrices {
    fn default() -> Self {
        Self::front_camera()
    }
}

/// A pinhole camera with a fixed pose in the world/ego frame.
///
/// The model precomputes the projection `P = K * inverse(RT)`, keeping the first
/// three rows, and is never mutated afterwards.
#[derive(Debug, Clone)]
pub struct CalibrationModel {
    // rows of the 3x4 projection matrix
    projection: [Vec4; 3],
}

impl CalibrationModel {
    /// Build the model from the raw calibration matrices.
    ///
    /// # Errors
    ///
    /// Returns an error if a matrix holds non-finite values or if the extrinsic
    /// transform is not rigid, i.e. its determinant is not `+1` within
    /// [`RIGID_DETERMINANT_TOLERANCE`]. Scaled, reflected and singular transforms
    /// are all rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use tracklens_3d::{CalibrationMatrices, CalibrationModel};
    ///
    /// let model = CalibrationModel::new(&CalibrationMatrices::front_camera()).unwrap();
    /// let pixels = model.project(&[[20.0, 0.3, 1.45]]);
    ///
    /// assert!((pixels[0][0] - 640.0).abs() < 15.0);
    /// ```
    pub fn new(matrices: &CalibrationMatrices) -> Result<Self, CalibrationError> {
        // glam matrices are column-major, the raw arrays are row-major
        let intrinsics = Mat3::from_cols_array_2d(&matrices.intrinsics).transpose();
        let extrinsics = Mat4::from_cols_array_2d(&matrices.extrinsics).transpose();

        if !intrinsics.is_finite() {
            return Err(CalibrationError::NonFiniteValue("intrinsics"));
        }
        if !extrinsics.is_finite() {
            return Err(CalibrationError::NonFiniteValue("extrinsics"));
        }

        let determinant = extrinsics.determinant();
        if !determinant.is_finite() || (determinant - 1.0).abs() > RIGID_DETERMINANT_TOLERANCE {
            return Err(CalibrationError::NonRigidExtrinsics(determinant));
        }

        let world_to_camera = extrinsics.inverse();
        let projection = [0, 1, 2].map(|i| {
            let k = intrinsics.row(i);
            world_to_camera.row(0) * k.x + world_to_camera.row(1) * k.y + world_to_camera.row(2) * k.z
        });

        log::debug!("calibration projection rows: {projection:?}");

        Ok(Self { projection })
    }

    /// The 3x4 projection matrix `P`, row-major.
    pub fn projection(&self) -> [[f32; 4]; 3] {
        self.projection.map(|row| row.to_array())
    }

    /// Project a single world point to pixel coordinates.
    ///
    /// Points at or behind the camera plane (`w <= 0`) are still divided and yield
    /// meaningless coordinates; callers must gate on depth themselves.
    pub fn project_point(&self, point: Vec3) -> Vec2 {
        let homogeneous = point.extend(1.0);
        let x = self.projection[0].dot(homogeneous);
        let y = self.projection[1].dot(homogeneous);
        let w = self.projection[2].dot(homogeneous);
        Vec2::new(x / w, y / w)
    }

    /// Project a set of world points to pixel coordinates.
    ///
    /// # Arguments
    ///
    /// * `points` - The points in the world frame as `[x, y, z]`.
    ///
    /// # Returns
    ///
    /// The pixel coordinates `[u, v]` of every point, in input order.
    pub fn project(&self, points: &[[f32; 3]]) -> Vec<[f32; 2]> {
        points
            .iter()
            .map(|&p| self.project_point(Vec3::from_array(p)).to_array())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::forward_camera;
    use approx::assert_relative_eq;

    #[test]
    fn test_projection_identity() -> Result<(), CalibrationError> {
        let matrices = CalibrationMatrices {
            intrinsics: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            extrinsics: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        };
        let model = CalibrationModel::new(&matrices)?;
        assert_eq!(
            model.projection(),
            [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
            ]
        );
        Ok(())
    }

    #[test]
    fn test_projection_is_pure() -> Result<(), CalibrationError> {
        let a = CalibrationModel::new(&CalibrationMatrices::front_camera())?;
        let b = CalibrationModel::new(&CalibrationMatrices::front_camera())?;
        assert_eq!(a.projection(), b.projection());
        Ok(())
    }

    #[test]
    fn test_project_forward_camera() -> Result<(), CalibrationError> {
        let model = CalibrationModel::new(&forward_camera())?;
        let pixels = model.project(&[[10.0, 0.0, 0.0], [10.0, 1.0, 0.0], [10.0, 0.0, 1.0]]);
        assert_relative_eq!(pixels[0][0], 50.0, epsilon = 1e-4);
        assert_relative_eq!(pixels[0][1], 40.0, epsilon = 1e-4);
        // a point to the left lands left of the principal point
        assert_relative_eq!(pixels[1][0], 40.0, epsilon = 1e-4);
        assert_relative_eq!(pixels[1][1], 40.0, epsilon = 1e-4);
        // a point above lands above the principal point
        assert_relative_eq!(pixels[2][0], 50.0, epsilon = 1e-4);
        assert_relative_eq!(pixels[2][1], 30.0, epsilon = 1e-4);
        Ok(())
    }

    #[test]
    fn test_project_behind_camera_is_not_rejected() -> Result<(), CalibrationError> {
        let model = CalibrationModel::new(&forward_camera())?;
        let pixel = model.project_point(Vec3::new(-5.0, 1.0, 0.0));
        // mirrored through the camera center
        assert_relative_eq!(pixel.x, 70.0, epsilon = 1e-4);
        assert_relative_eq!(pixel.y, 40.0, epsilon = 1e-4);
        Ok(())
    }

    #[test]
    fn test_front_camera_projects_ahead_near_center() -> Result<(), CalibrationError> {
        let model = CalibrationModel::new(&CalibrationMatrices::front_camera())?;
        let pixel = model.project_point(Vec3::new(20.0, 0.3, 1.45));
        assert!((pixel.x - 640.0).abs() < 15.0);
        assert!((pixel.y - 240.0).abs() < 15.0);
        Ok(())
    }

    #[test]
    fn test_non_rigid_extrinsics() {
        let mut singular = forward_camera();
        singular.extrinsics = [[0.0; 4]; 4];

        // uniform scale of two, det = 8
        let mut scaled = forward_camera();
        for row in scaled.extrinsics.iter_mut().take(3) {
            for v in row.iter_mut().take(3) {
                *v *= 2.0;
            }
        }

        // lateral axis flipped, det = -1
        let mut mirrored = forward_camera();
        mirrored.extrinsics[1][0] = 1.0;

        for (matrices, expected) in [(singular, 0.0), (scaled, 8.0), (mirrored, -1.0)] {
            match CalibrationModel::new(&matrices) {
                Err(CalibrationError::NonRigidExtrinsics(det)) => {
                    assert_relative_eq!(det, expected, epsilon = 1e-5)
                }
                other => panic!("expected a non rigid transform error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_reference_extrinsics_are_rigid() {
        let matrices = CalibrationMatrices::front_camera();
        let det = Mat4::from_cols_array_2d(&matrices.extrinsics).determinant();
        assert!((det - 1.0).abs() <= RIGID_DETERMINANT_TOLERANCE);
        assert!(CalibrationModel::new(&matrices).is_ok());
    }

    #[test]
    fn test_non_finite_calibration() {
        let mut matrices = forward_camera();
        matrices.intrinsics[0][0] = f32::NAN;
        assert_eq!(
            CalibrationModel::new(&matrices).err(),
            Some(CalibrationError::NonFiniteValue("intrinsics"))
        );

        let mut matrices = forward_camera();
        matrices.extrinsics[1][3] = f32::INFINITY;
        assert_eq!(
            CalibrationModel::new(&matrices).err(),
            Some(CalibrationError::NonFiniteValue("extrinsics"))
        );
    }

    #[test]
    fn test_matrices_from_json() -> Result<(), Box<dyn std::error::Error>> {
        let json = r#"{
            "intrinsics": [[100.0, 0.0, 50.0], [0.0, 100.0, 40.0], [0.0, 0.0, 1.0]],
            "extrinsics": [[0, 0, 1, 0], [-1, 0, 0, 0], [0, -1, 0, 0], [0, 0, 0, 1]]
        }"#;
        let matrices: CalibrationMatrices = serde_json::from_str(json)?;
        assert_eq!(matrices, forward_camera());
        Ok(())
    }
}
