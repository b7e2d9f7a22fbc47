use glam::{Vec2, Vec3};
use tracklens_image::ImageSize;

use crate::bbox::OrientedBox;
use crate::calibration::CalibrationModel;

/// Minimum forward distance in meters a corner must have to count as projectable.
///
/// Points closer than this to the camera, or behind it, project to degenerate pixels.
pub const NEAR_PLANE_GUARD: f32 = 2.0;

/// A tracked object in a single frame, with its box corners in world and pixel space.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectInstance {
    class_id: i32,
    track_id: i32,
    corners_3d: [Vec3; 8],
    corners_2d: [Vec2; 8],
    distance: f32,
}

impl ObjectInstance {
    /// Build an instance and project its corners with the given calibration.
    ///
    /// # Arguments
    ///
    /// * `class_id` - The object class as reported by the tracker.
    /// * `track_id` - The track identifier, carried along but not interpreted.
    /// * `bbox` - The oriented box of the object in the world frame.
    /// * `calibration` - The camera used to project the corners.
    ///
    /// # Example
    ///
    /// ```
    /// use glam::Vec3;
    /// use tracklens_3d::{CalibrationMatrices, CalibrationModel, ObjectInstance, OrientedBox};
    ///
    /// let calibration = CalibrationModel::new(&CalibrationMatrices::front_camera()).unwrap();
    /// let bbox = OrientedBox::new(Vec3::new(10.0, 0.0, 1.0), Vec3::new(4.0, 2.0, 1.5), 0.0);
    /// let instance = ObjectInstance::new(0, 7, bbox, &calibration);
    ///
    /// assert!((instance.distance() - 65f32.sqrt()).abs() < 1e-4);
    /// ```
    pub fn new(class_id: i32, track_id: i32, bbox: OrientedBox, calibration: &CalibrationModel) -> Self {
        let corners_3d = bbox.corners();
        let corners_2d = corners_3d.map(|c| calibration.project_point(c));

        // closest corner on the ground plane, a cheap proxy for the box range
        let distance = corners_3d
            .iter()
            .map(|c| c.truncate().length())
            .fold(f32::INFINITY, f32::min);

        Self {
            class_id,
            track_id,
            corners_3d,
            corners_2d,
            distance,
        }
    }

    /// The object class identifier.
    pub fn class_id(&self) -> i32 {
        self.class_id
    }

    /// The track identifier.
    pub fn track_id(&self) -> i32 {
        self.track_id
    }

    /// The 8 box corners in the world frame, indexed as [`crate::BOX_CORNERS`].
    pub fn corners_3d(&self) -> &[Vec3; 8] {
        &self.corners_3d
    }

    /// The 8 box corners in pixel coordinates, indexed as [`crate::BOX_CORNERS`].
    pub fn corners_2d(&self) -> &[Vec2; 8] {
        &self.corners_2d
    }

    /// The projected corners rounded to the nearest pixel.
    pub fn pixel_corners(&self) -> [(i64, i64); 8] {
        self.corners_2d
            .map(|c| ((c.x + 0.5) as i64, (c.y + 0.5) as i64))
    }

    /// Minimum ground-plane norm over the 8 corners, in meters.
    ///
    /// Only meant for ordering instances, not for metric measurements.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Whether the whole box projects inside an image of the given size.
    ///
    /// Every corner must land strictly inside the image and lie further than
    /// [`NEAR_PLANE_GUARD`] along the forward axis. There is no partial clipping.
    pub fn is_visible(&self, image_size: ImageSize) -> bool {
        let width = image_size.width as f32;
        let height = image_size.height as f32;
        self.corners_3d
            .iter()
            .zip(self.corners_2d.iter())
            .all(|(world, pixel)| {
                pixel.x > 0.0
                    && pixel.x < width
                    && pixel.y > 0.0
                    && pixel.y < height
                    && world.x > NEAR_PLANE_GUARD
            })
    }
}
