use glam::{Affine3A, Vec3};

/// Sign pattern of a box corner along the local (length, width, height) axes.
///
/// `x = +1` is the front half of the box, `y = +1` the left half and `z = +1` the
/// top half.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CornerSign {
    /// Sign along the length (heading) axis.
    pub x: i8,
    /// Sign along the width axis.
    pub y: i8,
    /// Sign along the height axis.
    pub z: i8,
}

impl CornerSign {
    const fn new(x: i8, y: i8, z: i8) -> Self {
        Self { x, y, z }
    }

    /// Position of this corner in [`BOX_CORNERS`]: `4 * (x > 0) + 2 * (y > 0) + (z > 0)`.
    pub const fn index(self) -> usize {
        4 * (self.x > 0) as usize + 2 * (self.y > 0) as usize + (self.z > 0) as usize
    }

    /// Offset of the corner from the center of a unit-half-extent box.
    pub fn offset(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

/// Corner index to sign pattern. `x` varies slowest and `z` fastest.
pub const BOX_CORNERS: [CornerSign; 8] = [
    CornerSign::new(-1, -1, -1),
    CornerSign::new(-1, -1, 1),
    CornerSign::new(-1, 1, -1),
    CornerSign::new(-1, 1, 1),
    CornerSign::new(1, -1, -1),
    CornerSign::new(1, -1, 1),
    CornerSign::new(1, 1, -1),
    CornerSign::new(1, 1, 1),
];

/// The 12 box edges as pairs of indices into [`BOX_CORNERS`].
///
/// Each edge joins two corners whose sign patterns differ on exactly one axis.
pub const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (0, 2),
    (0, 4),
    (1, 3),
    (1, 5),
    (2, 3),
    (2, 6),
    (3, 7),
    (4, 5),
    (4, 6),
    (5, 7),
    (6, 7),
];

/// The 4 edges of the front face, the corners with `x = +1`.
pub const FRONT_FACE_EDGES: [(usize, usize); 4] = [(4, 5), (4, 6), (5, 7), (6, 7)];

/// A 3D box with a heading around the vertical axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientedBox {
    /// Box center in the world frame, in meters.
    pub center: Vec3,
    /// Length, width and height of the box, in meters.
    pub extents: Vec3,
    /// Heading around the vertical axis, in radians.
    pub yaw: f32,
}

impl OrientedBox {
    /// Create a new box from its center, extents and heading.
    pub fn new(center: Vec3, extents: Vec3, yaw: f32) -> Self {
        Self {
            center,
            extents,
            yaw,
        }
    }

    /// The box pose as a rotation about its own center followed by a translation.
    pub fn pose(&self) -> Affine3A {
        Affine3A::from_translation(self.center) * Affine3A::from_rotation_z(self.yaw)
    }

    /// Compute the 8 corners of the box in the world frame.
    ///
    /// Corner `i` corresponds to `BOX_CORNERS[i]`.
    ///
    /// # Example
    ///
    /// ```
    /// use glam::Vec3;
    /// use tracklens_3d::OrientedBox;
    ///
    /// let bbox = OrientedBox::new(Vec3::new(10.0, 0.0, 1.0), Vec3::new(4.0, 2.0, 1.5), 0.0);
    /// let corners = bbox.corners();
    ///
    /// assert_eq!(corners[0], Vec3::new(8.0, -1.0, 0.25));
    /// assert_eq!(corners[7], Vec3::new(12.0, 1.0, 1.75));
    /// ```
    pub fn corners(&self) -> [Vec3; 8] {
        let half_extents = 0.5 * self.extents;
        let pose = self.pose();
        BOX_CORNERS.map(|sign| pose.transform_point3(sign.offset() * half_extents))
    }
}
