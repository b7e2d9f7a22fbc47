use std::path::PathBuf;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracklens_3d::OrientedBox;

use crate::error::TrackError;

/// Object classes reported by the tracker, in its id order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectClass {
    /// Passenger car.
    Car,
    /// Truck or bus.
    Truck,
    /// Pedestrian.
    Pedestrian,
    /// Bicycle or motorcycle.
    Bicycle,
    /// Any id the tracker may add later.
    Other(i32),
}

impl ObjectClass {
    /// Map a tracker class id to its class.
    pub fn from_id(id: i32) -> Self {
        match id {
            0 => Self::Car,
            1 => Self::Truck,
            2 => Self::Pedestrian,
            3 => Self::Bicycle,
            other => Self::Other(other),
        }
    }

    /// The tracker class id.
    pub fn id(self) -> i32 {
        match self {
            Self::Car => 0,
            Self::Truck => 1,
            Self::Pedestrian => 2,
            Self::Bicycle => 3,
            Self::Other(id) => id,
        }
    }
}

impl std::fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Car => write!(f, "car"),
            Self::Truck => write!(f, "truck"),
            Self::Pedestrian => write!(f, "pedestrian"),
            Self::Bicycle => write!(f, "bicycle"),
            Self::Other(id) => write!(f, "class {id}"),
        }
    }
}

type RawTrackRow = (i32, i32, f32, f32, f32, f32, f32, f32, f32);

/// One tracked object in one frame, as produced by the tracker.
///
/// On the wire a row is the JSON array
/// `[class_id, track_id, x, y, z, length, width, height, yaw]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTrackRow", into = "RawTrackRow")]
pub struct TrackRow {
    /// The object class id.
    pub class_id: i32,
    /// The track id.
    pub track_id: i32,
    /// Forward coordinate of the box center, in meters.
    pub x: f32,
    /// Lateral coordinate of the box center, in meters (positive to the left).
    pub y: f32,
    /// Vertical coordinate of the box center, in meters.
    pub z: f32,
    /// Box length along the heading, in meters.
    pub length: f32,
    /// Box width, in meters.
    pub width: f32,
    /// Box height, in meters.
    pub height: f32,
    /// Heading around the vertical axis, in radians.
    pub yaw: f32,
}

impl TrackRow {
    /// The object class.
    pub fn class(&self) -> ObjectClass {
        ObjectClass::from_id(self.class_id)
    }

    /// The box center in the world frame.
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// The box length, width and height.
    pub fn extents(&self) -> Vec3 {
        Vec3::new(self.length, self.width, self.height)
    }

    /// The oriented box described by the row.
    pub fn oriented_box(&self) -> OrientedBox {
        OrientedBox::new(self.center(), self.extents(), self.yaw)
    }
}

impl TryFrom<RawTrackRow> for TrackRow {
    type Error = TrackError;

    fn try_from(raw: RawTrackRow) -> Result<Self, Self::Error> {
        let (class_id, track_id, x, y, z, length, width, height, yaw) = raw;

        for (name, value) in [
            ("x", x),
            ("y", y),
            ("z", z),
            ("length", length),
            ("width", width),
            ("height", height),
            ("yaw", yaw),
        ] {
            if !value.is_finite() {
                return Err(TrackError::NonFiniteValue(name));
            }
        }

        for (name, value) in [("length", length), ("width", width), ("height", height)] {
            if value < 0.0 {
                return Err(TrackError::NegativeExtent(name, value));
            }
        }

        Ok(Self {
            class_id,
            track_id,
            x,
            y,
            z,
            length,
            width,
            height,
            yaw,
        })
    }
}

impl From<TrackRow> for RawTrackRow {
    fn from(row: TrackRow) -> Self {
        (
            row.class_id,
            row.track_id,
            row.x,
            row.y,
            row.z,
            row.length,
            row.width,
            row.height,
            row.yaw,
        )
    }
}

/// One frame of the tracker output: the image it refers to and its raw track rows.
///
/// Rows are kept as raw JSON until the frame is processed, so a malformed row only
/// fails its own frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Path of the camera image, relative to the image root.
    pub img_file: PathBuf,
    /// The raw track rows.
    pub objs: Vec<serde_json::Value>,
}

impl FrameRecord {
    /// Parse the raw rows of the frame.
    ///
    /// # Errors
    ///
    /// Fails on the first row with a wrong arity, a wrong field type, a non-finite
    /// value or a negative extent.
    pub fn track_rows(&self) -> Result<Vec<TrackRow>, TrackError> {
        self.objs
            .iter()
            .enumerate()
            .map(|(index, value)| {
                TrackRow::deserialize(value).map_err(|source| TrackError::MalformedRow { index, source })
            })
            .collect()
    }
}
