use serde::{Deserialize, Serialize};

use crate::track::{ObjectClass, TrackRow};

/// Class id of the objects left out of the overlay (pedestrians).
pub const EXCLUDED_CLASS_ID: i32 = 2;

/// Closest forward distance of a box center kept by the filter, in meters.
pub const MIN_FORWARD_DISTANCE: f32 = 4.0;

/// Farthest forward distance of a box center kept by the filter, in meters.
pub const MAX_FORWARD_DISTANCE: f32 = 40.0;

/// Largest lateral offset of a box center kept by the filter, in meters.
pub const MAX_LATERAL_DISTANCE: f32 = 10.0;

/// Region of interest applied to raw track rows before any projection.
///
/// The defaults form the fixed operational envelope of the overlay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiFilter {
    /// Rows with one of these class ids are dropped wherever they are.
    pub excluded_classes: Vec<i32>,
    /// Rows with a center closer than this along the forward axis are dropped.
    pub min_forward: f32,
    /// Rows with a center farther than this along the forward axis are dropped.
    pub max_forward: f32,
    /// Rows with a center farther than this to either side are dropped.
    pub max_lateral: f32,
}

impl Default for RoiFilter {
    fn default() -> Self {
        Self {
            excluded_classes: vec![EXCLUDED_CLASS_ID],
            min_forward: MIN_FORWARD_DISTANCE,
            max_forward: MAX_FORWARD_DISTANCE,
            max_lateral: MAX_LATERAL_DISTANCE,
        }
    }
}

impl RoiFilter {
    /// Whether a row is inside the region of interest.
    ///
    /// The forward interval is closed: centers exactly at the bounds are kept.
    ///
    /// # Example
    ///
    /// ```
    /// use tracklens::{RoiFilter, TrackRow};
    ///
    /// let roi = RoiFilter::default();
    /// let row: TrackRow = serde_json::from_str("[0, 1, 3.0, 0.0, 0.0, 4.0, 2.0, 1.5, 0.0]").unwrap();
    ///
    /// assert!(!roi.accepts(&row));
    /// ```
    pub fn accepts(&self, row: &TrackRow) -> bool {
        if self.excluded_classes.contains(&row.class_id) {
            return false;
        }
        row.x >= self.min_forward && row.x <= self.max_forward && row.y.abs() <= self.max_lateral
    }

    /// Keep the rows inside the region of interest, in their original order.
    pub fn apply(&self, rows: &[TrackRow]) -> Vec<TrackRow> {
        rows.iter()
            .filter(|row| {
                let keep = self.accepts(row);
                if !keep {
                    log::trace!(
                        "dropping {} #{} at ({:.1}, {:.1})",
                        ObjectClass::from_id(row.class_id),
                        row.track_id,
                        row.x,
                        row.y
                    );
                }
                keep
            })
            .copied()
            .collect()
    }
}
