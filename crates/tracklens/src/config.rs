use std::path::Path;

use serde::{Deserialize, Serialize};
use tracklens_3d::{CalibrationMatrices, CalibrationModel};

use crate::error::ConfigError;
use crate::frame::FrameProcessor;
use crate::render::RenderStyle;
use crate::roi::RoiFilter;

/// Configuration of an overlay run.
///
/// Every section is optional in the JSON file and falls back to its defaults: the
/// reference front camera, the fixed region of interest and the default style.
///
/// ```json
/// {
///     "calibration": {
///         "intrinsics": [[819.16, 0.0, 640.0], [0.0, 819.16, 240.0], [0.0, 0.0, 1.0]],
///         "extrinsics": [[0, 0, 1, 1.6], [-1, 0, 0, 0.3], [0, -1, 0, 1.5], [0, 0, 0, 1]]
///     },
///     "roi": { "max_forward": 60.0 },
///     "style": { "thickness": 2 }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// The camera calibration.
    pub calibration: CalibrationMatrices,
    /// The region of interest applied to the raw rows.
    pub roi: RoiFilter,
    /// The render style.
    pub style: RenderStyle,
}

impl OverlayConfig {
    /// Load the configuration from a JSON file.
    pub fn from_file(file_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(file_path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Build the calibration model.
    ///
    /// This is the only fallible step of a run's setup and must happen before the
    /// first frame.
    pub fn calibration_model(&self) -> Result<CalibrationModel, ConfigError> {
        Ok(CalibrationModel::new(&self.calibration)?)
    }

    /// Build a frame processor using this configuration's region of interest and style.
    pub fn frame_processor<'a>(&self, calibration: &'a CalibrationModel) -> FrameProcessor<'a> {
        FrameProcessor::new(calibration)
            .with_roi(self.roi.clone())
            .with_style(self.style.clone())
    }
}
