use tracklens_3d::{CalibrationModel, ObjectInstance};
use tracklens_image::{Image, ImageSize};

use crate::error::FrameError;
use crate::render::{self, RenderStyle};
use crate::roi::RoiFilter;
use crate::track::{ObjectClass, TrackRow};

/// Outcome of processing a single frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSummary {
    /// Number of rows received from the tracker.
    pub num_rows: usize,
    /// Number of rows inside the region of interest.
    pub num_selected: usize,
    /// The rendered instances, near to far.
    pub instances: Vec<ObjectInstance>,
}

/// Runs the projection, filtering and rendering pipeline on one frame at a time.
///
/// The processor borrows the calibration, which stays fixed for the whole run.
#[derive(Clone, Debug)]
pub struct FrameProcessor<'a> {
    calibration: &'a CalibrationModel,
    roi: RoiFilter,
    style: RenderStyle,
}

impl<'a> FrameProcessor<'a> {
    /// Create a processor with the default region of interest and style.
    pub fn new(calibration: &'a CalibrationModel) -> Self {
        Self {
            calibration,
            roi: RoiFilter::default(),
            style: RenderStyle::default(),
        }
    }

    /// Replace the region of interest.
    pub fn with_roi(mut self, roi: RoiFilter) -> Self {
        self.roi = roi;
        self
    }

    /// Replace the render style.
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    /// The calibration used to project the instances.
    pub fn calibration(&self) -> &CalibrationModel {
        self.calibration
    }

    /// The region of interest applied to the raw rows.
    pub fn roi(&self) -> &RoiFilter {
        &self.roi
    }

    /// The render style.
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Build the instances of the rows inside the region of interest, near to far.
    ///
    /// The sort is stable: instances at the same distance keep the row order.
    /// The instances are not checked for visibility.
    pub fn build_instances(&self, rows: &[TrackRow]) -> Vec<ObjectInstance> {
        self.sorted_instances(&self.roi.apply(rows))
    }

    /// Build the instances that project entirely inside an image of the given size.
    ///
    /// The near to far order is preserved.
    pub fn visible_instances(&self, rows: &[TrackRow], image_size: ImageSize) -> Vec<ObjectInstance> {
        retain_visible(self.build_instances(rows), image_size)
    }

    /// Draw the instances, in the given order, on the image and the mask.
    ///
    /// Instances that are not fully visible are skipped, so the output of
    /// [`Self::build_instances`] can be passed as is.
    ///
    /// # Errors
    ///
    /// Fails if the canvases are empty or do not share the same size.
    pub fn render(
        &self,
        instances: &[ObjectInstance],
        image: &mut Image<u8, 3>,
        mask: &mut Image<f32, 1>,
    ) -> Result<(), FrameError> {
        check_canvases(image, mask)?;
        self.draw(instances, image, mask);
        Ok(())
    }

    /// Run the whole pipeline on one frame.
    ///
    /// # Arguments
    ///
    /// * `rows` - The track rows of the frame.
    /// * `image` - The camera image, the wireframes are drawn on it.
    /// * `mask` - The occupancy mask, same size as the image.
    ///
    /// # Returns
    ///
    /// A summary holding the rendered instances. An empty list is a valid outcome.
    pub fn process(
        &self,
        rows: &[TrackRow],
        image: &mut Image<u8, 3>,
        mask: &mut Image<f32, 1>,
    ) -> Result<FrameSummary, FrameError> {
        check_canvases(image, mask)?;

        let selected = self.roi.apply(rows);
        let instances = retain_visible(self.sorted_instances(&selected), image.size());

        log::debug!(
            "{} rows, {} in roi, {} visible",
            rows.len(),
            selected.len(),
            instances.len()
        );

        for instance in &instances {
            log::trace!(
                "{} #{} at {:.2} m",
                ObjectClass::from_id(instance.class_id()),
                instance.track_id(),
                instance.distance()
            );
        }

        self.draw(&instances, image, mask);

        Ok(FrameSummary {
            num_rows: rows.len(),
            num_selected: selected.len(),
            instances,
        })
    }

    fn sorted_instances(&self, selected: &[TrackRow]) -> Vec<ObjectInstance> {
        let mut instances = selected
            .iter()
            .map(|row| ObjectInstance::new(row.class_id, row.track_id, row.oriented_box(), self.calibration))
            .collect::<Vec<_>>();

        instances.sort_by(|a, b| a.distance().total_cmp(&b.distance()));

        instances
    }

    fn draw(&self, instances: &[ObjectInstance], image: &mut Image<u8, 3>, mask: &mut Image<f32, 1>) {
        for instance in instances {
            render::draw_wireframe(image, instance, &self.style);
        }

        // later instances overwrite earlier ones, so farther boxes win on overlaps
        for instance in instances {
            render::fill_silhouette(mask, instance, self.style.mask_value);
        }
    }
}

fn retain_visible(instances: Vec<ObjectInstance>, image_size: ImageSize) -> Vec<ObjectInstance> {
    instances
        .into_iter()
        .filter(|instance| instance.is_visible(image_size))
        .collect()
}

fn check_canvases(image: &Image<u8, 3>, mask: &Image<f32, 1>) -> Result<(), FrameError> {
    if image.size().is_empty() {
        return Err(FrameError::EmptyCanvas(image.size()));
    }
    if image.size() != mask.size() {
        return Err(FrameError::CanvasSizeMismatch {
            image: image.size(),
            mask: mask.size(),
        });
    }
    Ok(())
}
