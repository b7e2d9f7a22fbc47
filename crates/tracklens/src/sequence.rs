use std::path::{Path, PathBuf};

use tracklens_image::Image;

use crate::error::FrameError;
use crate::frame::{FrameProcessor, FrameSummary};
use crate::io;
use crate::track::FrameRecord;

/// Decision taken at the end of every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Move on to the next frame.
    Continue,
    /// End the run.
    Stop,
}

/// External collaborator that receives every rendered frame and decides whether the
/// run goes on, e.g. a viewer waiting for a key press.
pub trait FrameGate {
    /// Hand over a rendered frame and wait for the decision.
    fn on_frame(&mut self, frame: &RenderedFrame) -> FrameControl;

    /// Polled before every frame, failed ones included. Returning `true` ends the
    /// run without processing the frame.
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> FrameGate for F
where
    F: FnMut(&RenderedFrame) -> FrameControl,
{
    fn on_frame(&mut self, frame: &RenderedFrame) -> FrameControl {
        self(frame)
    }
}

/// The canvases of a processed frame.
#[derive(Clone, Debug)]
pub struct RenderedFrame {
    /// Position of the frame in the sequence.
    pub index: usize,
    /// Path the image was read from.
    pub image_path: PathBuf,
    /// The camera image with the wireframes drawn on it.
    pub image: Image<u8, 3>,
    /// The occupancy mask.
    pub mask: Image<f32, 1>,
    /// The pipeline summary.
    pub summary: FrameSummary,
}

/// Counters of a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames rendered and handed to the gate.
    pub processed: usize,
    /// Frames aborted by an error.
    pub failed: usize,
    /// Whether the gate ended the run before the last frame.
    pub stopped: bool,
}

/// Drives a frame processor over a sequence of frame records.
pub struct OverlaySession<'a> {
    processor: FrameProcessor<'a>,
    image_root: PathBuf,
}

impl<'a> OverlaySession<'a> {
    /// Create a session reading images relative to `image_root`.
    pub fn new(processor: FrameProcessor<'a>, image_root: impl AsRef<Path>) -> Self {
        Self {
            processor,
            image_root: image_root.as_ref().to_path_buf(),
        }
    }

    /// Process one frame on an already acquired image.
    ///
    /// A fresh mask of the image size is allocated for the frame.
    pub fn step_with_image(
        &self,
        index: usize,
        record: &FrameRecord,
        mut image: Image<u8, 3>,
    ) -> Result<RenderedFrame, FrameError> {
        let rows = record.track_rows()?;
        let mut mask = Image::from_size_val(image.size(), 0.0)?;
        let summary = self.processor.process(&rows, &mut image, &mut mask)?;

        Ok(RenderedFrame {
            index,
            image_path: self.image_root.join(&record.img_file),
            image,
            mask,
            summary,
        })
    }

    /// Read the image of a frame record and process it.
    pub fn step(&self, index: usize, record: &FrameRecord) -> Result<RenderedFrame, FrameError> {
        let image_path = self.image_root.join(&record.img_file);
        log::debug!("frame {index}: {}", image_path.display());
        let image = io::read_image_rgb8(&image_path)?;
        self.step_with_image(index, record, image)
    }

    /// Process the frames in order, handing each one to the gate.
    ///
    /// A frame that fails is logged and skipped without reaching the gate. The run
    /// stops when the gate answers [`FrameControl::Stop`] for a rendered frame or
    /// reports itself cancelled at a frame boundary.
    pub fn run<G: FrameGate + ?Sized>(&self, frames: &[FrameRecord], gate: &mut G) -> RunSummary {
        let mut summary = RunSummary::default();

        for (index, record) in frames.iter().enumerate() {
            if gate.is_cancelled() {
                log::info!("cancelled before frame {index}");
                summary.stopped = true;
                break;
            }

            let frame = match self.step(index, record) {
                Ok(frame) => frame,
                Err(err) => {
                    log::warn!("skipping frame {index} ({}): {err}", record.img_file.display());
                    summary.failed += 1;
                    continue;
                }
            };

            summary.processed += 1;

            if gate.on_frame(&frame) == FrameControl::Stop {
                log::info!("stopped after frame {index}");
                summary.stopped = true;
                break;
            }
        }

        log::info!(
            "{} frames processed, {} failed",
            summary.processed,
            summary.failed
        );

        summary
    }
}
