use std::time::Instant;

use crate::blending::domain::edge_blender::EdgeBlender;
use crate::inpainting::domain::inpainter::Inpainter;
use crate::motion::domain::background_model::BackgroundModel;
use crate::motion::domain::motion_mask_builder::MotionMaskBuilder;
use crate::shared::frame::Frame;
use crate::shared::plane::Plane;

use super::pipeline_logger::PipelineLogger;

/// The per-frame stages: mask, inpaint, blend.
///
/// Shared by every video of a run; anything that must not leak between
/// videos lives in [`FrameSession`] instead.
pub struct FrameCleaner {
    mask_builder: MotionMaskBuilder,
    inpainter: Box<dyn Inpainter>,
    blender: Box<dyn EdgeBlender>,
}

impl FrameCleaner {
    pub fn new(
        mask_builder: MotionMaskBuilder,
        inpainter: Box<dyn Inpainter>,
        blender: Box<dyn EdgeBlender>,
    ) -> Self {
        Self {
            mask_builder,
            inpainter,
            blender,
        }
    }

    /// Produces the cleaned version of `frame` given the previous frame's
    /// grayscale. Updates `model`.
    pub fn clean(
        &mut self,
        previous: &Plane,
        current: &Plane,
        frame: &Frame,
        model: &mut dyn BackgroundModel,
        logger: &mut dyn PipelineLogger,
    ) -> Result<Frame, Box<dyn std::error::Error>> {
        let t0 = Instant::now();
        let mask = self.mask_builder.build(previous, current, frame, model)?;
        logger.timing("mask", t0.elapsed().as_secs_f64() * 1000.0);

        let total = mask.data().len().max(1);
        logger.metric("masked_ratio", mask.count_nonzero() as f64 / total as f64);

        let t0 = Instant::now();
        let mut cleaned = self.inpainter.inpaint(frame, &mask)?;
        logger.timing("inpaint", t0.elapsed().as_secs_f64() * 1000.0);

        let t0 = Instant::now();
        self.blender.blend(&mut cleaned, &mask)?;
        logger.timing("blend", t0.elapsed().as_secs_f64() * 1000.0);

        Ok(cleaned)
    }
}

/// State carried from one frame of a video to the next.
///
/// Created once per video with a fresh background model. The first frame
/// only seeds `previous`; every later frame yields a cleaned frame.
pub struct FrameSession {
    model: Box<dyn BackgroundModel>,
    previous: Option<Plane>,
    frame_index: usize,
}

impl FrameSession {
    pub fn new(model: Box<dyn BackgroundModel>) -> Self {
        Self {
            model,
            previous: None,
            frame_index: 0,
        }
    }

    /// Index the next call to [`step`](Self::step) will assign.
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Consumes one decoded frame. Returns `None` for the first frame of the
    /// video, the cleaned frame otherwise.
    ///
    /// On error `previous` and the index are not advanced.
    pub fn step(
        &mut self,
        frame: &Frame,
        cleaner: &mut FrameCleaner,
        logger: &mut dyn PipelineLogger,
    ) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let gray = frame.to_gray();

        let cleaned = match &self.previous {
            None => None,
            Some(previous) => {
                Some(cleaner.clean(previous, &gray, frame, self.model.as_mut(), logger)?)
            }
        };

        self.previous = Some(gray);
        self.frame_index += 1;
        Ok(cleaned)
    }
}
