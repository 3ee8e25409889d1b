use opencv::core::{Mat, Ptr};
use opencv::video::{self, BackgroundSubtractorMOG2, BackgroundSubtractorTrait};

use crate::imaging::mat;
use crate::motion::domain::background_model::BackgroundModel;
use crate::shared::constants::{DEFAULT_HISTORY, DEFAULT_VAR_THRESHOLD};
use crate::shared::frame::Frame;
use crate::shared::plane::Plane;

/// Negative rate lets the subtractor pick its own schedule: fast at first,
/// settling at `1 / history`.
const AUTO_LEARNING_RATE: f64 = -1.0;

/// OpenCV's adaptive Gaussian-mixture background subtractor (MOG2),
/// without shadow detection.
///
/// The subtractor is created on the first frame, so building the model
/// cannot fail; a frame size change starts a fresh subtractor.
pub struct Mog2BackgroundModel {
    history: usize,
    var_threshold: f32,
    subtractor: Option<Ptr<BackgroundSubtractorMOG2>>,
    dimensions: (u32, u32),
}

impl Mog2BackgroundModel {
    pub fn new(history: usize, var_threshold: f32) -> Self {
        Self {
            history: history.max(1),
            var_threshold,
            subtractor: None,
            dimensions: (0, 0),
        }
    }

    fn subtractor_for(
        &mut self,
        frame: &Frame,
    ) -> opencv::Result<&mut Ptr<BackgroundSubtractorMOG2>> {
        if self.subtractor.is_some() && self.dimensions != frame.dimensions() {
            log::debug!(
                "Background model reset: frame size changed from {}x{} to {}x{}",
                self.dimensions.0,
                self.dimensions.1,
                frame.width(),
                frame.height()
            );
            self.subtractor = None;
        }

        let subtractor = match self.subtractor.take() {
            Some(subtractor) => subtractor,
            None => {
                self.dimensions = frame.dimensions();
                video::create_background_subtractor_mog2(
                    self.history as i32,
                    self.var_threshold as f64,
                    false,
                )?
            }
        };
        Ok(self.subtractor.insert(subtractor))
    }
}

impl Default for Mog2BackgroundModel {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY, DEFAULT_VAR_THRESHOLD)
    }
}

impl BackgroundModel for Mog2BackgroundModel {
    fn apply(&mut self, frame: &Frame) -> Result<Plane, Box<dyn std::error::Error>> {
        let src = mat::frame_to_mat(frame)?;
        let mut foreground = Mat::default();
        let subtractor = self.subtractor_for(frame)?;
        BackgroundSubtractorTrait::apply(subtractor, &src, &mut foreground, AUTO_LEARNING_RATE)?;
        Ok(mat::mat_to_plane(&foreground)?)
    }
}
