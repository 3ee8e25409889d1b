use crate::shared::frame::Frame;
use crate::shared::plane::Plane;

/// Running statistical model of a video's static scene.
///
/// One instance belongs to one video. Each call to `apply` updates the
/// model with the frame and returns its foreground mask (255 = foreground,
/// 0 = background) with the frame's dimensions.
pub trait BackgroundModel {
    fn apply(&mut self, frame: &Frame) -> Result<Plane, Box<dyn std::error::Error>>;
}

/// Builds a fresh model at the start of each video.
pub type BackgroundModelFactory = Box<dyn Fn() -> Box<dyn BackgroundModel>>;
