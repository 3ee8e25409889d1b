use crate::shared::frame::Frame;
use crate::shared::plane::Plane;

/// Domain interface for softening the seams left by inpainting.
///
/// Implementations modify the frame in-place (`&mut Frame`) to avoid allocation.
pub trait EdgeBlender: Send {
    fn blend(&self, frame: &mut Frame, mask: &Plane) -> Result<(), Box<dyn std::error::Error>>;
}
