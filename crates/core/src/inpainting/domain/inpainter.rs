use crate::shared::frame::Frame;
use crate::shared::plane::Plane;

/// Domain interface for reconstructing masked pixels from their surroundings.
///
/// Non-zero mask pixels are unknown and get replaced; all other pixels
/// must come back untouched. The returned frame keeps the input's index.
pub trait Inpainter: Send {
    fn inpaint(&self, frame: &Frame, mask: &Plane) -> Result<Frame, Box<dyn std::error::Error>>;
}
