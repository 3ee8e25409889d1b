use opencv::core::Mat;
use opencv::photo;

use crate::imaging::{mat, pixel_ops};
use crate::inpainting::domain::inpainter::Inpainter;
use crate::shared::constants::DEFAULT_INPAINT_RADIUS;
use crate::shared::frame::Frame;
use crate::shared::plane::Plane;

/// Fast-marching inpainter after Telea (2004), backed by OpenCV.
///
/// Masked pixels are filled in order of their distance from the mask
/// boundary from the known pixels within `radius`.
pub struct TeleaInpainter {
    radius: usize,
}

impl TeleaInpainter {
    pub fn new(radius: usize) -> Self {
        Self {
            radius: radius.max(1),
        }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }
}

impl Default for TeleaInpainter {
    fn default() -> Self {
        Self::new(DEFAULT_INPAINT_RADIUS)
    }
}

impl Inpainter for TeleaInpainter {
    fn inpaint(&self, frame: &Frame, mask: &Plane) -> Result<Frame, Box<dyn std::error::Error>> {
        pixel_ops::ensure_same_dimensions(frame.dimensions(), mask.dimensions())?;

        // Nothing to fill, or nothing to fill from.
        let masked = mask.count_nonzero();
        if masked == 0 || masked == mask.data().len() {
            return Ok(frame.clone());
        }

        let src = mat::frame_to_mat(frame)?;
        let mask = mat::plane_to_mat(mask)?;
        let mut dst = Mat::default();
        photo::inpaint(
            &src,
            &mask,
            &mut dst,
            self.radius as f64,
            photo::INPAINT_TELEA,
        )?;
        Ok(mat::mat_to_frame(&dst, frame.index())?)
    }
}
