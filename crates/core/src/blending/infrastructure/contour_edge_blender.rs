use std::cell::RefCell;

use crate::blending::domain::edge_blender::EdgeBlender;
use crate::imaging::contours;
use crate::imaging::gaussian::{self, RoiRect};
use crate::imaging::pixel_ops;
use crate::shared::constants::DEFAULT_EDGE_BLUR_KERNEL;
use crate::shared::frame::Frame;
use crate::shared::plane::Plane;

/// Blurs the bounding box of every external contour of the mask.
///
/// Each box is extracted, blurred on its own with reflected borders and
/// written back over the frame. Boxes are processed one after another,
/// so where they overlap the later pass blurs pixels that are already
/// blurred.
pub struct ContourEdgeBlender {
    kernel: Vec<f32>,
    roi_buf: RefCell<Vec<u8>>,
    blur_temp: RefCell<Vec<f32>>,
}

impl ContourEdgeBlender {
    pub fn new(kernel_size: usize) -> Self {
        Self {
            kernel: gaussian::gaussian_kernel_1d(kernel_size),
            roi_buf: RefCell::new(Vec::new()),
            blur_temp: RefCell::new(Vec::new()),
        }
    }
}

impl Default for ContourEdgeBlender {
    fn default() -> Self {
        Self::new(DEFAULT_EDGE_BLUR_KERNEL)
    }
}

impl EdgeBlender for ContourEdgeBlender {
    fn blend(&self, frame: &mut Frame, mask: &Plane) -> Result<(), Box<dyn std::error::Error>> {
        pixel_ops::ensure_same_dimensions(frame.dimensions(), mask.dimensions())?;

        let regions = contours::external_contour_regions(mask)?;
        log::trace!("Blending {} region(s) in frame {}", regions.len(), frame.index());

        let (width, height) = frame.dimensions();
        let fw = width as usize;
        let channels = frame.channels() as usize;
        let data = frame.data_mut();

        // Reuse buffers across regions
        let mut roi = self.roi_buf.borrow_mut();
        let mut temp = self.blur_temp.borrow_mut();

        for r in regions {
            let r = r.clamp_to(width, height);
            if r.is_empty() {
                continue;
            }
            let rect = RoiRect {
                x: r.x as usize,
                y: r.y as usize,
                w: r.width as usize,
                h: r.height as usize,
            };

            gaussian::extract_roi(data, fw, channels, rect, &mut roi);
            gaussian::separable_gaussian_blur_with_kernel(
                &mut roi,
                rect.w,
                rect.h,
                channels,
                &self.kernel,
                &mut temp,
            );
            gaussian::write_roi_back(data, &roi, fw, channels, rect);
        }

        Ok(())
    }
}
