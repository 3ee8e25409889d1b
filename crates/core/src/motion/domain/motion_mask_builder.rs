use crate::imaging::gaussian;
use crate::imaging::morphology::{self, StructuringElement};
use crate::imaging::pixel_ops::{self, ImagingError};
use crate::motion::domain::background_model::BackgroundModel;
use crate::shared::config::CleanerConfig;
use crate::shared::frame::Frame;
use crate::shared::plane::Plane;

const MASK_ON: u8 = 255;

const DIFF_OPEN_ITERATIONS: usize = 2;
const DIFF_CLOSE_ITERATIONS: usize = 2;
const FOREGROUND_OPEN_ITERATIONS: usize = 3;
const FOREGROUND_CLOSE_ITERATIONS: usize = 3;
const FOREGROUND_ERODE_ITERATIONS: usize = 2;
const FOREGROUND_DILATE_ITERATIONS: usize = 2;
const COMBINED_OPEN_ITERATIONS: usize = 3;
const COMBINED_CLOSE_ITERATIONS: usize = 3;

/// Builds the moving-region mask for one pair of consecutive frames.
///
/// Two signals are combined: the thresholded difference between the
/// previous and current grayscale frames (catches edges of moving
/// objects immediately) and the background model's foreground (catches
/// whole objects once the model has warmed up). Each is cleaned with
/// morphology before they are OR-ed, then the union is cleaned again.
pub struct MotionMaskBuilder {
    diff_threshold: u8,
    diff_blur_kernel: Vec<f32>,
    element: StructuringElement,
    blur_temp: Vec<f32>,
}

impl MotionMaskBuilder {
    pub fn new(config: &CleanerConfig) -> Result<Self, ImagingError> {
        let (kw, kh) = config.morph_kernel;
        Ok(Self {
            diff_threshold: config.diff_threshold,
            diff_blur_kernel: gaussian::gaussian_kernel_1d(config.diff_blur_kernel),
            element: StructuringElement::ellipse(kw, kh)?,
            blur_temp: Vec::new(),
        })
    }

    /// Returns a binary mask (0 / 255) with the frame's dimensions.
    ///
    /// Updates `model` with `frame`, so it must be called once per frame
    /// in decode order.
    pub fn build(
        &mut self,
        previous: &Plane,
        current: &Plane,
        frame: &Frame,
        model: &mut dyn BackgroundModel,
    ) -> Result<Plane, Box<dyn std::error::Error>> {
        pixel_ops::ensure_same_dimensions(current.dimensions(), frame.dimensions())?;

        let diff = self.difference_mask(previous, current)?;

        let foreground = model.apply(frame)?;
        pixel_ops::ensure_same_dimensions(frame.dimensions(), foreground.dimensions())?;
        let foreground = self.refine_foreground(&foreground)?;

        let combined = pixel_ops::bitwise_or(&diff, &foreground)?;
        let combined = morphology::open(&combined, &self.element, COMBINED_OPEN_ITERATIONS)?;
        let combined = morphology::close(&combined, &self.element, COMBINED_CLOSE_ITERATIONS)?;

        Ok(binarize(combined))
    }

    /// Frame-difference component: threshold, smooth, open, close.
    ///
    /// The Gaussian step leaves soft edges, so the result is not binary.
    pub fn difference_mask(
        &mut self,
        previous: &Plane,
        current: &Plane,
    ) -> Result<Plane, ImagingError> {
        let diff = pixel_ops::abs_diff(current, previous)?;
        let mut diff = pixel_ops::threshold_binary(&diff, self.diff_threshold, MASK_ON);

        let (w, h) = (diff.width() as usize, diff.height() as usize);
        gaussian::separable_gaussian_blur_with_kernel(
            diff.data_mut(),
            w,
            h,
            1,
            &self.diff_blur_kernel,
            &mut self.blur_temp,
        );

        let diff = morphology::open(&diff, &self.element, DIFF_OPEN_ITERATIONS)?;
        Ok(morphology::close(&diff, &self.element, DIFF_CLOSE_ITERATIONS)?)
    }

    /// Background-model component: open, close, erode, dilate.
    pub fn refine_foreground(&self, foreground: &Plane) -> Result<Plane, ImagingError> {
        let fg = morphology::open(foreground, &self.element, FOREGROUND_OPEN_ITERATIONS)?;
        let fg = morphology::close(&fg, &self.element, FOREGROUND_CLOSE_ITERATIONS)?;
        let fg = morphology::erode(&fg, &self.element, FOREGROUND_ERODE_ITERATIONS)?;
        Ok(morphology::dilate(&fg, &self.element, FOREGROUND_DILATE_ITERATIONS)?)
    }
}

fn binarize(mut plane: Plane) -> Plane {
    for v in plane.data_mut() {
        if *v != 0 {
            *v = MASK_ON;
        }
    }
    plane
}
