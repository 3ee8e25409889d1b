use opencv::core::{self, Mat, Point, Size};
use opencv::imgproc;

use super::mat;
use crate::shared::plane::Plane;

/// Elliptical structuring element, anchored at its centre.
pub struct StructuringElement {
    kernel: Mat,
}

impl StructuringElement {
    /// Ellipse inscribed in a `width` x `height` box. A 3x3 ellipse is a
    /// cross.
    pub fn ellipse(width: usize, height: usize) -> opencv::Result<Self> {
        let kernel = imgproc::get_structuring_element(
            imgproc::MORPH_ELLIPSE,
            Size::new(width as i32, height as i32),
            Point::new(-1, -1),
        )?;
        Ok(Self { kernel })
    }
}

/// Erodes `iterations` times; cells outside the plane never win.
pub fn erode(
    plane: &Plane,
    element: &StructuringElement,
    iterations: usize,
) -> opencv::Result<Plane> {
    apply(plane, element, imgproc::MORPH_ERODE, iterations)
}

pub fn dilate(
    plane: &Plane,
    element: &StructuringElement,
    iterations: usize,
) -> opencv::Result<Plane> {
    apply(plane, element, imgproc::MORPH_DILATE, iterations)
}

/// `iterations` erosions followed by as many dilations.
pub fn open(
    plane: &Plane,
    element: &StructuringElement,
    iterations: usize,
) -> opencv::Result<Plane> {
    apply(plane, element, imgproc::MORPH_OPEN, iterations)
}

/// `iterations` dilations followed by as many erosions.
pub fn close(
    plane: &Plane,
    element: &StructuringElement,
    iterations: usize,
) -> opencv::Result<Plane> {
    apply(plane, element, imgproc::MORPH_CLOSE, iterations)
}

fn apply(
    plane: &Plane,
    element: &StructuringElement,
    op: i32,
    iterations: usize,
) -> opencv::Result<Plane> {
    if iterations == 0 || plane.data().is_empty() {
        return Ok(plane.clone());
    }

    let src = mat::plane_to_mat(plane)?;
    let mut dst = Mat::default();
    imgproc::morphology_ex(
        &src,
        &mut dst,
        op,
        &element.kernel,
        Point::new(-1, -1),
        iterations as i32,
        core::BORDER_CONSTANT,
        imgproc::morphology_default_border_value()?,
    )?;
    mat::mat_to_plane(&dst)
}
