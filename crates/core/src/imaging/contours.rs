use opencv::core::{Point, Vector};
use opencv::imgproc;

use super::mat;
use crate::shared::plane::Plane;
use crate::shared::region::Region;

/// Bounding boxes of the external contours of a mask.
///
/// Every non-zero pixel is foreground. Blobs nested inside another blob's
/// hole are not reported. Boxes come back in the order the contour finder
/// emits them.
pub fn external_contour_regions(mask: &Plane) -> opencv::Result<Vec<Region>> {
    if mask.is_empty_mask() {
        return Ok(Vec::new());
    }

    let src = mat::plane_to_mat(mask)?;
    let mut contours = Vector::<Vector<Point>>::new();
    imgproc::find_contours(
        &src,
        &mut contours,
        imgproc::RETR_EXTERNAL,
        imgproc::CHAIN_APPROX_SIMPLE,
        Point::new(0, 0),
    )?;

    contours
        .iter()
        .map(|contour| {
            let rect = imgproc::bounding_rect(&contour)?;
            Ok(Region::new(
                rect.x as u32,
                rect.y as u32,
                rect.width as u32,
                rect.height as u32,
            ))
        })
        .collect()
}
