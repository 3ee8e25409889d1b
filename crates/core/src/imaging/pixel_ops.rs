use thiserror::Error;

use crate::shared::plane::Plane;

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[error(transparent)]
    OpenCv(#[from] opencv::Error),
}

pub fn ensure_same_dimensions(
    expected: (u32, u32),
    actual: (u32, u32),
) -> Result<(), ImagingError> {
    if expected != actual {
        return Err(ImagingError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

/// Per-pixel `|a - b|`.
pub fn abs_diff(a: &Plane, b: &Plane) -> Result<Plane, ImagingError> {
    ensure_same_dimensions(a.dimensions(), b.dimensions())?;
    let data = a
        .data()
        .iter()
        .zip(b.data())
        .map(|(&x, &y)| x.abs_diff(y))
        .collect();
    Ok(Plane::new(data, a.width(), a.height()))
}

/// `max_value` where the pixel is strictly above `threshold`, else 0.
pub fn threshold_binary(plane: &Plane, threshold: u8, max_value: u8) -> Plane {
    let data = plane
        .data()
        .iter()
        .map(|&v| if v > threshold { max_value } else { 0 })
        .collect();
    Plane::new(data, plane.width(), plane.height())
}

/// Bitwise OR of two planes.
pub fn bitwise_or(a: &Plane, b: &Plane) -> Result<Plane, ImagingError> {
    ensure_same_dimensions(a.dimensions(), b.dimensions())?;
    let data = a.data().iter().zip(b.data()).map(|(&x, &y)| x | y).collect();
    Ok(Plane::new(data, a.width(), a.height()))
}
