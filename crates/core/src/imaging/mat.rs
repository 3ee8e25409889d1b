use opencv::core::{self, Mat, Scalar};
use opencv::prelude::*;

use crate::shared::frame::Frame;
use crate::shared::plane::Plane;

/// Copies a plane into a new `CV_8UC1` matrix.
pub fn plane_to_mat(plane: &Plane) -> opencv::Result<Mat> {
    let mut mat = Mat::new_rows_cols_with_default(
        plane.height() as i32,
        plane.width() as i32,
        core::CV_8UC1,
        Scalar::all(0.0),
    )?;
    mat.data_bytes_mut()?.copy_from_slice(plane.data());
    Ok(mat)
}

/// Copies a single-channel 8-bit matrix back into a plane.
pub fn mat_to_plane(mat: &Mat) -> opencv::Result<Plane> {
    expect_type(mat, core::CV_8UC1)?;
    Ok(Plane::new(
        mat.data_bytes()?.to_vec(),
        mat.cols() as u32,
        mat.rows() as u32,
    ))
}

/// Copies a frame's packed bytes into a new 8-bit matrix with one channel
/// per frame channel. Channel order is kept as-is.
pub fn frame_to_mat(frame: &Frame) -> opencv::Result<Mat> {
    let typ = match frame.channels() {
        1 => core::CV_8UC1,
        3 => core::CV_8UC3,
        4 => core::CV_8UC4,
        n => {
            return Err(opencv::Error::new(
                core::StsBadArg,
                format!("unsupported channel count {n}"),
            ))
        }
    };
    let mut mat = Mat::new_rows_cols_with_default(
        frame.height() as i32,
        frame.width() as i32,
        typ,
        Scalar::all(0.0),
    )?;
    mat.data_bytes_mut()?.copy_from_slice(frame.data());
    Ok(mat)
}

/// Copies an 8-bit matrix into a frame carrying `index`.
pub fn mat_to_frame(mat: &Mat, index: usize) -> opencv::Result<Frame> {
    Ok(Frame::new(
        mat.data_bytes()?.to_vec(),
        mat.cols() as u32,
        mat.rows() as u32,
        mat.channels() as u8,
        index,
    ))
}

fn expect_type(mat: &Mat, typ: i32) -> opencv::Result<()> {
    if mat.typ() != typ {
        return Err(opencv::Error::new(
            core::StsUnmatchedFormats,
            format!("expected matrix type {typ}, got {}", mat.typ()),
        ));
    }
    Ok(())
}
