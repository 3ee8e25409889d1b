use std::path::Path;

use crate::shared::frame::Frame;
use crate::video::domain::image_writer::ImageWriter;

/// Writes a single frame to an image file using the `image` crate.
///
/// The format follows the path's extension; the pipeline always uses PNG
/// so frames are stored losslessly.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        if frame.channels() != 3 {
            return Err(format!("Unsupported channel count: {}", frame.channels()).into());
        }
        let img = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or("Failed to create image from frame data")?;
        img.save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_frame(width: u32, height: u32, r: u8, g: u8, b: u8) -> Frame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..(width * height) {
            data.push(r);
            data.push(g);
            data.push(b);
        }
        Frame::new(data, width, height, 3, 0)
    }

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("0.png");
        let frame = make_frame(100, 80, 50, 100, 200);
        ImageFileWriter::new().write(&path, &frame).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_roundtrip_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.png");
        let mut frame = make_frame(16, 16, 50, 100, 200);
        frame.data_mut()[3..6].copy_from_slice(&[1, 2, 3]);
        ImageFileWriter::new().write(&path, &frame).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (16, 16));
        assert_eq!(img.as_raw(), frame.data());
    }

    #[test]
    fn test_non_rgb_frame_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.png");
        let frame = Frame::new(vec![0, 255, 255, 0], 2, 2, 1, 0);
        assert!(ImageFileWriter::new().write(&path, &frame).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_write_into_missing_directory_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let frame = make_frame(10, 10, 0, 0, 0);
        let path = dir.path().join("missing").join("0.png");
        assert!(ImageFileWriter::new().write(&path, &frame).is_err());
    }
}
